use std::fmt::Display;

use thiserror::Error;

/// One dimension of a concrete array annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimSpec {
    Fixed(usize),
    /// `_` - takes its size from the value it is bound to.
    Inferred,
}

impl Display for DimSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DimSpec::Fixed(size) => write!(f, "{}", size),
            DimSpec::Inferred => write!(f, "_"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutability {
    Immutable,
    Mutable,
}

impl Mutability {
    pub fn is_mutable(&self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

impl Display for Mutability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mutability::Immutable => write!(f, "val"),
            Mutability::Mutable => write!(f, "mut"),
        }
    }
}

/// Raised when an array type is built with an element the variant cannot hold.
///
/// This is a compiler bug, never a user error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("concrete array element must be a concrete scalar type, got {element}")]
    InvalidConcreteElement { element: String },
    #[error("comptime array element must be comptime_int or comptime_float, got {element}")]
    InvalidComptimeElement { element: String },
    #[error("array types need at least one dimension")]
    EmptyDimensions,
}

/// A fixed-width array such as `[3]i32` or `[_][4]f64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConcreteArrayType {
    element: Box<Type>,
    dims: Vec<DimSpec>,
}

impl ConcreteArrayType {
    pub fn new(element: Type, dims: Vec<DimSpec>) -> Result<Self, ConstructionError> {
        if !element.is_concrete_scalar() {
            return Err(ConstructionError::InvalidConcreteElement {
                element: element.to_string(),
            });
        }
        if dims.is_empty() {
            return Err(ConstructionError::EmptyDimensions);
        }

        Ok(ConcreteArrayType {
            element: Box::new(element),
            dims,
        })
    }

    pub fn element(&self) -> &Type {
        &self.element
    }

    pub fn dims(&self) -> &[DimSpec] {
        &self.dims
    }

    /// Sizes of every dimension, or `None` while any of them is still `_`.
    pub fn fixed_dims(&self) -> Option<Vec<usize>> {
        self.dims
            .iter()
            .map(|dim| match dim {
                DimSpec::Fixed(size) => Some(*size),
                DimSpec::Inferred => None,
            })
            .collect()
    }

    pub fn has_inferred_dims(&self) -> bool {
        self.dims.contains(&DimSpec::Inferred)
    }
}

/// An array literal whose elements have not committed to a concrete type yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComptimeArrayType {
    element: Box<Type>,
    dims: Vec<usize>,
}

impl ComptimeArrayType {
    pub fn new(element: Type, dims: Vec<usize>) -> Result<Self, ConstructionError> {
        if !matches!(element, Type::ComptimeInt | Type::ComptimeFloat) {
            return Err(ConstructionError::InvalidComptimeElement {
                element: element.to_string(),
            });
        }
        if dims.is_empty() {
            return Err(ConstructionError::EmptyDimensions);
        }

        Ok(ComptimeArrayType {
            element: Box::new(element),
            dims,
        })
    }

    pub fn element(&self) -> &Type {
        &self.element
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }
}

/// Every type a value can have during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    I32,
    I64,
    F32,
    F64,
    Bool,
    String,
    Void,
    /// Integer literal that has not picked a width yet.
    ComptimeInt,
    /// Float literal that has not picked a width yet.
    ComptimeFloat,
    /// Produced after a diagnostic was recorded. Consumers must not report
    /// a second error against it.
    Unknown,
    /// Declared with `undef` and not assigned yet.
    Uninitialized,
    ConcreteArray(ConcreteArrayType),
    ComptimeArray(ComptimeArrayType),
}

impl Type {
    /// Builds a concrete array type.
    ///
    /// # Panics
    ///
    /// Panics when `element` is not a concrete scalar or `dims` is empty.
    pub fn concrete_array(element: Type, dims: Vec<DimSpec>) -> Type {
        match ConcreteArrayType::new(element, dims) {
            Ok(array) => Type::ConcreteArray(array),
            Err(error) => panic!("{}", error),
        }
    }

    /// Builds a comptime array type.
    ///
    /// # Panics
    ///
    /// Panics when `element` is not `ComptimeInt`/`ComptimeFloat` or `dims` is empty.
    pub fn comptime_array(element: Type, dims: Vec<usize>) -> Type {
        match ComptimeArrayType::new(element, dims) {
            Ok(array) => Type::ComptimeArray(array),
            Err(error) => panic!("{}", error),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Type::I32 | Type::I64 | Type::F32 | Type::F64 | Type::ComptimeInt | Type::ComptimeFloat
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::F32 | Type::F64 | Type::ComptimeFloat)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::I32 | Type::I64 | Type::ComptimeInt)
    }

    pub fn is_comptime(&self) -> bool {
        matches!(
            self,
            Type::ComptimeInt | Type::ComptimeFloat | Type::ComptimeArray(_)
        )
    }

    /// Runtime-representable value types, arrays of them included.
    pub fn is_concrete(&self) -> bool {
        self.is_concrete_scalar() || matches!(self, Type::ConcreteArray(_))
    }

    pub fn is_concrete_scalar(&self) -> bool {
        matches!(
            self,
            Type::I32 | Type::I64 | Type::F32 | Type::F64 | Type::Bool | Type::String
        )
    }

    pub fn is_concrete_numeric(&self) -> bool {
        self.is_numeric() && !self.is_comptime()
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::ConcreteArray(_) | Type::ComptimeArray(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::I32 => write!(f, "i32"),
            Type::I64 => write!(f, "i64"),
            Type::F32 => write!(f, "f32"),
            Type::F64 => write!(f, "f64"),
            Type::Bool => write!(f, "bool"),
            Type::String => write!(f, "string"),
            Type::Void => write!(f, "void"),
            Type::ComptimeInt => write!(f, "comptime_int"),
            Type::ComptimeFloat => write!(f, "comptime_float"),
            Type::Unknown => write!(f, "unknown"),
            Type::Uninitialized => write!(f, "uninitialized"),
            Type::ConcreteArray(array) => {
                for dim in array.dims() {
                    write!(f, "[{}]", dim)?;
                }
                write!(f, "{}", array.element())
            }
            Type::ComptimeArray(array) => {
                for dim in array.dims() {
                    write!(f, "[{}]", dim)?;
                }
                write!(f, "{}", array.element())
            }
        }
    }
}

/// Promotes two comptime scalars: any float operand makes the result float.
pub fn promote_comptime(a: &Type, b: &Type) -> Option<Type> {
    match (a, b) {
        (Type::ComptimeInt, Type::ComptimeInt) => Some(Type::ComptimeInt),
        (Type::ComptimeInt | Type::ComptimeFloat, Type::ComptimeInt | Type::ComptimeFloat) => {
            Some(Type::ComptimeFloat)
        }
        _ => None,
    }
}

/// The wider of two numeric types.
///
/// Float dominates integer and 64 bits dominate 32. A comptime operand
/// yields to a concrete one. `None` when either side is not numeric.
pub fn widen(a: &Type, b: &Type) -> Option<Type> {
    if !a.is_numeric() || !b.is_numeric() {
        return None;
    }
    if a == b {
        return Some(a.clone());
    }

    match (a.is_comptime(), b.is_comptime()) {
        (true, true) => promote_comptime(a, b),
        (true, false) => Some(b.clone()),
        (false, true) => Some(a.clone()),
        (false, false) => match (a.is_float(), b.is_float()) {
            // distinct floats: one of them is f64
            (true, true) => Some(Type::F64),
            (true, false) => Some(a.clone()),
            (false, true) => Some(b.clone()),
            (false, false) => Some(Type::I64),
        },
    }
}
