//! Implicit coercion, precision loss and explicit conversion rules.
//!
//! Implicit coercion only ever flows out of comptime types. Between two
//! concrete types the user must always write `value:Type`.

use super::types::{ComptimeArrayType, ConcreteArrayType, DimSpec, Type};

/// Whether a value of type `from` may be used where `to` is expected
/// without any conversion syntax.
pub fn can_coerce(from: &Type, to: &Type) -> bool {
    if from == to {
        return true;
    }

    match (from, to) {
        (Type::ComptimeInt, Type::I32 | Type::I64 | Type::F32 | Type::F64) => true,
        (Type::ComptimeFloat, Type::F32 | Type::F64) => true,
        (Type::ComptimeArray(source), Type::ConcreteArray(target)) => {
            source.can_materialize_to(target)
        }
        // `[_]i32` is not a different type from `[3]i32`, only an unfinished one
        (Type::ConcreteArray(source), Type::ConcreteArray(target)) => {
            source.element() == target.element() && dims_fit(source.dims(), target.dims())
        }
        _ => false,
    }
}

fn dims_fit(source: &[DimSpec], target: &[DimSpec]) -> bool {
    source.len() == target.len()
        && source
            .iter()
            .zip(target)
            .all(|(s, t)| *t == DimSpec::Inferred || s == t)
}

/// Whether converting `from` to `to` can lose information: narrowing,
/// truncating a float, or squeezing a wide value into a single-precision float.
pub fn is_precision_loss(from: &Type, to: &Type) -> bool {
    match (from, to) {
        (Type::I64, Type::I32) => true,
        (Type::F64, Type::F32) => true,
        (Type::I64, Type::F32) => true,
        (Type::F32 | Type::F64 | Type::ComptimeFloat, Type::I32 | Type::I64) => true,
        _ => false,
    }
}

/// Whether `from` may adapt to `to` as an operand of an operation whose
/// result type the user spelled out.
///
/// Wider than `can_coerce`: a concrete operand may widen to an annotated
/// result type, as long as nothing is lost on the way.
pub fn can_adapt(from: &Type, to: &Type) -> bool {
    if can_coerce(from, to) {
        return true;
    }

    from.is_concrete_numeric() && to.is_concrete_numeric() && !is_precision_loss(from, to)
}

/// Why an explicit scalar conversion was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionDenial {
    ToBool,
    ToString,
    FromBool,
    FromString,
    NotConvertible,
}

impl ConversionDenial {
    pub fn guidance(&self) -> &'static str {
        match self {
            ConversionDenial::ToBool => "use an explicit comparison such as `value != 0`",
            ConversionDenial::ToString => "use a formatting function to build a string",
            ConversionDenial::FromBool => "use a conditional expression to pick a value",
            ConversionDenial::FromString => "use a parsing function to read a value",
            ConversionDenial::NotConvertible => "these types have no conversion between them",
        }
    }
}

/// Legality of `value:to` for scalars.
///
/// Every numeric type converts to every other numeric type explicitly, even
/// when `can_coerce` refuses the pair.
pub fn check_scalar_conversion(from: &Type, to: &Type) -> Result<(), ConversionDenial> {
    if from == to {
        return Ok(());
    }

    match (from, to) {
        (_, Type::Bool) => Err(ConversionDenial::ToBool),
        (_, Type::String) => Err(ConversionDenial::ToString),
        (Type::Bool, _) => Err(ConversionDenial::FromBool),
        (Type::String, _) => Err(ConversionDenial::FromString),
        (from, to) if from.is_numeric() && to.is_concrete_numeric() => Ok(()),
        _ => Err(ConversionDenial::NotConvertible),
    }
}

/// A comptime array that cannot commit to a concrete array type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializationError {
    DimensionCount { expected: usize, actual: usize },
    DimensionSize { dimension: usize, expected: usize, actual: usize },
    Element { expected: Type, actual: Type },
}

impl ComptimeArrayType {
    pub fn can_materialize_to(&self, target: &ConcreteArrayType) -> bool {
        self.materialize(target).is_ok()
    }

    /// Commits this literal to `target`, filling in every `_` dimension.
    pub fn materialize(&self, target: &ConcreteArrayType) -> Result<Type, MaterializationError> {
        if self.dims().len() != target.dims().len() {
            return Err(MaterializationError::DimensionCount {
                expected: target.dims().len(),
                actual: self.dims().len(),
            });
        }

        let mut resolved = Vec::with_capacity(self.dims().len());
        for (dimension, (actual, wanted)) in self.dims().iter().zip(target.dims()).enumerate() {
            match wanted {
                DimSpec::Inferred => resolved.push(DimSpec::Fixed(*actual)),
                DimSpec::Fixed(expected) if expected == actual => {
                    resolved.push(DimSpec::Fixed(*actual))
                }
                DimSpec::Fixed(expected) => {
                    return Err(MaterializationError::DimensionSize {
                        dimension,
                        expected: *expected,
                        actual: *actual,
                    })
                }
            }
        }

        if !can_coerce(self.element(), target.element()) {
            return Err(MaterializationError::Element {
                expected: target.element().clone(),
                actual: self.element().clone(),
            });
        }

        Ok(Type::concrete_array(target.element().clone(), resolved))
    }
}
