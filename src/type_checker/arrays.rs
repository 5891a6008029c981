use crate::{
    ast::ast::Expr,
    errors::errors::ErrorImpl,
    types::{
        coercion::can_coerce,
        types::{promote_comptime, ConcreteArrayType, DimSpec, Type},
    },
    Span,
};

use super::{
    context::AnalysisContext,
    type_checker::{type_check_expr, TypeChecker},
};

/// Element type and sizes of one array literal element.
struct Shape {
    element: Type,
    dims: Vec<usize>,
}

impl Shape {
    fn of(ty: &Type) -> Self {
        match ty {
            Type::ComptimeArray(array) => Shape {
                element: array.element().clone(),
                dims: array.dims().to_vec(),
            },
            Type::ConcreteArray(array) => Shape {
                element: array.element().clone(),
                dims: array.fixed_dims().unwrap_or_default(),
            },
            scalar => Shape {
                element: scalar.clone(),
                dims: vec![],
            },
        }
    }
}

/// What each element of an array of type `array` is expected to be.
fn element_target(array: &ConcreteArrayType) -> Type {
    match array.dims() {
        [_] => array.element().clone(),
        [_, inner @ ..] => ConcreteArrayType::new(array.element().clone(), inner.to_vec())
            .map(Type::ConcreteArray)
            .unwrap_or(Type::Unknown),
        [] => Type::Unknown,
    }
}

pub fn type_check_array_literal(
    type_checker: &mut TypeChecker,
    elements: &[Expr],
    span: &Span,
    target: Option<&Type>,
) -> Type {
    let target_array = match target {
        Some(Type::ConcreteArray(array)) => Some(array),
        _ => None,
    };

    if elements.is_empty() {
        let Some(array) = target_array else {
            type_checker.report_error(
                ErrorImpl::AmbiguousResolution {
                    reason: String::from("empty array literal needs an explicit type"),
                },
                span,
            );
            return Type::Unknown;
        };
        let mut dims = array.dims().to_vec();
        dims[0] = DimSpec::Fixed(0);
        return Type::concrete_array(array.element().clone(), dims);
    }

    let item_target = target_array.map(element_target);
    let types: Vec<Type> = elements
        .iter()
        .map(|element| type_check_expr(type_checker, element, item_target.as_ref()))
        .collect();

    match combine_elements(&types) {
        Ok(ty) => ty,
        Err(error) => {
            type_checker.report_error(error, span);
            Type::Unknown
        }
    }
}

/// Type of an array literal whose elements have the given types.
pub fn combine_elements(types: &[Type]) -> Result<Type, ErrorImpl> {
    if types.is_empty() || types.iter().any(Type::is_unknown) {
        return Ok(Type::Unknown);
    }

    let shapes: Vec<Shape> = types.iter().map(Shape::of).collect();
    let first = &shapes[0];

    for shape in &shapes[1..] {
        if shape.dims.len() != first.dims.len() {
            return Err(ErrorImpl::ArrayDimensionCount {
                expected: first.dims.len() + 1,
                actual: shape.dims.len() + 1,
            });
        }
        if let Some((dimension, (expected, actual))) = first
            .dims
            .iter()
            .zip(&shape.dims)
            .enumerate()
            .find(|(_, (expected, actual))| expected != actual)
        {
            return Err(ErrorImpl::ArrayDimensionMismatch {
                dimension: dimension + 1,
                expected: *expected,
                actual: *actual,
            });
        }
    }

    let dims: Vec<usize> = std::iter::once(shapes.len())
        .chain(first.dims.iter().copied())
        .collect();

    if shapes.iter().all(|shape| shape.element.is_comptime()) {
        let mut element = first.element.clone();
        for shape in &shapes[1..] {
            element = promote_comptime(&element, &shape.element).ok_or_else(|| {
                ErrorImpl::TypeMismatch {
                    expected: element.to_string(),
                    received: shape.element.to_string(),
                }
            })?;
        }
        return Ok(Type::comptime_array(element, dims));
    }

    let Some(concrete) = shapes
        .iter()
        .map(|shape| &shape.element)
        .find(|element| !element.is_comptime())
    else {
        return Ok(Type::Unknown);
    };

    if !concrete.is_concrete_scalar() {
        return Err(ErrorImpl::TypeMismatch {
            expected: String::from("array element"),
            received: concrete.to_string(),
        });
    }

    for shape in &shapes {
        if shape.element.is_comptime() {
            if !can_coerce(&shape.element, concrete) {
                return Err(ErrorImpl::TypeMismatch {
                    expected: concrete.to_string(),
                    received: shape.element.to_string(),
                });
            }
        } else if shape.element != *concrete {
            return Err(ErrorImpl::MixedTypeOperation {
                operator: String::from("[]"),
                left: concrete.to_string(),
                right: shape.element.to_string(),
            });
        }
    }

    Ok(Type::concrete_array(
        concrete.clone(),
        dims.into_iter().map(DimSpec::Fixed).collect(),
    ))
}
