//! Explicit conversions, `value:Type`.
//!
//! Arrays are checked in two phases: first the sizes (positional, or a
//! reshape that keeps the element count), then the element types under the
//! scalar rules.

use crate::{
    ast::expressions::ConversionExpr,
    errors::errors::ErrorImpl,
    types::{
        coercion::check_scalar_conversion,
        types::{ConcreteArrayType, DimSpec, Type},
    },
    Span,
};

use super::context::AnalysisContext;

pub fn resolve_conversion_expression(
    ctx: &mut dyn AnalysisContext,
    conversion: &ConversionExpr,
    span: &Span,
) -> Type {
    let source = ctx.analyze_expression(&conversion.value, None);
    let target = match conversion.target.resolve() {
        Ok(target) => target,
        Err(error) => {
            ctx.report_error(error, span);
            return Type::Unknown;
        }
    };

    if source.is_unknown() {
        return target;
    }

    match validate_conversion(&source, &target) {
        Ok(ty) => ty,
        Err(error) => {
            ctx.report_error(error, span);
            Type::Unknown
        }
    }
}

/// Result type of converting `source` to `target`, with `_` dimensions filled in.
pub fn validate_conversion(source: &Type, target: &Type) -> Result<Type, ErrorImpl> {
    match (source, target) {
        (Type::ComptimeArray(array), Type::ConcreteArray(to)) => {
            convert_array(source, array.element(), array.dims(), to)
        }
        (Type::ConcreteArray(array), Type::ConcreteArray(to)) => match array.fixed_dims() {
            Some(dims) => convert_array(source, array.element(), &dims, to),
            None => Ok(target.clone()),
        },
        (from, to) if from.is_array() || to.is_array() => Err(ErrorImpl::InvalidConversion {
            from: from.to_string(),
            to: to.to_string(),
            guidance: String::from("arrays and scalars never convert into each other"),
        }),
        (from, to) => check_scalar_conversion(from, to)
            .map(|()| to.clone())
            .map_err(|denial| ErrorImpl::InvalidConversion {
                from: from.to_string(),
                to: to.to_string(),
                guidance: denial.guidance().to_string(),
            }),
    }
}

fn convert_array(
    source: &Type,
    element: &Type,
    dims: &[usize],
    target: &ConcreteArrayType,
) -> Result<Type, ErrorImpl> {
    let resolved = if dims.len() == target.dims().len() {
        positional_dims(dims, target.dims())?
    } else {
        reshaped_dims(dims, target.dims())?
    };

    check_scalar_conversion(element, target.element()).map_err(|denial| {
        ErrorImpl::InvalidConversion {
            from: source.to_string(),
            to: Type::ConcreteArray(target.clone()).to_string(),
            guidance: denial.guidance().to_string(),
        }
    })?;

    Ok(Type::concrete_array(
        target.element().clone(),
        resolved.into_iter().map(DimSpec::Fixed).collect(),
    ))
}

fn positional_dims(dims: &[usize], target: &[DimSpec]) -> Result<Vec<usize>, ErrorImpl> {
    dims.iter()
        .zip(target)
        .enumerate()
        .map(|(dimension, (actual, wanted))| match wanted {
            DimSpec::Inferred => Ok(*actual),
            DimSpec::Fixed(expected) if expected == actual => Ok(*actual),
            DimSpec::Fixed(expected) => Err(ErrorImpl::ArrayDimensionMismatch {
                dimension,
                expected: *expected,
                actual: *actual,
            }),
        })
        .collect()
}

/// Number of elements in an array with the given sizes, `None` when it
/// does not fit in `usize`.
fn element_count(sizes: impl IntoIterator<Item = usize>) -> Option<usize> {
    sizes
        .into_iter()
        .try_fold(1usize, |count, size| count.checked_mul(size))
}

/// `[2][_][4]` as `2 * _ * 4`.
fn describe_sizes(target: &[DimSpec]) -> String {
    target
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" * ")
}

/// Flatten or reshape: the element count is kept, and at most one `_`
/// takes whatever the fixed dimensions leave over.
fn reshaped_dims(dims: &[usize], target: &[DimSpec]) -> Result<Vec<usize>, ErrorImpl> {
    let too_large = |actual: usize| ErrorImpl::ArrayElementCount {
        expected: describe_sizes(target),
        actual,
    };

    let total = element_count(dims.iter().copied()).ok_or_else(|| too_large(usize::MAX))?;
    let inferred = target
        .iter()
        .filter(|dim| **dim == DimSpec::Inferred)
        .count();
    let fixed = element_count(target.iter().filter_map(|dim| match dim {
        DimSpec::Fixed(size) => Some(*size),
        DimSpec::Inferred => None,
    }))
    .ok_or_else(|| too_large(total))?;

    let fill = match inferred {
        0 if fixed == total => 0,
        0 => {
            return Err(ErrorImpl::ArrayElementCount {
                expected: fixed.to_string(),
                actual: total,
            })
        }
        1 if fixed != 0 && total % fixed == 0 => total / fixed,
        1 => {
            return Err(ErrorImpl::ArrayElementCount {
                expected: format!("a multiple of {}", fixed),
                actual: total,
            })
        }
        _ => {
            return Err(ErrorImpl::AmbiguousResolution {
                reason: String::from("reshaping can infer at most one dimension"),
            })
        }
    };

    Ok(target
        .iter()
        .map(|dim| match dim {
            DimSpec::Fixed(size) => *size,
            DimSpec::Inferred => fill,
        })
        .collect())
}
