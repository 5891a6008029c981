use crate::{
    ast::{
        ast::{Expr, ExprKind},
        statements::{AssignmentStmt, VarDeclStmt},
    },
    errors::errors::ErrorImpl,
    types::{
        coercion::{can_coerce, is_precision_loss, MaterializationError},
        literals::validate_literal_range,
        types::{DimSpec, Type},
    },
};

use super::{
    context::AnalysisContext,
    symbols::Symbol,
    type_checker::{type_check_expr, TypeChecker},
    typed_ast::ResolvedBinding,
};

/// Whether a value of type `value_ty`, produced by `value`, may be stored
/// where `target` is expected.
///
/// Shared by declarations, assignments, returns and call arguments. `Unknown`
/// on either side is accepted silently since it was already reported.
pub fn check_assignable(value_ty: &Type, target: &Type, value: &Expr) -> Result<(), ErrorImpl> {
    if value_ty.is_unknown() || target.is_unknown() || value_ty == target {
        return Ok(());
    }
    if *value_ty == Type::Void {
        return Err(ErrorImpl::VoidValue);
    }

    match (value_ty, target) {
        (Type::ComptimeArray(source), Type::ConcreteArray(array)) => {
            return match source.materialize(array) {
                Ok(_) => check_element_ranges(value, array.element()),
                Err(MaterializationError::DimensionCount { expected, actual }) => {
                    Err(ErrorImpl::ArrayDimensionCount { expected, actual })
                }
                Err(MaterializationError::DimensionSize {
                    dimension,
                    expected,
                    actual,
                }) => Err(ErrorImpl::ArrayDimensionMismatch {
                    dimension,
                    expected,
                    actual,
                }),
                Err(MaterializationError::Element { expected, actual }) => {
                    if is_precision_loss(&actual, &expected) {
                        Err(precision_loss(value_ty, target, value))
                    } else {
                        Err(mismatch(value_ty, target))
                    }
                }
            };
        }
        (Type::ConcreteArray(source), Type::ConcreteArray(array))
            if source.element() == array.element() && !can_coerce(value_ty, target) =>
        {
            return Err(array_dimension_error(source.dims(), array.dims())
                .unwrap_or_else(|| mismatch(value_ty, target)));
        }
        _ => {}
    }

    if can_coerce(value_ty, target) {
        if let Some(literal) = value.literal_value() {
            validate_literal_range(literal, target, &value.to_string())?;
        }
        return Ok(());
    }

    if is_precision_loss(value_ty, target) {
        return Err(precision_loss(value_ty, target, value));
    }

    Err(mismatch(value_ty, target))
}

fn mismatch(value_ty: &Type, target: &Type) -> ErrorImpl {
    ErrorImpl::TypeMismatch {
        expected: target.to_string(),
        received: value_ty.to_string(),
    }
}

fn precision_loss(value_ty: &Type, target: &Type, value: &Expr) -> ErrorImpl {
    ErrorImpl::PrecisionLoss {
        from: value_ty.to_string(),
        to: target.to_string(),
        suggestion: value.to_conversion(target),
    }
}

fn array_dimension_error(source: &[DimSpec], target: &[DimSpec]) -> Option<ErrorImpl> {
    if source.len() != target.len() {
        return Some(ErrorImpl::ArrayDimensionCount {
            expected: target.len(),
            actual: source.len(),
        });
    }

    source
        .iter()
        .zip(target)
        .enumerate()
        .find_map(|(dimension, dims)| match dims {
            (DimSpec::Fixed(actual), DimSpec::Fixed(expected)) if actual != expected => {
                Some(ErrorImpl::ArrayDimensionMismatch {
                    dimension,
                    expected: *expected,
                    actual: *actual,
                })
            }
            _ => None,
        })
}

/// Range checks every literal leaf of an array literal against `element`.
fn check_element_ranges(value: &Expr, element: &Type) -> Result<(), ErrorImpl> {
    match &value.kind {
        ExprKind::Array(array) => array
            .elements
            .iter()
            .try_for_each(|item| check_element_ranges(item, element)),
        _ => match value.literal_value() {
            Some(literal) => Ok(validate_literal_range(literal, element, &value.to_string())?),
            None => Ok(()),
        },
    }
}

/// Fills the `_` dimensions of a declared array type from its value.
fn resolve_inferred_dims(declared: &Type, value_ty: &Type) -> Type {
    let Type::ConcreteArray(array) = declared else {
        return declared.clone();
    };
    if !array.has_inferred_dims() {
        return declared.clone();
    }

    match value_ty {
        Type::ComptimeArray(source) => source
            .materialize(array)
            .unwrap_or_else(|_| declared.clone()),
        Type::ConcreteArray(source)
            if !source.has_inferred_dims() && can_coerce(value_ty, declared) =>
        {
            value_ty.clone()
        }
        _ => declared.clone(),
    }
}

pub fn type_check_var_decl(type_checker: &mut TypeChecker, decl: &VarDeclStmt) {
    let annotated = decl.explicit_type.as_ref().map(|annotation| {
        annotation.resolve().unwrap_or_else(|error| {
            type_checker.report_error(error, &decl.span);
            Type::Unknown
        })
    });

    let (ty, initialized) = match (&decl.value, annotated) {
        (None, None) => {
            type_checker.report_error(
                ErrorImpl::ExpectedExplicitType {
                    variable: decl.identifier.clone(),
                },
                &decl.span,
            );
            (Type::Unknown, false)
        }
        (None, Some(ty)) => {
            if !decl.mutability.is_mutable() {
                type_checker.report_error(
                    ErrorImpl::ImmutableUndef {
                        variable: decl.identifier.clone(),
                    },
                    &decl.span,
                );
            }
            if matches!(&ty, Type::ConcreteArray(array) if array.has_inferred_dims()) {
                type_checker.report_error(
                    ErrorImpl::AmbiguousResolution {
                        reason: String::from("array size cannot be inferred from undef"),
                    },
                    &decl.span,
                );
            }
            (ty, false)
        }
        (Some(value), Some(ty)) => {
            let value_ty = type_check_expr(type_checker, value, Some(&ty));
            if let Err(error) = check_assignable(&value_ty, &ty, value) {
                type_checker.report_error(error, &value.span);
            }
            (resolve_inferred_dims(&ty, &value_ty), true)
        }
        (Some(value), None) => {
            let value_ty = type_check_expr(type_checker, value, None);
            (infer_declared_type(type_checker, decl, value, value_ty), true)
        }
    };

    tracing::debug!(name = %decl.identifier, mutability = %decl.mutability, ty = %ty, "declared variable");

    type_checker.resolved.push(ResolvedBinding {
        name: decl.identifier.clone(),
        ty: ty.clone(),
        mutability: decl.mutability,
        span: decl.span.clone(),
    });

    let symbol = Symbol::variable(&decl.identifier, ty, decl.mutability, decl.span.clone());
    type_checker.declare(if initialized {
        symbol
    } else {
        symbol.uninitialized()
    });
}

/// Type of an unannotated declaration. `val` keeps comptime types; `mut`
/// storage must be concrete.
fn infer_declared_type(
    type_checker: &mut TypeChecker,
    decl: &VarDeclStmt,
    value: &Expr,
    value_ty: Type,
) -> Type {
    if value_ty == Type::Void {
        type_checker.report_error(ErrorImpl::VoidValue, &value.span);
        return Type::Unknown;
    }

    if decl.mutability.is_mutable() && value_ty.is_comptime() {
        type_checker.report_error(
            ErrorImpl::AmbiguousResolution {
                reason: format!(
                    "mutable variable `{}` needs an explicit type to hold a {} value",
                    decl.identifier, value_ty
                ),
            },
            &decl.span,
        );
        return Type::Unknown;
    }

    value_ty
}

pub fn type_check_assignment(type_checker: &mut TypeChecker, assignment: &AssignmentStmt) {
    let Some((ty, mutability)) = type_checker
        .symbols
        .lookup(&assignment.identifier)
        .map(|symbol| (symbol.ty.clone(), symbol.mutability))
    else {
        type_check_expr(type_checker, &assignment.value, None);
        type_checker.report_error(
            ErrorImpl::VariableNotDeclared {
                variable: assignment.identifier.clone(),
            },
            &assignment.span,
        );
        return;
    };

    if !mutability.is_mutable() {
        type_checker.report_error(
            ErrorImpl::ImmutableAssignment {
                variable: assignment.identifier.clone(),
            },
            &assignment.span,
        );
    }

    let value_ty = type_check_expr(type_checker, &assignment.value, Some(&ty));
    if let Err(error) = check_assignable(&value_ty, &ty, &assignment.value) {
        type_checker.report_error(error, &assignment.value.span);
    }

    if let Some(symbol) = type_checker.symbols.lookup_mut(&assignment.identifier) {
        symbol.initialized = true;
    }
}
