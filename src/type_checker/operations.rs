//! Result types of operators, computed from operand types alone.
//!
//! Nothing here records diagnostics: every function returns the error and
//! lets the caller decide where to report it. `Unknown` operands resolve to
//! `Unknown` without an error, since whatever produced them already reported.

use crate::{
    ast::ast::{BinaryOperator, UnaryOperator},
    errors::errors::ErrorImpl,
    types::{
        coercion::{can_adapt, can_coerce},
        types::{promote_comptime, widen, Type},
    },
};

const FLOAT_DIVISION_NEEDS_TARGET: &str = "float division requires explicit result type";

fn invalid_operand(operator: impl ToString, operand: &Type, expected: &str) -> ErrorImpl {
    ErrorImpl::InvalidOperand {
        operator: operator.to_string(),
        operand: operand.to_string(),
        expected: expected.to_string(),
    }
}

fn mixed(operator: BinaryOperator, left: &Type, right: &Type) -> ErrorImpl {
    ErrorImpl::MixedTypeOperation {
        operator: operator.to_string(),
        left: left.to_string(),
        right: right.to_string(),
    }
}

fn ambiguous(reason: &str) -> ErrorImpl {
    ErrorImpl::AmbiguousResolution {
        reason: reason.to_string(),
    }
}

pub fn resolve_binary(
    operator: BinaryOperator,
    left: &Type,
    right: &Type,
    target: Option<&Type>,
) -> Result<Type, ErrorImpl> {
    if left.is_unknown() || right.is_unknown() {
        return Ok(Type::Unknown);
    }
    let target = target.filter(|target| !target.is_unknown());

    match operator {
        BinaryOperator::Add | BinaryOperator::Sub | BinaryOperator::Mul | BinaryOperator::Mod => {
            resolve_arithmetic(operator, left, right, target)
        }
        BinaryOperator::Div => resolve_float_division(left, right, target),
        BinaryOperator::IntDiv => resolve_integer_division(left, right, target),
        BinaryOperator::Lt
        | BinaryOperator::Gt
        | BinaryOperator::Le
        | BinaryOperator::Ge
        | BinaryOperator::Eq
        | BinaryOperator::Ne => resolve_comparison(operator, left, right, target),
        BinaryOperator::And | BinaryOperator::Or => resolve_logical(operator, left, right),
    }
}

fn resolve_arithmetic(
    operator: BinaryOperator,
    left: &Type,
    right: &Type,
    target: Option<&Type>,
) -> Result<Type, ErrorImpl> {
    if operator == BinaryOperator::Add && *left == Type::String && *right == Type::String {
        return Ok(Type::String);
    }

    for operand in [left, right] {
        if !operand.is_numeric() {
            return Err(invalid_operand(operator, operand, "numeric"));
        }
    }

    if operator == BinaryOperator::Mod {
        if let Some(operand) = [left, right].into_iter().find(|operand| operand.is_float()) {
            return Err(invalid_operand(operator, operand, "an integer"));
        }
        return resolve_numeric_mix(
            operator,
            left,
            right,
            target.filter(|target| target.is_integer()),
        );
    }

    resolve_numeric_mix(operator, left, right, target)
}

/// Combines two numeric operand types.
///
/// Both comptime: promote. One comptime: the comptime side adapts to the
/// concrete side, or to the target when both operands adapt to it. Both
/// concrete: they must agree, unless both adapt to the target.
fn resolve_numeric_mix(
    operator: BinaryOperator,
    left: &Type,
    right: &Type,
    target: Option<&Type>,
) -> Result<Type, ErrorImpl> {
    let adapted_target = target.filter(|target| {
        target.is_concrete_numeric() && can_adapt(left, target) && can_adapt(right, target)
    });

    match (left.is_comptime(), right.is_comptime()) {
        (true, true) => promote_comptime(left, right).ok_or_else(|| mixed(operator, left, right)),
        (true, false) | (false, true) => {
            if let Some(target) = adapted_target {
                return Ok(target.clone());
            }

            let (comptime, concrete) = if left.is_comptime() {
                (left, right)
            } else {
                (right, left)
            };
            if can_coerce(comptime, concrete) {
                Ok(concrete.clone())
            } else {
                Err(mixed(operator, left, right))
            }
        }
        (false, false) if left == right => Ok(left.clone()),
        (false, false) => adapted_target
            .cloned()
            .ok_or_else(|| mixed(operator, left, right)),
    }
}

fn resolve_float_division(
    left: &Type,
    right: &Type,
    target: Option<&Type>,
) -> Result<Type, ErrorImpl> {
    let operator = BinaryOperator::Div;
    for operand in [left, right] {
        if !operand.is_numeric() {
            return Err(invalid_operand(operator, operand, "numeric"));
        }
    }

    if let Some(target) = target {
        if target.is_integer() {
            return Err(ErrorImpl::FloatDivisionToInteger {
                target: target.to_string(),
            });
        }
        if target.is_float() && !target.is_comptime() {
            // every operand has to reach the target without losing precision
            let narrows = [left, right]
                .into_iter()
                .any(|operand| !can_adapt(operand, target));
            if narrows {
                return Err(mixed(operator, left, right));
            }
            return Ok(target.clone());
        }
    }

    let fixed = match (left.is_comptime(), right.is_comptime()) {
        (true, true) => return Ok(Type::ComptimeFloat),
        (true, false) => right,
        (false, true) => left,
        (false, false) if left == right => left,
        (false, false) if left.is_float() && right.is_float() => {
            return Err(mixed(operator, left, right))
        }
        (false, false) => return Err(ambiguous(FLOAT_DIVISION_NEEDS_TARGET)),
    };

    if fixed.is_float() {
        Ok(fixed.clone())
    } else {
        Err(ambiguous(FLOAT_DIVISION_NEEDS_TARGET))
    }
}

fn resolve_integer_division(
    left: &Type,
    right: &Type,
    target: Option<&Type>,
) -> Result<Type, ErrorImpl> {
    let operator = BinaryOperator::IntDiv;
    for operand in [left, right] {
        if !operand.is_numeric() {
            return Err(invalid_operand(operator, operand, "an integer"));
        }
        if operand.is_float() {
            return Err(ErrorImpl::FloatOperandInIntegerDivision {
                operand: operand.to_string(),
            });
        }
    }

    if left.is_comptime() && right.is_comptime() {
        return Ok(Type::ComptimeInt);
    }

    let integer_target = target.filter(|target| {
        target.is_integer()
            && !target.is_comptime()
            && can_adapt(left, target)
            && can_adapt(right, target)
    });
    if let Some(target) = integer_target {
        return Ok(target.clone());
    }

    widen(left, right).ok_or_else(|| mixed(operator, left, right))
}

fn resolve_comparison(
    operator: BinaryOperator,
    left: &Type,
    right: &Type,
    target: Option<&Type>,
) -> Result<Type, ErrorImpl> {
    if let Some(target) = target {
        if *target != Type::Bool {
            return Err(ErrorImpl::NonBoolComparisonTarget {
                operator: operator.to_string(),
                target: target.to_string(),
            });
        }
    }

    if left.is_numeric() && right.is_numeric() {
        resolve_numeric_mix(operator, left, right, None)?;
        return Ok(Type::Bool);
    }

    if operator.is_relational() {
        let operand = if left.is_numeric() { right } else { left };
        return Err(invalid_operand(operator, operand, "numeric"));
    }

    if left == right {
        Ok(Type::Bool)
    } else {
        Err(ErrorImpl::TypeMismatch {
            expected: left.to_string(),
            received: right.to_string(),
        })
    }
}

fn resolve_logical(
    operator: BinaryOperator,
    left: &Type,
    right: &Type,
) -> Result<Type, ErrorImpl> {
    match [left, right]
        .into_iter()
        .find(|operand| **operand != Type::Bool)
    {
        Some(operand) => Err(invalid_operand(operator, operand, "bool")),
        None => Ok(Type::Bool),
    }
}

/// Result type of a unary operation. Negation keeps comptime types comptime.
pub fn resolve_unary(
    operator: UnaryOperator,
    operand: &Type,
    _target: Option<&Type>,
) -> Result<Type, ErrorImpl> {
    if operand.is_unknown() {
        return Ok(Type::Unknown);
    }

    match operator {
        UnaryOperator::Neg if operand.is_numeric() => Ok(operand.clone()),
        UnaryOperator::Neg => Err(invalid_operand(operator, operand, "numeric")),
        UnaryOperator::Not if *operand == Type::Bool => Ok(Type::Bool),
        UnaryOperator::Not => Err(invalid_operand(operator, operand, "bool")),
    }
}
