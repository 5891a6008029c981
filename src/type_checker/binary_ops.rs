use crate::{
    ast::{
        ast::{BinaryOperator, UnaryOperator},
        expressions::{BinaryExpr, UnaryExpr},
    },
    types::{literals::validate_literal_range, types::Type},
    Span,
};

use super::{
    context::AnalysisContext,
    operations::{resolve_binary, resolve_unary},
};

/// Type the operands of `operator` are analysed against.
fn operand_target(operator: BinaryOperator, target: Option<&Type>) -> Option<Type> {
    if operator.is_logical() {
        Some(Type::Bool)
    } else if operator.is_comparison() {
        None
    } else {
        target.cloned()
    }
}

pub fn resolve_binary_operation(
    ctx: &mut dyn AnalysisContext,
    binary: &BinaryExpr,
    span: &Span,
    target: Option<&Type>,
) -> Type {
    let operand_target = operand_target(binary.operator, target);
    let left = ctx.analyze_expression(&binary.left, operand_target.as_ref());
    let right = ctx.analyze_expression(&binary.right, operand_target.as_ref());

    match resolve_binary(binary.operator, &left, &right, target) {
        Ok(ty) => {
            tracing::debug!(operator = %binary.operator, %left, %right, result = %ty, "resolved binary operation");
            if ty.is_concrete_numeric() {
                check_literal_operands(ctx, binary, &ty);
            }
            ty
        }
        Err(error) => {
            ctx.report_error(error, span);
            Type::Unknown
        }
    }
}

/// A literal operand adapts to the concrete result type, so it has to fit it.
fn check_literal_operands(ctx: &mut dyn AnalysisContext, binary: &BinaryExpr, result: &Type) {
    for operand in [&binary.left, &binary.right] {
        let Some(value) = operand.literal_value() else {
            continue;
        };
        if let Err(error) = validate_literal_range(value, result, &operand.to_string()) {
            ctx.report_error(error.into(), &operand.span);
        }
    }
}

pub fn resolve_unary_operation(
    ctx: &mut dyn AnalysisContext,
    unary: &UnaryExpr,
    span: &Span,
    target: Option<&Type>,
) -> Type {
    let operand_target = match unary.operator {
        UnaryOperator::Neg => target.cloned(),
        UnaryOperator::Not => Some(Type::Bool),
    };
    let operand = ctx.analyze_expression(&unary.operand, operand_target.as_ref());

    match resolve_unary(unary.operator, &operand, target) {
        Ok(ty) => ty,
        Err(error) => {
            ctx.report_error(error, span);
            Type::Unknown
        }
    }
}
