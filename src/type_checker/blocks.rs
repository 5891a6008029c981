//! Expression blocks and conditional expressions.
//!
//! An expression block ends in `assign <value>` or `return <value>`. Its
//! value is resolved against the explicit target, or failing that against
//! the enclosing function's return type. Only where neither exists does the
//! block's evaluability decide whether a comptime value may flow out.

use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::ConditionalExpr,
    },
    errors::errors::ErrorImpl,
    types::types::{promote_comptime, Type},
    Span,
};

use super::{
    block_eval::{classify_block_evaluability, BlockEvaluability},
    context::AnalysisContext,
    declarations::check_assignable,
    functions::type_check_return,
    type_checker::{type_check_expr, type_check_stmt, TypeChecker},
};

/// Types whose concrete width would otherwise be guessed.
fn needs_context(ty: &Type) -> bool {
    match ty {
        Type::ConcreteArray(array) => array.element().is_numeric(),
        Type::ComptimeArray(_) => true,
        _ => ty.is_numeric(),
    }
}

pub fn type_check_expression_block(
    type_checker: &mut TypeChecker,
    body: &[Stmt],
    span: &Span,
    target: Option<&Type>,
) -> Type {
    let evaluability = classify_block_evaluability(type_checker, body);
    let context = target
        .filter(|target| !target.is_unknown())
        .cloned()
        .or_else(|| {
            type_checker
                .current_return_type()
                .filter(|ty| *ty != Type::Void && !ty.is_unknown())
        });

    type_checker.push_scope(None);
    let ty = match body.split_last() {
        Some((Stmt::Assign(assign), rest)) => {
            for stmt in rest {
                type_check_stmt(type_checker, stmt);
            }
            let value_ty = type_check_expr(type_checker, &assign.value, context.as_ref());
            finalize_block_value(type_checker, evaluability, value_ty, &assign.value, context)
        }
        Some((Stmt::Return(ret), rest)) => {
            for stmt in rest {
                type_check_stmt(type_checker, stmt);
            }
            type_check_return(type_checker, ret);
            // control leaves the block, the value is never produced
            context.unwrap_or(Type::Void)
        }
        Some((last, _)) => {
            for stmt in body {
                type_check_stmt(type_checker, stmt);
            }
            type_checker.report_error(ErrorImpl::InvalidBlockTerminator, last.get_span());
            Type::Unknown
        }
        None => {
            type_checker.report_error(ErrorImpl::InvalidBlockTerminator, span);
            Type::Unknown
        }
    };
    type_checker.pop_scope();

    ty
}

fn finalize_block_value(
    type_checker: &mut TypeChecker,
    evaluability: BlockEvaluability,
    value_ty: Type,
    value: &Expr,
    context: Option<Type>,
) -> Type {
    if let Some(target) = context {
        if let Err(error) = check_assignable(&value_ty, &target, value) {
            type_checker.report_error(error, &value.span);
        }
        return target;
    }

    match evaluability {
        BlockEvaluability::CompileTime => value_ty,
        BlockEvaluability::Runtime if value_ty.is_unknown() || !needs_context(&value_ty) => {
            value_ty
        }
        BlockEvaluability::Runtime => {
            type_checker.report_error(
                ErrorImpl::AmbiguousResolution {
                    reason: format!(
                        "runtime expression block produces {} without an explicit result type",
                        value_ty
                    ),
                },
                &value.span,
            );
            Type::Unknown
        }
    }
}

pub fn type_check_conditional(
    type_checker: &mut TypeChecker,
    conditional: &ConditionalExpr,
    span: &Span,
    target: Option<&Type>,
) -> Type {
    let condition = type_check_expr(type_checker, &conditional.condition, Some(&Type::Bool));
    if !condition.is_unknown() && condition != Type::Bool {
        type_checker.report_error(
            ErrorImpl::TypeMismatch {
                expected: Type::Bool.to_string(),
                received: condition.to_string(),
            },
            &conditional.condition.span,
        );
    }

    let then_ty =
        type_check_expression_block(type_checker, &conditional.then_branch.body, span, target);
    let else_ty =
        type_check_expression_block(type_checker, &conditional.else_branch.body, span, target);

    if then_ty.is_unknown() || then_ty == else_ty {
        return else_ty;
    }
    if else_ty.is_unknown() {
        return then_ty;
    }
    if let Some(promoted) = promote_comptime(&then_ty, &else_ty) {
        return promoted;
    }

    type_checker.report_error(
        ErrorImpl::AmbiguousResolution {
            reason: format!("conditional branches produce {} and {}", then_ty, else_ty),
        },
        span,
    );
    Type::Unknown
}
