use crate::{
    ast::{
        ast::{Item, Program, Stmt},
        expressions::CallExpr,
        statements::{FnDeclStmt, ReturnStmt},
    },
    errors::errors::ErrorImpl,
    types::types::Type,
    Span,
};

use super::{
    context::AnalysisContext,
    declarations::check_assignable,
    symbols::{FunctionSignature, Parameter, Symbol},
    type_checker::{type_check_expr, type_check_stmt, TypeChecker},
};

/// First pass: registers every function signature so calls can appear
/// before the function they call.
pub fn collect_signatures(type_checker: &mut TypeChecker, program: &Program) {
    for item in &program.items {
        let Item::Function(function) = item else {
            continue;
        };
        let signature = build_signature(type_checker, function);
        if let Err(error) = type_checker.add_signature(signature) {
            type_checker.report_error(error, &function.span);
        }
    }
}

fn build_signature(type_checker: &mut TypeChecker, function: &FnDeclStmt) -> FunctionSignature {
    let mut parameters = vec![];
    for parameter in &function.parameters {
        let ty = parameter.annotation.resolve().unwrap_or_else(|error| {
            type_checker.report_error(error, &function.span);
            Type::Unknown
        });
        parameters.push(Parameter {
            name: parameter.name.clone(),
            ty,
            mutability: parameter.mutability,
        });
    }

    let return_type = match &function.return_type {
        Some(annotation) => annotation.resolve().unwrap_or_else(|error| {
            type_checker.report_error(error, &function.span);
            Type::Unknown
        }),
        None => Type::Void,
    };

    FunctionSignature {
        name: function.identifier.clone(),
        parameters,
        return_type,
        span: function.span.clone(),
    }
}

pub fn type_check_fn_decl(type_checker: &mut TypeChecker, function: &FnDeclStmt) {
    let Some(signature) = type_checker.signature(&function.identifier).cloned() else {
        return;
    };

    type_checker.push_scope(Some(function.identifier.clone()));
    for parameter in &signature.parameters {
        type_checker.declare(Symbol::parameter(parameter, function.span.clone()));
    }

    for stmt in &function.body {
        type_check_stmt(type_checker, stmt);
    }

    if !contains_return(&function.body) && signature.return_type != Type::Void && !signature.return_type.is_unknown() {
        type_checker.report_error(
            ErrorImpl::MissingReturn {
                function: function.identifier.clone(),
            },
            &function.span,
        );
    }

    type_checker.pop_scope();
}

/// Whether `body` returns, directly or from a nested statement block.
fn contains_return(body: &[Stmt]) -> bool {
    body.iter().any(|stmt| match stmt {
        Stmt::Return(_) => true,
        Stmt::Block(block) => contains_return(&block.body),
        _ => false,
    })
}

pub fn type_check_return(type_checker: &mut TypeChecker, ret: &ReturnStmt) {
    let Some(function) = type_checker.symbols.current_function().map(str::to_string) else {
        if let Some(value) = &ret.value {
            type_check_expr(type_checker, value, None);
        }
        type_checker.report_error(ErrorImpl::ReturnOutsideFunction, &ret.span);
        return;
    };
    let return_type = type_checker.current_return_type().unwrap_or(Type::Unknown);

    match &ret.value {
        Some(value) if return_type == Type::Void => {
            type_check_expr(type_checker, value, None);
            type_checker.report_error(ErrorImpl::UnexpectedReturnValue { function }, &ret.span);
        }
        Some(value) => {
            let value_ty = type_check_expr(type_checker, value, Some(&return_type));
            if let Err(error) = check_assignable(&value_ty, &return_type, value) {
                type_checker.report_error(error, &value.span);
            }
        }
        None if return_type == Type::Void || return_type.is_unknown() => {}
        None => type_checker.report_error(
            ErrorImpl::MissingReturnValue {
                function,
                expected: return_type.to_string(),
            },
            &ret.span,
        ),
    }
}

/// Rewrites an assignability failure as a failure of argument `index` (0-based).
fn argument_error(function: &str, index: usize, error: ErrorImpl) -> ErrorImpl {
    match error {
        ErrorImpl::TypeMismatch { expected, received } => ErrorImpl::ArgumentTypeMismatch {
            function: function.to_string(),
            index: index + 1,
            expected,
            received,
            hint: None,
        },
        ErrorImpl::PrecisionLoss {
            from,
            to,
            suggestion,
        } => ErrorImpl::ArgumentTypeMismatch {
            function: function.to_string(),
            index: index + 1,
            expected: to,
            received: from,
            hint: Some(format!("use explicit conversion: {}", suggestion)),
        },
        other => other,
    }
}

pub fn type_check_call(type_checker: &mut TypeChecker, call: &CallExpr, span: &Span) -> Type {
    let Some(signature) = type_checker.signature(&call.callee).cloned() else {
        for argument in &call.arguments {
            type_check_expr(type_checker, argument, None);
        }
        type_checker.report_error(
            ErrorImpl::FunctionNotDeclared {
                function: call.callee.clone(),
            },
            span,
        );
        return Type::Unknown;
    };

    let expected = signature.parameters.len();
    let received = call.arguments.len();
    if received > expected {
        type_checker.report_error(
            ErrorImpl::UnexpectedArguments { expected, received },
            &call.arguments[expected].span,
        );
    } else if received < expected {
        type_checker.report_error(ErrorImpl::MissingArguments { expected, received }, span);
    }

    for (index, argument) in call.arguments.iter().enumerate() {
        let Some(parameter) = signature.parameters.get(index) else {
            type_check_expr(type_checker, argument, None);
            continue;
        };
        let argument_ty = type_check_expr(type_checker, argument, Some(&parameter.ty));
        if let Err(error) = check_assignable(&argument_ty, &parameter.ty, argument) {
            type_checker.report_error(
                argument_error(&signature.name, index, error),
                &argument.span,
            );
        }
    }

    signature.return_type
}
