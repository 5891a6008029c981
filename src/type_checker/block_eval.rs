//! Decides whether an expression block can be evaluated at compile time.
//!
//! A `CompileTime` block only combines literals and comptime bindings, so its
//! value may keep a comptime type. Anything that touches runtime state (a
//! call, a conditional, a concretely typed variable) makes it `Runtime`.

use std::collections::HashMap;

use crate::{
    ast::ast::{Expr, ExprKind, Stmt},
    errors::errors::ErrorImpl,
    Span,
};

use super::context::AnalysisContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEvaluability {
    CompileTime,
    Runtime,
}

/// Names declared inside the block being scanned, mapped to whether they
/// hold a comptime value.
type Locals = Vec<HashMap<String, bool>>;

struct BlockScan<'a> {
    ctx: &'a dyn AnalysisContext,
    max_depth: usize,
    exceeded: bool,
}

impl<'a> BlockScan<'a> {
    fn too_deep(&mut self, depth: usize) -> bool {
        if depth > self.max_depth {
            self.exceeded = true;
        }
        self.exceeded
    }

    fn classify(&mut self, statements: &[Stmt], depth: usize) -> BlockEvaluability {
        if self.has_runtime_construct(statements, depth) {
            return BlockEvaluability::Runtime;
        }
        if self.references_concrete(statements, &mut vec![HashMap::new()], depth) {
            return BlockEvaluability::Runtime;
        }
        if self.all_comptime_only(statements, &mut vec![HashMap::new()], depth) {
            BlockEvaluability::CompileTime
        } else {
            BlockEvaluability::Runtime
        }
    }

    // CALLS AND CONDITIONALS

    fn has_runtime_construct(&mut self, statements: &[Stmt], depth: usize) -> bool {
        if self.too_deep(depth) {
            return true;
        }
        statements
            .iter()
            .any(|stmt| self.stmt_has_runtime_construct(stmt, depth))
    }

    fn stmt_has_runtime_construct(&mut self, stmt: &Stmt, depth: usize) -> bool {
        match stmt {
            Stmt::VarDecl(decl) => decl
                .value
                .as_ref()
                .is_some_and(|value| self.expr_has_runtime_construct(value, depth + 1)),
            Stmt::Assignment(assignment) => {
                self.expr_has_runtime_construct(&assignment.value, depth + 1)
            }
            Stmt::Return(ret) => ret
                .value
                .as_ref()
                .is_some_and(|value| self.expr_has_runtime_construct(value, depth + 1)),
            Stmt::Assign(assign) => self.expr_has_runtime_construct(&assign.value, depth + 1),
            Stmt::Expression(expression) => {
                self.expr_has_runtime_construct(&expression.expression, depth + 1)
            }
            Stmt::Block(block) => self.has_runtime_construct(&block.body, depth + 1),
        }
    }

    fn expr_has_runtime_construct(&mut self, expr: &Expr, depth: usize) -> bool {
        if self.too_deep(depth) {
            return true;
        }
        match &expr.kind {
            ExprKind::Call(_) | ExprKind::Conditional(_) => true,
            ExprKind::Binary(binary) => {
                self.expr_has_runtime_construct(&binary.left, depth + 1)
                    || self.expr_has_runtime_construct(&binary.right, depth + 1)
            }
            ExprKind::Unary(unary) => self.expr_has_runtime_construct(&unary.operand, depth + 1),
            ExprKind::Conversion(conversion) => {
                self.expr_has_runtime_construct(&conversion.value, depth + 1)
            }
            ExprKind::Block(block) => self.has_runtime_construct(&block.body, depth + 1),
            ExprKind::Array(array) => array
                .elements
                .iter()
                .any(|element| self.expr_has_runtime_construct(element, depth + 1)),
            ExprKind::Integer(_)
            | ExprKind::Float(_)
            | ExprKind::Bool(_)
            | ExprKind::String(_)
            | ExprKind::Symbol(_) => false,
        }
    }

    // VARIABLES

    /// Whether `name` currently holds a concrete value.
    ///
    /// Names not declared yet count as comptime; the declaration pass
    /// reports them when it reaches them.
    fn is_concrete_name(&self, name: &str, locals: &Locals) -> bool {
        if let Some(is_comptime) = locals.iter().rev().find_map(|scope| scope.get(name)) {
            return !is_comptime;
        }
        match self.ctx.lookup_symbol(name) {
            Some(symbol) => !symbol.ty.is_comptime() && !symbol.ty.is_unknown(),
            None => false,
        }
    }

    /// Records a block-local declaration so later statements see its kind.
    fn declare_local(&mut self, stmt: &Stmt, locals: &mut Locals, depth: usize) {
        let Stmt::VarDecl(decl) = stmt else {
            return;
        };
        let is_comptime = match (&decl.explicit_type, &decl.value) {
            (None, Some(value)) => self.expr_is_comptime_only(value, locals, depth + 1),
            _ => false,
        };
        if let Some(scope) = locals.last_mut() {
            scope.insert(decl.identifier.clone(), is_comptime);
        }
    }

    fn references_concrete(&mut self, statements: &[Stmt], locals: &mut Locals, depth: usize) -> bool {
        if self.too_deep(depth) {
            return true;
        }
        for stmt in statements {
            let found = match stmt {
                Stmt::VarDecl(decl) => decl
                    .value
                    .as_ref()
                    .is_some_and(|value| self.expr_references_concrete(value, locals, depth + 1)),
                Stmt::Assignment(assignment) => {
                    self.is_concrete_name(&assignment.identifier, locals)
                        || self.expr_references_concrete(&assignment.value, locals, depth + 1)
                }
                Stmt::Return(ret) => ret
                    .value
                    .as_ref()
                    .is_some_and(|value| self.expr_references_concrete(value, locals, depth + 1)),
                Stmt::Assign(assign) => {
                    self.expr_references_concrete(&assign.value, locals, depth + 1)
                }
                Stmt::Expression(expression) => {
                    self.expr_references_concrete(&expression.expression, locals, depth + 1)
                }
                Stmt::Block(block) => self.nested_references_concrete(&block.body, locals, depth),
            };
            if found {
                return true;
            }
            self.declare_local(stmt, locals, depth);
        }
        false
    }

    fn nested_references_concrete(
        &mut self,
        statements: &[Stmt],
        locals: &mut Locals,
        depth: usize,
    ) -> bool {
        locals.push(HashMap::new());
        let found = self.references_concrete(statements, locals, depth + 1);
        locals.pop();
        found
    }

    fn expr_references_concrete(&mut self, expr: &Expr, locals: &mut Locals, depth: usize) -> bool {
        if self.too_deep(depth) {
            return true;
        }
        match &expr.kind {
            ExprKind::Symbol(symbol) => self.is_concrete_name(&symbol.name, locals),
            ExprKind::Binary(binary) => {
                self.expr_references_concrete(&binary.left, locals, depth + 1)
                    || self.expr_references_concrete(&binary.right, locals, depth + 1)
            }
            ExprKind::Unary(unary) => self.expr_references_concrete(&unary.operand, locals, depth + 1),
            ExprKind::Conversion(conversion) => {
                self.expr_references_concrete(&conversion.value, locals, depth + 1)
            }
            ExprKind::Block(block) => self.nested_references_concrete(&block.body, locals, depth),
            ExprKind::Array(array) => array
                .elements
                .iter()
                .any(|element| self.expr_references_concrete(element, locals, depth + 1)),
            ExprKind::Call(call) => call
                .arguments
                .iter()
                .any(|argument| self.expr_references_concrete(argument, locals, depth + 1)),
            ExprKind::Conditional(conditional) => {
                self.expr_references_concrete(&conditional.condition, locals, depth + 1)
                    || self.nested_references_concrete(&conditional.then_branch.body, locals, depth)
                    || self.nested_references_concrete(&conditional.else_branch.body, locals, depth)
            }
            ExprKind::Integer(_) | ExprKind::Float(_) | ExprKind::Bool(_) | ExprKind::String(_) => {
                false
            }
        }
    }

    // COMPTIME-ONLY VALUES

    fn all_comptime_only(&mut self, statements: &[Stmt], locals: &mut Locals, depth: usize) -> bool {
        if self.too_deep(depth) {
            return false;
        }
        for stmt in statements {
            let comptime = match stmt {
                Stmt::VarDecl(decl) => match (&decl.explicit_type, &decl.value) {
                    (None, Some(value)) => self.expr_is_comptime_only(value, locals, depth + 1),
                    _ => false,
                },
                // mutation needs storage, which needs a concrete type
                Stmt::Assignment(_) => false,
                Stmt::Return(ret) => ret
                    .value
                    .as_ref()
                    .is_some_and(|value| self.expr_is_comptime_only(value, locals, depth + 1)),
                Stmt::Assign(assign) => self.expr_is_comptime_only(&assign.value, locals, depth + 1),
                Stmt::Expression(expression) => {
                    self.expr_is_comptime_only(&expression.expression, locals, depth + 1)
                }
                Stmt::Block(block) => {
                    locals.push(HashMap::new());
                    let comptime = self.all_comptime_only(&block.body, locals, depth + 1);
                    locals.pop();
                    comptime
                }
            };
            if !comptime {
                return false;
            }
            self.declare_local(stmt, locals, depth);
        }
        true
    }

    fn expr_is_comptime_only(&mut self, expr: &Expr, locals: &mut Locals, depth: usize) -> bool {
        if self.too_deep(depth) {
            return false;
        }
        match &expr.kind {
            ExprKind::Integer(_) | ExprKind::Float(_) => true,
            ExprKind::Symbol(symbol) => !self.is_concrete_name(&symbol.name, locals),
            ExprKind::Binary(binary) => {
                self.expr_is_comptime_only(&binary.left, locals, depth + 1)
                    && self.expr_is_comptime_only(&binary.right, locals, depth + 1)
            }
            ExprKind::Unary(unary) => self.expr_is_comptime_only(&unary.operand, locals, depth + 1),
            ExprKind::Array(array) => {
                !array.elements.is_empty()
                    && array
                        .elements
                        .iter()
                        .all(|element| self.expr_is_comptime_only(element, locals, depth + 1))
            }
            ExprKind::Block(block) => {
                !self.has_runtime_construct(&block.body, depth + 1)
                    && !self.nested_references_concrete(&block.body, locals, depth)
                    && {
                        locals.push(HashMap::new());
                        let comptime = self.all_comptime_only(&block.body, locals, depth + 1);
                        locals.pop();
                        comptime
                    }
            }
            // an explicit conversion always commits to a concrete type
            ExprKind::Conversion(_)
            | ExprKind::Bool(_)
            | ExprKind::String(_)
            | ExprKind::Call(_)
            | ExprKind::Conditional(_) => false,
        }
    }
}

/// Classifies an expression block from its statements.
///
/// Symbols are looked up in `ctx` as they are at the time of the call.
/// Exceeding the configured nesting depth records `AnalysisLimitExceeded`
/// and classifies the block as `Runtime`.
pub fn classify_block_evaluability(
    ctx: &mut dyn AnalysisContext,
    statements: &[Stmt],
) -> BlockEvaluability {
    let (evaluability, exceeded) = {
        let mut scan = BlockScan {
            ctx: &*ctx,
            max_depth: ctx.options().max_depth,
            exceeded: false,
        };
        let evaluability = scan.classify(statements, 0);
        (evaluability, scan.exceeded)
    };

    if exceeded {
        let span = statements
            .first()
            .map(|stmt| stmt.get_span().clone())
            .unwrap_or_else(Span::null);
        let limit = ctx.options().max_depth;
        ctx.report_error(ErrorImpl::AnalysisLimitExceeded { limit }, &span);
        return BlockEvaluability::Runtime;
    }

    tracing::debug!(?evaluability, statements = statements.len(), "classified block");
    evaluability
}
