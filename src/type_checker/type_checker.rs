use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Expr, ExprKind, Item, Program, Stmt},
        statements::BlockStmt,
    },
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    types::types::Type,
    Span, MK_ERROR,
};

use super::{
    arrays::type_check_array_literal,
    binary_ops::{resolve_binary_operation, resolve_unary_operation},
    blocks::{type_check_conditional, type_check_expression_block},
    context::AnalysisContext,
    conversions::resolve_conversion_expression,
    declarations::{type_check_assignment, type_check_var_decl},
    functions::{collect_signatures, type_check_call, type_check_fn_decl, type_check_return},
    symbols::{FunctionSignature, Symbol, SymbolTable},
    typed_ast::ResolvedBinding,
};

/// Knobs for a single analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerOptions {
    /// Deepest expression nesting analysed before giving up with
    /// `AnalysisLimitExceeded`.
    pub max_depth: usize,
    /// Report `UnusedVariable` warnings when a scope closes.
    pub warn_unused: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            max_depth: 256,
            warn_unused: true,
        }
    }
}

impl AnalyzerOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_warn_unused(mut self, warn_unused: bool) -> Self {
        self.warn_unused = warn_unused;
        self
    }
}

#[derive(Debug)]
pub struct TypeChecker {
    /// Every declared binding with its final type, in declaration order.
    pub resolved: Vec<ResolvedBinding>,
    pub(crate) symbols: SymbolTable,
    pub(crate) signatures: HashMap<String, FunctionSignature>,
    signature_order: Vec<String>,
    pub(crate) diagnostics: Diagnostics,
    options: AnalyzerOptions,
    depth: usize,
    limit_reported: bool,
}

impl TypeChecker {
    pub fn new(options: AnalyzerOptions) -> Self {
        TypeChecker {
            resolved: vec![],
            symbols: SymbolTable::new(),
            signatures: HashMap::new(),
            signature_order: vec![],
            diagnostics: Diagnostics::new(),
            options,
            depth: 0,
            limit_reported: false,
        }
    }

    /// Declared functions, in declaration order.
    pub fn signatures(&self) -> Vec<&FunctionSignature> {
        self.signature_order
            .iter()
            .filter_map(|name| self.signatures.get(name))
            .collect()
    }

    pub fn signature(&self, name: &str) -> Option<&FunctionSignature> {
        self.signatures.get(name)
    }

    /// Final type of the last binding declared as `name`.
    pub fn binding_type(&self, name: &str) -> Option<&Type> {
        self.resolved
            .iter()
            .rev()
            .find(|binding| binding.name == name)
            .map(|binding| &binding.ty)
    }

    pub(crate) fn add_signature(&mut self, signature: FunctionSignature) -> Result<(), ErrorImpl> {
        if self.signatures.contains_key(&signature.name) {
            return Err(ErrorImpl::FunctionAlreadyDeclared {
                function: signature.name,
            });
        }
        self.signature_order.push(signature.name.clone());
        self.signatures.insert(signature.name.clone(), signature);
        Ok(())
    }

    /// Return type of the function being analysed, `None` outside functions.
    pub(crate) fn current_return_type(&self) -> Option<Type> {
        self.symbols
            .current_function()
            .and_then(|name| self.signatures.get(name))
            .map(|signature| signature.return_type.clone())
    }

    pub(crate) fn push_scope(&mut self, function: Option<String>) {
        self.symbols.push_scope(function);
    }

    /// Closes the innermost scope, warning about bindings nobody read.
    pub(crate) fn pop_scope(&mut self) {
        let Some(environment) = self.symbols.pop_scope() else {
            return;
        };
        if !self.options.warn_unused {
            return;
        }
        for symbol in environment.symbols() {
            if !symbol.used && !symbol.is_parameter && !symbol.name.starts_with('_') {
                self.diagnostics.push_warning(MK_ERROR!(
                    ErrorImpl::UnusedVariable {
                        variable: symbol.name.clone()
                    },
                    symbol.span
                ));
            }
        }
    }

    pub(crate) fn declare(&mut self, symbol: Symbol) {
        let span = symbol.span.clone();
        if let Err(error) = self.symbols.declare(symbol) {
            self.report_error(error, &span);
        }
    }
}

impl AnalysisContext for TypeChecker {
    fn analyze_expression(&mut self, expr: &Expr, target: Option<&Type>) -> Type {
        type_check_expr(self, expr, target)
    }

    fn report_error(&mut self, error: ErrorImpl, span: &Span) {
        self.diagnostics.push(MK_ERROR!(error, span));
    }

    fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.lookup(name)
    }

    fn options(&self) -> &AnalyzerOptions {
        &self.options
    }
}

/// Types `expr` with `target` as the expected type, recording diagnostics as it goes.
pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &Expr, target: Option<&Type>) -> Type {
    if type_checker.depth >= type_checker.options.max_depth {
        if !type_checker.limit_reported {
            type_checker.limit_reported = true;
            let limit = type_checker.options.max_depth;
            type_checker.report_error(ErrorImpl::AnalysisLimitExceeded { limit }, &expr.span);
        }
        return Type::Unknown;
    }

    type_checker.depth += 1;
    let ty = dispatch_expr(type_checker, expr, target);
    type_checker.depth -= 1;
    ty
}

fn dispatch_expr(type_checker: &mut TypeChecker, expr: &Expr, target: Option<&Type>) -> Type {
    match &expr.kind {
        ExprKind::Integer(_) => Type::ComptimeInt,
        ExprKind::Float(_) => Type::ComptimeFloat,
        ExprKind::Bool(_) => Type::Bool,
        ExprKind::String(_) => Type::String,
        ExprKind::Symbol(symbol) => type_check_symbol(type_checker, &symbol.name, &expr.span),
        ExprKind::Binary(binary) => {
            resolve_binary_operation(type_checker, binary, &expr.span, target)
        }
        ExprKind::Unary(unary) => resolve_unary_operation(type_checker, unary, &expr.span, target),
        ExprKind::Conversion(conversion) => {
            resolve_conversion_expression(type_checker, conversion, &expr.span)
        }
        ExprKind::Call(call) => type_check_call(type_checker, call, &expr.span),
        ExprKind::Conditional(conditional) => {
            type_check_conditional(type_checker, conditional, &expr.span, target)
        }
        ExprKind::Block(block) => {
            type_check_expression_block(type_checker, &block.body, &expr.span, target)
        }
        ExprKind::Array(array) => {
            type_check_array_literal(type_checker, &array.elements, &expr.span, target)
        }
    }
}

fn type_check_symbol(type_checker: &mut TypeChecker, name: &str, span: &Span) -> Type {
    let Some(symbol) = type_checker.symbols.lookup_mut(name) else {
        type_checker.report_error(
            ErrorImpl::VariableNotDeclared {
                variable: name.to_string(),
            },
            span,
        );
        return Type::Unknown;
    };

    symbol.used = true;
    if symbol.initialized {
        return symbol.ty.clone();
    }

    type_checker.report_error(
        ErrorImpl::UninitializedVariable {
            variable: name.to_string(),
        },
        span,
    );
    Type::Unknown
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt) {
    match stmt {
        Stmt::VarDecl(decl) => type_check_var_decl(type_checker, decl),
        Stmt::Assignment(assignment) => type_check_assignment(type_checker, assignment),
        Stmt::Return(ret) => type_check_return(type_checker, ret),
        Stmt::Assign(assign) => {
            type_check_expr(type_checker, &assign.value, None);
            type_checker.report_error(ErrorImpl::AssignOutsideBlock, &assign.span);
        }
        Stmt::Expression(expression) => {
            type_check_expr(type_checker, &expression.expression, None);
        }
        Stmt::Block(block) => type_check_block(type_checker, block),
    }
}

/// A statement block: its own scope, no value.
pub fn type_check_block(type_checker: &mut TypeChecker, block: &BlockStmt) {
    type_checker.push_scope(None);
    for stmt in &block.body {
        type_check_stmt(type_checker, stmt);
    }
    type_checker.pop_scope();
}

/// Analyses a whole program.
///
/// Function signatures are collected first so calls may precede the
/// function they call. Analysis never stops early: the returned
/// `Diagnostics` holds every error and warning found.
#[tracing::instrument(skip_all, fields(items = program.items.len()))]
pub fn type_check(program: &Program, options: AnalyzerOptions) -> (TypeChecker, Diagnostics) {
    let mut type_checker = TypeChecker::new(options);

    collect_signatures(&mut type_checker, program);

    type_checker.push_scope(None);
    for item in &program.items {
        match item {
            Item::Function(function) => type_check_fn_decl(&mut type_checker, function),
            Item::Statement(stmt) => type_check_stmt(&mut type_checker, stmt),
        }
    }
    type_checker.pop_scope();

    let diagnostics = std::mem::take(&mut type_checker.diagnostics);
    tracing::debug!(
        errors = diagnostics.errors().len(),
        warnings = diagnostics.warnings().len(),
        "analysis finished"
    );
    (type_checker, diagnostics)
}
