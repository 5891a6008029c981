use crate::{ast::ast::Expr, errors::errors::ErrorImpl, types::types::Type, Span};

use super::{symbols::Symbol, type_checker::AnalyzerOptions};

/// Everything the resolver, the classifier and the conversion validator
/// need from the analysis around them.
///
/// `TypeChecker` is the real implementation; tests can drive the core
/// modules with a small stand-in.
pub trait AnalysisContext {
    /// Types `expr`, guided by the type its consumer expects.
    fn analyze_expression(&mut self, expr: &Expr, target: Option<&Type>) -> Type;

    /// Records a diagnostic. Never stops the analysis.
    fn report_error(&mut self, error: ErrorImpl, span: &Span);

    fn lookup_symbol(&self, name: &str) -> Option<&Symbol>;

    fn options(&self) -> &AnalyzerOptions;
}
