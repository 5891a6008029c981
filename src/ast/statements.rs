use crate::{types::types::Mutability, Span};

use super::{
    ast::{Expr, Stmt},
    types::TypeAnnotation,
};

/// `val`/`mut` declaration. `value` is `None` for `undef`.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub mutability: Mutability,
    pub identifier: String,
    pub explicit_type: Option<TypeAnnotation>,
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub identifier: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub name: String,
    pub mutability: Mutability,
    pub annotation: TypeAnnotation,
}

/// Function declaration. A missing return type means `void`.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<ParameterDecl>,
    pub return_type: Option<TypeAnnotation>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl FnDeclStmt {
    /// `parameters` are `(name, type)` pairs, all immutable.
    pub fn new(
        identifier: &str,
        parameters: &[(&str, &str)],
        return_type: Option<&str>,
        body: Vec<Stmt>,
    ) -> Self {
        FnDeclStmt {
            identifier: identifier.to_string(),
            parameters: parameters
                .iter()
                .map(|(name, annotation)| ParameterDecl {
                    name: name.to_string(),
                    mutability: Mutability::Immutable,
                    annotation: TypeAnnotation::new(annotation),
                })
                .collect(),
            return_type: return_type.map(TypeAnnotation::new),
            body,
            span: Span::null(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl Stmt {
    fn declaration(
        mutability: Mutability,
        identifier: &str,
        explicit_type: Option<&str>,
        value: Option<Expr>,
    ) -> Self {
        Stmt::VarDecl(VarDeclStmt {
            mutability,
            identifier: identifier.to_string(),
            explicit_type: explicit_type.map(TypeAnnotation::new),
            value,
            span: Span::null(),
        })
    }

    /// `val identifier = value`
    pub fn val(identifier: &str, value: Expr) -> Self {
        Stmt::declaration(Mutability::Immutable, identifier, None, Some(value))
    }

    /// `val identifier: annotation = value`
    pub fn val_typed(identifier: &str, annotation: &str, value: Expr) -> Self {
        Stmt::declaration(Mutability::Immutable, identifier, Some(annotation), Some(value))
    }

    /// `mut identifier = value`
    pub fn mut_(identifier: &str, value: Expr) -> Self {
        Stmt::declaration(Mutability::Mutable, identifier, None, Some(value))
    }

    /// `mut identifier: annotation = value`
    pub fn mut_typed(identifier: &str, annotation: &str, value: Expr) -> Self {
        Stmt::declaration(Mutability::Mutable, identifier, Some(annotation), Some(value))
    }

    /// `<mutability> identifier[: annotation] = undef`
    pub fn undef(mutability: Mutability, identifier: &str, annotation: Option<&str>) -> Self {
        Stmt::declaration(mutability, identifier, annotation, None)
    }

    pub fn assignment(identifier: &str, value: Expr) -> Self {
        Stmt::Assignment(AssignmentStmt {
            identifier: identifier.to_string(),
            value,
            span: Span::null(),
        })
    }

    pub fn ret(value: Option<Expr>) -> Self {
        Stmt::Return(ReturnStmt {
            value,
            span: Span::null(),
        })
    }

    pub fn assign(value: Expr) -> Self {
        Stmt::Assign(AssignStmt {
            value,
            span: Span::null(),
        })
    }

    pub fn expression(expression: Expr) -> Self {
        Stmt::Expression(ExpressionStmt {
            expression,
            span: Span::null(),
        })
    }

    pub fn block(body: Vec<Stmt>) -> Self {
        Stmt::Block(BlockStmt {
            body,
            span: Span::null(),
        })
    }
}
