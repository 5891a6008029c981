//! Expression nodes and the constructors used to build them.

use crate::Span;

use super::{
    ast::{BinaryOperator, Expr, ExprKind, Stmt, UnaryOperator},
    types::TypeAnnotation,
};

// LITERALS

/// Integer literal. `text` is kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub value: i128,
    pub text: String,
}

/// Float literal. `text` is kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatExpr {
    pub value: f64,
    pub text: String,
}

/// A reference to a variable.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub name: String,
}

// COMPOUND

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: UnaryOperator,
    pub operand: Box<Expr>,
}

/// Explicit conversion `value:Type`
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionExpr {
    pub value: Box<Expr>,
    pub target: TypeAnnotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: String,
    pub arguments: Vec<Expr>,
}

/// `if condition { ... } else { ... }` used as a value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub condition: Box<Expr>,
    pub then_branch: BlockExpr,
    pub else_branch: BlockExpr,
}

/// A block producing a value; it ends in `assign` or `return`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockExpr {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub elements: Vec<Expr>,
}

impl Expr {
    fn unspanned(kind: ExprKind) -> Self {
        Expr::new(kind, Span::null())
    }

    pub fn int(value: i128) -> Self {
        Expr::unspanned(ExprKind::Integer(IntegerExpr {
            value,
            text: value.to_string(),
        }))
    }

    pub fn float(value: f64) -> Self {
        let mut text = value.to_string();
        if !text.contains(['.', 'e', 'E']) {
            text.push_str(".0");
        }
        Expr::unspanned(ExprKind::Float(FloatExpr { value, text }))
    }

    /// Float literal keeping its source spelling, e.g. `3.14`.
    pub fn float_text(text: &str, value: f64) -> Self {
        Expr::unspanned(ExprKind::Float(FloatExpr {
            value,
            text: text.to_string(),
        }))
    }

    pub fn bool(value: bool) -> Self {
        Expr::unspanned(ExprKind::Bool(value))
    }

    pub fn string(value: &str) -> Self {
        Expr::unspanned(ExprKind::String(value.to_string()))
    }

    pub fn symbol(name: &str) -> Self {
        Expr::unspanned(ExprKind::Symbol(SymbolExpr {
            name: name.to_string(),
        }))
    }

    pub fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Self {
        Expr::unspanned(ExprKind::Binary(BinaryExpr {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    pub fn unary(operator: UnaryOperator, operand: Expr) -> Self {
        Expr::unspanned(ExprKind::Unary(UnaryExpr {
            operator,
            operand: Box::new(operand),
        }))
    }

    pub fn neg(operand: Expr) -> Self {
        Expr::unary(UnaryOperator::Neg, operand)
    }

    pub fn convert(value: Expr, target: &str) -> Self {
        Expr::unspanned(ExprKind::Conversion(ConversionExpr {
            value: Box::new(value),
            target: TypeAnnotation::new(target),
        }))
    }

    pub fn call(callee: &str, arguments: Vec<Expr>) -> Self {
        Expr::unspanned(ExprKind::Call(CallExpr {
            callee: callee.to_string(),
            arguments,
        }))
    }

    pub fn conditional(condition: Expr, then_body: Vec<Stmt>, else_body: Vec<Stmt>) -> Self {
        Expr::unspanned(ExprKind::Conditional(ConditionalExpr {
            condition: Box::new(condition),
            then_branch: BlockExpr { body: then_body },
            else_branch: BlockExpr { body: else_body },
        }))
    }

    pub fn block(body: Vec<Stmt>) -> Self {
        Expr::unspanned(ExprKind::Block(BlockExpr { body }))
    }

    pub fn array(elements: Vec<Expr>) -> Self {
        Expr::unspanned(ExprKind::Array(ArrayExpr { elements }))
    }

    /// The statically known value of a literal or a negated literal.
    pub fn literal_value(&self) -> Option<crate::types::literals::LiteralValue> {
        use crate::types::literals::LiteralValue;

        match &self.kind {
            ExprKind::Integer(integer) => Some(LiteralValue::Int(integer.value)),
            ExprKind::Float(float) => Some(LiteralValue::Float(float.value)),
            ExprKind::Unary(UnaryExpr {
                operator: UnaryOperator::Neg,
                operand,
            }) => operand.literal_value().map(LiteralValue::negated),
            _ => None,
        }
    }
}
