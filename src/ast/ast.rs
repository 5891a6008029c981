use std::fmt::Display;

use crate::Span;

use super::{
    expressions::{
        ArrayExpr, BinaryExpr, BlockExpr, CallExpr, ConditionalExpr, ConversionExpr, FloatExpr,
        IntegerExpr, SymbolExpr, UnaryExpr,
    },
    statements::{
        AssignStmt, AssignmentStmt, BlockStmt, ExpressionStmt, FnDeclStmt, ReturnStmt,
        VarDeclStmt,
    },
};

/// A whole compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn new(items: Vec<Item>) -> Self {
        Program { items }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Function(FnDeclStmt),
    Statement(Stmt),
}

impl From<Stmt> for Item {
    fn from(stmt: Stmt) -> Self {
        Item::Statement(stmt)
    }
}

impl From<FnDeclStmt> for Item {
    fn from(function: FnDeclStmt) -> Self {
        Item::Function(function)
    }
}

/// Statement Types
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    /// `name = value`
    Assignment(AssignmentStmt),
    Return(ReturnStmt),
    /// `assign value`, the value of an expression block.
    Assign(AssignStmt),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Assign(stmt) => &stmt.span,
            Stmt::Expression(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        match &mut self {
            Stmt::VarDecl(stmt) => stmt.span = span,
            Stmt::Assignment(stmt) => stmt.span = span,
            Stmt::Return(stmt) => stmt.span = span,
            Stmt::Assign(stmt) => stmt.span = span,
            Stmt::Expression(stmt) => stmt.span = span,
            Stmt::Block(stmt) => stmt.span = span,
        }
        self
    }
}

/// Expression node: what it is and where it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression Types
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Integer(IntegerExpr),
    Float(FloatExpr),
    Bool(bool),
    String(String),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    /// `value:Type`
    Conversion(ConversionExpr),
    Call(CallExpr),
    Conditional(ConditionalExpr),
    Block(BlockExpr),
    Array(ArrayExpr),
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    pub fn get_span(&self) -> &Span {
        &self.span
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Source text of the explicit conversion `self:target`.
    pub fn to_conversion(&self, target: impl Display) -> String {
        match self.kind {
            ExprKind::Binary(_) | ExprKind::Unary(_) | ExprKind::Conversion(_) => {
                format!("({}):{}", self, target)
            }
            _ => format!("{}:{}", self, target),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    /// `/`, always produces a float.
    Div,
    /// `\`, integer division.
    IntDiv,
    Mod,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    And,
    Or,
}

impl BinaryOperator {
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Lt | BinaryOperator::Gt | BinaryOperator::Le | BinaryOperator::Ge
        )
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, BinaryOperator::Eq | BinaryOperator::Ne)
    }

    pub fn is_comparison(&self) -> bool {
        self.is_relational() || self.is_equality()
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::IntDiv => "\\",
            BinaryOperator::Mod => "%",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Le => "<=",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Neg,
    Not,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Neg => write!(f, "-"),
            UnaryOperator::Not => write!(f, "!"),
        }
    }
}

fn write_operand(f: &mut std::fmt::Formatter<'_>, operand: &Expr) -> std::fmt::Result {
    match operand.kind {
        ExprKind::Binary(_) => write!(f, "({})", operand),
        _ => write!(f, "{}", operand),
    }
}

fn write_body(f: &mut std::fmt::Formatter<'_>, body: &[Stmt]) -> std::fmt::Result {
    write!(f, "{{")?;
    for (index, stmt) in body.iter().enumerate() {
        if index > 0 {
            write!(f, ";")?;
        }
        write!(f, " {}", stmt)?;
    }
    write!(f, " }}")
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::Integer(integer) => write!(f, "{}", integer.text),
            ExprKind::Float(float) => write!(f, "{}", float.text),
            ExprKind::Bool(value) => write!(f, "{}", value),
            ExprKind::String(value) => write!(f, "{:?}", value),
            ExprKind::Symbol(symbol) => write!(f, "{}", symbol.name),
            ExprKind::Binary(binary) => {
                write_operand(f, &binary.left)?;
                write!(f, " {} ", binary.operator)?;
                write_operand(f, &binary.right)
            }
            ExprKind::Unary(unary) => {
                write!(f, "{}", unary.operator)?;
                write_operand(f, &unary.operand)
            }
            ExprKind::Conversion(conversion) => {
                write_operand(f, &conversion.value)?;
                write!(f, ":{}", conversion.target.text)
            }
            ExprKind::Call(call) => {
                write!(f, "{}(", call.callee)?;
                for (index, argument) in call.arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
            ExprKind::Conditional(conditional) => {
                write!(f, "if {} ", conditional.condition)?;
                write_body(f, &conditional.then_branch.body)?;
                write!(f, " else ")?;
                write_body(f, &conditional.else_branch.body)
            }
            ExprKind::Block(block) => write_body(f, &block.body),
            ExprKind::Array(array) => {
                write!(f, "[")?;
                for (index, element) in array.elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::VarDecl(decl) => {
                write!(f, "{} {}", decl.mutability, decl.identifier)?;
                if let Some(annotation) = &decl.explicit_type {
                    write!(f, ": {}", annotation.text)?;
                }
                match &decl.value {
                    Some(value) => write!(f, " = {}", value),
                    None => write!(f, " = undef"),
                }
            }
            Stmt::Assignment(assignment) => {
                write!(f, "{} = {}", assignment.identifier, assignment.value)
            }
            Stmt::Return(ret) => match &ret.value {
                Some(value) => write!(f, "return {}", value),
                None => write!(f, "return"),
            },
            Stmt::Assign(assign) => write!(f, "assign {}", assign.value),
            Stmt::Expression(expression) => write!(f, "{}", expression.expression),
            Stmt::Block(block) => write_body(f, &block.body),
        }
    }
}
