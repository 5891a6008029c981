use std::fmt::Display;

use thiserror::Error;

use crate::{types::literals::RangeError, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            ErrorImpl::VoidValue => "VoidValue",
            ErrorImpl::PrecisionLoss { .. } => "PrecisionLoss",
            ErrorImpl::LiteralRange { .. } => "LiteralRange",
            ErrorImpl::MixedTypeOperation { .. } => "MixedTypeOperation",
            ErrorImpl::InvalidOperand { .. } => "InvalidOperand",
            ErrorImpl::NonBoolComparisonTarget { .. } => "NonBoolComparisonTarget",
            ErrorImpl::FloatOperandInIntegerDivision { .. } => "FloatOperandInIntegerDivision",
            ErrorImpl::FloatDivisionToInteger { .. } => "FloatDivisionToInteger",
            ErrorImpl::AmbiguousResolution { .. } => "AmbiguousResolution",
            ErrorImpl::InvalidConversion { .. } => "InvalidConversion",
            ErrorImpl::ArrayDimensionMismatch { .. } => "ArrayDimensionMismatch",
            ErrorImpl::ArrayDimensionCount { .. } => "ArrayDimensionCount",
            ErrorImpl::ArrayElementCount { .. } => "ArrayElementCount",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::InvalidTypeAnnotation { .. } => "InvalidTypeAnnotation",
            ErrorImpl::ImmutableAssignment { .. } => "ImmutableAssignment",
            ErrorImpl::ImmutableUndef { .. } => "ImmutableUndef",
            ErrorImpl::UninitializedVariable { .. } => "UninitializedVariable",
            ErrorImpl::ExpectedExplicitType { .. } => "ExpectedExplicitType",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::UnexpectedReturnValue { .. } => "UnexpectedReturnValue",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::InvalidBlockTerminator => "InvalidBlockTerminator",
            ErrorImpl::AssignOutsideBlock => "AssignOutsideBlock",
            ErrorImpl::AnalysisLimitExceeded { .. } => "AnalysisLimitExceeded",
            ErrorImpl::UnusedVariable { .. } => "UnusedVariable",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMismatch {
                function,
                index,
                expected,
                received,
                hint,
            } => {
                let mut tip = format!(
                    "Argument {} of `{}` expects `{}`, received `{}`",
                    index, function, expected, received
                );
                if let Some(hint) = hint {
                    tip.push_str(&format!("; {}", hint));
                }
                ErrorTip::Suggestion(tip)
            }
            ErrorImpl::VoidValue => ErrorTip::Suggestion(String::from(
                "A void function call does not produce a value",
            )),
            ErrorImpl::PrecisionLoss { suggestion, .. } => {
                ErrorTip::Suggestion(format!("Use explicit conversion: {}", suggestion))
            }
            ErrorImpl::LiteralRange { suggestion, .. } => {
                ErrorTip::Suggestion(suggestion.clone())
            }
            ErrorImpl::MixedTypeOperation { left, right, .. } => ErrorTip::Suggestion(format!(
                "Mixed type operations require explicit conversions: convert `{}` or `{}` with `value:type`, or annotate the result type",
                left, right
            )),
            ErrorImpl::InvalidOperand { expected, .. } => {
                ErrorTip::Suggestion(format!("Operand must be {}", expected))
            }
            ErrorImpl::NonBoolComparisonTarget { .. } => ErrorTip::Suggestion(String::from(
                "Comparisons always produce `bool`",
            )),
            ErrorImpl::FloatOperandInIntegerDivision { .. } => ErrorTip::Suggestion(
                String::from("Use `/` for float division, or convert the operand to an integer type"),
            ),
            ErrorImpl::FloatDivisionToInteger { target } => ErrorTip::Suggestion(format!(
                "Use `\\` for integer division, or convert the quotient with `:{}`",
                target
            )),
            ErrorImpl::AmbiguousResolution { .. } => ErrorTip::Suggestion(String::from(
                "Add an explicit type annotation",
            )),
            ErrorImpl::InvalidConversion { guidance, .. } => {
                ErrorTip::Suggestion(guidance.clone())
            }
            ErrorImpl::ArrayDimensionMismatch {
                dimension,
                expected,
                actual,
            } => ErrorTip::Suggestion(format!(
                "Dimension {} expects size {}, found {}",
                dimension, expected, actual
            )),
            ErrorImpl::ArrayDimensionCount { expected, actual } => ErrorTip::Suggestion(format!(
                "Expected {} dimensions, found {}",
                expected, actual
            )),
            ErrorImpl::ArrayElementCount { expected, actual } => ErrorTip::Suggestion(format!(
                "Reshaping needs {} elements, the source has {}",
                expected, actual
            )),
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::InvalidTypeAnnotation { .. } => ErrorTip::Suggestion(String::from(
                "Array types are written `[3]i32`, or `[_]i32` to take the size from the value",
            )),
            ErrorImpl::ImmutableAssignment { variable } => ErrorTip::Suggestion(format!(
                "Declare `{}` with `mut` to allow reassignment",
                variable
            )),
            ErrorImpl::ImmutableUndef { variable } => ErrorTip::Suggestion(format!(
                "`val {}` can never be assigned later; give it a value or declare it `mut`",
                variable
            )),
            ErrorImpl::UninitializedVariable { variable } => ErrorTip::Suggestion(format!(
                "Assign a value to `{}` before reading it",
                variable
            )),
            ErrorImpl::ExpectedExplicitType { .. } => ErrorTip::Suggestion(String::from(
                "Add a type annotation such as `: i32`",
            )),
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::ReturnOutsideFunction => ErrorTip::None,
            ErrorImpl::UnexpectedReturnValue { function } => ErrorTip::Suggestion(format!(
                "`{}` returns void; use a bare `return`",
                function
            )),
            ErrorImpl::MissingReturnValue { expected, .. } => {
                ErrorTip::Suggestion(format!("Return a value of type `{}`", expected))
            }
            ErrorImpl::MissingReturn { function } => ErrorTip::Suggestion(format!(
                "`{}` must end with a `return` statement",
                function
            )),
            ErrorImpl::InvalidBlockTerminator => ErrorTip::Suggestion(String::from(
                "End the block with `assign <value>` or `return <value>`",
            )),
            ErrorImpl::AssignOutsideBlock => ErrorTip::Suggestion(String::from(
                "`assign` only produces the value of an expression block",
            )),
            ErrorImpl::AnalysisLimitExceeded { .. } => ErrorTip::Suggestion(String::from(
                "Split the expression into smaller declarations",
            )),
            ErrorImpl::UnusedVariable { variable } => ErrorTip::Suggestion(format!(
                "Prefix `{}` with `_` if it is intentionally unused",
                variable
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Broad family of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypeMismatch,
    PrecisionLoss,
    LiteralRange,
    MixedTypeOperation,
    AmbiguousResolution,
    ArrayDimension,
    Resolution,
    Mutability,
    Structure,
    Limit,
    Warning,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("argument {index} of {function:?} does not match: expected {expected}, received {received}")]
    ArgumentTypeMismatch {
        function: String,
        index: usize,
        expected: String,
        received: String,
        hint: Option<String>,
    },
    #[error("void value used as an expression")]
    VoidValue,
    #[error("implicit conversion from {from} to {to} loses precision")]
    PrecisionLoss {
        from: String,
        to: String,
        suggestion: String,
    },
    #[error("literal {literal} exceeds {type_name} range [{min}, {max}]")]
    LiteralRange {
        literal: String,
        type_name: String,
        min: String,
        max: String,
        suggestion: String,
    },
    #[error("mixed type operation {left} {operator} {right} requires explicit type annotation")]
    MixedTypeOperation {
        operator: String,
        left: String,
        right: String,
    },
    #[error("operator {operator} cannot take an operand of type {operand}")]
    InvalidOperand {
        operator: String,
        operand: String,
        expected: String,
    },
    #[error("comparison {operator} produces bool, not {target}")]
    NonBoolComparisonTarget { operator: String, target: String },
    #[error("integer division cannot take a float operand of type {operand}")]
    FloatOperandInIntegerDivision { operand: String },
    #[error("float division cannot produce integer type {target}")]
    FloatDivisionToInteger { target: String },
    #[error("cannot resolve type: {reason}")]
    AmbiguousResolution { reason: String },
    #[error("cannot convert {from} to {to}")]
    InvalidConversion {
        from: String,
        to: String,
        guidance: String,
    },
    #[error("array dimension {dimension} mismatch: expected {expected}, found {actual}")]
    ArrayDimensionMismatch {
        dimension: usize,
        expected: usize,
        actual: usize,
    },
    #[error("array dimension count mismatch: expected {expected}, found {actual}")]
    ArrayDimensionCount { expected: usize, actual: usize },
    #[error("array element count mismatch: expected {expected}, found {actual}")]
    ArrayElementCount { expected: String, actual: usize },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("function {function:?} not declared")]
    FunctionNotDeclared { function: String },
    #[error("function {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("invalid type annotation {annotation:?}")]
    InvalidTypeAnnotation { annotation: String },
    #[error("cannot assign to immutable variable {variable:?}")]
    ImmutableAssignment { variable: String },
    #[error("immutable variable {variable:?} cannot be declared undef")]
    ImmutableUndef { variable: String },
    #[error("variable {variable:?} read before it was assigned")]
    UninitializedVariable { variable: String },
    #[error("variable {variable:?} needs an explicit type")]
    ExpectedExplicitType { variable: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("return statement outside of function")]
    ReturnOutsideFunction,
    #[error("function {function:?} returns void but a value was returned")]
    UnexpectedReturnValue { function: String },
    #[error("function {function:?} must return a value of type {expected}")]
    MissingReturnValue { function: String, expected: String },
    #[error("function {function:?} does not return on every path")]
    MissingReturn { function: String },
    #[error("expression block must end with assign or return")]
    InvalidBlockTerminator,
    #[error("assign must be the last statement of an expression block")]
    AssignOutsideBlock,
    #[error("expression nesting exceeds the analysis limit of {limit}")]
    AnalysisLimitExceeded { limit: usize },
    #[error("variable {variable:?} is never read")]
    UnusedVariable { variable: String },
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::TypeMismatch { .. }
            | ErrorImpl::ArgumentTypeMismatch { .. }
            | ErrorImpl::VoidValue
            | ErrorImpl::InvalidOperand { .. }
            | ErrorImpl::NonBoolComparisonTarget { .. }
            | ErrorImpl::FloatOperandInIntegerDivision { .. }
            | ErrorImpl::InvalidConversion { .. } => ErrorKind::TypeMismatch,
            ErrorImpl::PrecisionLoss { .. } | ErrorImpl::FloatDivisionToInteger { .. } => {
                ErrorKind::PrecisionLoss
            }
            ErrorImpl::LiteralRange { .. } => ErrorKind::LiteralRange,
            ErrorImpl::MixedTypeOperation { .. } => ErrorKind::MixedTypeOperation,
            ErrorImpl::AmbiguousResolution { .. } | ErrorImpl::ExpectedExplicitType { .. } => {
                ErrorKind::AmbiguousResolution
            }
            ErrorImpl::ArrayDimensionMismatch { .. }
            | ErrorImpl::ArrayDimensionCount { .. }
            | ErrorImpl::ArrayElementCount { .. } => ErrorKind::ArrayDimension,
            ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::FunctionNotDeclared { .. }
            | ErrorImpl::FunctionAlreadyDeclared { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::InvalidTypeAnnotation { .. } => ErrorKind::Resolution,
            ErrorImpl::ImmutableAssignment { .. }
            | ErrorImpl::ImmutableUndef { .. }
            | ErrorImpl::UninitializedVariable { .. } => ErrorKind::Mutability,
            ErrorImpl::UnexpectedArguments { .. }
            | ErrorImpl::MissingArguments { .. }
            | ErrorImpl::ReturnOutsideFunction
            | ErrorImpl::UnexpectedReturnValue { .. }
            | ErrorImpl::MissingReturnValue { .. }
            | ErrorImpl::MissingReturn { .. }
            | ErrorImpl::InvalidBlockTerminator
            | ErrorImpl::AssignOutsideBlock => ErrorKind::Structure,
            ErrorImpl::AnalysisLimitExceeded { .. } => ErrorKind::Limit,
            ErrorImpl::UnusedVariable { .. } => ErrorKind::Warning,
        }
    }
}

impl From<RangeError> for ErrorImpl {
    fn from(error: RangeError) -> Self {
        let suggestion = error.suggestion();
        ErrorImpl::LiteralRange {
            literal: error.literal,
            type_name: error.type_name,
            min: error.min,
            max: error.max,
            suggestion,
        }
    }
}
