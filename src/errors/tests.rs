//! Unit tests for error handling.
//!
//! This module contains tests for error types, tips and the diagnostics sink.

use crate::errors::diagnostics::Diagnostics;
use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn at(pos: u32) -> Position {
    Position(pos, Rc::new("test.lang".to_string()))
}

fn tip_text(error: &Error) -> String {
    match error.get_tip() {
        ErrorTip::Suggestion(text) => text,
        ErrorTip::None => String::new(),
    }
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "foo".to_string(),
        },
        at(10),
    );

    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(error.kind(), ErrorKind::Resolution);
}

#[test]
fn test_error_position() {
    let error = Error::new(ErrorImpl::ReturnOutsideFunction, at(42));

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.lang");
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            expected: "i32".to_string(),
            received: "string".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "TypeMismatch");
    assert_eq!(tip_text(&error), "Expected type `i32`, received `string`");
    assert_eq!(
        error.to_string(),
        "types do not match: expected i32, received string"
    );
}

#[test]
fn test_precision_loss_carries_rewrite() {
    let error = Error::new(
        ErrorImpl::PrecisionLoss {
            from: "comptime_float".to_string(),
            to: "i32".to_string(),
            suggestion: "(10 + 3.14):i32".to_string(),
        },
        at(0),
    );

    assert_eq!(error.kind(), ErrorKind::PrecisionLoss);
    assert!(tip_text(&error).contains("(10 + 3.14):i32"));
}

#[test]
fn test_literal_range_message() {
    let error = Error::new(
        ErrorImpl::LiteralRange {
            literal: "2147483648".to_string(),
            type_name: "i32".to_string(),
            min: "-2147483648".to_string(),
            max: "2147483647".to_string(),
            suggestion: "use explicit conversion if truncation is intended: 2147483648:i32"
                .to_string(),
        },
        at(0),
    );

    assert_eq!(error.kind(), ErrorKind::LiteralRange);
    assert_eq!(
        error.to_string(),
        "literal 2147483648 exceeds i32 range [-2147483648, 2147483647]"
    );
    assert!(tip_text(&error).ends_with("2147483648:i32"));
}

#[test]
fn test_argument_mismatch_hint() {
    let error = Error::new(
        ErrorImpl::ArgumentTypeMismatch {
            function: "f".to_string(),
            index: 2,
            expected: "i32".to_string(),
            received: "comptime_float".to_string(),
            hint: Some("use explicit conversion: 2.0:i32".to_string()),
        },
        at(0),
    );

    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    let tip = tip_text(&error);
    assert!(tip.starts_with("Argument 2 of `f` expects `i32`"));
    assert!(tip.ends_with("2.0:i32"));
}

#[test]
fn test_array_dimension_names_index() {
    let error = Error::new(
        ErrorImpl::ArrayDimensionMismatch {
            dimension: 1,
            expected: 4,
            actual: 3,
        },
        at(0),
    );

    assert_eq!(error.kind(), ErrorKind::ArrayDimension);
    assert_eq!(
        error.to_string(),
        "array dimension 1 mismatch: expected 4, found 3"
    );
}

#[test]
fn test_return_outside_function_has_no_tip() {
    let error = Error::new(ErrorImpl::ReturnOutsideFunction, at(0));

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.kind(), ErrorKind::Structure);
}

#[test]
fn test_error_kinds() {
    let cases = [
        (
            ErrorImpl::MixedTypeOperation {
                operator: "+".to_string(),
                left: "i32".to_string(),
                right: "i64".to_string(),
            },
            ErrorKind::MixedTypeOperation,
        ),
        (
            ErrorImpl::AmbiguousResolution {
                reason: "float division requires explicit result type".to_string(),
            },
            ErrorKind::AmbiguousResolution,
        ),
        (
            ErrorImpl::ImmutableAssignment {
                variable: "x".to_string(),
            },
            ErrorKind::Mutability,
        ),
        (
            ErrorImpl::AnalysisLimitExceeded { limit: 8 },
            ErrorKind::Limit,
        ),
        (
            ErrorImpl::UnusedVariable {
                variable: "x".to_string(),
            },
            ErrorKind::Warning,
        ),
    ];

    for (error, kind) in cases {
        assert_eq!(error.kind(), kind, "{}", error);
    }
}

#[test]
fn test_diagnostics_split_warnings() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());

    diagnostics.push(Error::new(
        ErrorImpl::UnusedVariable {
            variable: "x".to_string(),
        },
        at(1),
    ));
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warnings().len(), 1);

    diagnostics.push(Error::new(ErrorImpl::InvalidBlockTerminator, at(2)));
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.count_of(ErrorKind::Structure), 1);
}

#[test]
fn test_diagnostics_into_result() {
    let mut clean = Diagnostics::new();
    clean.push_warning(Error::new(
        ErrorImpl::UnusedVariable {
            variable: "y".to_string(),
        },
        at(0),
    ));
    assert_eq!(clean.into_result(7), Ok(7));

    let mut failed = Diagnostics::new();
    failed.push_error(Error::new(ErrorImpl::ReturnOutsideFunction, at(3)));
    failed.push_error(Error::new(ErrorImpl::AssignOutsideBlock, at(4)));
    let errors = failed.into_result(()).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[1].get_error_name(), "AssignOutsideBlock");
}
