//! Compile-time bounds checks for literal values.
//!
//! This is the only place the analyzer looks at a number's value rather than
//! its type, and it only ever does so for literals written in the source.

use std::fmt::Display;

use thiserror::Error;

use super::types::Type;

/// The statically known value of a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    Int(i128),
    Float(f64),
}

impl LiteralValue {
    pub fn negated(self) -> Self {
        match self {
            LiteralValue::Int(value) => LiteralValue::Int(-value),
            LiteralValue::Float(value) => LiteralValue::Float(-value),
        }
    }

    fn as_f64(&self) -> f64 {
        match self {
            LiteralValue::Int(value) => *value as f64,
            LiteralValue::Float(value) => *value,
        }
    }
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiteralValue::Int(value) => write!(f, "{}", value),
            LiteralValue::Float(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("literal {literal} exceeds {type_name} range [{min}, {max}]")]
pub struct RangeError {
    pub literal: String,
    pub type_name: String,
    pub min: String,
    pub max: String,
}

impl RangeError {
    pub fn suggestion(&self) -> String {
        format!(
            "use explicit conversion if truncation is intended: {}:{}",
            self.literal, self.type_name
        )
    }
}

/// Representable bounds of a concrete numeric type, as `(min, max)` text.
pub fn type_range(target: &Type) -> Option<(String, String)> {
    match target {
        Type::I32 => Some((i32::MIN.to_string(), i32::MAX.to_string())),
        Type::I64 => Some((i64::MIN.to_string(), i64::MAX.to_string())),
        Type::F32 => Some((format!("{:e}", f32::MIN), format!("{:e}", f32::MAX))),
        Type::F64 => Some((format!("{:e}", f64::MIN), format!("{:e}", f64::MAX))),
        _ => None,
    }
}

fn fits(value: LiteralValue, target: &Type) -> bool {
    match (value, target) {
        (LiteralValue::Int(v), Type::I32) => v >= i32::MIN as i128 && v <= i32::MAX as i128,
        (LiteralValue::Int(v), Type::I64) => v >= i64::MIN as i128 && v <= i64::MAX as i128,
        (LiteralValue::Float(v), Type::I32) => v >= i32::MIN as f64 && v <= i32::MAX as f64,
        (LiteralValue::Float(v), Type::I64) => v >= i64::MIN as f64 && v <= i64::MAX as f64,
        (value, Type::F32) => value.as_f64().abs() <= f32::MAX as f64,
        (value, Type::F64) => value.as_f64().is_finite(),
        _ => true,
    }
}

/// Checks that `value` fits `target`.
///
/// Non-numeric targets have no range and always pass.
pub fn validate_literal_range(
    value: LiteralValue,
    target: &Type,
    source_text: &str,
) -> Result<(), RangeError> {
    let Some((min, max)) = type_range(target) else {
        return Ok(());
    };

    if fits(value, target) {
        Ok(())
    } else {
        tracing::trace!(%value, %target, "literal out of range");
        Err(RangeError {
            literal: source_text.to_string(),
            type_name: target.to_string(),
            min,
            max,
        })
    }
}

/// Validates the implicit coercion of a literal from its comptime type.
///
/// Only comptime sources are checked; a concrete value was already range
/// checked when it got its type.
pub fn validate_literal_coercion(
    value: LiteralValue,
    from_type: &Type,
    to_type: &Type,
    source_text: Option<&str>,
) -> Result<(), String> {
    if !from_type.is_comptime() || !to_type.is_concrete_numeric() {
        return Ok(());
    }

    let text = match source_text {
        Some(text) => text.to_string(),
        None => value.to_string(),
    };

    validate_literal_range(value, to_type, &text)
        .map_err(|error| format!("{} ({})", error, error.suggestion()))
}
