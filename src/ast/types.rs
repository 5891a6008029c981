//! Type annotations as they are written in source.
//!
//! An annotation is kept as text (`i32`, `[3]i32`, `[_][4]f64`) until the
//! type checker resolves it against the built-in type table.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::{
    errors::errors::ErrorImpl,
    types::types::{ConcreteArrayType, DimSpec, Type},
    Span,
};

lazy_static! {
    pub static ref BUILTIN_TYPES: HashMap<&'static str, Type> = {
        let mut map = HashMap::new();
        map.insert("i32", Type::I32);
        map.insert("i64", Type::I64);
        map.insert("f32", Type::F32);
        map.insert("f64", Type::F64);
        map.insert("bool", Type::Bool);
        map.insert("string", Type::String);
        map.insert("void", Type::Void);
        map
    };
    static ref ANNOTATION: Regex = Regex::new(r"^((?:\[(?:\d+|_)\])*)([A-Za-z_][A-Za-z0-9_]*)$").unwrap();
    static ref DIMENSION: Regex = Regex::new(r"\[(\d+|_)\]").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub text: String,
    pub span: Span,
}

impl TypeAnnotation {
    pub fn new(text: &str) -> Self {
        TypeAnnotation {
            text: text.trim().to_string(),
            span: Span::null(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Resolves the annotation to a `Type`.
    pub fn resolve(&self) -> Result<Type, ErrorImpl> {
        let Some(captures) = ANNOTATION.captures(&self.text) else {
            if self.text.contains('[') || self.text.contains(']') {
                return Err(ErrorImpl::InvalidTypeAnnotation {
                    annotation: self.text.clone(),
                });
            }
            return Err(ErrorImpl::UnknownType {
                type_: self.text.clone(),
            });
        };

        let base = &captures[2];
        let element = BUILTIN_TYPES
            .get(base)
            .cloned()
            .ok_or_else(|| ErrorImpl::UnknownType {
                type_: base.to_string(),
            })?;

        let mut dims = vec![];
        for dim in DIMENSION.captures_iter(&captures[1]) {
            match &dim[1] {
                "_" => dims.push(DimSpec::Inferred),
                size => dims.push(DimSpec::Fixed(size.parse().map_err(|_| {
                    ErrorImpl::InvalidTypeAnnotation {
                        annotation: self.text.clone(),
                    }
                })?)),
            }
        }

        if dims.is_empty() {
            return Ok(element);
        }

        ConcreteArrayType::new(element, dims)
            .map(Type::ConcreteArray)
            .map_err(|_| ErrorImpl::InvalidTypeAnnotation {
                annotation: self.text.clone(),
            })
    }
}
