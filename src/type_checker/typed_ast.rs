use std::fmt::Display;

use crate::{
    types::types::{Mutability, Type},
    Span,
};

/// A declared variable with the type the analysis settled on.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBinding {
    pub name: String,
    pub ty: Type,
    pub mutability: Mutability,
    pub span: Span,
}

impl Display for ResolvedBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.mutability, self.name, self.ty)
    }
}
