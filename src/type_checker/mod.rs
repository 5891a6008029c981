//! Type checking and semantic analysis module.
//!
//! This module decides the type of every expression in a program:
//!
//! - Resolving operator result types, with comptime operands adapting to
//!   their concrete partners or to the expected type
//! - Classifying expression blocks as compile-time or runtime evaluable
//! - Validating explicit conversions and implicit coercions
//! - Checking declarations, assignments, calls and returns
//! - Managing scopes and reporting unused bindings
//!
//! Errors never stop the analysis. A failed expression gets the `Unknown`
//! type so that the same mistake is not reported twice.

pub mod arrays;
pub mod binary_ops;
pub mod block_eval;
pub mod blocks;
pub mod context;
pub mod conversions;
pub mod declarations;
pub mod functions;
pub mod operations;
pub mod symbols;
pub mod type_checker;
pub mod typed_ast;
