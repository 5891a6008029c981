//! The type lattice and the rules that relate its members.
//!
//! This module is pure: nothing in it touches the symbol table or the
//! diagnostics sink, so the range and array subsystems can depend on it
//! without pulling in the analyzer. It contains:
//!
//! - The closed `Type` union with its comptime and concrete members
//! - Classification predicates and numeric widening
//! - Implicit coercion, precision-loss and explicit-conversion rules
//! - Compile-time range validation for literal values

pub mod coercion;
pub mod literals;
pub mod types;

#[cfg(test)]
mod tests;
