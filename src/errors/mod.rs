//! Diagnostics produced by the analyzer.
//!
//! This module defines:
//!
//! - `Error`, a diagnostic with its source position
//! - `ErrorImpl`, every analysis error and warning variant
//! - `ErrorKind`, the broad family each variant belongs to
//! - `Diagnostics`, the sink a single analysis pass records into

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
