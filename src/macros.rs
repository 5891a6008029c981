//! Utility macros for the analyzer.
//!
//! - `MK_ERROR!` - Creates an `Error` positioned at the start of a span

/// Creates an `Error` located at the start of `$span`.
///
/// # Example
///
/// ```ignore
/// let error = MK_ERROR!(ErrorImpl::ReturnOutsideFunction, stmt.span);
/// ```
#[macro_export]
macro_rules! MK_ERROR {
    ($error:expr, $span:expr) => {
        $crate::errors::errors::Error::new($error, $span.start.clone())
    };
}
