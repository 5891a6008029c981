use super::errors::{Error, ErrorKind};

/// Append-only collection of everything one analysis pass reported.
///
/// Recording never fails and never stops the pass; callers decide what to
/// do with the full list at the end.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
    warnings: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn push_error(&mut self, error: Error) {
        tracing::trace!(name = error.get_error_name(), position = error.get_position().0, "error recorded");
        self.errors.push(error);
    }

    pub fn push_warning(&mut self, warning: Error) {
        tracing::trace!(name = warning.get_error_name(), position = warning.get_position().0, "warning recorded");
        self.warnings.push(warning);
    }

    /// Records `error` as a warning or an error depending on its kind.
    pub fn push(&mut self, error: Error) {
        if error.kind() == ErrorKind::Warning {
            self.push_warning(error);
        } else {
            self.push_error(error);
        }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Error] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(|error| error.kind() == kind)
            .count()
    }

    /// `Ok(value)` when nothing but warnings was recorded, the errors otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, Vec<Error>> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }
}
