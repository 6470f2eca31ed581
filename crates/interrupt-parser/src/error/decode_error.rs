//! The DecodeError type for wrapping decode diagnostics.

use std::fmt;

use crate::error::Diagnostic;

/// A type alias for `Result<T, Diagnostic>`.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Error type for decoding.
///
/// Wraps one or more diagnostics.
#[derive(Debug)]
pub struct DecodeError {
    diagnostics: Vec<Diagnostic>,
}

impl DecodeError {
    /// Create a new decode error from diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{}", first)?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}

impl From<Diagnostic> for DecodeError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
        }
    }
}

impl From<Vec<Diagnostic>> for DecodeError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_decode_error_from_diagnostic() {
        let diag = Diagnostic::error("test error").with_code(ErrorCode::E001);
        let err: DecodeError = diag.into();

        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].message(), "test error");
    }

    #[test]
    fn test_decode_error_display_single() {
        let err: DecodeError = Diagnostic::error("bad context").into();

        assert_eq!(err.to_string(), "error: bad context");
    }

    #[test]
    fn test_decode_error_display_multiple() {
        let err = DecodeError::new(vec![
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
            Diagnostic::error("third error"),
        ]);

        assert_eq!(err.to_string(), "error: first error (+2 more)");
    }
}
