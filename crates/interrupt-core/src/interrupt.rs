//! The error object produced by encoding a record.

use std::fmt;

use crate::qualified::Qualified;

/// An encoded diagnostic carried as a Rust error.
///
/// The encoded blob is both the error's printable form and its
/// machine-readable payload: printing an `Interrupt` shows the blob, and
/// feeding the blob to the decoder recovers the diagnostic tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interrupt {
    qualified: Qualified,
    stack: String,
}

impl Interrupt {
    /// Wrap an encoded blob.
    pub fn new(qualified: Qualified, stack: String) -> Self {
        Self { qualified, stack }
    }

    /// Returns the identifier.
    pub fn qualified(&self) -> &Qualified {
        &self.qualified
    }

    /// Returns the encoded blob.
    pub fn stack(&self) -> &str {
        &self.stack
    }

    /// Consume the error and return the encoded blob.
    pub fn into_stack(self) -> String {
        self.stack
    }
}

impl fmt::Display for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stack)
    }
}

impl std::error::Error for Interrupt {}
