//! Error types for Interrupt operations.
//!
//! This module provides the main error type [`InterruptError`] which wraps
//! the error conditions that can occur around encoding and decoding.
//! Encoding itself never fails; these errors come from decoding, reading
//! input and loading configuration.

use std::io;

use thiserror::Error;

use interrupt_core::qualified::QualifiedError;
use interrupt_parser::DecodeError;

/// The main error type for Interrupt operations.
///
/// # Diagnostic Variants
///
/// The `Decode` variant contains structured error information with spans
/// into the decoded text, and keeps that text for rich error reporting.
#[derive(Debug, Error)]
pub enum InterruptError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Decode { err: DecodeError, src: String },

    #[error("Invalid record: {0}")]
    Record(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<QualifiedError> for InterruptError {
    fn from(error: QualifiedError) -> Self {
        Self::Record(error.to_string())
    }
}

impl InterruptError {
    /// Create a new `Decode` error with the associated source text.
    pub fn new_decode_error(err: DecodeError, src: impl Into<String>) -> Self {
        Self::Decode {
            err,
            src: src.into(),
        }
    }
}
