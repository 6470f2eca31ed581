//! Error and diagnostic system for the Interrupt decoder.
//!
//! Decoding only fails when a blob claims the composite format but is
//! internally inconsistent, which in practice means a context dump that is
//! not valid JSON. Such failures are reported as [`Diagnostic`]s carrying:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the original blob
//! - Help text
//!
//! Multiple diagnostics are wrapped in [`DecodeError`].
//!
//! # Example
//!
//! ```
//! # use interrupt_parser::error::{Diagnostic, ErrorCode};
//! # use interrupt_parser::Span;
//!
//! let diag = Diagnostic::error("malformed context dump: expected value")
//!     .with_code(ErrorCode::E001)
//!     .with_label(Span::new(22..23), "invalid JSON here")
//!     .with_secondary_label(Span::new(20..40), "context dump")
//!     .with_help("context dumps are written by the encoder; was the text edited?");
//! ```

mod decode_error;
mod diagnostic;
mod error_code;
mod label;

pub(crate) use decode_error::Result;

pub use decode_error::DecodeError;
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
