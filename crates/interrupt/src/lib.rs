//! Interrupt - structured diagnostics carried in an error's printable text.
//!
//! An Interrupt diagnostic is a `qualifier#label` identifier, a context map
//! and an ordered list of causes. The [`Encoder`] renders it into a
//! human-readable text blob that doubles as the error's stack, and
//! [`decode`] recovers the diagnostic tree from that blob later.
//!
//! # Example
//!
//! ```
//! use interrupt::{Encoder, context::Context, qualified::Qualified, record::DiagnosticRecord};
//!
//! let record = DiagnosticRecord::new(Qualified::new("bigeasy.example", "bar").unwrap())
//!     .with_context("statusCode", 404)
//!     .with_cause_context("socket hang up", Context::new().with("url", "http://x"));
//!
//! let error = Encoder::default().raise(record);
//!
//! let node = interrupt::decode(error.stack()).unwrap().unwrap();
//! let diagnostic = node.as_diagnostic().unwrap();
//! assert_eq!(diagnostic.context().unwrap()["statusCode"], 404);
//! assert_eq!(diagnostic.contexts()[0].as_ref().unwrap()["url"], "http://x");
//! ```

pub mod config;

mod encode;
mod error;
mod serialize;

pub use interrupt_core::{cause, context, frame, node, qualified, record};
pub use interrupt_core::interrupt::Interrupt;

pub use encode::Encoder;
pub use error::InterruptError;

use log::info;

use node::Node;

/// Decode a root blob into a diagnostic tree.
///
/// Returns `Ok(None)` when the text is not an encoded diagnostic.
///
/// # Errors
///
/// Returns [`InterruptError::Decode`] when the text is composite but one of
/// its context dumps is not valid JSON. The error keeps `source` for
/// reporting.
///
/// # Examples
///
/// ```
/// assert!(interrupt::decode("not a diagnostic").unwrap().is_none());
/// ```
pub fn decode(source: &str) -> Result<Option<Node>, InterruptError> {
    info!(len = source.len(); "Decoding text");
    interrupt_parser::decode(source).map_err(|err| InterruptError::new_decode_error(err, source))
}

/// Decode text found in a cause position.
///
/// Text that is not composite still decodes, to a foreign error node or a
/// text leaf.
///
/// # Errors
///
/// Same as [`decode`].
pub fn decode_nested(source: &str) -> Result<Node, InterruptError> {
    interrupt_parser::decode_nested(source)
        .map_err(|err| InterruptError::new_decode_error(err, source))
}
