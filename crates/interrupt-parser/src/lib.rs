//! # Interrupt Parser
//!
//! Decoder for Interrupt diagnostic text. This crate recovers the structured
//! tree an Interrupt encoder embedded in an error's printable form.
//!
//! ## Usage
//!
//! ```
//! # use interrupt_parser::{decode, DecodeError};
//!
//! fn main() -> Result<(), DecodeError> {
//!     let blob = "bigeasy.example#bar\n\n{\n    \"statusCode\": 404\n}\n\nstack:\n    at main (src/main.rs:4:5)\n";
//!
//!     let node = decode(blob)?.expect("composite text");
//!     let diagnostic = node.as_diagnostic().expect("diagnostic node");
//!     assert_eq!(diagnostic.qualifier(), "bigeasy.example");
//!     assert_eq!(diagnostic.name(), "bar");
//!     Ok(())
//! }
//! ```

mod decoder;
pub mod error;
mod grammar;
mod lines;
mod span;

pub use error::DecodeError;
pub use span::Span;

use log::{debug, trace};

use interrupt_core::node::Node;

/// Decode a root blob.
///
/// A root is either fully composite or not a diagnostic at all, so text
/// that does not match the composite shape yields `Ok(None)`.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the text claims the composite format but
/// one of its context dumps is not valid JSON. Spans in the diagnostics
/// point into `source`.
///
/// # Example
///
/// ```
/// # use interrupt_parser::decode;
///
/// assert!(decode("").unwrap().is_none());
/// assert!(decode("TypeError: boom\n    at main (src/main.rs:1:1)").unwrap().is_none());
/// ```
pub fn decode(source: &str) -> Result<Option<Node>, DecodeError> {
    let lines = lines::split(source);
    let Some(layout) = decoder::detect(&lines) else {
        trace!(len = source.len(); "Text is not composite");
        return Ok(None);
    };

    let node = decoder::decode_composite(layout)?;
    debug!(
        qualifier = node.qualifier(),
        label = node.name(),
        depth = node.depth();
        "Decoded diagnostic"
    );
    Ok(Some(Node::Diagnostic(node)))
}

/// Decode text found in a cause position.
///
/// Unlike [`decode`], text that is not composite still yields a node: a
/// [`ForeignNode`](interrupt_core::node::ForeignNode) when it ends in frame
/// lines under a `Type: message` header, and a text leaf otherwise.
///
/// # Errors
///
/// Returns a [`DecodeError`] for the same malformed context dumps as
/// [`decode`].
///
/// # Example
///
/// ```
/// # use interrupt_parser::decode_nested;
///
/// let node = decode_nested("unlikely string").unwrap();
/// assert_eq!(node.as_text(), Some("unlikely string"));
/// ```
pub fn decode_nested(source: &str) -> Result<Node, DecodeError> {
    let lines = lines::split(source);
    Ok(decoder::decode_cause(&lines)?)
}
