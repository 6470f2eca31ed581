//! The encoder's input.

use serde::Serialize;

use crate::{
    cause::{Cause, CauseEntry},
    context::{Context, ErrorValue},
    frame::Frame,
    qualified::Qualified,
};

/// A diagnostic record: identifier, context, causes and frames.
///
/// A record is built once per error-raising event and encoded straight away.
/// [`new`](Self::new) captures its caller's location, which the encoder uses
/// as the frame listing when no explicit frames are supplied.
///
/// # Example
///
/// ```
/// # use interrupt_core::{context::Context, qualified::Qualified, record::DiagnosticRecord};
/// let record = DiagnosticRecord::new(Qualified::new("bigeasy.example", "bar").unwrap())
///     .with_context("statusCode", 404)
///     .with_cause_context("socket hang up", Context::new().with("url", "http://x"));
///
/// assert_eq!(record.causes().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticRecord {
    qualified: Qualified,
    context: Context,
    causes: Vec<CauseEntry>,
    frames: Vec<Frame>,
    call_site: Frame,
}

impl DiagnosticRecord {
    /// Create an empty record for `qualified`, capturing the caller's location.
    #[track_caller]
    pub fn new(qualified: Qualified) -> Self {
        Self {
            qualified,
            context: Context::new(),
            causes: Vec::new(),
            frames: Vec::new(),
            call_site: Frame::caller(),
        }
    }

    /// Add a context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.context.insert(key, value);
        self
    }

    /// Add an error-shaped context entry.
    pub fn with_error_context(mut self, key: impl Into<String>, error: ErrorValue) -> Self {
        self.context.insert_error(key, error);
        self
    }

    /// Replace the whole context.
    pub fn with_context_map(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Append a cause without a sub-context.
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.causes.push(CauseEntry::new(cause));
        self
    }

    /// Append a cause paired with the context known when it was captured.
    pub fn with_cause_context(mut self, cause: impl Into<Cause>, context: Context) -> Self {
        self.causes.push(CauseEntry::new(cause).with_context(context));
        self
    }

    /// Append a prepared cause entry.
    pub fn with_cause_entry(mut self, entry: CauseEntry) -> Self {
        self.causes.push(entry);
        self
    }

    /// Supply the frame listing explicitly.
    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.frames = frames;
        self
    }

    /// Returns the identifier.
    pub fn qualified(&self) -> &Qualified {
        &self.qualified
    }

    /// Returns the context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns the causes in insertion order.
    pub fn causes(&self) -> &[CauseEntry] {
        &self.causes
    }

    /// Returns the explicitly supplied frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Returns the location where the record was created.
    pub fn call_site(&self) -> &Frame {
        &self.call_site
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qualified() -> Qualified {
        Qualified::new("acme.db", "query").unwrap()
    }

    #[test]
    fn test_record_builder() {
        let record = DiagnosticRecord::new(qualified())
            .with_context("table", "users")
            .with_cause("first")
            .with_cause_context("second", Context::new().with("attempt", 2));

        assert_eq!(record.qualified().to_string(), "acme.db#query");
        assert_eq!(record.context().len(), 1);
        assert_eq!(record.causes().len(), 2);
        assert!(record.causes()[0].context().is_none());
        assert!(record.causes()[1].context().is_some());
        assert!(record.frames().is_empty());
    }

    #[test]
    fn test_record_captures_call_site() {
        let record = DiagnosticRecord::new(qualified());
        assert_eq!(record.call_site().file(), Some(file!()));
    }

    #[test]
    fn test_record_explicit_frames() {
        let frames = vec![Frame::at("a.rs", 1, 1), Frame::at("b.rs", 2, 2)];
        let record = DiagnosticRecord::new(qualified()).with_frames(frames.clone());
        assert_eq!(record.frames(), frames.as_slice());
    }
}
