//! Causes attached to a diagnostic record.
//!
//! A [`Cause`] is one of the explicit shapes the encoder knows how to render;
//! no runtime probing decides how a value is printed.

use std::{any, error::Error as StdError, fmt};

use serde::Serialize;
use serde_json::Value;

use crate::{
    context::Context,
    format::{INDENT, TYPE_SEPARATOR},
    frame::Frame,
    interrupt::Interrupt,
    record::DiagnosticRecord,
};

/// An error or value explaining why a diagnostic occurred.
#[derive(Debug, Clone)]
pub enum Cause {
    /// A nested record, encoded recursively.
    Record(Box<DiagnosticRecord>),
    /// An already encoded diagnostic, whose text is reused as is.
    Interrupt(Interrupt),
    /// A non-diagnostic error.
    Foreign(ForeignError),
    /// Any other value. Strings render literally, everything else as JSON.
    Value(Value),
}

impl Cause {
    /// Build a foreign cause from any error type.
    ///
    /// The type name is the last path segment of `E`, the message is the
    /// error's `Display` output and the single frame is the caller's location.
    #[track_caller]
    pub fn error<E: StdError>(err: &E) -> Self {
        let type_name = any::type_name::<E>();
        let short = type_name
            .split('<')
            .next()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or(type_name);
        let foreign = ForeignError::new(short, err.to_string()).with_frames(vec![Frame::caller()]);
        Self::Foreign(foreign)
    }

    /// Build a value cause from anything serializable.
    ///
    /// Values that cannot be converted to JSON fall back to an
    /// `[Unserializable: ...]` placeholder string.
    pub fn value(value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self::Value(value),
            Err(err) => Self::Value(Value::String(format!("[Unserializable: {err}]"))),
        }
    }
}

impl From<DiagnosticRecord> for Cause {
    fn from(record: DiagnosticRecord) -> Self {
        Self::Record(Box::new(record))
    }
}

impl From<Interrupt> for Cause {
    fn from(interrupt: Interrupt) -> Self {
        Self::Interrupt(interrupt)
    }
}

impl From<ForeignError> for Cause {
    fn from(err: ForeignError) -> Self {
        Self::Foreign(err)
    }
}

impl From<Value> for Cause {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Cause {
    fn from(text: &str) -> Self {
        Self::Value(Value::String(text.to_string()))
    }
}

impl From<String> for Cause {
    fn from(text: String) -> Self {
        Self::Value(Value::String(text))
    }
}

/// A non-diagnostic error: a type name, a message and optional frames.
///
/// Its [`Display`](fmt::Display) form is the generic error text
/// `Type: message` followed by one indented frame line per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignError {
    type_name: String,
    message: String,
    frames: Vec<Frame>,
}

impl ForeignError {
    /// Create a foreign error without frames.
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            frames: Vec::new(),
        }
    }

    /// Attach frames.
    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.frames = frames;
        self
    }

    /// Returns the type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

impl fmt::Display for ForeignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.type_name, TYPE_SEPARATOR, self.message)?;
        for frame in &self.frames {
            write!(f, "\n{INDENT}{frame}")?;
        }
        Ok(())
    }
}

/// A cause paired with the context known when it was captured.
#[derive(Debug, Clone)]
pub struct CauseEntry {
    cause: Cause,
    context: Option<Context>,
}

impl CauseEntry {
    /// Create an entry without a sub-context.
    pub fn new(cause: impl Into<Cause>) -> Self {
        Self {
            cause: cause.into(),
            context: None,
        }
    }

    /// Attach a sub-context.
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Returns the cause.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Returns the sub-context, if any.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }
}
