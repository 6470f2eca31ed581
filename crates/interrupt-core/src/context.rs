//! Diagnostic context attached to records and causes.
//!
//! A [`Context`] is an insertion-ordered mapping from key to
//! [`ContextValue`]. Plain data is held as JSON; error-shaped values are
//! held as [`ErrorValue`] so the serializer renders their diagnostic text
//! instead of an opaque dump.

use indexmap::IndexMap;
use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::cause::Cause;

/// A single context value.
#[derive(Debug, Clone)]
pub enum ContextValue {
    /// Plain JSON-compatible data.
    Json(Value),
    /// An error, rendered through its own textual representation.
    Error(Box<ErrorValue>),
}

/// An error-shaped context value.
///
/// `fields` carries any extra diagnostic properties attached to the error;
/// they are dumped ahead of the error's rendering.
#[derive(Debug, Clone)]
pub struct ErrorValue {
    cause: Cause,
    fields: Context,
}

impl ErrorValue {
    /// Wrap an error without extra fields.
    pub fn new(cause: impl Into<Cause>) -> Self {
        Self {
            cause: cause.into(),
            fields: Context::new(),
        }
    }

    /// Attach extra fields to the error.
    pub fn with_fields(mut self, fields: Context) -> Self {
        self.fields = fields;
        self
    }

    /// Returns the wrapped error.
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Returns the extra fields.
    pub fn fields(&self) -> &Context {
        &self.fields
    }
}

/// Insertion-ordered diagnostic context.
///
/// # Example
///
/// ```
/// # use interrupt_core::context::Context;
/// let context = Context::new()
///     .with("statusCode", 404)
///     .with("url", "http://x");
///
/// let keys: Vec<_> = context.keys().collect();
/// assert_eq!(keys, ["statusCode", "url"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    entries: IndexMap<String, ContextValue>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert any serializable value.
    ///
    /// A value that cannot be converted to JSON is replaced by an
    /// `[Unserializable: ...]` placeholder string rather than failing.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Serialize) {
        let key = key.into();
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = key.as_str(), err:% = err; "Context value is not serializable");
                Value::String(format!("[Unserializable: {err}]"))
            }
        };
        self.entries.insert(key, ContextValue::Json(value));
    }

    /// Insert an error-shaped value.
    pub fn insert_error(&mut self, key: impl Into<String>, error: ErrorValue) {
        self.entries
            .insert(key.into(), ContextValue::Error(Box::new(error)));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder form of [`insert_error`](Self::insert_error).
    pub fn with_error(mut self, key: impl Into<String>, error: ErrorValue) -> Self {
        self.insert_error(key, error);
        self
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the context holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl From<serde_json::Map<String, Value>> for Context {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

impl FromIterator<(String, Value)> for Context {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key, ContextValue::Json(value)))
                .collect(),
        }
    }
}
