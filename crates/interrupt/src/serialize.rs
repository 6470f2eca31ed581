//! Context serializer.
//!
//! Renders a [`Context`] as a pretty-printed JSON object, the grammar the
//! decoder reads context dumps back with. Keys keep their insertion order.
//!
//! Error-shaped values become objects holding the error's own fields followed
//! by a `"stack"` key with the error's complete textual rendering. Values
//! nested deeper than the configured cap are replaced by `"[Truncated]"`, so
//! every context renders to some valid JSON.

use log::{trace, warn};
use serde::Serialize as _;
use serde_json::{Map, Value, ser::PrettyFormatter};

use interrupt_core::{
    context::{Context, ContextValue, ErrorValue},
    format::{ERROR_STACK_KEY, INDENT, TRUNCATED_PLACEHOLDER},
    stack::ensure_sufficient_stack,
};

use crate::encode::Encoder;

pub(crate) struct ContextSerializer<'a> {
    encoder: &'a Encoder,
    max_depth: usize,
}

impl<'a> ContextSerializer<'a> {
    pub(crate) fn new(encoder: &'a Encoder) -> Self {
        Self {
            encoder,
            max_depth: encoder.config().max_context_depth(),
        }
    }

    /// Render `context` as pretty JSON with a four-space indent.
    pub(crate) fn render(&self, context: &Context) -> String {
        let value = Value::Object(self.object(context, 1));
        pretty(&value)
    }

    fn object(&self, context: &Context, depth: usize) -> Map<String, Value> {
        context
            .iter()
            .map(|(key, value)| (key.to_string(), self.entry(value, depth)))
            .collect()
    }

    fn entry(&self, value: &ContextValue, depth: usize) -> Value {
        if depth > self.max_depth {
            trace!(depth = depth; "Context value truncated");
            return Value::String(TRUNCATED_PLACEHOLDER.to_string());
        }
        match value {
            ContextValue::Json(value) => self.truncate(value, depth),
            ContextValue::Error(error) => self.error(error, depth),
        }
    }

    fn error(&self, error: &ErrorValue, depth: usize) -> Value {
        let mut object = self.object(error.fields(), depth + 1);
        let stack = ensure_sufficient_stack(|| self.encoder.render_cause(error.cause()));
        object.insert(ERROR_STACK_KEY.to_string(), Value::String(stack));
        Value::Object(object)
    }

    fn truncate(&self, value: &Value, depth: usize) -> Value {
        if depth > self.max_depth {
            return Value::String(TRUNCATED_PLACEHOLDER.to_string());
        }
        match value {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.truncate(item, depth + 1))
                    .collect(),
            ),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, item)| (key.clone(), self.truncate(item, depth + 1)))
                    .collect(),
            ),
            scalar => scalar.clone(),
        }
    }
}

/// Pretty-print `value` with the format's indent.
pub(crate) fn pretty(value: &Value) -> String {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    if let Err(err) = value.serialize(&mut serializer) {
        warn!(err:%; "Context could not be rendered");
        return placeholder(&err);
    }
    String::from_utf8(out).unwrap_or_else(|err| {
        warn!(err:%; "Context rendered to invalid UTF-8");
        placeholder(&err)
    })
}

fn placeholder(err: &dyn std::fmt::Display) -> String {
    Value::String(format!("[Unserializable: {err}]")).to_string()
}
