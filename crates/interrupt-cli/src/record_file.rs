//! JSON record files accepted by `interrupt encode`.
//!
//! ```json
//! {
//!     "qualifier": "bigeasy.example",
//!     "label": "bar",
//!     "context": { "statusCode": 404 },
//!     "causes": [
//!         { "cause": { "type": "Error", "message": "foo" }, "context": { "url": "http://x" } }
//!     ],
//!     "stack": [ { "file": "src/main.rs", "line": 3, "column": 9 } ]
//! }
//! ```
//!
//! A cause is read as a nested record when it is an object with a
//! `qualifier` key, as a foreign error when it is an object with string
//! `type` and `message` keys, and as a plain value otherwise.

use serde::Deserialize;
use serde_json::{Map, Value};

use interrupt::{
    InterruptError,
    cause::{Cause, CauseEntry, ForeignError},
    context::Context,
    frame::Frame,
    qualified::Qualified,
    record::DiagnosticRecord,
};

/// A record as written in a JSON file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordFile {
    qualifier: String,
    label: String,
    #[serde(default)]
    context: Map<String, Value>,
    #[serde(default)]
    causes: Vec<CauseFile>,
    #[serde(default)]
    stack: Vec<Frame>,
}

/// One entry of a record file's `causes` list.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CauseFile {
    cause: Value,
    #[serde(default)]
    context: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct ForeignFile {
    #[serde(rename = "type")]
    type_name: String,
    message: String,
    #[serde(default)]
    stack: Vec<Frame>,
}

impl RecordFile {
    /// Parse a record file.
    ///
    /// # Errors
    ///
    /// Returns [`InterruptError::Json`] when the text is not a record object.
    pub fn from_json(source: &str) -> Result<Self, InterruptError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Convert into a [`DiagnosticRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`InterruptError::Record`] when an identifier is invalid or a
    /// nested record or foreign error is malformed.
    pub fn into_record(self) -> Result<DiagnosticRecord, InterruptError> {
        let qualified = Qualified::new(self.qualifier, self.label)?;
        let mut record = DiagnosticRecord::new(qualified)
            .with_context_map(Context::from(self.context))
            .with_frames(self.stack);

        for entry in self.causes {
            record = record.with_cause_entry(entry.into_entry()?);
        }
        Ok(record)
    }
}

impl CauseFile {
    fn into_entry(self) -> Result<CauseEntry, InterruptError> {
        let entry = CauseEntry::new(into_cause(self.cause)?);
        Ok(match self.context {
            Some(context) => entry.with_context(Context::from(context)),
            None => entry,
        })
    }
}

fn into_cause(value: Value) -> Result<Cause, InterruptError> {
    let Value::Object(object) = value else {
        return Ok(Cause::Value(value));
    };

    if object.contains_key("qualifier") {
        let file: RecordFile = serde_json::from_value(Value::Object(object))
            .map_err(|err| InterruptError::Record(format!("invalid nested record: {err}")))?;
        return Ok(Cause::from(file.into_record()?));
    }

    let is_foreign = object.get("type").is_some_and(Value::is_string)
        && object.get("message").is_some_and(Value::is_string);
    if is_foreign {
        let file: ForeignFile = serde_json::from_value(Value::Object(object))
            .map_err(|err| InterruptError::Record(format!("invalid foreign error: {err}")))?;
        let foreign = ForeignError::new(file.type_name, file.message).with_frames(file.stack);
        return Ok(Cause::Foreign(foreign));
    }

    Ok(Cause::Value(Value::Object(object)))
}

#[cfg(test)]
mod tests {
    use interrupt::context::ContextValue;
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> DiagnosticRecord {
        RecordFile::from_json(&value.to_string())
            .unwrap()
            .into_record()
            .unwrap()
    }

    #[test]
    fn test_minimal_record() {
        let record = parse(json!({"qualifier": "q", "label": "l"}));
        assert_eq!(record.qualified().to_string(), "q#l");
        assert!(record.context().is_empty());
        assert!(record.causes().is_empty());
        assert!(record.frames().is_empty());
    }

    #[test]
    fn test_cause_kinds() {
        let record = parse(json!({
            "qualifier": "q",
            "label": "l",
            "causes": [
                {"cause": {"qualifier": "inner", "label": "x"}},
                {"cause": {"type": "TypeError", "message": "bad", "stack": [{"file": "a.js", "line": 1}]}},
                {"cause": {"type": "not foreign"}},
                {"cause": "plain", "context": {"url": "http://x"}}
            ]
        }));

        let causes = record.causes();
        assert!(matches!(causes[0].cause(), Cause::Record(inner) if inner.qualified().label() == "x"));
        match causes[1].cause() {
            Cause::Foreign(foreign) => {
                assert_eq!(foreign.type_name(), "TypeError");
                assert_eq!(foreign.frames()[0].line(), Some(1));
            }
            other => panic!("Expected foreign cause, got {other:?}"),
        }
        assert!(matches!(causes[2].cause(), Cause::Value(Value::Object(_))));
        assert!(matches!(causes[3].cause(), Cause::Value(Value::String(text)) if text == "plain"));

        let context = causes[3].context().unwrap();
        assert!(matches!(context.get("url"), Some(ContextValue::Json(url)) if url == "http://x"));
    }

    #[test]
    fn test_invalid_identifier() {
        let err = RecordFile::from_json(r#"{"qualifier": "has space", "label": "l"}"#)
            .unwrap()
            .into_record()
            .unwrap_err();
        assert!(matches!(err, InterruptError::Record(_)));
    }

    #[test]
    fn test_invalid_nested_record() {
        let err = RecordFile::from_json(r#"{"qualifier": "q", "label": "l", "causes": [{"cause": {"qualifier": 1}}]}"#)
            .unwrap()
            .into_record()
            .unwrap_err();
        assert!(err.to_string().contains("invalid nested record"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RecordFile::from_json(r#"{"qualifier": "q", "label": "l", "extra": 1}"#).unwrap_err();
        assert!(matches!(err, InterruptError::Json(_)));
    }
}
