//! Diagnostic encoder.

use log::{debug, trace};
use serde_json::Value;

use interrupt_core::{
    cause::{Cause, CauseEntry},
    context::Context,
    format::{CAUSE_MARKER, INDENT, STACK_MARKER},
    frame::Frame,
    interrupt::Interrupt,
    record::DiagnosticRecord,
    stack::ensure_sufficient_stack,
};

use crate::{config::EncoderConfig, serialize::ContextSerializer};

/// Encoder for diagnostic records.
///
/// Renders a [`DiagnosticRecord`] into the composite text the decoder reads
/// back. Encoding never fails and never mutates the record.
///
/// # Examples
///
/// ```
/// use interrupt::{Encoder, config::EncoderConfig};
/// use interrupt::{qualified::Qualified, record::DiagnosticRecord};
///
/// let record = DiagnosticRecord::new(Qualified::new("bigeasy.example", "bar").unwrap())
///     .with_context("statusCode", 404);
///
/// let blob = Encoder::default().encode(&record);
/// assert!(blob.starts_with("bigeasy.example#bar\n"));
///
/// // Without call-site capture and frames, the stack section is empty
/// let encoder = Encoder::new(EncoderConfig::new(false, 32));
/// assert!(encoder.encode(&record).ends_with("stack:\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    config: EncoderConfig,
}

impl Encoder {
    /// Create a new encoder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Frame capture and context depth settings
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode a record into its composite text.
    ///
    /// The layout is the header line, the context dump when the context has
    /// entries, one `cause:` section per cause in order, and the trailing
    /// `stack:` section.
    pub fn encode(&self, record: &DiagnosticRecord) -> String {
        debug!(
            qualified:% = record.qualified(),
            context = record.context().len(),
            causes = record.causes().len();
            "Encoding diagnostic"
        );

        let mut blob = format!("{}\n", record.qualified());

        if !record.context().is_empty() {
            blob.push('\n');
            blob.push_str(&self.serialize_context(record.context()));
            blob.push('\n');
        }

        for (index, entry) in record.causes().iter().enumerate() {
            trace!(index = index, sub_context = entry.context().is_some(); "Encoding cause");
            self.push_cause(&mut blob, entry);
        }

        blob.push('\n');
        blob.push_str(STACK_MARKER);
        blob.push('\n');
        for frame in self.frames(record) {
            blob.push_str(INDENT);
            blob.push_str(&frame.to_string());
            blob.push('\n');
        }

        blob
    }

    /// Encode a record and wrap the text in an [`Interrupt`] error.
    pub fn raise(&self, record: DiagnosticRecord) -> Interrupt {
        let stack = self.encode(&record);
        Interrupt::new(record.qualified().clone(), stack)
    }

    /// Render a context as the pretty-printed dump used in encoded text.
    ///
    /// # Examples
    ///
    /// ```
    /// use interrupt::{Encoder, context::Context};
    ///
    /// let context = Context::new().with("statusCode", 404);
    /// assert_eq!(
    ///     Encoder::default().serialize_context(&context),
    ///     "{\n    \"statusCode\": 404\n}"
    /// );
    /// ```
    pub fn serialize_context(&self, context: &Context) -> String {
        ContextSerializer::new(self).render(context)
    }

    /// Render a cause to text, without indentation.
    ///
    /// Nested records are encoded in full; an [`Interrupt`] contributes its
    /// existing text; a foreign error prints its header and frames. Strings
    /// render literally, other values as compact JSON.
    pub(crate) fn render_cause(&self, cause: &Cause) -> String {
        match cause {
            Cause::Record(record) => ensure_sufficient_stack(|| self.encode(record)),
            Cause::Interrupt(interrupt) => interrupt.stack().to_string(),
            Cause::Foreign(foreign) => foreign.to_string(),
            Cause::Value(Value::String(text)) => text.clone(),
            Cause::Value(value) => value.to_string(),
        }
    }

    fn push_cause(&self, blob: &mut String, entry: &CauseEntry) {
        blob.push('\n');
        blob.push_str(CAUSE_MARKER);
        blob.push_str("\n\n");
        if let Some(context) = entry.context() {
            blob.push_str(&indent(&self.serialize_context(context)));
            blob.push_str("\n\n");
        }
        blob.push_str(&indent(&self.render_cause(entry.cause())));
        blob.push('\n');
    }

    fn frames<'a>(&self, record: &'a DiagnosticRecord) -> &'a [Frame] {
        if !record.frames().is_empty() {
            record.frames()
        } else if self.config.capture_call_site() {
            std::slice::from_ref(record.call_site())
        } else {
            &[]
        }
    }
}

/// Indent every non-empty line by one level.
fn indent(text: &str) -> String {
    text.trim_end_matches('\n')
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
