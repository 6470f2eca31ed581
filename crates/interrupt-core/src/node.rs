//! The decoder's output tree.
//!
//! A decoded blob is a [`Node`]: a [`DiagnosticNode`] for text produced by
//! the encoder, a [`ForeignNode`] for generic error text with frames, or a
//! raw text leaf for anything else.
//!
//! Nodes serialize to plain JSON. Diagnostic nodes carry `"type": "Interrupt"`,
//! foreign nodes carry their own type name and text leaves are bare strings.

use serde::{Serialize, Serializer, ser::SerializeStruct};
use serde_json::Value;

use crate::frame::Frame;

/// Type tag written for diagnostic nodes.
pub const DIAGNOSTIC_TYPE: &str = "Interrupt";

/// A node of a decoded diagnostic tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A diagnostic produced by the encoder.
    Diagnostic(DiagnosticNode),
    /// Generic error text with a frame section.
    Foreign(ForeignNode),
    /// Text that matched neither shape.
    Text(String),
}

impl Node {
    /// Returns the diagnostic node, if this is one.
    pub fn as_diagnostic(&self) -> Option<&DiagnosticNode> {
        match self {
            Node::Diagnostic(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the foreign node, if this is one.
    pub fn as_foreign(&self) -> Option<&ForeignNode> {
        match self {
            Node::Foreign(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the text leaf, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Diagnostic(node) => node.serialize(serializer),
            Node::Foreign(node) => node.serialize(serializer),
            Node::Text(text) => serializer.serialize_str(text),
        }
    }
}

/// A decoded diagnostic.
///
/// `causes` and `contexts` are parallel: `contexts[i]` is the sub-context
/// captured with `causes[i]`, or `None` when there was none.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticNode {
    qualifier: String,
    name: String,
    context: Option<Value>,
    causes: Vec<Node>,
    contexts: Vec<Option<Value>>,
    stack: Vec<Frame>,
}

impl DiagnosticNode {
    /// Create a node without causes.
    pub fn new(
        qualifier: impl Into<String>,
        name: impl Into<String>,
        context: Option<Value>,
        stack: Vec<Frame>,
    ) -> Self {
        Self {
            qualifier: qualifier.into(),
            name: name.into(),
            context,
            causes: Vec::new(),
            contexts: Vec::new(),
            stack,
        }
    }

    /// Append a cause together with its sub-context.
    pub fn push_cause(&mut self, cause: Node, context: Option<Value>) {
        self.causes.push(cause);
        self.contexts.push(context);
    }

    /// Returns the qualifier.
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    /// Returns the label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the context dump, if the record had one.
    pub fn context(&self) -> Option<&Value> {
        self.context.as_ref()
    }

    /// Returns the decoded causes in order.
    pub fn causes(&self) -> &[Node] {
        &self.causes
    }

    /// Returns the sub-contexts, parallel to [`causes`](Self::causes).
    pub fn contexts(&self) -> &[Option<Value>] {
        &self.contexts
    }

    /// Returns the frames of the trailing section.
    pub fn stack(&self) -> &[Frame] {
        &self.stack
    }

    /// Returns the number of diagnostic levels in this subtree, counting this one.
    pub fn depth(&self) -> usize {
        1 + self
            .causes
            .iter()
            .filter_map(Node::as_diagnostic)
            .map(DiagnosticNode::depth)
            .max()
            .unwrap_or(0)
    }
}

impl Serialize for DiagnosticNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DiagnosticNode", 7)?;
        state.serialize_field("type", DIAGNOSTIC_TYPE)?;
        state.serialize_field("qualifier", &self.qualifier)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("context", &self.context)?;
        state.serialize_field("causes", &self.causes)?;
        state.serialize_field("contexts", &self.contexts)?;
        state.serialize_field("stack", &self.stack)?;
        state.end()
    }
}

/// A decoded non-diagnostic error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignNode {
    type_name: String,
    message: String,
    stack: Vec<Frame>,
}

impl ForeignNode {
    /// Create a foreign node.
    pub fn new(type_name: impl Into<String>, message: impl Into<String>, stack: Vec<Frame>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            stack,
        }
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
    pub fn stack(&self) -> &[Frame] {
        &self.stack
    }
}

impl Serialize for ForeignNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ForeignNode", 3)?;
        state.serialize_field("type", &self.type_name)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("stack", &self.stack)?;
        state.end()
    }
}
