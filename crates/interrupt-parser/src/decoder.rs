//! Recursive decoder for encoded diagnostics.
//!
//! Decoding runs in three states:
//!
//! 1. **Detect** - the first non-blank line is a `qualifier#label` header
//!    and a `stack:` marker follows somewhere below it.
//! 2. **Composite** - the body is split on `cause:` lines into a context
//!    dump and cause sections; each cause section loses one level of
//!    indentation, gives up its leading sub-context, and is decoded again.
//! 3. **Foreign** - text that is not composite becomes a [`ForeignNode`]
//!    when it ends in frame lines under a `Type: message` header, and a raw
//!    text leaf otherwise.

use log::trace;
use serde_json::Value;

use interrupt_core::{
    format::{CAUSE_MARKER, STACK_MARKER, is_frame_line, opens_object},
    node::{DiagnosticNode, ForeignNode, Node},
    stack::ensure_sufficient_stack,
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    grammar,
    lines::{self, Line},
};

/// The sections of a composite blob.
#[derive(Debug)]
pub(crate) struct Layout<'a, 'src> {
    qualifier: &'src str,
    label: &'src str,
    body: &'a [Line<'src>],
    frames: &'a [Line<'src>],
}

/// Match the composite shape: a header line followed eventually by `stack:`.
pub(crate) fn detect<'a, 'src>(lines: &'a [Line<'src>]) -> Option<Layout<'a, 'src>> {
    let start = lines.iter().position(|line| !line.is_blank())?;
    let (qualifier, label) = grammar::parse_header(lines[start].text())?;
    let rest = &lines[start + 1..];
    let stack = rest.iter().position(|line| line.is_marker(STACK_MARKER))?;
    Some(Layout {
        qualifier,
        label,
        body: &rest[..stack],
        frames: &rest[stack + 1..],
    })
}

/// Decode a detected composite blob.
pub(crate) fn decode_composite(layout: Layout<'_, '_>) -> Result<DiagnosticNode> {
    let mut sections = layout.body.split(|line| line.is_marker(CAUSE_MARKER));
    let context = parse_context(sections.next().unwrap_or_default())?;
    let stack = layout
        .frames
        .iter()
        .filter_map(|line| grammar::parse_frame(line.text()))
        .collect();

    let mut node = DiagnosticNode::new(layout.qualifier, layout.label, context, stack);
    for section in sections {
        let section = lines::dedent(section);
        let (sub_context, body) = split_sub_context(&section);
        let cause = decode_cause(body)?;
        node.push_cause(cause, sub_context);
    }

    trace!(
        qualifier = layout.qualifier,
        label = layout.label,
        causes = node.causes().len(),
        frames = node.stack().len();
        "Decoded composite section"
    );

    Ok(node)
}

/// Decode the body of a cause section.
pub(crate) fn decode_cause(lines: &[Line<'_>]) -> Result<Node> {
    ensure_sufficient_stack(|| match detect(lines) {
        Some(layout) => decode_composite(layout).map(Node::Diagnostic),
        None => Ok(decode_foreign(lines)),
    })
}

/// Decode text that is not composite.
fn decode_foreign(lines: &[Line<'_>]) -> Node {
    let lines = lines::trim_blank(lines);
    let frame_count = lines
        .iter()
        .rev()
        .take_while(|line| is_frame_line(line.text()))
        .count();
    let (header, frames) = lines.split_at(lines.len() - frame_count);
    let text = lines::join(lines).trim().to_string();

    if frames.is_empty() || header.is_empty() {
        return Node::Text(text);
    }

    let header = lines::join(header);
    match grammar::parse_type_message(header.trim()) {
        Some((type_name, message)) => {
            let stack = frames
                .iter()
                .filter_map(|line| grammar::parse_frame(line.text()))
                .collect();
            Node::Foreign(ForeignNode::new(type_name, message, stack))
        }
        None => Node::Text(text),
    }
}

/// Parse the top-level context dump, if present.
fn parse_context(lines: &[Line<'_>]) -> Result<Option<Value>> {
    let lines = lines::trim_blank(lines);
    if lines.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&lines::join(lines))
        .map(Some)
        .map_err(|err| malformed(lines, &err))
}

/// Split a dedented cause section into its sub-context and its body.
///
/// A sub-context is present when the section opens with a pretty-printed
/// JSON object and more content follows it. A lone object is the body
/// itself: a plain value cause. A section whose opening `{` does not parse
/// is left whole for the foreign fallback.
fn split_sub_context<'a, 'src>(lines: &'a [Line<'src>]) -> (Option<Value>, &'a [Line<'src>]) {
    let Some(start) = lines.iter().position(|line| !line.is_blank()) else {
        return (None, lines);
    };
    if !opens_object(lines[start].text()) {
        return (None, lines);
    }

    let candidate = &lines[start..];
    let text = lines::join(candidate);
    let mut stream = serde_json::Deserializer::from_str(&text).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => {
            let offset = stream.byte_offset();
            if text[offset..].trim().is_empty() {
                return (None, lines);
            }
            let used = text[..offset].matches('\n').count() + 1;
            (Some(value), &candidate[used..])
        }
        Some(Err(err)) => {
            trace!(err:%; "Cause section is not a sub-context");
            (None, lines)
        }
        None => (None, lines),
    }
}

fn malformed(lines: &[Line<'_>], err: &serde_json::Error) -> Diagnostic {
    let code = ErrorCode::E001;
    Diagnostic::error(format!("{}: {err}", code.description()))
        .with_code(code)
        .with_label(lines::locate(lines, err.line(), err.column()), "invalid JSON here")
        .with_secondary_label(lines::span(lines), "while reading this block")
        .with_help("context dumps are written by the encoder; the text was altered or truncated")
}
