//! Wire-format markers for encoded diagnostics.
//!
//! The encoder emits these markers and the decoder anchors on them, so both
//! halves read them from here and cannot drift apart.
//!
//! ```text
//! bigeasy.example#bar
//!
//! {
//!     "statusCode": 404
//! }
//!
//! cause:
//!
//!     {
//!         "url": "http://x"
//!     }
//!
//!     Error: not found
//!         at fetch (src/http.rs:10:5)
//!
//! stack:
//!     at src/main.rs:3:9
//! ```

/// Line that opens one cause section.
pub const CAUSE_MARKER: &str = "cause:";

/// Line that opens the trailing frame section.
pub const STACK_MARKER: &str = "stack:";

/// Indentation added per nesting level.
pub const INDENT: &str = "    ";

/// Separator between qualifier and label in the header line.
pub const QUALIFIED_SEPARATOR: char = '#';

/// Prefix of a frame line, after any indentation.
pub const FRAME_PREFIX: &str = "at ";

/// Separator between a foreign error's type name and its message.
pub const TYPE_SEPARATOR: &str = ": ";

/// Key under which an error-shaped context value stores its rendering.
pub const ERROR_STACK_KEY: &str = "stack";

/// Placeholder for context nested beyond the serializer's depth cap.
pub const TRUNCATED_PLACEHOLDER: &str = "[Truncated]";

/// Returns `true` for characters allowed in a qualifier, a label or a type name.
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Returns `true` if the line is a frame line such as `    at main (src/main.rs:1:1)`.
pub fn is_frame_line(line: &str) -> bool {
    line.trim_start().starts_with(FRAME_PREFIX)
}

/// Returns `true` if the line opens a pretty-printed JSON object.
pub fn opens_object(line: &str) -> bool {
    matches!(line.trim_end(), "{" | "{}")
}
