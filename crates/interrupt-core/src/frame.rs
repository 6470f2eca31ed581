//! Call-frame locations.
//!
//! A [`Frame`] is one entry of the `stack:` section. Its [`Display`](fmt::Display)
//! form is the canonical frame line the decoder's frame extractor reads back.

use std::{fmt, panic::Location};

use serde::{Deserialize, Serialize};

use crate::format::FRAME_PREFIX;

/// One entry of a call-frame listing.
///
/// Every field is optional: a frame line may name only a function, only a
/// file, or a file without a column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    #[serde(default)]
    file: Option<String>,
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    column: Option<u32>,
    #[serde(default)]
    function_name: Option<String>,
}

impl Frame {
    /// Create a frame from its parts.
    pub fn new(
        file: Option<String>,
        line: Option<u32>,
        column: Option<u32>,
        function_name: Option<String>,
    ) -> Self {
        Self {
            file,
            line,
            column,
            function_name,
        }
    }

    /// Create a frame pointing at a source location.
    pub fn at(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(Some(file.into()), Some(line), Some(column), None)
    }

    /// Set the function name.
    pub fn with_function(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = Some(function_name.into());
        self
    }

    /// Capture the location of the caller.
    ///
    /// Functions marked `#[track_caller]` that call this report their own
    /// caller instead, which is how records capture the site that raised them.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// Returns the file, if any.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Returns the 1-based line, if any.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// Returns the 1-based column, if any.
    pub fn column(&self) -> Option<u32> {
        self.column
    }

    /// Returns the function name, if any.
    pub fn function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    fn fmt_location(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{file}")?;
        }
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
            if let Some(column) = self.column {
                write!(f, ":{column}")?;
            }
        }
        Ok(())
    }

    fn has_location(&self) -> bool {
        self.file.is_some() || self.line.is_some()
    }
}

impl From<&Location<'_>> for Frame {
    fn from(location: &Location<'_>) -> Self {
        Self::at(location.file(), location.line(), location.column())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{FRAME_PREFIX}")?;
        match (&self.function_name, self.has_location()) {
            (Some(function), true) => {
                write!(f, "{function} (")?;
                self.fmt_location(f)?;
                write!(f, ")")
            }
            (Some(function), false) => write!(f, "{function}"),
            (None, _) => self.fmt_location(f),
        }
    }
}
