//! The two-part `qualifier#label` identifier.
//!
//! A [`Qualified`] names the call site or category of a diagnostic. It is
//! printed as the first line of every encoded blob and is the key callers
//! match on after decoding.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

use crate::format::{QUALIFIED_SEPARATOR, is_identifier_char};

/// Errors produced when building a [`Qualified`] identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualifiedError {
    #[error("{part} must not be empty")]
    Empty { part: &'static str },

    #[error("{part} contains invalid character {character:?}")]
    InvalidCharacter { part: &'static str, character: char },

    #[error("missing `#` between qualifier and label")]
    MissingSeparator,
}

/// A validated qualifier and label pair.
///
/// Both halves are non-empty and consist only of ASCII letters, digits,
/// `_` and `.`, so the pair always fits on a single header line.
///
/// # Example
///
/// ```
/// # use interrupt_core::qualified::Qualified;
/// let qualified = Qualified::new("bigeasy.example", "bar").unwrap();
/// assert_eq!(qualified.to_string(), "bigeasy.example#bar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Qualified {
    qualifier: String,
    label: String,
}

impl Qualified {
    /// Create a new identifier from a qualifier and a label.
    ///
    /// # Errors
    ///
    /// Returns [`QualifiedError`] if either part is empty or contains a
    /// character outside `[A-Za-z0-9_.]`.
    pub fn new(
        qualifier: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self, QualifiedError> {
        let qualifier = qualifier.into();
        let label = label.into();
        validate("qualifier", &qualifier)?;
        validate("label", &label)?;
        Ok(Self { qualifier, label })
    }

    /// Returns the qualifier half.
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    /// Returns the label half.
    pub fn label(&self) -> &str {
        &self.label
    }
}

fn validate(part: &'static str, value: &str) -> Result<(), QualifiedError> {
    if value.is_empty() {
        return Err(QualifiedError::Empty { part });
    }
    match value.chars().find(|c| !is_identifier_char(*c)) {
        Some(character) => Err(QualifiedError::InvalidCharacter { part, character }),
        None => Ok(()),
    }
}

impl fmt::Display for Qualified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.qualifier, QUALIFIED_SEPARATOR, self.label)
    }
}

impl FromStr for Qualified {
    type Err = QualifiedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (qualifier, label) = s
            .split_once(QUALIFIED_SEPARATOR)
            .ok_or(QualifiedError::MissingSeparator)?;
        Self::new(qualifier, label)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_qualified_display() {
        let qualified = Qualified::new("bigeasy.example", "bar").unwrap();
        assert_eq!(qualified.to_string(), "bigeasy.example#bar");
        assert_eq!(qualified.qualifier(), "bigeasy.example");
        assert_eq!(qualified.label(), "bar");
    }

    #[test]
    fn test_qualified_rejects_empty() {
        assert_eq!(
            Qualified::new("", "bar"),
            Err(QualifiedError::Empty { part: "qualifier" })
        );
        assert_eq!(
            Qualified::new("foo", ""),
            Err(QualifiedError::Empty { part: "label" })
        );
    }

    #[test]
    fn test_qualified_rejects_newline_and_hash() {
        assert_eq!(
            Qualified::new("foo\nbar", "baz"),
            Err(QualifiedError::InvalidCharacter {
                part: "qualifier",
                character: '\n'
            })
        );
        assert_eq!(
            Qualified::new("foo", "b#r"),
            Err(QualifiedError::InvalidCharacter {
                part: "label",
                character: '#'
            })
        );
    }

    #[test]
    fn test_qualified_from_str() {
        let qualified: Qualified = "acme.http#timeout".parse().unwrap();
        assert_eq!(qualified.qualifier(), "acme.http");
        assert_eq!(qualified.label(), "timeout");

        assert_eq!(
            "no-separator".parse::<Qualified>(),
            Err(QualifiedError::MissingSeparator)
        );
    }

    proptest! {
        #[test]
        fn prop_display_parses_back(qualifier in "[A-Za-z0-9_.]{1,16}", label in "[A-Za-z0-9_.]{1,16}") {
            let qualified = Qualified::new(qualifier.clone(), label.clone()).unwrap();
            let parsed: Qualified = qualified.to_string().parse().unwrap();
            prop_assert_eq!(parsed.qualifier(), qualifier.as_str());
            prop_assert_eq!(parsed.label(), label.as_str());
        }
    }
}
