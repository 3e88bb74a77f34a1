//! Required free-text form fields.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when validating [`RequiredText`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// Blank after trimming.
    #[error("{field} is required")]
    Blank {
        /// Form field name.
        field: &'static str,
    },
    /// Longer than the field allows.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Form field name.
        field: &'static str,
        /// Maximum allowed characters.
        max: usize,
    },
}

/// Trimmed, non-blank text with an upper length bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredText(String);

impl RequiredText {
    /// Default limit for titles and codes.
    pub const SHORT: usize = 200;
    /// Default limit for descriptions and requirements.
    pub const LONG: usize = 10_000;

    /// Validate a form field.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Blank`] for empty/whitespace input and
    /// [`TextError::TooLong`] if the trimmed input exceeds `max` characters.
    pub fn parse(field: &'static str, input: &str, max: usize) -> Result<Self, TextError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TextError::Blank { field });
        }
        if trimmed.chars().count() > max {
            return Err(TextError::TooLong { field, max });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The validated text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims() {
        let text = RequiredText::parse("title", "  Landing page  ", 50);
        assert_eq!(text.map(RequiredText::into_inner), Ok("Landing page".to_owned()));
    }

    #[test]
    fn test_blank() {
        assert_eq!(
            RequiredText::parse("title", " \t\n", 50),
            Err(TextError::Blank { field: "title" })
        );
    }

    #[test]
    fn test_too_long_counts_chars() {
        assert!(RequiredText::parse("code", "ééé", 3).is_ok());
        assert_eq!(
            RequiredText::parse("code", "éééé", 3),
            Err(TextError::TooLong { field: "code", max: 3 })
        );
    }
}
