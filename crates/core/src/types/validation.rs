//! Form validation errors.
//!
//! Each field type has its own error enum. Form handlers collapse them into
//! [`ValidationError`] so a single message can be shown above the form.

use thiserror::Error;

use super::discount::DiscountRuleError;
use super::email::EmailError;
use super::money::MoneyError;
use super::text::TextError;

/// A form field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Text(#[from] TextError),

    #[error("{field}: {source}")]
    Money {
        field: &'static str,
        source: MoneyError,
    },

    #[error("{field}: {source}")]
    Email {
        field: &'static str,
        source: EmailError,
    },

    #[error(transparent)]
    Discount(#[from] DiscountRuleError),

    /// A select/radio value outside the allowed set.
    #[error("{field} has an invalid value")]
    InvalidChoice { field: &'static str },
}

impl ValidationError {
    /// Attach a field name to a money error.
    #[must_use]
    pub const fn money(field: &'static str, source: MoneyError) -> Self {
        Self::Money { field, source }
    }

    /// Attach a field name to an email error.
    #[must_use]
    pub const fn email(field: &'static str, source: EmailError) -> Self {
        Self::Email { field, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        assert_eq!(
            ValidationError::money("Budget", MoneyError::Negative).to_string(),
            "Budget: amount cannot be negative"
        );
        assert_eq!(
            ValidationError::email("Assign to", EmailError::MissingAtSymbol).to_string(),
            "Assign to: email must contain an @ symbol"
        );
        assert_eq!(
            ValidationError::from(TextError::Blank { field: "Title" }).to_string(),
            "Title is required"
        );
        assert_eq!(
            ValidationError::InvalidChoice { field: "Status" }.to_string(),
            "Status has an invalid value"
        );
    }
}
