//! Non-negative money amounts using decimal arithmetic.
//!
//! Budgets and payment-request amounts are entered by hand in forms, so the
//! parser is forgiving about formatting (`$1,200.5` is fine) but strict about
//! the value: no negatives, at most two decimal places.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Nothing was entered.
    #[error("amount is required")]
    Empty,
    /// Not a number.
    #[error("amount must be a number")]
    NotANumber,
    /// Below zero.
    #[error("amount cannot be negative")]
    Negative,
    /// More than two decimal places.
    #[error("amount can have at most two decimal places")]
    TooPrecise,
    /// Does not fit the `NUMERIC(12, 2)` columns.
    #[error("amount cannot exceed $9,999,999,999.99")]
    TooLarge,
}

/// A non-negative amount in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
pub struct Money(Decimal);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest amount a `NUMERIC(12, 2)` column holds.
    pub const MAX: Self = Self(Decimal::from_parts(3_567_587_327, 232, 0, false, 2));

    /// Wrap a decimal, rejecting negatives and sub-cent precision.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Negative`], [`MoneyError::TooPrecise`] or
    /// [`MoneyError::TooLarge`].
    pub fn new(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative);
        }
        if amount > Self::MAX.0 {
            return Err(MoneyError::TooLarge);
        }
        if amount.normalize().scale() > 2 {
            return Err(MoneyError::TooPrecise);
        }
        Ok(Self(amount.round_dp(2)))
    }

    /// Parse user input such as `1200`, `1,200.50` or `$99.9`.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the input is blank, not numeric, negative,
    /// too large, or has more than two decimal places.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let cleaned: String = input
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        if cleaned.is_empty() {
            return Err(MoneyError::Empty);
        }

        let amount = Decimal::from_str(&cleaned).map_err(|_| MoneyError::NotANumber)?;
        Self::new(amount)
    }

    /// The underlying decimal.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Format with a dollar sign, thousands separators and two decimals.
    #[must_use]
    pub fn display(self) -> String {
        let fixed = format!("{:.2}", self.0);
        let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!("${grouped}.{cents}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_formatted() {
        assert_eq!(Money::parse("1200").unwrap().amount(), Decimal::new(1200, 0));
        assert_eq!(
            Money::parse(" $1,200.50 ").unwrap().amount(),
            Decimal::new(120_050, 2)
        );
        assert_eq!(Money::parse("0").unwrap(), Money::ZERO);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Money::parse(""), Err(MoneyError::Empty));
        assert_eq!(Money::parse("  $ "), Err(MoneyError::Empty));
        assert_eq!(Money::parse("abc"), Err(MoneyError::NotANumber));
        assert_eq!(Money::parse("-5"), Err(MoneyError::Negative));
        assert_eq!(Money::parse("1.005"), Err(MoneyError::TooPrecise));
    }

    #[test]
    fn test_upper_bound_matches_column() {
        assert_eq!(Money::MAX.amount(), Decimal::new(999_999_999_999, 2));
        assert_eq!(Money::parse("9,999,999,999.99"), Ok(Money::MAX));
        assert_eq!(Money::parse("10000000000"), Err(MoneyError::TooLarge));
        assert_eq!(Money::parse("9999999999.991"), Err(MoneyError::TooLarge));
    }

    #[test]
    fn test_trailing_zeros_are_not_extra_precision() {
        assert!(Money::parse("10.500").is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::parse("0").unwrap().display(), "$0.00");
        assert_eq!(Money::parse("99.9").unwrap().display(), "$99.90");
        assert_eq!(Money::parse("1234567.8").unwrap().display(), "$1,234,567.80");
        assert_eq!(Money::parse("100").unwrap().to_string(), "$100.00");
    }
}
