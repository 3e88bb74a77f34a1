//! Discount code rules.
//!
//! A discount is either a percentage off or a fixed dollar amount, may be
//! restricted to a single client email, may expire, and may cap how often it
//! is used. Codes are stored upper-case.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::email::Email;
use super::money::Money;

/// Longest accepted discount code.
pub const MAX_CODE_LENGTH: usize = 32;

/// Errors raised while validating discount input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscountRuleError {
    #[error("discount code is required")]
    EmptyCode,
    #[error("discount code must be at most {MAX_CODE_LENGTH} characters")]
    CodeTooLong,
    #[error("discount code may only contain letters, digits, '-' and '_'")]
    InvalidCodeCharacter,
    #[error("discount value must be a number")]
    ValueNotANumber,
    #[error("discount value must be greater than zero")]
    NonPositiveValue,
    #[error("percentage discounts cannot exceed 100%")]
    PercentageTooLarge,
    #[error("discount value can have at most two decimal places")]
    ValueTooPrecise,
    #[error("discount value cannot exceed 9,999,999,999.99")]
    ValueTooLarge,
    #[error("expiry date must be YYYY-MM-DD")]
    InvalidExpiryDate,
    #[error("maximum usage must be a whole number")]
    InvalidMaxUsage,
    #[error("a private discount needs a valid user email")]
    MissingSpecificUser,
}

/// Whether the discount takes a percentage or a fixed amount off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "portal.discount_kind", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    #[default]
    Percentage,
    Fixed,
}

impl DiscountKind {
    /// Wire/database form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Percentage => "Percentage",
            Self::Fixed => "Fixed amount",
        }
    }

    /// Format a value of this kind, e.g. `20%` or `$15.00`.
    #[must_use]
    pub fn format_value(self, value: Decimal) -> String {
        match self {
            Self::Percentage => format!("{}%", value.normalize()),
            Self::Fixed => format!("${value:.2}"),
        }
    }

    /// Validate a value entered for this kind.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountRuleError`] if the value is not positive, has more
    /// than two decimal places, is a percentage above 100, or does not fit the
    /// value column.
    pub fn validate_value(self, value: Decimal) -> Result<Decimal, DiscountRuleError> {
        if value <= Decimal::ZERO {
            return Err(DiscountRuleError::NonPositiveValue);
        }
        if value > Money::MAX.amount() {
            return Err(DiscountRuleError::ValueTooLarge);
        }
        if value.normalize().scale() > 2 {
            return Err(DiscountRuleError::ValueTooPrecise);
        }
        if self == Self::Percentage && value > Decimal::ONE_HUNDRED {
            return Err(DiscountRuleError::PercentageTooLarge);
        }
        Ok(value)
    }
}

impl std::fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DiscountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" => Ok(Self::Percentage),
            "fixed" => Ok(Self::Fixed),
            _ => Err(format!("invalid discount type: {s}")),
        }
    }
}

/// Where a discount stands right now, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountState {
    Active,
    Inactive,
    Expired,
    Exhausted,
}

impl DiscountState {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Expired => "Expired",
            Self::Exhausted => "Used up",
        }
    }

    /// CSS badge token.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Active => "badge-success",
            Self::Inactive => "badge-muted",
            Self::Expired => "badge-danger",
            Self::Exhausted => "badge-outline",
        }
    }
}

/// Normalize a discount code: trim and upper-case.
///
/// # Errors
///
/// Returns a [`DiscountRuleError`] if the code is empty, too long, or contains
/// characters other than ASCII letters, digits, `-` and `_`.
pub fn normalize_code(input: &str) -> Result<String, DiscountRuleError> {
    let code = input.trim().to_ascii_uppercase();
    if code.is_empty() {
        return Err(DiscountRuleError::EmptyCode);
    }
    if code.len() > MAX_CODE_LENGTH {
        return Err(DiscountRuleError::CodeTooLong);
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DiscountRuleError::InvalidCodeCharacter);
    }
    Ok(code)
}

/// Parse an optional `YYYY-MM-DD` expiry date.
///
/// The discount stays valid through the whole named day (UTC), so the stored
/// instant is the last second of that day. Blank input means no expiry.
///
/// # Errors
///
/// Returns [`DiscountRuleError::InvalidExpiryDate`] for malformed dates.
pub fn parse_expiry_date(input: &str) -> Result<Option<DateTime<Utc>>, DiscountRuleError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| DiscountRuleError::InvalidExpiryDate)?;
    let end_of_day = date
        .and_hms_opt(23, 59, 59)
        .ok_or(DiscountRuleError::InvalidExpiryDate)?;
    Ok(Some(end_of_day.and_utc()))
}

/// Parse an optional maximum usage. Blank or zero means unlimited.
///
/// # Errors
///
/// Returns [`DiscountRuleError::InvalidMaxUsage`] for non-integers and negatives.
pub fn parse_max_usage(input: &str) -> Result<Option<i32>, DiscountRuleError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let max: i32 = input
        .parse()
        .map_err(|_| DiscountRuleError::InvalidMaxUsage)?;
    match max {
        0 => Ok(None),
        n if n < 0 => Err(DiscountRuleError::InvalidMaxUsage),
        n => Ok(Some(n)),
    }
}

/// Resolve who a discount applies to.
///
/// Public discounts ignore `specific_user`. Private ones require it.
///
/// # Errors
///
/// Returns [`DiscountRuleError::MissingSpecificUser`] when a private discount
/// has no valid email.
pub fn resolve_audience(
    is_public: bool,
    specific_user: Option<&str>,
) -> Result<Option<Email>, DiscountRuleError> {
    if is_public {
        return Ok(None);
    }
    specific_user
        .and_then(|s| Email::parse(s).ok())
        .map(Some)
        .ok_or(DiscountRuleError::MissingSpecificUser)
}

/// Whether an expiry instant has passed.
#[must_use]
pub fn is_expired(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expiry.is_some_and(|at| at < now)
}

/// The discount-specific fields needed to decide its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountRule {
    pub is_active: bool,
    pub expiry_date: Option<DateTime<Utc>>,
    pub usage_count: i32,
    pub max_usage: Option<i32>,
}

impl DiscountRule {
    /// Current state. Expiry wins over exhaustion, which wins over the toggle.
    #[must_use]
    pub fn state(&self, now: DateTime<Utc>) -> DiscountState {
        if is_expired(self.expiry_date, now) {
            DiscountState::Expired
        } else if self.max_usage.is_some_and(|max| self.usage_count >= max) {
            DiscountState::Exhausted
        } else if self.is_active {
            DiscountState::Active
        } else {
            DiscountState::Inactive
        }
    }

    /// `3 / 10` with a cap, `3 / ∞` without.
    #[must_use]
    pub fn usage_label(&self) -> String {
        self.max_usage.map_or_else(
            || format!("{} / ∞", self.usage_count),
            |max| format!("{} / {max}", self.usage_count),
        )
    }
}
