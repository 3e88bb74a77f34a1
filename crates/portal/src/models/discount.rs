//! Discount codes managed by admins.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use arpk_core::{DiscountId, DiscountKind, DiscountRule, DiscountState, Email, RequiredText};

/// A discount code (domain type).
#[derive(Debug, Clone)]
pub struct Discount {
    pub id: DiscountId,
    /// Upper-case code.
    pub code: String,
    pub description: String,
    pub kind: DiscountKind,
    pub value: Decimal,
    pub is_public: bool,
    /// The only client allowed to use a private discount.
    pub specific_user: Option<Email>,
    pub is_active: bool,
    pub expiry_date: Option<DateTime<Utc>>,
    pub usage_count: i32,
    /// `None` means unlimited.
    pub max_usage: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub created_by: Email,
}

impl Discount {
    /// The fields that decide the discount's state.
    #[must_use]
    pub const fn rule(&self) -> DiscountRule {
        DiscountRule {
            is_active: self.is_active,
            expiry_date: self.expiry_date,
            usage_count: self.usage_count,
            max_usage: self.max_usage,
        }
    }

    /// State at `now`.
    #[must_use]
    pub fn state(&self, now: DateTime<Utc>) -> DiscountState {
        self.rule().state(now)
    }
}

/// Validated input for a new discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiscount {
    pub code: String,
    pub description: RequiredText,
    pub kind: DiscountKind,
    pub value: Decimal,
    pub is_public: bool,
    pub specific_user: Option<Email>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub max_usage: Option<i32>,
}
