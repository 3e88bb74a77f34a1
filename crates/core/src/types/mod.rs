//! Core types for ARPK.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod discount;
pub mod email;
pub mod id;
pub mod money;
pub mod role;
pub mod status;
pub mod text;
pub mod validation;

pub use discount::{DiscountKind, DiscountRule, DiscountRuleError, DiscountState};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Money, MoneyError};
pub use role::Role;
pub use status::*;
pub use text::{RequiredText, TextError};
pub use validation::ValidationError;
