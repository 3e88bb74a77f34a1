//! ARPK Core - Shared domain types.
//!
//! This crate provides the types shared by every ARPK component:
//! - `portal` - Marketing site plus the client/admin request workflow
//! - `cli` - Command-line tools for migrations and user management
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Route handlers lean on it for every decision that does not
//! need the database: which statuses an admin may pick, where a user lands
//! after login, how a discount value is validated.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, email, money, roles, statuses, discounts
//! - [`access`] - Role-gated route decisions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod types;

pub use access::{Access, LOGIN_PATH, dashboard_path, route_decision};
pub use types::*;
