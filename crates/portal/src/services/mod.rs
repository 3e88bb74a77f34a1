//! Business logic services for the portal.
//!
//! # Services
//!
//! - `auth` - Email/password registration and sign-in
//! - `workflow` - Admin status decisions on requests and projects

pub mod auth;
pub mod workflow;
