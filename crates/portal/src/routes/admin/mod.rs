//! Admin-only pages: projects, payment review, discount codes.
//!
//! Every handler here takes [`RequireAdmin`](crate::middleware::RequireAdmin),
//! so clients are redirected before any query runs.

pub mod discounts;
pub mod payments;
pub mod projects;
