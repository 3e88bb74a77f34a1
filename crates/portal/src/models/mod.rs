//! Domain models for the portal.
//!
//! These are validated domain objects. Database row types live next to the
//! queries in [`crate::db`] and convert into these with `TryFrom`.

pub mod discount;
pub mod payment_request;
pub mod project;
pub mod session;
pub mod user;
pub mod website_request;

pub use discount::{Discount, NewDiscount};
pub use payment_request::{NewPaymentRequest, PaymentRequest};
pub use project::{NewProject, Project};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
pub use website_request::{NewWebsiteRequest, WebsiteRequest};
