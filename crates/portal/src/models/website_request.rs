//! Website-build requests submitted by clients.

use chrono::{DateTime, Utc};

use arpk_core::{Email, RequiredText, UserId, WebsiteRequestId, WebsiteRequestStatus};

/// A website-build request (domain type).
#[derive(Debug, Clone)]
pub struct WebsiteRequest {
    pub id: WebsiteRequestId,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub status: WebsiteRequestStatus,
    pub created_at: DateTime<Utc>,
    /// Submitting client. Never changes after insert.
    pub client_id: UserId,
    pub client_email: Email,
}

/// Validated input for a new website request.
///
/// The owner is not part of the form; it comes from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWebsiteRequest {
    pub title: RequiredText,
    pub description: RequiredText,
    pub requirements: RequiredText,
}
