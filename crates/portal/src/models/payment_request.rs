//! Payment requests raised by clients.

use chrono::{DateTime, Utc};

use arpk_core::{Email, Money, PaymentRequestId, PaymentRequestStatus, RequiredText, UserId};

/// A payment request (domain type).
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub id: PaymentRequestId,
    pub title: String,
    pub description: String,
    pub amount: Money,
    pub status: PaymentRequestStatus,
    pub created_at: DateTime<Utc>,
    pub client_id: UserId,
    pub client_email: Email,
}

/// Validated input for a new payment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaymentRequest {
    pub title: RequiredText,
    pub description: RequiredText,
    pub amount: Money,
}
