//! Payment request repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use arpk_core::{Email, Money, PaymentRequestId, PaymentRequestStatus, UserId};

use super::{RepositoryError, stored_email};
use crate::models::{NewPaymentRequest, PaymentRequest};

#[derive(Debug, sqlx::FromRow)]
struct PaymentRequestRow {
    id: i32,
    title: String,
    description: String,
    amount: Money,
    status: PaymentRequestStatus,
    created_at: DateTime<Utc>,
    client_id: i32,
    client_email: String,
}

impl TryFrom<PaymentRequestRow> for PaymentRequest {
    type Error = RepositoryError;

    fn try_from(row: PaymentRequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PaymentRequestId::new(row.id),
            title: row.title,
            description: row.description,
            amount: row.amount,
            status: row.status,
            created_at: row.created_at,
            client_id: UserId::new(row.client_id),
            client_email: stored_email(&row.client_email)?,
        })
    }
}

const COLUMNS: &str = "id, title, description, amount, status, created_at, client_id, client_email";

/// Repository for payment request database operations.
pub struct PaymentRequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PaymentRequestRepository<'a> {
    /// Create a new payment request repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending payment request owned by `client_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        client_id: UserId,
        client_email: &Email,
        input: &NewPaymentRequest,
    ) -> Result<PaymentRequest, RepositoryError> {
        let row = sqlx::query_as::<_, PaymentRequestRow>(&format!(
            r"
            INSERT INTO portal.payment_request
                (title, description, amount, status, client_id, client_email)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "
        ))
        .bind(input.title.as_str())
        .bind(input.description.as_str())
        .bind(input.amount)
        .bind(PaymentRequestStatus::Pending)
        .bind(client_id)
        .bind(client_email.as_str())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// A client's payment requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_client(
        &self,
        client_id: UserId,
    ) -> Result<Vec<PaymentRequest>, RepositoryError> {
        let rows = sqlx::query_as::<_, PaymentRequestRow>(&format!(
            "SELECT {COLUMNS} FROM portal.payment_request WHERE client_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(client_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Every payment request, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<PaymentRequest>, RepositoryError> {
        let rows = sqlx::query_as::<_, PaymentRequestRow>(&format!(
            "SELECT {COLUMNS} FROM portal.payment_request ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Current status of a payment request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_status(
        &self,
        id: PaymentRequestId,
    ) -> Result<Option<PaymentRequestStatus>, RepositoryError> {
        let status = sqlx::query_scalar::<_, PaymentRequestStatus>(
            "SELECT status FROM portal.payment_request WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(status)
    }

    /// Set a payment request's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the payment request doesn't exist.
    pub async fn update_status(
        &self,
        id: PaymentRequestId,
        status: PaymentRequestStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE portal.payment_request SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
