//! Website request repository.
//!
//! Client-facing reads always filter by the owner's user ID.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use arpk_core::{Email, UserId, WebsiteRequestId, WebsiteRequestStatus};

use super::{RepositoryError, stored_email};
use crate::models::{NewWebsiteRequest, WebsiteRequest};

#[derive(Debug, sqlx::FromRow)]
struct WebsiteRequestRow {
    id: i32,
    title: String,
    description: String,
    requirements: String,
    status: WebsiteRequestStatus,
    created_at: DateTime<Utc>,
    client_id: i32,
    client_email: String,
}

impl TryFrom<WebsiteRequestRow> for WebsiteRequest {
    type Error = RepositoryError;

    fn try_from(row: WebsiteRequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: WebsiteRequestId::new(row.id),
            title: row.title,
            description: row.description,
            requirements: row.requirements,
            status: row.status,
            created_at: row.created_at,
            client_id: UserId::new(row.client_id),
            client_email: stored_email(&row.client_email)?,
        })
    }
}

const COLUMNS: &str =
    "id, title, description, requirements, status, created_at, client_id, client_email";

/// Repository for website request database operations.
pub struct WebsiteRequestRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WebsiteRequestRepository<'a> {
    /// Create a new website request repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a pending request owned by `client_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        client_id: UserId,
        client_email: &Email,
        input: &NewWebsiteRequest,
    ) -> Result<WebsiteRequest, RepositoryError> {
        let row = sqlx::query_as::<_, WebsiteRequestRow>(&format!(
            r"
            INSERT INTO portal.website_request
                (title, description, requirements, status, client_id, client_email)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "
        ))
        .bind(input.title.as_str())
        .bind(input.description.as_str())
        .bind(input.requirements.as_str())
        .bind(WebsiteRequestStatus::Pending)
        .bind(client_id)
        .bind(client_email.as_str())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// All requests submitted by one client, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_client(
        &self,
        client_id: UserId,
    ) -> Result<Vec<WebsiteRequest>, RepositoryError> {
        let rows = sqlx::query_as::<_, WebsiteRequestRow>(&format!(
            "SELECT {COLUMNS} FROM portal.website_request WHERE client_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(client_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Every request, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<WebsiteRequest>, RepositoryError> {
        let rows = sqlx::query_as::<_, WebsiteRequestRow>(&format!(
            "SELECT {COLUMNS} FROM portal.website_request ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Current status of a request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_status(
        &self,
        id: WebsiteRequestId,
    ) -> Result<Option<WebsiteRequestStatus>, RepositoryError> {
        let status = sqlx::query_scalar::<_, WebsiteRequestStatus>(
            "SELECT status FROM portal.website_request WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(status)
    }

    /// Set a request's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the request doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: WebsiteRequestId,
        status: WebsiteRequestStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE portal.website_request SET status = $1 WHERE id = $2")
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
