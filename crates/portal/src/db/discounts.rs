//! Discount code repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use arpk_core::{DiscountId, DiscountKind, Email};

use super::{RepositoryError, conflict_on_unique, stored_email};
use crate::models::{Discount, NewDiscount};

#[derive(Debug, sqlx::FromRow)]
struct DiscountRow {
    id: i32,
    code: String,
    description: String,
    kind: DiscountKind,
    value: Decimal,
    is_public: bool,
    specific_user: Option<String>,
    is_active: bool,
    expiry_date: Option<DateTime<Utc>>,
    usage_count: i32,
    max_usage: Option<i32>,
    created_at: DateTime<Utc>,
    created_by: String,
}

impl TryFrom<DiscountRow> for Discount {
    type Error = RepositoryError;

    fn try_from(row: DiscountRow) -> Result<Self, Self::Error> {
        let specific_user = row.specific_user.as_deref().map(stored_email).transpose()?;

        Ok(Self {
            id: DiscountId::new(row.id),
            code: row.code,
            description: row.description,
            kind: row.kind,
            value: row.value,
            is_public: row.is_public,
            specific_user,
            is_active: row.is_active,
            expiry_date: row.expiry_date,
            usage_count: row.usage_count,
            max_usage: row.max_usage,
            created_at: row.created_at,
            created_by: stored_email(&row.created_by)?,
        })
    }
}

const COLUMNS: &str = "id, code, description, kind, value, is_public, specific_user, is_active, \
                       expiry_date, usage_count, max_usage, created_at, created_by";

/// Repository for discount database operations.
pub struct DiscountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DiscountRepository<'a> {
    /// Create a new discount repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an active, unused discount.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the code already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        input: &NewDiscount,
        created_by: &Email,
    ) -> Result<Discount, RepositoryError> {
        let row = sqlx::query_as::<_, DiscountRow>(&format!(
            r"
            INSERT INTO portal.discount
                (code, description, kind, value, is_public, specific_user,
                 is_active, expiry_date, usage_count, max_usage, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE, $7, 0, $8, $9)
            RETURNING {COLUMNS}
            "
        ))
        .bind(&input.code)
        .bind(input.description.as_str())
        .bind(input.kind)
        .bind(input.value)
        .bind(input.is_public)
        .bind(input.specific_user.as_ref().map(Email::as_str))
        .bind(input.expiry_date)
        .bind(input.max_usage)
        .bind(created_by.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "discount code"))?;

        row.try_into()
    }

    /// Every discount, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Discount>, RepositoryError> {
        let rows = sqlx::query_as::<_, DiscountRow>(&format!(
            "SELECT {COLUMNS} FROM portal.discount ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Flip `is_active` and return the new value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the discount doesn't exist.
    pub async fn toggle_active(&self, id: DiscountId) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>(
            "UPDATE portal.discount SET is_active = NOT is_active WHERE id = $1 RETURNING is_active",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }
}
