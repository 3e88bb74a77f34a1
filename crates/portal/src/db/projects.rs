//! Project repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use arpk_core::{Email, Money, ProjectId, ProjectStatus};

use super::{RepositoryError, stored_email};
use crate::models::{NewProject, Project};

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: i32,
    title: String,
    description: String,
    assigned_to: String,
    budget: Money,
    status: ProjectStatus,
    created_at: DateTime<Utc>,
    created_by: String,
}

impl TryFrom<ProjectRow> for Project {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProjectId::new(row.id),
            title: row.title,
            description: row.description,
            assigned_to: stored_email(&row.assigned_to)?,
            budget: row.budget,
            status: row.status,
            created_at: row.created_at,
            created_by: stored_email(&row.created_by)?,
        })
    }
}

const COLUMNS: &str =
    "id, title, description, assigned_to, budget, status, created_at, created_by";

/// Repository for project database operations.
pub struct ProjectRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProjectRepository<'a> {
    /// Create a new project repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a project created by an admin.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        input: &NewProject,
        created_by: &Email,
    ) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            r"
            INSERT INTO portal.project
                (title, description, assigned_to, budget, status, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "
        ))
        .bind(input.title.as_str())
        .bind(input.description.as_str())
        .bind(input.assigned_to.as_str())
        .bind(input.budget)
        .bind(input.status)
        .bind(created_by.as_str())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Projects assigned to a client, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_assignee(
        &self,
        assigned_to: &Email,
    ) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {COLUMNS} FROM portal.project WHERE assigned_to = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(assigned_to.as_str())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Every project, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {COLUMNS} FROM portal.project ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Current status of a project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_status(&self, id: ProjectId) -> Result<Option<ProjectStatus>, RepositoryError> {
        let status = sqlx::query_scalar::<_, ProjectStatus>(
            "SELECT status FROM portal.project WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(status)
    }

    /// Set a project's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the project doesn't exist.
    pub async fn update_status(
        &self,
        id: ProjectId,
        status: ProjectStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE portal.project SET status = $1 WHERE id = $2")
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
