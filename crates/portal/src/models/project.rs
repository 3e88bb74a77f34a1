//! Projects assigned to clients by admins.

use chrono::{DateTime, Utc};

use arpk_core::{Email, Money, ProjectId, ProjectStatus, RequiredText};

/// A project (domain type).
#[derive(Debug, Clone)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Client the project belongs to. Clients see projects by this email.
    pub assigned_to: Email,
    pub budget: Money,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    /// Admin who created it.
    pub created_by: Email,
}

/// Validated input for a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: RequiredText,
    pub description: RequiredText,
    pub assigned_to: Email,
    pub budget: Money,
    pub status: ProjectStatus,
}
