//! Admin status decisions.
//!
//! Website requests, payment requests and projects share one rule set: the
//! admin picks a status from the allowed decisions, picking the current status
//! is refused, and a missing row is reported as not found. [`apply_decision`]
//! runs that against any store implementing [`StatusStore`].

use thiserror::Error;

use arpk_core::{
    PaymentRequestId, PaymentRequestStatus, ProjectId, ProjectStatus, StatusWorkflow,
    TransitionError, WebsiteRequestId, WebsiteRequestStatus, check_decision,
};

use crate::db::{
    PaymentRequestRepository, ProjectRepository, RepositoryError, WebsiteRequestRepository,
};

/// Why a decision was not applied.
#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for DecisionError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Repository(other),
        }
    }
}

/// A table whose rows carry an admin-controlled status.
pub trait StatusStore {
    type Id: Copy + std::fmt::Display + Send;
    type Status: StatusWorkflow + Send;

    /// Current status, or `None` if the row doesn't exist.
    fn current_status(
        &self,
        id: Self::Id,
    ) -> impl Future<Output = Result<Option<Self::Status>, RepositoryError>> + Send;

    /// Overwrite the status.
    fn set_status(
        &self,
        id: Self::Id,
        status: Self::Status,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Validate and apply an admin decision. Returns the new status.
///
/// # Errors
///
/// Returns [`DecisionError::NotFound`] for a missing row,
/// [`DecisionError::Transition`] for a refused decision, and
/// [`DecisionError::Repository`] for database failures.
pub async fn apply_decision<St: StatusStore + Sync>(
    store: &St,
    id: St::Id,
    next: St::Status,
) -> Result<St::Status, DecisionError> {
    let current = store
        .current_status(id)
        .await?
        .ok_or(DecisionError::NotFound)?;

    let next = check_decision(current, next)?;
    store.set_status(id, next).await?;

    tracing::info!(
        %id,
        from = current.as_str(),
        to = next.as_str(),
        "Status updated"
    );
    Ok(next)
}

impl StatusStore for WebsiteRequestRepository<'_> {
    type Id = WebsiteRequestId;
    type Status = WebsiteRequestStatus;

    async fn current_status(
        &self,
        id: Self::Id,
    ) -> Result<Option<Self::Status>, RepositoryError> {
        self.get_status(id).await
    }

    async fn set_status(&self, id: Self::Id, status: Self::Status) -> Result<(), RepositoryError> {
        self.update_status(id, status).await
    }
}

impl StatusStore for PaymentRequestRepository<'_> {
    type Id = PaymentRequestId;
    type Status = PaymentRequestStatus;

    async fn current_status(
        &self,
        id: Self::Id,
    ) -> Result<Option<Self::Status>, RepositoryError> {
        self.get_status(id).await
    }

    async fn set_status(&self, id: Self::Id, status: Self::Status) -> Result<(), RepositoryError> {
        self.update_status(id, status).await
    }
}

impl StatusStore for ProjectRepository<'_> {
    type Id = ProjectId;
    type Status = ProjectStatus;

    async fn current_status(
        &self,
        id: Self::Id,
    ) -> Result<Option<Self::Status>, RepositoryError> {
        self.get_status(id).await
    }

    async fn set_status(&self, id: Self::Id, status: Self::Status) -> Result<(), RepositoryError> {
        self.update_status(id, status).await
    }
}
