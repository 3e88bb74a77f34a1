//! Shared handling for the admin status forms.

use axum::response::Redirect;
use serde::Deserialize;

use arpk_core::{StatusWorkflow, TransitionError};

use super::flash::{redirect_error, redirect_status};
use crate::error::add_breadcrumb;
use crate::services::workflow::{DecisionError, StatusStore, apply_decision};

/// Body of every `.../{id}/status` form.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Parse the posted status, apply it, and redirect back to `page` with a flash.
pub async fn decide<St>(store: &St, id: St::Id, form: &StatusForm, page: &str) -> Redirect
where
    St: StatusStore + Sync,
{
    let Some(next) = St::Status::parse(&form.status) else {
        tracing::warn!(%id, status = %form.status, "Unknown status posted");
        return redirect_error(page, "invalid_status");
    };

    outcome(apply_decision(store, id, next).await, page, &id.to_string())
}

fn outcome<S: StatusWorkflow>(
    result: Result<S, DecisionError>,
    page: &str,
    id: &str,
) -> Redirect {
    match result {
        Ok(status) => {
            add_breadcrumb("admin", "Status updated", &[("id", id), ("status", status.as_str())]);
            redirect_status(page, status.as_str())
        }
        Err(DecisionError::NotFound) => redirect_error(page, "not_found"),
        Err(DecisionError::Transition(TransitionError::Unchanged(_))) => {
            redirect_error(page, "status_unchanged")
        }
        Err(DecisionError::Transition(TransitionError::NotADecision(_))) => {
            redirect_error(page, "invalid_status")
        }
        Err(DecisionError::Repository(e)) => {
            tracing::error!(error = %e, %id, "Status update failed");
            redirect_error(page, "update_failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use arpk_core::WebsiteRequestStatus;

    use super::*;
    use crate::db::RepositoryError;

    fn location(redirect: Redirect) -> String {
        let response = redirect.into_response();
        response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_outcome_locations() {
        let page = "/dashboard/admin";
        assert_eq!(
            location(outcome(Ok(WebsiteRequestStatus::Rejected), page, "1")),
            "/dashboard/admin?success=status&to=rejected"
        );
        assert_eq!(
            location(outcome::<WebsiteRequestStatus>(
                Err(DecisionError::NotFound),
                page,
                "1"
            )),
            "/dashboard/admin?error=not_found"
        );
        assert_eq!(
            location(outcome::<WebsiteRequestStatus>(
                Err(TransitionError::Unchanged("approved").into()),
                page,
                "1"
            )),
            "/dashboard/admin?error=status_unchanged"
        );
        assert_eq!(
            location(outcome::<WebsiteRequestStatus>(
                Err(TransitionError::NotADecision("pending").into()),
                page,
                "1"
            )),
            "/dashboard/admin?error=invalid_status"
        );
        assert_eq!(
            location(outcome::<WebsiteRequestStatus>(
                Err(DecisionError::Repository(RepositoryError::Conflict("x".into()))),
                page,
                "1"
            )),
            "/dashboard/admin?error=update_failed"
        );
    }
}
