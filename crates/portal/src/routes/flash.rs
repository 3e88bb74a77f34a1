//! One-shot messages carried through a redirect.
//!
//! A POST handler redirects to `?success=<code>` or `?error=<code>`; the page
//! it lands on looks the code up here. Unknown codes render nothing, so the
//! query string can't inject text into the page.

use axum::response::Redirect;
use serde::Deserialize;

use arpk_core::{PaymentRequestStatus, ProjectStatus, StatusWorkflow, WebsiteRequestStatus};

/// Query parameters read by every page that shows flash messages.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub success: Option<String>,
    pub error: Option<String>,
    /// Status a record was moved to (with `success=status`).
    pub to: Option<String>,
}

/// Whether the message reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

/// A message ready for the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub title: &'static str,
    pub message: String,
}

impl Flash {
    /// Success message.
    #[must_use]
    pub fn success(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            title,
            message: message.into(),
        }
    }

    /// Error message.
    #[must_use]
    pub fn error(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            title,
            message: message.into(),
        }
    }

    /// CSS modifier for the banner.
    #[must_use]
    pub const fn css(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "flash-success",
            FlashKind::Error => "flash-error",
        }
    }

    /// Resolve the query string into a message. Errors win over successes.
    #[must_use]
    pub fn from_query(query: &FlashQuery) -> Option<Self> {
        if let Some(code) = query.error.as_deref() {
            return error_message(code);
        }
        query
            .success
            .as_deref()
            .and_then(|code| success_message(code, query.to.as_deref()))
    }
}

fn success_message(code: &str, to: Option<&str>) -> Option<Flash> {
    let flash = match code {
        "request_submitted" => Flash::success(
            "Request Submitted",
            "Your website request has been submitted successfully.",
        ),
        "payment_requested" => Flash::success(
            "Payment Request Created",
            "Your payment request has been submitted for review",
        ),
        "project_created" => {
            Flash::success("Project Created", "Project has been assigned successfully")
        }
        "discount_created" => Flash::success(
            "Discount Created",
            "Discount code has been created successfully",
        ),
        "discount_activated" => {
            Flash::success("Status Updated", "Discount activated successfully")
        }
        "discount_deactivated" => {
            Flash::success("Status Updated", "Discount deactivated successfully")
        }
        "status" => {
            let message = to.and_then(status_word).map_or_else(
                || "Status has been updated.".to_string(),
                |word| format!("Status changed to {word}."),
            );
            Flash::success("Status Updated", message)
        }
        _ => return None,
    };
    Some(flash)
}

fn error_message(code: &str) -> Option<Flash> {
    let flash = match code {
        "credentials" => Flash::error("Sign In Failed", "Invalid email or password"),
        "email_taken" => Flash::error(
            "Registration Failed",
            "An account with this email already exists",
        ),
        "password_mismatch" => Flash::error("Registration Failed", "Passwords do not match"),
        "weak_password" => Flash::error(
            "Registration Failed",
            "Password must be between 8 and 128 characters",
        ),
        "invalid_email" => Flash::error("Registration Failed", "Please enter a valid email"),
        "session" => Flash::error(
            "Sign In Failed",
            "Could not start your session. Please try again.",
        ),
        "status_unchanged" => Flash::error("Update Failed", "That status is already set."),
        "invalid_status" => Flash::error("Update Failed", "That status cannot be chosen."),
        "not_found" => Flash::error("Update Failed", "That record no longer exists."),
        "update_failed" => Flash::error("Update Failed", "Failed to update status"),
        "failed" => Flash::error("Error", "Something went wrong. Please try again."),
        _ => return None,
    };
    Some(flash)
}

/// The lower-cased label for a status, if `value` names a known one.
fn status_word(value: &str) -> Option<String> {
    WebsiteRequestStatus::parse(value)
        .map(StatusWorkflow::label)
        .or_else(|| PaymentRequestStatus::parse(value).map(StatusWorkflow::label))
        .or_else(|| ProjectStatus::parse(value).map(StatusWorkflow::label))
        .map(str::to_lowercase)
}

/// Redirect to `path` with a success code.
#[must_use]
pub fn redirect_success(path: &str, code: &str) -> Redirect {
    Redirect::to(&format!("{path}?success={}", urlencoding::encode(code)))
}

/// Redirect to `path` with an error code.
#[must_use]
pub fn redirect_error(path: &str, code: &str) -> Redirect {
    Redirect::to(&format!("{path}?error={}", urlencoding::encode(code)))
}

/// Redirect to `path` reporting that a record moved to `status`.
#[must_use]
pub fn redirect_status(path: &str, status: &str) -> Redirect {
    Redirect::to(&format!("{path}?success=status&to={}", urlencoding::encode(status)))
}
