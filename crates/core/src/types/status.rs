//! Status enums and the admin decision workflow.
//!
//! Three entities carry a status that an admin moves around:
//!
//! | Entity          | Values                                  | Admin decisions             |
//! |-----------------|-----------------------------------------|-----------------------------|
//! | Website request | pending, approved, rejected, on-hold    | approved, rejected, on-hold |
//! | Payment request | pending, approved, paid, rejected       | approved, paid, rejected    |
//! | Project         | active, completed, on-hold              | all three                   |
//!
//! Picking the status a row already has is refused. The UI renders that
//! decision as a disabled button, and the server rejects it if posted anyway.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common behavior of the status enums.
pub trait StatusWorkflow: Copy + Eq + Sized + 'static {
    /// Every value, in display order.
    const ALL: &'static [Self];

    /// Values an admin may pick.
    const DECISIONS: &'static [Self];

    /// Wire/database form (kebab-case).
    fn as_str(self) -> &'static str;

    /// Capitalized display label.
    fn label(self) -> &'static str;

    /// CSS token used by templates for the status badge.
    fn badge(self) -> &'static str;

    /// Parse the wire form. Accepts `on_hold` as an alias of `on-hold`.
    fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == normalized)
    }
}

/// Why an admin decision was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The row already has this status.
    #[error("status is already {0}")]
    Unchanged(&'static str),
    /// The status is not one an admin may set.
    #[error("{0} is not an allowed decision")]
    NotADecision(&'static str),
}

/// Validate an admin decision against the current status.
///
/// # Errors
///
/// Returns [`TransitionError::NotADecision`] if `next` is not in
/// [`StatusWorkflow::DECISIONS`], or [`TransitionError::Unchanged`] if it equals
/// `current`.
pub fn check_decision<S: StatusWorkflow>(current: S, next: S) -> Result<S, TransitionError> {
    if !S::DECISIONS.contains(&next) {
        return Err(TransitionError::NotADecision(next.as_str()));
    }
    if current == next {
        return Err(TransitionError::Unchanged(next.as_str()));
    }
    Ok(next)
}

/// One decision button for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionOption<S> {
    /// Status the button sets.
    pub status: S,
    /// False when the row already has this status.
    pub enabled: bool,
}

/// The decision buttons to render for a row currently in `current`.
#[must_use]
pub fn available_decisions<S: StatusWorkflow>(current: S) -> Vec<DecisionOption<S>> {
    S::DECISIONS
        .iter()
        .map(|&status| DecisionOption {
            status,
            enabled: status != current,
        })
        .collect()
}

/// Count rows per status, in [`StatusWorkflow::ALL`] order.
pub fn count_by_status<S: StatusWorkflow>(
    statuses: impl IntoIterator<Item = S>,
) -> Vec<(S, usize)> {
    let mut counts: Vec<(S, usize)> = S::ALL.iter().map(|&s| (s, 0)).collect();
    for status in statuses {
        if let Some(entry) = counts.iter_mut().find(|(s, _)| *s == status) {
            entry.1 += 1;
        }
    }
    counts
}

macro_rules! impl_status_traits {
    ($name:ident) => {
        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(StatusWorkflow::as_str(*self))
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as StatusWorkflow>::parse(s)
                    .ok_or_else(|| format!("invalid {}: {s}", stringify!($name)))
            }
        }
    };
}

/// Status of a website-build request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "portal.website_request_status", rename_all = "kebab-case")
)]
#[serde(rename_all = "kebab-case")]
pub enum WebsiteRequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    OnHold,
}

impl StatusWorkflow for WebsiteRequestStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Approved, Self::Rejected, Self::OnHold];
    const DECISIONS: &'static [Self] = &[Self::Approved, Self::OnHold, Self::Rejected];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::OnHold => "on-hold",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::OnHold => "On hold",
        }
    }

    fn badge(self) -> &'static str {
        match self {
            Self::Pending => "badge-outline",
            Self::Approved => "badge-success",
            Self::Rejected => "badge-danger",
            Self::OnHold => "badge-muted",
        }
    }
}

impl_status_traits!(WebsiteRequestStatus);

/// Status of a client payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "portal.payment_request_status", rename_all = "kebab-case")
)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentRequestStatus {
    #[default]
    Pending,
    Approved,
    Paid,
    Rejected,
}

impl PaymentRequestStatus {
    /// Approved and paid requests both count as settled on the billing page.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Approved | Self::Paid)
    }
}

impl StatusWorkflow for PaymentRequestStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Approved, Self::Paid, Self::Rejected];
    const DECISIONS: &'static [Self] = &[Self::Approved, Self::Paid, Self::Rejected];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Paid => "paid",
            Self::Rejected => "rejected",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Paid => "Paid",
            Self::Rejected => "Rejected",
        }
    }

    fn badge(self) -> &'static str {
        match self {
            Self::Pending => "badge-outline",
            Self::Approved | Self::Paid => "badge-success",
            Self::Rejected => "badge-danger",
        }
    }
}

impl_status_traits!(PaymentRequestStatus);

/// Status of an assigned project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "portal.project_status", rename_all = "kebab-case")
)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    OnHold,
}

impl StatusWorkflow for ProjectStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Completed, Self::OnHold];
    const DECISIONS: &'static [Self] = Self::ALL;

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::OnHold => "On hold",
        }
    }

    fn badge(self) -> &'static str {
        match self {
            Self::Active => "badge-success",
            Self::Completed => "badge-info",
            Self::OnHold => "badge-muted",
        }
    }
}

impl_status_traits!(ProjectStatus);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_website_request_parse_accepts_both_hold_spellings() {
        assert_eq!(
            "on-hold".parse::<WebsiteRequestStatus>(),
            Ok(WebsiteRequestStatus::OnHold)
        );
        assert_eq!(
            "ON_HOLD".parse::<WebsiteRequestStatus>(),
            Ok(WebsiteRequestStatus::OnHold)
        );
        assert!("archived".parse::<WebsiteRequestStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&WebsiteRequestStatus::OnHold).unwrap();
        assert_eq!(json, "\"on-hold\"");
        let parsed: ProjectStatus = serde_json::from_str("\"on-hold\"").unwrap();
        assert_eq!(parsed, ProjectStatus::OnHold);
    }

    #[test]
    fn test_pending_request_can_be_approved_held_or_rejected() {
        for next in [
            WebsiteRequestStatus::Approved,
            WebsiteRequestStatus::OnHold,
            WebsiteRequestStatus::Rejected,
        ] {
            assert_eq!(check_decision(WebsiteRequestStatus::Pending, next), Ok(next));
        }
    }

    #[test]
    fn test_same_status_decision_is_refused() {
        assert_eq!(
            check_decision(WebsiteRequestStatus::Approved, WebsiteRequestStatus::Approved),
            Err(TransitionError::Unchanged("approved"))
        );
        assert_eq!(
            check_decision(PaymentRequestStatus::Paid, PaymentRequestStatus::Paid),
            Err(TransitionError::Unchanged("paid"))
        );
    }

    #[test]
    fn test_pending_is_not_an_admin_decision() {
        assert_eq!(
            check_decision(WebsiteRequestStatus::Rejected, WebsiteRequestStatus::Pending),
            Err(TransitionError::NotADecision("pending"))
        );
        assert_eq!(
            check_decision(PaymentRequestStatus::Approved, PaymentRequestStatus::Pending),
            Err(TransitionError::NotADecision("pending"))
        );
    }

    #[test]
    fn test_decided_request_can_still_be_changed() {
        assert_eq!(
            check_decision(WebsiteRequestStatus::Rejected, WebsiteRequestStatus::Approved),
            Ok(WebsiteRequestStatus::Approved)
        );
    }

    #[test]
    fn test_available_decisions_disable_current_status() {
        let options = available_decisions(WebsiteRequestStatus::OnHold);
        assert_eq!(options.len(), 3);
        for option in options {
            assert_eq!(
                option.enabled,
                option.status != WebsiteRequestStatus::OnHold
            );
        }

        let pending = available_decisions(WebsiteRequestStatus::Pending);
        assert!(pending.iter().all(|o| o.enabled));
    }

    #[test]
    fn test_project_status_every_value_is_a_decision() {
        let options = available_decisions(ProjectStatus::Active);
        let enabled: Vec<_> = options
            .iter()
            .filter(|o| o.enabled)
            .map(|o| o.status)
            .collect();
        assert_eq!(enabled, vec![ProjectStatus::Completed, ProjectStatus::OnHold]);
    }

    #[test]
    fn test_count_by_status() {
        let counts = count_by_status([
            PaymentRequestStatus::Pending,
            PaymentRequestStatus::Paid,
            PaymentRequestStatus::Pending,
        ]);
        assert_eq!(
            counts,
            vec![
                (PaymentRequestStatus::Pending, 2),
                (PaymentRequestStatus::Approved, 0),
                (PaymentRequestStatus::Paid, 1),
                (PaymentRequestStatus::Rejected, 0),
            ]
        );
    }

    #[test]
    fn test_payment_settled() {
        assert!(PaymentRequestStatus::Approved.is_settled());
        assert!(PaymentRequestStatus::Paid.is_settled());
        assert!(!PaymentRequestStatus::Pending.is_settled());
        assert!(!PaymentRequestStatus::Rejected.is_settled());
    }

    #[test]
    fn test_display_is_wire_form() {
        assert_eq!(ProjectStatus::OnHold.to_string(), "on-hold");
        assert_eq!(WebsiteRequestStatus::OnHold.label(), "On hold");
    }
}
