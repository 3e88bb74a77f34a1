//! Display data shared by the signed-in pages.
//!
//! Templates get pre-formatted strings only. Dates, money, badges and decision
//! buttons are all resolved here, where they can be unit tested.

use chrono::{DateTime, Utc};

use arpk_core::{DecisionOption, Role, StatusWorkflow, available_decisions, count_by_status};

use crate::models::{CurrentUser, Discount, PaymentRequest, Project, WebsiteRequest};

/// `YYYY-MM-DD`, or `N/A` when there is no date.
#[must_use]
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(|| "N/A".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

/// One link in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

const CLIENT_NAV: &[(&str, &str)] = &[
    ("Dashboard", "/dashboard/client"),
    ("Projects", "/projects"),
    ("Billing", "/billing"),
];

const ADMIN_NAV: &[(&str, &str)] = &[
    ("Dashboard", "/dashboard/admin"),
    ("Projects", "/admin/projects"),
    ("Payments", "/admin/payments"),
    ("Discounts", "/admin/discounts"),
];

/// Sidebar links for a role, with the current page marked.
#[must_use]
pub fn sidebar(role: Role, current_path: &str) -> Vec<NavItem> {
    let items = match role {
        Role::Client => CLIENT_NAV,
        Role::Admin => ADMIN_NAV,
    };
    items
        .iter()
        .map(|&(label, href)| NavItem {
            label,
            href,
            active: href == current_path,
        })
        .collect()
}

/// Everything the signed-in layout needs besides the page body.
#[derive(Debug, Clone)]
pub struct AppShell {
    pub email: String,
    pub role_label: &'static str,
    pub nav: Vec<NavItem>,
}

impl AppShell {
    #[must_use]
    pub fn new(user: &CurrentUser, current_path: &str) -> Self {
        Self {
            email: user.email.to_string(),
            role_label: user.role.label(),
            nav: sidebar(user.role, current_path),
        }
    }
}

/// A summary card at the top of a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

impl StatCard {
    #[must_use]
    pub fn count(label: &'static str, value: usize) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

/// A `Total` card followed by one card per status in `shown`.
pub fn status_cards<S: StatusWorkflow>(
    statuses: impl IntoIterator<Item = S>,
    shown: &[S],
) -> Vec<StatCard> {
    let counts = count_by_status(statuses);
    let total = counts.iter().map(|(_, n)| n).sum();

    std::iter::once(StatCard::count("Total", total))
        .chain(shown.iter().map(|&status| {
            let n = counts
                .iter()
                .find(|(s, _)| *s == status)
                .map_or(0, |(_, n)| *n);
            StatCard::count(status.label(), n)
        }))
        .collect()
}

/// A status pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub class: &'static str,
}

impl Badge {
    #[must_use]
    pub fn of<S: StatusWorkflow>(status: S) -> Self {
        Self {
            label: status.label(),
            class: status.badge(),
        }
    }
}

/// One admin decision button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionButton {
    pub value: &'static str,
    pub label: &'static str,
    pub enabled: bool,
}

impl<S: StatusWorkflow> From<DecisionOption<S>> for DecisionButton {
    fn from(option: DecisionOption<S>) -> Self {
        Self {
            value: option.status.as_str(),
            label: option.status.label(),
            enabled: option.enabled,
        }
    }
}

/// Decision buttons for a row in `current`.
#[must_use]
pub fn decision_buttons<S: StatusWorkflow>(current: S) -> Vec<DecisionButton> {
    available_decisions(current)
        .into_iter()
        .map(DecisionButton::from)
        .collect()
}

/// A `<select>` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Options for a status `<select>`, with `selected` pre-chosen.
#[must_use]
pub fn status_select<S: StatusWorkflow>(selected: S) -> Vec<SelectOption> {
    S::ALL
        .iter()
        .map(|&status| SelectOption {
            value: status.as_str(),
            label: status.label(),
            selected: status == selected,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct WebsiteRequestView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub client_email: String,
    pub created: String,
    pub status: Badge,
    pub decisions: Vec<DecisionButton>,
}

impl From<&WebsiteRequest> for WebsiteRequestView {
    fn from(request: &WebsiteRequest) -> Self {
        Self {
            id: request.id.as_i32(),
            title: request.title.clone(),
            description: request.description.clone(),
            requirements: request.requirements.clone(),
            client_email: request.client_email.to_string(),
            created: format_date(Some(request.created_at)),
            status: Badge::of(request.status),
            decisions: decision_buttons(request.status),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaymentRequestView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub amount: String,
    pub client_email: String,
    pub created: String,
    pub status: Badge,
    pub decisions: Vec<DecisionButton>,
}

impl From<&PaymentRequest> for PaymentRequestView {
    fn from(request: &PaymentRequest) -> Self {
        Self {
            id: request.id.as_i32(),
            title: request.title.clone(),
            description: request.description.clone(),
            amount: request.amount.display(),
            client_email: request.client_email.to_string(),
            created: format_date(Some(request.created_at)),
            status: Badge::of(request.status),
            decisions: decision_buttons(request.status),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectView {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub budget: String,
    pub created: String,
    pub created_by: String,
    pub status: Badge,
    pub decisions: Vec<DecisionButton>,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.as_i32(),
            title: project.title.clone(),
            description: project.description.clone(),
            assigned_to: project.assigned_to.to_string(),
            budget: project.budget.display(),
            created: format_date(Some(project.created_at)),
            created_by: project.created_by.to_string(),
            status: Badge::of(project.status),
            decisions: decision_buttons(project.status),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiscountView {
    pub id: i32,
    pub code: String,
    pub description: String,
    pub kind: &'static str,
    pub value: String,
    pub audience: String,
    pub usage: String,
    pub expires: String,
    pub is_active: bool,
    pub state: Badge,
}

impl DiscountView {
    /// Build the row as of `now`.
    #[must_use]
    pub fn at(discount: &Discount, now: DateTime<Utc>) -> Self {
        let state = discount.state(now);
        Self {
            id: discount.id.as_i32(),
            code: discount.code.clone(),
            description: discount.description.clone(),
            kind: discount.kind.label(),
            value: discount.kind.format_value(discount.value),
            audience: discount
                .specific_user
                .as_ref()
                .map_or_else(|| "Public".to_string(), ToString::to_string),
            usage: discount.rule().usage_label(),
            expires: format_date(discount.expiry_date),
            is_active: discount.is_active,
            state: Badge {
                label: state.label(),
                class: state.badge(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use arpk_core::{
        DiscountId, DiscountKind, Email, Money, PaymentRequestStatus, UserId,
        WebsiteRequestId, WebsiteRequestStatus,
    };

    use super::*;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some(at(2026, 3, 7))), "2026-03-07");
        assert_eq!(format_date(None), "N/A");
    }

    #[test]
    fn test_sidebar_per_role() {
        let client = sidebar(Role::Client, "/billing");
        let labels: Vec<_> = client.iter().map(|i| i.label).collect();
        assert_eq!(labels, ["Dashboard", "Projects", "Billing"]);
        assert!(client.iter().any(|i| i.href == "/billing" && i.active));
        assert_eq!(client.iter().filter(|i| i.active).count(), 1);

        let admin = sidebar(Role::Admin, "/dashboard/admin");
        let labels: Vec<_> = admin.iter().map(|i| i.label).collect();
        assert_eq!(labels, ["Dashboard", "Projects", "Payments", "Discounts"]);
        assert!(admin.iter().all(|i| !i.href.starts_with("/billing")));
    }

    #[test]
    fn test_status_cards() {
        use WebsiteRequestStatus::{Approved, OnHold, Pending, Rejected};

        let cards = status_cards([Pending, Approved, Approved, OnHold], &[Approved, Pending, Rejected]);
        let pairs: Vec<_> = cards.iter().map(|c| (c.label, c.value.as_str())).collect();
        assert_eq!(
            pairs,
            [("Total", "4"), ("Approved", "2"), ("Pending", "1"), ("Rejected", "0")]
        );
    }

    #[test]
    fn test_decision_buttons_disable_current_status() {
        let buttons = decision_buttons(WebsiteRequestStatus::Approved);
        assert_eq!(buttons.len(), 3);
        for button in &buttons {
            assert_eq!(button.enabled, button.value != "approved");
        }

        let buttons = decision_buttons(WebsiteRequestStatus::Pending);
        assert!(buttons.iter().all(|b| b.enabled));
        assert!(buttons.iter().all(|b| b.value != "pending"));
    }

    #[test]
    fn test_status_select_marks_selection() {
        let options = status_select(arpk_core::ProjectStatus::Active);
        assert_eq!(options.len(), 3);
        assert_eq!(
            options.iter().filter(|o| o.selected).map(|o| o.value).collect::<Vec<_>>(),
            ["active"]
        );
    }

    #[test]
    fn test_website_request_view() {
        let request = WebsiteRequest {
            id: WebsiteRequestId::new(4),
            title: "Bakery site".to_string(),
            description: "Menu and hours".to_string(),
            requirements: "Online ordering".to_string(),
            status: WebsiteRequestStatus::OnHold,
            created_at: at(2026, 1, 15),
            client_id: UserId::new(2),
            client_email: Email::parse("baker@example.com").unwrap(),
        };
        let view = WebsiteRequestView::from(&request);
        assert_eq!(view.id, 4);
        assert_eq!(view.created, "2026-01-15");
        assert_eq!(view.status.label, "On hold");
        assert_eq!(view.status.class, "badge-muted");
        assert!(!view.decisions.iter().find(|b| b.value == "on-hold").unwrap().enabled);
    }

    #[test]
    fn test_payment_request_view_formats_amount() {
        let request = PaymentRequest {
            id: arpk_core::PaymentRequestId::new(1),
            title: "Deposit".to_string(),
            description: "First milestone".to_string(),
            amount: Money::parse("1250.5").unwrap(),
            status: PaymentRequestStatus::Paid,
            created_at: at(2026, 2, 1),
            client_id: UserId::new(2),
            client_email: Email::parse("baker@example.com").unwrap(),
        };
        let view = PaymentRequestView::from(&request);
        assert_eq!(view.amount, "$1,250.50");
        assert_eq!(view.status.label, "Paid");
    }

    #[test]
    fn test_discount_view_states() {
        let discount = Discount {
            id: DiscountId::new(9),
            code: "SAVE20".to_string(),
            description: "Spring sale".to_string(),
            kind: DiscountKind::Percentage,
            value: Decimal::new(20, 0),
            is_public: true,
            specific_user: None,
            is_active: true,
            expiry_date: Some(at(2026, 4, 30)),
            usage_count: 3,
            max_usage: None,
            created_at: at(2026, 3, 1),
            created_by: Email::parse("admin@example.com").unwrap(),
        };

        let view = DiscountView::at(&discount, at(2026, 4, 1));
        assert_eq!(view.value, "20%");
        assert_eq!(view.audience, "Public");
        assert_eq!(view.usage, "3 / ∞");
        assert_eq!(view.expires, "2026-04-30");
        assert_eq!(view.state.label, "Active");

        let view = DiscountView::at(&discount, at(2026, 5, 1));
        assert_eq!(view.state.label, "Expired");
    }
}
