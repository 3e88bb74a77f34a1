//! Client billing: payment requests.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use arpk_core::{Money, PaymentRequestStatus, RequiredText, ValidationError};

use super::flash::{Flash, FlashQuery, redirect_error, redirect_success};
use super::views::{AppShell, PaymentRequestView, StatCard};
use crate::db::PaymentRequestRepository;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireClient;
use crate::models::{CurrentUser, NewPaymentRequest, PaymentRequest};
use crate::state::AppState;

const BILLING_PATH: &str = "/billing";

/// New payment request form.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentRequestForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: String,
}

impl PaymentRequestForm {
    /// Validate into a new payment request.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> std::result::Result<NewPaymentRequest, ValidationError> {
        Ok(NewPaymentRequest {
            title: RequiredText::parse("Title", &self.title, RequiredText::SHORT)?,
            description: RequiredText::parse("Description", &self.description, RequiredText::LONG)?,
            amount: Money::parse(&self.amount).map_err(|e| ValidationError::money("Amount", e))?,
        })
    }
}

/// Billing page template.
#[derive(Template, WebTemplate)]
#[template(path = "billing.html")]
pub struct BillingTemplate {
    pub shell: AppShell,
    pub flash: Option<Flash>,
    pub stats: Vec<StatCard>,
    pub requests: Vec<PaymentRequestView>,
    pub form: PaymentRequestForm,
}

/// Total, pending, and approved-or-paid counts.
fn billing_stats(requests: &[PaymentRequest]) -> Vec<StatCard> {
    let pending = requests
        .iter()
        .filter(|r| r.status == PaymentRequestStatus::Pending)
        .count();
    let settled = requests.iter().filter(|r| r.status.is_settled()).count();

    vec![
        StatCard::count("Total Requests", requests.len()),
        StatCard::count("Pending", pending),
        StatCard::count("Approved", settled),
    ]
}

/// Display the client's payment requests and the request form.
#[instrument(skip(state, user, query), fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireClient(user): RequireClient,
    Query(query): Query<FlashQuery>,
) -> Result<BillingTemplate> {
    render(&state, &user, Flash::from_query(&query), PaymentRequestForm::default()).await
}

/// Create a payment request.
#[instrument(skip(state, user, form), fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireClient(user): RequireClient,
    Form(form): Form<PaymentRequestForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let flash = Flash::error("Error", e.to_string());
            let page = render(&state, &user, Some(flash), form).await?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    match PaymentRequestRepository::new(state.pool())
        .create(user.id, &user.email, &input)
        .await
    {
        Ok(request) => {
            tracing::info!(payment_request_id = %request.id, amount = %request.amount, "Payment request created");
            add_breadcrumb(
                "client",
                "Payment request created",
                &[("payment_request_id", &request.id.to_string())],
            );
            Ok(redirect_success(BILLING_PATH, "payment_requested").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create payment request");
            Ok(redirect_error(BILLING_PATH, "failed").into_response())
        }
    }
}

async fn render(
    state: &AppState,
    user: &CurrentUser,
    flash: Option<Flash>,
    form: PaymentRequestForm,
) -> Result<BillingTemplate> {
    let requests = PaymentRequestRepository::new(state.pool())
        .list_for_client(user.id)
        .await?;

    Ok(BillingTemplate {
        shell: AppShell::new(user, BILLING_PATH),
        flash,
        stats: billing_stats(&requests),
        requests: requests.iter().map(PaymentRequestView::from).collect(),
        form,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use arpk_core::{Email, MoneyError, PaymentRequestId, UserId};

    use super::*;

    fn form(amount: &str) -> PaymentRequestForm {
        PaymentRequestForm {
            title: "Deposit".to_string(),
            description: "First milestone".to_string(),
            amount: amount.to_string(),
        }
    }

    fn request(status: PaymentRequestStatus) -> PaymentRequest {
        PaymentRequest {
            id: PaymentRequestId::new(1),
            title: "Deposit".to_string(),
            description: "First milestone".to_string(),
            amount: Money::ZERO,
            status,
            created_at: Utc::now(),
            client_id: UserId::new(1),
            client_email: Email::parse("client@example.com").unwrap(),
        }
    }

    #[test]
    fn test_amount_is_parsed() {
        let input = form("$1,500.25").validate().unwrap();
        assert_eq!(input.amount.amount(), Decimal::new(150_025, 2));
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        assert_eq!(form("0").validate().unwrap().amount, Money::ZERO);
    }

    #[test]
    fn test_bad_amounts_are_rejected() {
        assert_eq!(
            form("-5").validate().unwrap_err(),
            ValidationError::money("Amount", MoneyError::Negative)
        );
        assert_eq!(
            form("").validate().unwrap_err().to_string(),
            "Amount: amount is required"
        );
        assert!(form("ten dollars").validate().is_err());
    }

    #[test]
    fn test_amount_must_fit_the_column() {
        assert_eq!(
            form("9999999999.99").validate().unwrap().amount,
            Money::MAX
        );
        assert_eq!(
            form("10000000000").validate().unwrap_err(),
            ValidationError::money("Amount", MoneyError::TooLarge)
        );
    }

    #[test]
    fn test_billing_stats_group_approved_and_paid() {
        let requests = [
            request(PaymentRequestStatus::Pending),
            request(PaymentRequestStatus::Approved),
            request(PaymentRequestStatus::Paid),
            request(PaymentRequestStatus::Rejected),
        ];
        let values: Vec<_> = billing_stats(&requests)
            .into_iter()
            .map(|c| c.value)
            .collect();
        assert_eq!(values, ["4", "1", "2"]);
    }
}
