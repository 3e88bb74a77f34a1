//! Payment request review.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use tracing::instrument;

use arpk_core::{PaymentRequestId, PaymentRequestStatus, StatusWorkflow};

use crate::db::PaymentRequestRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::decision::{StatusForm, decide};
use crate::routes::flash::{Flash, FlashQuery};
use crate::routes::views::{AppShell, PaymentRequestView, StatCard, status_cards};
use crate::state::AppState;

const PAYMENTS_PATH: &str = "/admin/payments";

/// Admin payments page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/payments.html")]
pub struct AdminPaymentsTemplate {
    pub shell: AppShell,
    pub flash: Option<Flash>,
    pub stats: Vec<StatCard>,
    pub requests: Vec<PaymentRequestView>,
}

/// Every payment request, newest first, with decision buttons.
#[instrument(skip(state, admin, query), fields(user_id = %admin.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<FlashQuery>,
) -> Result<AdminPaymentsTemplate> {
    let requests = PaymentRequestRepository::new(state.pool()).list_all().await?;

    Ok(AdminPaymentsTemplate {
        shell: AppShell::new(&admin, PAYMENTS_PATH),
        flash: Flash::from_query(&query),
        stats: status_cards(requests.iter().map(|r| r.status), PaymentRequestStatus::ALL),
        requests: requests.iter().map(PaymentRequestView::from).collect(),
    })
}

/// Approve, reject, or mark a payment request as paid.
#[instrument(skip(state, _admin, form))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let repo = PaymentRequestRepository::new(state.pool());
    decide(&repo, PaymentRequestId::new(id), &form, PAYMENTS_PATH).await
}
