//! Dashboards and website requests.
//!
//! Clients submit website requests from their dashboard and watch the status
//! change; admins see every request and decide on it.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use arpk_core::{
    RequiredText, ValidationError, WebsiteRequestId, WebsiteRequestStatus, dashboard_path,
};

use super::decision::{StatusForm, decide};
use super::flash::{Flash, FlashQuery, redirect_error, redirect_success};
use super::views::{AppShell, StatCard, WebsiteRequestView, status_cards};
use crate::db::WebsiteRequestRepository;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{RequireAdmin, RequireAuth, RequireClient};
use crate::models::{CurrentUser, NewWebsiteRequest};
use crate::state::AppState;

const CLIENT_PATH: &str = "/dashboard/client";
const ADMIN_PATH: &str = "/dashboard/admin";

// =============================================================================
// Forms
// =============================================================================

/// New website request form. Also echoed back into the page on errors.
#[derive(Debug, Default, Deserialize)]
pub struct WebsiteRequestForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
}

impl WebsiteRequestForm {
    /// Validate into a new request.
    ///
    /// # Errors
    ///
    /// Returns the first field that is blank or too long.
    pub fn validate(&self) -> std::result::Result<NewWebsiteRequest, ValidationError> {
        Ok(NewWebsiteRequest {
            title: RequiredText::parse("Project title", &self.title, RequiredText::SHORT)?,
            description: RequiredText::parse("Description", &self.description, RequiredText::LONG)?,
            requirements: RequiredText::parse(
                "Requirements",
                &self.requirements,
                RequiredText::LONG,
            )?,
        })
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Client dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/client.html")]
pub struct ClientDashboardTemplate {
    pub shell: AppShell,
    pub flash: Option<Flash>,
    pub stats: Vec<StatCard>,
    pub requests: Vec<WebsiteRequestView>,
    pub form: WebsiteRequestForm,
}

/// Admin dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/admin.html")]
pub struct AdminDashboardTemplate {
    pub shell: AppShell,
    pub flash: Option<Flash>,
    pub stats: Vec<StatCard>,
    pub requests: Vec<WebsiteRequestView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `/dashboard` always forwards to the role's own dashboard.
pub async fn index(RequireAuth(user): RequireAuth) -> Redirect {
    Redirect::to(dashboard_path(user.role))
}

/// Display the client dashboard.
#[instrument(skip(state, user, query), fields(user_id = %user.id))]
pub async fn client(
    State(state): State<AppState>,
    RequireClient(user): RequireClient,
    Query(query): Query<FlashQuery>,
) -> Result<ClientDashboardTemplate> {
    render_client(
        &state,
        &user,
        Flash::from_query(&query),
        WebsiteRequestForm::default(),
    )
    .await
}

/// Submit a website request.
#[instrument(skip(state, user, form), fields(user_id = %user.id))]
pub async fn submit_request(
    State(state): State<AppState>,
    RequireClient(user): RequireClient,
    Form(form): Form<WebsiteRequestForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let flash = Flash::error("Submission Failed", e.to_string());
            let page = render_client(&state, &user, Some(flash), form).await?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    match WebsiteRequestRepository::new(state.pool())
        .create(user.id, &user.email, &input)
        .await
    {
        Ok(request) => {
            tracing::info!(request_id = %request.id, "Website request submitted");
            add_breadcrumb(
                "client",
                "Website request submitted",
                &[("request_id", &request.id.to_string())],
            );
            Ok(redirect_success(CLIENT_PATH, "request_submitted").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create website request");
            Ok(redirect_error(CLIENT_PATH, "failed").into_response())
        }
    }
}

/// Display the admin dashboard with every website request.
#[instrument(skip(state, user, query), fields(user_id = %user.id))]
pub async fn admin(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Query(query): Query<FlashQuery>,
) -> Result<AdminDashboardTemplate> {
    let requests = WebsiteRequestRepository::new(state.pool()).list_all().await?;

    Ok(AdminDashboardTemplate {
        shell: AppShell::new(&user, ADMIN_PATH),
        flash: Flash::from_query(&query),
        stats: status_cards(
            requests.iter().map(|r| r.status),
            &[
                WebsiteRequestStatus::Pending,
                WebsiteRequestStatus::Approved,
                WebsiteRequestStatus::Rejected,
                WebsiteRequestStatus::OnHold,
            ],
        ),
        requests: requests.iter().map(WebsiteRequestView::from).collect(),
    })
}

/// Record an admin decision on a website request.
#[instrument(skip(state, _admin, form))]
pub async fn update_request_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let repo = WebsiteRequestRepository::new(state.pool());
    decide(&repo, WebsiteRequestId::new(id), &form, ADMIN_PATH).await
}

async fn render_client(
    state: &AppState,
    user: &CurrentUser,
    flash: Option<Flash>,
    form: WebsiteRequestForm,
) -> Result<ClientDashboardTemplate> {
    let requests = WebsiteRequestRepository::new(state.pool())
        .list_for_client(user.id)
        .await?;

    Ok(ClientDashboardTemplate {
        shell: AppShell::new(user, CLIENT_PATH),
        flash,
        stats: status_cards(
            requests.iter().map(|r| r.status),
            &[
                WebsiteRequestStatus::Approved,
                WebsiteRequestStatus::Pending,
                WebsiteRequestStatus::Rejected,
            ],
        ),
        requests: requests.iter().map(WebsiteRequestView::from).collect(),
        form,
    })
}
