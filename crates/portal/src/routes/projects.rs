//! Client view of assigned projects.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tracing::instrument;

use arpk_core::ProjectStatus;

use super::flash::{Flash, FlashQuery};
use super::views::{AppShell, ProjectView, StatCard, status_cards};
use crate::db::ProjectRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireClient;
use crate::state::AppState;

/// Client projects page template.
#[derive(Template, WebTemplate)]
#[template(path = "projects/client.html")]
pub struct ClientProjectsTemplate {
    pub shell: AppShell,
    pub flash: Option<Flash>,
    pub stats: Vec<StatCard>,
    pub projects: Vec<ProjectView>,
}

/// Projects assigned to the signed-in client's email.
#[instrument(skip(state, user, query), fields(user_id = %user.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireClient(user): RequireClient,
    Query(query): Query<FlashQuery>,
) -> Result<ClientProjectsTemplate> {
    let projects = ProjectRepository::new(state.pool())
        .list_for_assignee(&user.email)
        .await?;

    Ok(ClientProjectsTemplate {
        shell: AppShell::new(&user, "/projects"),
        flash: Flash::from_query(&query),
        stats: status_cards(
            projects.iter().map(|p| p.status),
            &[ProjectStatus::Active, ProjectStatus::Completed],
        ),
        projects: projects.iter().map(ProjectView::from).collect(),
    })
}
