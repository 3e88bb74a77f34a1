//! Project assignment and status.

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
    Email, Money, ProjectId, ProjectStatus, RequiredText, StatusWorkflow, ValidationError,
};

use crate::db::ProjectRepository;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentUser, NewProject};
use crate::routes::decision::{StatusForm, decide};
use crate::routes::flash::{Flash, FlashQuery, redirect_error, redirect_success};
use crate::routes::views::{AppShell, ProjectView, SelectOption, StatCard, status_cards, status_select};
use crate::state::AppState;

const PROJECTS_PATH: &str = "/admin/projects";

/// New project form.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub status: String,
}

impl ProjectForm {
    /// Status picked in the form. Blank means `active`.
    fn chosen_status(&self) -> Option<ProjectStatus> {
        if self.status.trim().is_empty() {
            Some(ProjectStatus::default())
        } else {
            ProjectStatus::parse(&self.status)
        }
    }

    /// Validate into a new project.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> std::result::Result<NewProject, ValidationError> {
        Ok(NewProject {
            title: RequiredText::parse("Project title", &self.title, RequiredText::SHORT)?,
            description: RequiredText::parse("Description", &self.description, RequiredText::LONG)?,
            assigned_to: Email::parse(&self.assigned_to)
                .map_err(|e| ValidationError::email("Client email", e))?,
            budget: Money::parse(&self.budget).map_err(|e| ValidationError::money("Budget", e))?,
            status: self
                .chosen_status()
                .ok_or(ValidationError::InvalidChoice { field: "Status" })?,
        })
    }
}

/// Admin projects page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/projects.html")]
pub struct AdminProjectsTemplate {
    pub shell: AppShell,
    pub flash: Option<Flash>,
    pub stats: Vec<StatCard>,
    pub projects: Vec<ProjectView>,
    pub form: ProjectForm,
    pub status_options: Vec<SelectOption>,
}

/// Display every project and the create form.
#[instrument(skip(state, admin, query), fields(user_id = %admin.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<FlashQuery>,
) -> Result<AdminProjectsTemplate> {
    render(&state, &admin, Flash::from_query(&query), ProjectForm::default()).await
}

/// Create and assign a project.
#[instrument(skip(state, admin, form), fields(user_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<ProjectForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let flash = Flash::error("Error", e.to_string());
            let page = render(&state, &admin, Some(flash), form).await?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    match ProjectRepository::new(state.pool())
        .create(&input, &admin.email)
        .await
    {
        Ok(project) => {
            tracing::info!(project_id = %project.id, assigned_to = %project.assigned_to, "Project created");
            add_breadcrumb(
                "admin",
                "Project created",
                &[("project_id", &project.id.to_string())],
            );
            Ok(redirect_success(PROJECTS_PATH, "project_created").into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create project");
            Ok(redirect_error(PROJECTS_PATH, "failed").into_response())
        }
    }
}

/// Change a project's status.
#[instrument(skip(state, _admin, form))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let repo = ProjectRepository::new(state.pool());
    decide(&repo, ProjectId::new(id), &form, PROJECTS_PATH).await
}

async fn render(
    state: &AppState,
    admin: &CurrentUser,
    flash: Option<Flash>,
    form: ProjectForm,
) -> Result<AdminProjectsTemplate> {
    let projects = ProjectRepository::new(state.pool()).list_all().await?;
    let selected = form.chosen_status().unwrap_or_default();

    Ok(AdminProjectsTemplate {
        shell: AppShell::new(admin, PROJECTS_PATH),
        flash,
        stats: status_cards(projects.iter().map(|p| p.status), ProjectStatus::ALL),
        projects: projects.iter().map(ProjectView::from).collect(),
        form,
        status_options: status_select(selected),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use arpk_core::{EmailError, MoneyError};

    use super::*;

    fn form() -> ProjectForm {
        ProjectForm {
            title: "Bakery site".to_string(),
            description: "Five pages".to_string(),
            assigned_to: "Baker@Example.com".to_string(),
            budget: "2500".to_string(),
            status: "on-hold".to_string(),
        }
    }

    #[test]
    fn test_valid_project() {
        let input = form().validate().unwrap();
        assert_eq!(input.assigned_to.as_str(), "baker@example.com");
        assert_eq!(input.budget.display(), "$2,500.00");
        assert_eq!(input.status, ProjectStatus::OnHold);
    }

    #[test]
    fn test_blank_status_defaults_to_active() {
        let mut f = form();
        f.status = String::new();
        assert_eq!(f.validate().unwrap().status, ProjectStatus::Active);
    }

    #[test]
    fn test_invalid_fields() {
        let mut f = form();
        f.status = "archived".to_string();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::InvalidChoice { field: "Status" }
        );

        let mut f = form();
        f.assigned_to = "not-an-email".to_string();
        assert!(matches!(
            f.validate().unwrap_err(),
            ValidationError::Email {
                field: "Client email",
                ..
            }
        ));

        let mut f = form();
        f.assigned_to = String::new();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::email("Client email", EmailError::Empty)
        );

        let mut f = form();
        f.budget = "-1".to_string();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::money("Budget", MoneyError::Negative)
        );

        f.budget = "12,000,000,000".to_string();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::money("Budget", MoneyError::TooLarge)
        );
    }
}
