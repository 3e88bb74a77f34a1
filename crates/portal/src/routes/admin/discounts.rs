//! Discount code management.

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use arpk_core::{
    DiscountId, DiscountKind, DiscountRuleError, RequiredText, ValidationError,
    discount::{normalize_code, parse_expiry_date, parse_max_usage, resolve_audience},
};

use crate::db::{DiscountRepository, RepositoryError};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentUser, Discount, NewDiscount};
use crate::routes::flash::{Flash, FlashQuery, redirect_error, redirect_success};
use crate::routes::views::{AppShell, DiscountView, StatCard};
use crate::state::AppState;

const DISCOUNTS_PATH: &str = "/admin/discounts";

/// New discount form.
///
/// `is_public` is a checkbox: present when ticked, absent otherwise.
#[derive(Debug, Deserialize)]
pub struct DiscountForm {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub max_usage: String,
    #[serde(default)]
    pub expiry_date: String,
    pub is_public: Option<String>,
    #[serde(default)]
    pub specific_user: String,
}

impl Default for DiscountForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            description: String::new(),
            kind: DiscountKind::Percentage.as_str().to_string(),
            value: String::new(),
            max_usage: String::new(),
            expiry_date: String::new(),
            is_public: Some("on".to_string()),
            specific_user: String::new(),
        }
    }
}

impl DiscountForm {
    #[must_use]
    pub const fn is_public(&self) -> bool {
        self.is_public.is_some()
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        DiscountKind::from_str(&self.kind) == Ok(DiscountKind::Fixed)
    }

    /// Validate into a new discount.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> std::result::Result<NewDiscount, ValidationError> {
        let code = normalize_code(&self.code)?;
        let description = RequiredText::parse("Description", &self.description, RequiredText::LONG)?;
        let kind = DiscountKind::from_str(&self.kind)
            .map_err(|_| ValidationError::InvalidChoice { field: "Discount type" })?;
        let value = Decimal::from_str(self.value.trim())
            .map_err(|_| DiscountRuleError::ValueNotANumber)?;
        let value = kind.validate_value(value)?;

        let specific_user = Some(self.specific_user.as_str()).filter(|s| !s.trim().is_empty());
        let specific_user = resolve_audience(self.is_public(), specific_user)?;

        Ok(NewDiscount {
            code,
            description,
            kind,
            value,
            is_public: self.is_public(),
            specific_user,
            expiry_date: parse_expiry_date(&self.expiry_date)?,
            max_usage: parse_max_usage(&self.max_usage)?,
        })
    }
}

/// Discounts page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/discounts.html")]
pub struct AdminDiscountsTemplate {
    pub shell: AppShell,
    pub flash: Option<Flash>,
    pub stats: Vec<StatCard>,
    pub discounts: Vec<DiscountView>,
    pub form: DiscountForm,
}

/// Total, active, public, and private counts.
fn discount_stats(discounts: &[Discount]) -> Vec<StatCard> {
    let active = discounts.iter().filter(|d| d.is_active).count();
    let public = discounts.iter().filter(|d| d.is_public).count();

    vec![
        StatCard::count("Total Discounts", discounts.len()),
        StatCard::count("Active", active),
        StatCard::count("Public", public),
        StatCard::count("Private", discounts.len() - public),
    ]
}

/// Display every discount and the create form.
#[instrument(skip(state, admin, query), fields(user_id = %admin.id))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<FlashQuery>,
) -> Result<AdminDiscountsTemplate> {
    render(&state, &admin, Flash::from_query(&query), DiscountForm::default()).await
}

/// Create a discount code.
#[instrument(skip(state, admin, form), fields(user_id = %admin.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Form(form): Form<DiscountForm>,
) -> Result<Response> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let flash = Flash::error("Error", e.to_string());
            let page = render(&state, &admin, Some(flash), form).await?;
            return Ok((StatusCode::BAD_REQUEST, page).into_response());
        }
    };

    match DiscountRepository::new(state.pool())
        .create(&input, &admin.email)
        .await
    {
        Ok(discount) => {
            tracing::info!(discount_id = %discount.id, code = %discount.code, "Discount created");
            add_breadcrumb("admin", "Discount created", &[("code", &discount.code)]);
            Ok(redirect_success(DISCOUNTS_PATH, "discount_created").into_response())
        }
        Err(RepositoryError::Conflict(_)) => {
            let flash = Flash::error("Error", format!("Discount code {} already exists", input.code));
            let page = render(&state, &admin, Some(flash), form).await?;
            Ok((StatusCode::CONFLICT, page).into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create discount");
            Ok(redirect_error(DISCOUNTS_PATH, "failed").into_response())
        }
    }
}

/// Flip a discount between active and inactive.
#[instrument(skip(state, _admin))]
pub async fn toggle(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Redirect {
    match DiscountRepository::new(state.pool())
        .toggle_active(DiscountId::new(id))
        .await
    {
        Ok(true) => {
            tracing::info!(discount_id = id, "Discount activated");
            redirect_success(DISCOUNTS_PATH, "discount_activated")
        }
        Ok(false) => {
            tracing::info!(discount_id = id, "Discount deactivated");
            redirect_success(DISCOUNTS_PATH, "discount_deactivated")
        }
        Err(RepositoryError::NotFound) => redirect_error(DISCOUNTS_PATH, "not_found"),
        Err(e) => {
            tracing::error!(error = %e, discount_id = id, "Failed to toggle discount");
            redirect_error(DISCOUNTS_PATH, "update_failed")
        }
    }
}

async fn render(
    state: &AppState,
    admin: &CurrentUser,
    flash: Option<Flash>,
    form: DiscountForm,
) -> Result<AdminDiscountsTemplate> {
    let discounts = DiscountRepository::new(state.pool()).list_all().await?;
    let now = Utc::now();

    Ok(AdminDiscountsTemplate {
        shell: AppShell::new(admin, DISCOUNTS_PATH),
        flash,
        stats: discount_stats(&discounts),
        discounts: discounts.iter().map(|d| DiscountView::at(d, now)).collect(),
        form,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    fn form() -> DiscountForm {
        DiscountForm {
            code: " save20 ".to_string(),
            description: "Spring sale".to_string(),
            kind: "percentage".to_string(),
            value: "20".to_string(),
            ..DiscountForm::default()
        }
    }

    #[test]
    fn test_code_is_upper_cased_and_public_by_default() {
        let input = form().validate().unwrap();
        assert_eq!(input.code, "SAVE20");
        assert!(input.is_public);
        assert_eq!(input.specific_user, None);
        assert_eq!(input.max_usage, None);
        assert_eq!(input.expiry_date, None);
    }

    #[test]
    fn test_value_rules() {
        let mut f = form();
        f.value = "0".to_string();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::Discount(DiscountRuleError::NonPositiveValue)
        );

        f.value = "150".to_string();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::Discount(DiscountRuleError::PercentageTooLarge)
        );

        f.kind = "fixed".to_string();
        assert_eq!(f.validate().unwrap().value, Decimal::new(150, 0));

        f.value = "10000000000".to_string();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::Discount(DiscountRuleError::ValueTooLarge)
        );

        f.value = "lots".to_string();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::Discount(DiscountRuleError::ValueNotANumber)
        );
    }

    #[test]
    fn test_private_discount_needs_user() {
        let mut f = form();
        f.is_public = None;
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::Discount(DiscountRuleError::MissingSpecificUser)
        );

        f.specific_user = "VIP@Example.com".to_string();
        let input = f.validate().unwrap();
        assert!(!input.is_public);
        assert_eq!(input.specific_user.unwrap().as_str(), "vip@example.com");
    }

    #[test]
    fn test_public_discount_ignores_user() {
        let mut f = form();
        f.specific_user = "vip@example.com".to_string();
        assert_eq!(f.validate().unwrap().specific_user, None);
    }

    #[test]
    fn test_limits_and_expiry() {
        let mut f = form();
        f.max_usage = "0".to_string();
        f.expiry_date = "2026-12-31".to_string();
        let input = f.validate().unwrap();
        assert_eq!(input.max_usage, None);
        let expiry = input.expiry_date.unwrap();
        assert_eq!((expiry.year(), expiry.month(), expiry.day()), (2026, 12, 31));
        assert_eq!(expiry.hour(), 23);

        f.max_usage = "25".to_string();
        assert_eq!(f.validate().unwrap().max_usage, Some(25));

        f.expiry_date = "31/12/2026".to_string();
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_unknown_kind() {
        let mut f = form();
        f.kind = "bogo".to_string();
        assert_eq!(
            f.validate().unwrap_err(),
            ValidationError::InvalidChoice {
                field: "Discount type"
            }
        );
    }
}
