//! Marketing landing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use arpk_core::dashboard_path;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::state::AppState;

/// A headline technology in the hero panel.
#[derive(Clone)]
pub struct TechHighlight {
    pub name: &'static str,
    pub area: &'static str,
}

/// A selling point in the features grid.
#[derive(Clone)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

const TECH: &[TechHighlight] = &[
    TechHighlight {
        name: "React",
        area: "Frontend",
    },
    TechHighlight {
        name: "Node.js",
        area: "Backend",
    },
    TechHighlight {
        name: "Next.js",
        area: "Full-stack",
    },
    TechHighlight {
        name: "AWS",
        area: "Cloud",
    },
];

const BRANDS: &[&str] = &[
    "TechCorp",
    "InnovateX",
    "StartupHub",
    "DigitalPro",
    "WebSolutions",
    "CloudTech",
];

const FEATURES: &[Feature] = &[
    Feature {
        title: "Custom Design",
        description: "Every site is designed around your brand, not a template.",
    },
    Feature {
        title: "Fast by Default",
        description: "Optimized assets and lean pages that load in a blink.",
    },
    Feature {
        title: "Mobile First",
        description: "Layouts that work on every screen size from day one.",
    },
    Feature {
        title: "SEO Ready",
        description: "Clean markup and metadata so customers can find you.",
    },
    Feature {
        title: "Secure Hosting",
        description: "HTTPS, backups and monitoring handled for you.",
    },
    Feature {
        title: "Ongoing Support",
        description: "We stay on after launch for updates and maintenance.",
    },
];

const FOOTER_SERVICES: &[&str] = &["Web Development", "UI/UX Design", "E-commerce", "Maintenance"];

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub tech: &'static [TechHighlight],
    pub brands: &'static [&'static str],
    pub features: &'static [Feature],
    pub services: &'static [&'static str],
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_phone_href: String,
    /// Where "Start Your Project" leads: the dashboard when signed in.
    pub start_href: &'static str,
    pub signed_in: bool,
}

/// Display the landing page.
#[instrument(skip(state, user))]
pub async fn home(State(state): State<AppState>, OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    let contact = &state.config().contact;
    let start_href = user
        .as_ref()
        .map_or("/register", |u| dashboard_path(u.role));

    HomeTemplate {
        tech: TECH,
        brands: BRANDS,
        features: FEATURES,
        services: FOOTER_SERVICES,
        contact_email: contact.email.clone(),
        contact_phone: contact.phone.clone(),
        contact_phone_href: contact.phone_href(),
        start_href,
        signed_in: user.is_some(),
    }
}
