//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash of `main.css`, computed at build time.
///
/// Usage in templates: `<link href="/static/css/main.css?v={{ ""|css_hash }}">`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Upper-cased first character, for avatar circles.
///
/// Usage in templates: `{{ user_email|initial }}`
#[askama::filter_fn]
pub fn initial(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(first_initial(&value.to_string()))
}

fn first_initial(value: &str) -> String {
    value
        .trim()
        .chars()
        .next()
        .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_initial() {
        assert_eq!(first_initial("jane@example.com"), "J");
        assert_eq!(first_initial("  émile"), "É");
        assert_eq!(first_initial(""), "?");
    }
}
