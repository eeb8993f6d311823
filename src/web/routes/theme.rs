//! Theme Route
//!
//! - POST /theme - Set the session theme and return to the calling page

use axum::{
    extract::{rejection::FormRejection, State},
    http::HeaderMap,
    response::{Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::session::Theme;
use crate::web::error::{WebError, WebResult};
use crate::web::session::Visit;
use crate::web::state::AppState;

/// Form posted by the header toggle
#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub mode: String,
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Only same-site absolute paths are followed
pub fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}

/// POST /theme
///
/// The form carries the target mode rather than a flip request, so a
/// repeated submit of the same form leaves the theme unchanged.
pub async fn set_theme(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<ThemeForm>, FormRejection>,
) -> WebResult<Response> {
    let Form(form) = form?;
    let visit = Visit::begin(&state, &headers).await;
    let theme: Theme = form.mode.parse().map_err(WebError::BadRequest)?;

    let theme = state.sessions.set_theme(visit.id(), theme).await?;
    tracing::debug!(session_id = %visit.id(), theme = %theme, "Theme changed");

    let target = safe_return_path(form.return_to.as_deref());
    Ok(visit.finish(Redirect::to(target)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path(Some("/analytics?days=14")), "/analytics?days=14");
        assert_eq!(safe_return_path(Some("https://evil.example")), "/");
        assert_eq!(safe_return_path(Some("//evil.example")), "/");
        assert_eq!(safe_return_path(None), "/");
    }
}
