//! Overview and Analytics Routes
//!
//! - GET / - Overview
//! - GET /overview - Overview
//! - GET /analytics?days=&tab= - Analytics
//! - GET /page/:name - Redirect to a page by name

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;

use crate::data::{clamp_window, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS, MIN_WINDOW_DAYS};
use crate::render::{pages, Page};
use crate::web::error::{WebError, WebResult};
use crate::web::session::Visit;
use crate::web::state::AppState;

/// GET /overview
pub async fn overview(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let visit = Visit::begin(&state, &headers).await;
    let body = pages::overview(&state.traffic(), Local::now());
    visit.render(&state, Page::Overview, Page::Overview.path().to_string(), &body)
}

/// Query parameters of the Analytics page
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsParams {
    pub days: Option<String>,
    pub tab: Option<pages::AnalyticsTab>,
}

/// Window from the raw `days` value. Any integer is accepted and clamped,
/// including negative or overflowing ones; blank means the default.
pub fn parse_days(raw: Option<&str>) -> WebResult<usize> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Ok(DEFAULT_WINDOW_DAYS);
    }

    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WebError::BadRequest(format!("days must be a whole number, got {:?}", raw)));
    }

    if negative {
        return Ok(MIN_WINDOW_DAYS);
    }
    Ok(digits
        .parse::<usize>()
        .map(clamp_window)
        .unwrap_or(MAX_WINDOW_DAYS))
}

/// GET /analytics
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    params: Result<Query<AnalyticsParams>, QueryRejection>,
) -> WebResult<Response> {
    let Query(params) = params?;
    let days = parse_days(params.days.as_deref())?;
    let tab = params.tab.unwrap_or_default();

    let visit = Visit::begin(&state, &headers).await;
    let body = pages::analytics(&state.traffic(), days, tab);
    let return_to = format!("/analytics?days={}&tab={}", days, tab.as_str());
    Ok(visit.render(&state, Page::Analytics, return_to, &body))
}

/// GET /page/:name
pub async fn page_by_name(Path(name): Path<String>) -> WebResult<Response> {
    let page: Page = name.parse().map_err(WebError::NotFound)?;
    Ok(Redirect::to(page.path()).into_response())
}
