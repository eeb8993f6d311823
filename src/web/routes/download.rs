//! Download Routes
//!
//! - GET /download/sample.csv - Freshly generated sample CSV

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Local;
use std::sync::Arc;

use crate::data::sample_csv;
use crate::web::error::WebResult;
use crate::web::session::Visit;
use crate::web::state::AppState;

/// CSV body served as a file download
pub fn csv_attachment(file_name: &str, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        Body::from(body),
    )
        .into_response()
}

/// GET /download/sample.csv
///
/// New random values on every download.
pub async fn sample(State(state): State<Arc<AppState>>, headers: HeaderMap) -> WebResult<Response> {
    let visit = Visit::begin(&state, &headers).await;
    let body = sample_csv(
        &mut rand::thread_rng(),
        Local::now().date_naive(),
        state.config.dashboard.sample_rows,
    )?;
    Ok(visit.finish(csv_attachment("sample_data.csv", body)))
}
