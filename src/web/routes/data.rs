//! Data Routes
//!
//! - GET /data - Upload form, or the current upload's preview and profile
//! - POST /data - Multipart CSV upload (field `file`)
//! - GET /data/clean.csv - Cleaned copy of the current upload

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    response::Response,
};
use chrono::Utc;
use std::sync::Arc;

use super::download::csv_attachment;
use crate::data::DataTable;
use crate::render::{pages, Page};
use crate::session::{is_csv_file, UploadedDataset};
use crate::web::error::{WebError, WebResult};
use crate::web::session::Visit;
use crate::web::state::AppState;

fn render(state: &AppState, visit: &Visit) -> Response {
    let body = pages::data(
        visit.session.dataset.as_deref(),
        state.config.dashboard.preview_rows,
    );
    visit.render(state, Page::Data, Page::Data.path().to_string(), &body)
}

/// GET /data
pub async fn show(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let visit = Visit::begin(&state, &headers).await;
    render(&state, &visit)
}

/// POST /data
///
/// Submitting without choosing a file keeps the previous upload.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> WebResult<Response> {
    let mut visit = Visit::begin(&state, &headers).await;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if file_name.is_empty() && bytes.is_empty() {
            continue;
        }
        if !is_csv_file(&file_name) {
            return Err(WebError::Upload(format!(
                "{} is not a .csv file",
                file_name
            )));
        }

        let table = DataTable::from_bytes(&bytes).map_err(WebError::InvalidCsv)?;
        tracing::info!(
            session_id = %visit.id(),
            file = %file_name,
            rows = table.row_count(),
            columns = table.column_count(),
            "CSV uploaded"
        );

        state
            .sessions
            .set_dataset(
                visit.id(),
                UploadedDataset {
                    file_name,
                    size_bytes: bytes.len(),
                    table,
                    uploaded_at: Utc::now(),
                },
            )
            .await?;
        break;
    }

    visit.refresh(&state).await;
    Ok(render(&state, &visit))
}

/// GET /data/clean.csv
pub async fn download_clean(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> WebResult<Response> {
    let visit = Visit::begin(&state, &headers).await;
    let dataset = visit
        .session
        .dataset
        .as_ref()
        .ok_or_else(|| WebError::NotFound("No file uploaded yet".to_string()))?;

    let report = dataset.table.clean();
    tracing::debug!(
        session_id = %visit.id(),
        rows_before = report.rows_before,
        rows_after = report.rows_after,
        "Serving cleaned CSV"
    );
    let body = report.table.to_csv_string()?;

    Ok(visit.finish(csv_attachment("clean_data.csv", body)))
}
