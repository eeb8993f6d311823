//! Gallery Routes
//!
//! - GET /gallery - Upload form and image grid
//! - POST /gallery - Multipart image upload (field `images`, repeated)
//! - POST /gallery/clear - Drop all uploaded images
//! - GET /gallery/images/:index - Raw bytes of one uploaded image

use axum::{
    body::Body,
    extract::{rejection::PathRejection, Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::render::{pages, Page};
use crate::session::GalleryImage;
use crate::web::error::{WebError, WebResult};
use crate::web::session::Visit;
use crate::web::state::AppState;

fn render(state: &AppState, visit: &Visit) -> Response {
    let body = pages::gallery(&visit.session.images);
    visit.render(state, Page::Gallery, Page::Gallery.path().to_string(), &body)
}

/// GET /gallery
pub async fn show(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let visit = Visit::begin(&state, &headers).await;
    render(&state, &visit)
}

/// POST /gallery
///
/// Replaces the gallery with the submitted images. Files with other
/// extensions are skipped; an upload with no images keeps the gallery.
/// Images past the session's count or byte allowance are dropped.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> WebResult<Response> {
    let mut visit = Visit::begin(&state, &headers).await;

    let mut images = Vec::new();
    let mut skipped = 0usize;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("images") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if file_name.is_empty() && bytes.is_empty() {
            continue;
        }
        match GalleryImage::from_upload(file_name, bytes.to_vec()) {
            Some(image) => images.push(image),
            None => skipped += 1,
        }
    }

    if !images.is_empty() {
        let accepted = images.len();
        let kept = state.sessions.set_images(visit.id(), images).await?;
        tracing::info!(
            session_id = %visit.id(),
            kept,
            skipped,
            over_limit = accepted - kept,
            "Images uploaded"
        );
    } else if skipped > 0 {
        tracing::debug!(session_id = %visit.id(), skipped, "No accepted images in upload");
    }

    visit.refresh(&state).await;
    Ok(render(&state, &visit))
}

/// POST /gallery/clear
pub async fn clear(State(state): State<Arc<AppState>>, headers: HeaderMap) -> WebResult<Response> {
    let visit = Visit::begin(&state, &headers).await;
    state.sessions.clear_images(visit.id()).await?;
    Ok(visit.finish(Redirect::to(Page::Gallery.path())))
}

/// GET /gallery/images/:index
pub async fn image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    index: Result<Path<usize>, PathRejection>,
) -> WebResult<Response> {
    let Path(index) = index?;
    let visit = Visit::begin(&state, &headers).await;
    let image = state
        .sessions
        .image(visit.id(), index)
        .await
        .ok_or_else(|| WebError::NotFound(format!("Image {}", index)))?;

    Ok(visit.finish(
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, image.content_type),
                (header::CACHE_CONTROL, "private, no-store"),
            ],
            Body::from(image.bytes.clone()),
        )
            .into_response(),
    ))
}
