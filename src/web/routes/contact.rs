//! Contact Routes
//!
//! - GET /contact - Contact form
//! - POST /contact - Echo the submitted form as JSON

use axum::{
    extract::{rejection::FormRejection, State},
    http::HeaderMap,
    response::Response,
    Form,
};
use chrono::Local;
use std::sync::Arc;

use crate::contact::{ContactForm, ContactSubmission};
use crate::render::{pages, Page};
use crate::web::error::WebResult;
use crate::web::session::Visit;
use crate::web::state::AppState;

/// GET /contact
pub async fn show(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let visit = Visit::begin(&state, &headers).await;
    let body = pages::contact(None);
    visit.render(&state, Page::Contact, Page::Contact.path().to_string(), &body)
}

/// POST /contact
///
/// Nothing is sent anywhere; the submission is only echoed back.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    form: Result<Form<ContactForm>, FormRejection>,
) -> WebResult<Response> {
    let Form(form) = form?;
    let visit = Visit::begin(&state, &headers).await;
    let submission = ContactSubmission::from_form(form, Local::now());
    tracing::info!(
        session_id = %visit.id(),
        topic = %submission.topic,
        priority = submission.priority,
        "Contact form submitted"
    );

    let body = pages::contact(Some(&submission));
    Ok(visit.render(&state, Page::Contact, Page::Contact.path().to_string(), &body))
}
