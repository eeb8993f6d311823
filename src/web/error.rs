//! Web Error Types
//!
//! Errors raised by the page handlers and their conversion to an HTML
//! error card with the matching status code.

use axum::{
    extract::rejection::{FormRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::data::DataError;
use crate::render::{pages, theme::STYLESHEET};
use crate::session::SessionError;

/// Web error types
#[derive(Error, Debug)]
pub enum WebError {
    /// Malformed form input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown page, image or download
    #[error("Not found: {0}")]
    NotFound(String),

    /// The uploaded CSV could not be read
    #[error("Could not read the uploaded CSV: {0}")]
    InvalidCsv(DataError),

    /// Building or serializing a table on the server failed
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Rejected or unreadable upload
    #[error("Upload error: {0}")]
    Upload(String),

    /// Upload does not fit in the session's byte allowance
    #[error("Upload too large: {0}")]
    TooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SessionError> for WebError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::QuotaExceeded { .. } => WebError::TooLarge(err.to_string()),
            SessionError::NotFound(_) => WebError::Internal(err.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for WebError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        WebError::Upload(err.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(err: QueryRejection) -> Self {
        WebError::BadRequest(err.body_text())
    }
}

impl From<FormRejection> for WebError {
    fn from(err: FormRejection) -> Self {
        WebError::BadRequest(err.body_text())
    }
}

impl From<PathRejection> for WebError {
    fn from(err: PathRejection) -> Self {
        WebError::BadRequest(err.body_text())
    }
}

impl WebError {
    /// Status code and log code for this error
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            WebError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            WebError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            WebError::InvalidCsv(DataError::Io(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR")
            }
            WebError::InvalidCsv(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_CSV"),
            WebError::Data(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATA_ERROR"),
            WebError::Upload(_) => (StatusCode::BAD_REQUEST, "UPLOAD_ERROR"),
            WebError::TooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "SESSION_QUOTA"),
            WebError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            WebError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request failed"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = pages::error(status.as_u16(), &self.to_string(), &request_id);
        let html = format!(
            r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>Error {}</title><style>{}</style></head><body><div class="app"><main class="main">{}</main></div></body></html>"#,
            status.as_u16(),
            STYLESHEET,
            body
        );

        (status, Html(html)).into_response()
    }
}

/// Result type for web handlers
pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            WebError::BadRequest("x".into()).status().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::NotFound("x".into()).status().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WebError::InvalidCsv(DataError::EmptyInput).status().0,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            WebError::from(SessionError::QuotaExceeded { needed: 2, limit: 1 }).status().0,
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            WebError::Internal("x".into()).status().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_server_side_data_errors_are_not_blamed_on_uploads() {
        let err: WebError = DataError::EmptyInput.into();
        assert_eq!(err.status().0, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("uploaded CSV"));

        let err = WebError::InvalidCsv(DataError::EmptyInput);
        assert!(err.to_string().starts_with("Could not read the uploaded CSV"));
    }

    #[test]
    fn test_error_response_is_html() {
        let response = WebError::NotFound("Unknown page: settings".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}
