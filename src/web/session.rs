//! Session cookie handling
//!
//! Every handler starts a [`Visit`]: the session named by the
//! `hifi_session` cookie, or a fresh one. Responses for fresh sessions
//! carry the `Set-Cookie` header.

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use uuid::Uuid;

use super::state::AppState;
use crate::render::{render_document, Page, PageContext};
use crate::session::{Session, SessionId};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "hifi_session";

/// Session id from the request's `Cookie` headers
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// `Set-Cookie` value for a session
pub fn session_cookie(id: SessionId) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}

/// One request's view of its session
pub struct Visit {
    pub session: Session,
    created: bool,
}

impl Visit {
    pub async fn begin(state: &AppState, headers: &HeaderMap) -> Self {
        let (session, created) = state
            .sessions
            .resolve(session_id_from_headers(headers))
            .await;
        Self { session, created }
    }

    pub fn id(&self) -> SessionId {
        self.session.id
    }

    /// Re-read the snapshot after an update
    pub async fn refresh(&mut self, state: &AppState) {
        if let Some(session) = state.sessions.get(self.session.id).await {
            self.session = session;
        }
    }

    /// Attach the session cookie if this visit created the session
    pub fn finish(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.created {
            if let Ok(value) = HeaderValue::from_str(&session_cookie(self.session.id)) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
        }
        response
    }

    /// Wrap a page body in the full document for this session
    pub fn render(&self, state: &AppState, page: Page, return_to: String, body: &str) -> Response {
        let ctx = PageContext {
            page,
            theme: self.session.theme,
            notifications: &self.session.notifications,
            site_title: &state.config.dashboard.title,
            banner_url: &state.config.dashboard.banner_url,
            return_to,
        };
        self.finish(Html(render_document(&ctx, body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_parsing() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("other=1; {}={}", SESSION_COOKIE, id)).unwrap(),
        );
        assert_eq!(session_id_from_headers(&headers), Some(id));
    }

    #[test]
    fn test_cookie_parsing_rejects_garbage() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("hifi_session=not-a-uuid"),
        );
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let id = Uuid::new_v4();
        let cookie = session_cookie(id);
        assert!(cookie.starts_with(&format!("hifi_session={};", id)));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
    }
}
