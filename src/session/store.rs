//! Session Store
//!
//! Holds every live session in memory. Lookups and updates take the lock
//! briefly; rendering always works on a cloned [`Session`] snapshot.
//! Memory is bounded by `max_sessions * max_session_bytes` of uploads.

use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{GalleryImage, Session, SessionId, Theme, UploadedDataset};

/// Configuration for the session store
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum number of live sessions; the least recently seen is evicted
    pub max_sessions: usize,
    /// Maximum number of gallery images kept per session
    pub max_images: usize,
    /// Upload bytes (dataset plus images) one session may hold
    pub max_session_bytes: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: 1000,
            max_images: 60,
            max_session_bytes: 100 * 1024 * 1024,
        }
    }
}

/// `last_seen` is only rewritten when older than this
const TOUCH_INTERVAL_MS: i64 = 1000;

/// Session store errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    #[error("Session would hold {needed} bytes of uploads, the limit is {limit}")]
    QuotaExceeded { needed: usize, limit: usize },
}

/// In-memory map of sessions
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    config: SessionConfig,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Return a snapshot of the session for `id`, creating a fresh session
    /// when `id` is missing or unknown. The flag is `true` for new sessions.
    pub async fn resolve(&self, id: Option<SessionId>) -> (Session, bool) {
        if let Some(id) = id {
            if let Some(session) = self.lookup(id).await {
                return (session, false);
            }
        }

        let mut sessions = self.sessions.write().await;

        if sessions.len() >= self.config.max_sessions {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.last_seen)
                .map(|s| s.id);
            if let Some(oldest) = oldest {
                sessions.remove(&oldest);
                tracing::debug!(session_id = %oldest, "Evicted least recently seen session");
            }
        }

        let session = Session::new(Uuid::new_v4());
        sessions.insert(session.id, session.clone());
        tracing::debug!(session_id = %session.id, total = sessions.len(), "Created session");

        (session, true)
    }

    /// Snapshot of a known session under the read lock. The write lock is
    /// taken only when `last_seen` is due for a refresh.
    async fn lookup(&self, id: SessionId) -> Option<Session> {
        let now = Utc::now();
        let (mut session, stale) = {
            let sessions = self.sessions.read().await;
            let session = sessions.get(&id)?;
            let stale = now - session.last_seen >= Duration::milliseconds(TOUCH_INTERVAL_MS);
            (session.clone(), stale)
        };

        if stale {
            if let Some(live) = self.sessions.write().await.get_mut(&id) {
                live.last_seen = now;
                session.last_seen = now;
            }
        }
        Some(session)
    }

    /// Snapshot of an existing session
    pub async fn get(&self, id: SessionId) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Apply `f` to the session under the write lock
    pub async fn update<F, T>(&self, id: SessionId, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.last_seen = Utc::now();
        Ok(f(session))
    }

    /// Set the theme and return the resulting theme
    pub async fn set_theme(&self, id: SessionId, theme: Theme) -> Result<Theme, SessionError> {
        self.update(id, |session| {
            session.set_theme(theme);
            session.theme
        })
        .await
    }

    /// Replace the session's uploaded dataset. Fails when the dataset and
    /// the current gallery together exceed `max_session_bytes`.
    pub async fn set_dataset(
        &self,
        id: SessionId,
        dataset: UploadedDataset,
    ) -> Result<(), SessionError> {
        let limit = self.config.max_session_bytes;
        self.update(id, |session| {
            let needed = dataset.size_bytes + session.image_bytes();
            if needed > limit {
                return Err(SessionError::QuotaExceeded { needed, limit });
            }
            session.dataset = Some(Arc::new(dataset));
            Ok(())
        })
        .await?
    }

    /// Replace the gallery with `images`, keeping at most `max_images` and
    /// only as many as fit next to the dataset in `max_session_bytes`.
    /// Returns the number of images kept.
    pub async fn set_images(
        &self,
        id: SessionId,
        images: Vec<GalleryImage>,
    ) -> Result<usize, SessionError> {
        let max = self.config.max_images;
        let limit = self.config.max_session_bytes;
        self.update(id, |session| {
            let mut budget = limit.saturating_sub(session.dataset_bytes());
            session.images = images
                .into_iter()
                .take(max)
                .take_while(|image| {
                    let fits = image.bytes.len() <= budget;
                    budget = budget.saturating_sub(image.bytes.len());
                    fits
                })
                .map(Arc::new)
                .collect();
            session.images.len()
        })
        .await
    }

    pub async fn clear_images(&self, id: SessionId) -> Result<(), SessionError> {
        self.update(id, |session| session.images.clear()).await
    }

    /// One gallery image by position
    pub async fn image(&self, id: SessionId, index: usize) -> Option<Arc<GalleryImage>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .and_then(|s| s.images.get(index).cloned())
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
