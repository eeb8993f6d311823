//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use chrono::Local;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::data::{TrafficGenerator, TrafficSeries};
use crate::session::{SessionConfig, SessionStore};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-browser sessions
    pub sessions: Arc<SessionStore>,
    pub config: Arc<Config>,
    /// Seeded source of the traffic series
    pub generator: TrafficGenerator,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let sessions = SessionStore::new(SessionConfig {
            max_sessions: config.server.max_sessions,
            max_session_bytes: config.server.max_session_bytes,
            ..SessionConfig::default()
        });
        let generator =
            TrafficGenerator::new(config.dashboard.seed).with_days(config.dashboard.history_days);

        Self {
            sessions: Arc::new(sessions),
            config: Arc::new(config),
            generator,
            start_time: Instant::now(),
        }
    }

    /// Traffic history ending today. Deterministic for a given seed and day.
    pub fn traffic(&self) -> TrafficSeries {
        self.generator.generate(Local::now().date_naive())
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
