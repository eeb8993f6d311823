//! # Hi-Fi Dashboard
//!
//! A themeable multi-page web dashboard served as a single binary. Every
//! request re-renders the whole page on the server for the caller's session.
//!
//! ## Features
//!
//! - **Overview**: KPI tiles, a traffic snapshot chart and an activity feed
//! - **Analytics**: windowed trends and distributions of synthetic traffic
//! - **Data**: CSV upload with preview, profile and a cleaned download
//! - **Gallery**: multi-image upload shown in a three-column grid
//! - **Contact**: a form that echoes the submission back as JSON
//! - **Themes**: per-session light/dark toggle
//!
//! ## Modules
//!
//! - [`data`]: synthetic traffic series and CSV profiling/cleaning
//! - [`session`]: per-browser state and the session store
//! - [`contact`]: contact form model
//! - [`render`]: HTML and SVG rendering
//! - [`web`]: Axum server and route handlers
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hifi_dashboard::{serve, AppState, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default().config;
//!     serve(AppState::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod contact;
pub mod data;
pub mod render;
pub mod session;
pub mod web;

// Re-export top-level types for convenience
pub use config::{generate_default_config, Config, ConfigError, ConfigLoad, LoggingConfig};

pub use contact::{ContactForm, ContactSubmission, Topic};

pub use data::{
    CleanReport, DataError, DataResult, DataTable, TableProfile, TrafficGenerator, TrafficRow,
    TrafficSeries, TrafficSummary,
};

pub use render::Page;

pub use session::{Session, SessionError, SessionStore, Theme};

pub use web::{build_router, serve, AppState, WebError, WebResult};
