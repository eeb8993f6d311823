//! Dashboard Web Server
//!
//! HTTP layer for the dashboard, built with Axum. Every request renders a
//! complete page for the caller's session.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /`, `GET /overview` - Overview
//! - `GET /analytics?days=&tab=` - Analytics
//! - `GET /data`, `POST /data` - CSV upload, preview and profile
//! - `GET /data/clean.csv` - Cleaned CSV download
//! - `GET /gallery`, `POST /gallery` - Image grid and upload
//! - `POST /gallery/clear` - Remove uploaded images
//! - `GET /gallery/images/:index` - One uploaded image
//! - `GET /contact`, `POST /contact` - Contact form and echo
//! - `GET /page/:name` - Redirect to a page by name
//!
//! ## Header actions
//! - `POST /theme` - Switch theme
//! - `GET /download/sample.csv` - Sample CSV
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Status

pub mod error;
pub mod routes;
pub mod session;
pub mod state;

pub use error::{WebError, WebResult};
pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.server.max_upload_bytes;

    let page_routes = Router::new()
        .route("/", get(routes::pages::overview))
        .route("/overview", get(routes::pages::overview))
        .route("/analytics", get(routes::pages::analytics))
        .route("/page/:name", get(routes::pages::page_by_name))
        .route("/data", get(routes::data::show).post(routes::data::upload))
        .route("/data/clean.csv", get(routes::data::download_clean))
        .route(
            "/gallery",
            get(routes::gallery::show).post(routes::gallery::upload),
        )
        .route("/gallery/clear", post(routes::gallery::clear))
        .route("/gallery/images/:index", get(routes::gallery::image))
        .route(
            "/contact",
            get(routes::contact::show).post(routes::contact::submit),
        )
        .route("/theme", post(routes::theme::set_theme))
        .route("/download/sample.csv", get(routes::download::sample))
        .layer(DefaultBodyLimit::max(upload_limit));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .merge(page_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the server
pub async fn serve(state: AppState) -> Result<(), WebError> {
    let addr = state.config.bind_addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Hi-Fi Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Hi-Fi Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
