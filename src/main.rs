//! Hi-Fi Dashboard Server
//!
//! Run with: cargo run --bin hifi-dashboard
//!
//! # Configuration
//!
//! Without `--config`, the config file is searched in the user config
//! directory, `/etc/hifi-dashboard/` and the working directory.
//! Environment variables:
//! - `HIFI_HOST`, `HIFI_PORT`: Address to bind to (default: 127.0.0.1:8501)
//! - `HIFI_SEED`: Seed of the synthetic traffic series (default: 7)
//! - `HIFI_MAX_UPLOAD_BYTES`: Upload size limit
//! - `HIFI_MAX_SESSION_BYTES`: Upload bytes one session may hold
//! - `HIFI_LOG_LEVEL`, `HIFI_LOG_FORMAT`: Logging (`pretty` or `json`)
//! - `RUST_LOG`: Log filter, overrides `HIFI_LOG_LEVEL`

use anyhow::Context;
use clap::Parser;
use hifi_dashboard::{serve, AppState, Config, ConfigLoad, LoggingConfig};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Parser)]
#[command(name = "hifi-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Themeable multi-page web dashboard")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let load = match &args.config {
        Some(path) => ConfigLoad {
            config: Config::load_with_env(path)?,
            source: Some(path.clone()),
            skipped: Vec::new(),
        },
        None => Config::load_default(),
    };
    let mut config = load.config.clone();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging)?;
    load.log();

    tracing::info!("Starting Hi-Fi Dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        seed = config.dashboard.seed,
        history_days = config.dashboard.history_days,
        max_sessions = config.server.max_sessions,
        max_upload_bytes = config.server.max_upload_bytes,
        max_session_bytes = config.server.max_session_bytes,
        "Dashboard configured"
    );

    serve(AppState::new(config)).await?;
    Ok(())
}

/// Install the global subscriber described by the `[logging]` section
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("hifi_dashboard={},tower_http=debug", logging.level).into()
    });

    let writer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(logging.file.is_none());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer).init();
    }

    Ok(())
}
