//! Review Dashboard Server
//!
//! Run with: cargo run --bin review-dashboard
//!
//! Polls the review API and serves the live dashboard. Settings come from
//! the config file (see `review-dashboard-cli config`), `REVIEW_DASHBOARD_*`
//! environment variables and the flags below, in increasing precedence.

use anyhow::Context;
use clap::Parser;
use review_dashboard::logging::init_tracing;
use review_dashboard::{serve, AppState, Config, DashboardClient, DashboardController};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "review-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live dashboard for the code-review assistant")]
struct Args {
    /// Config file (default: standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Review API origin
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }

    init_tracing(&config.logging);
    tracing::info!("Starting review dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Review API: {}", config.api.base_url);

    let client = DashboardClient::new(config.client_config()).context("failed to build HTTP client")?;
    let controller = Arc::new(DashboardController::new(
        Arc::new(client),
        config.dashboard_settings(),
    ));

    let polling = controller.start()?;

    let state = AppState::new(Arc::clone(&controller), config.server.clone());
    serve(state).await?;

    polling.abort();
    tracing::info!("Review dashboard stopped");

    Ok(())
}
