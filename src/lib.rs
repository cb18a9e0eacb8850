//! # Review Dashboard
//!
//! Live dashboard for an automated code-review assistant. Polls the
//! assistant's read-only dashboard API, keeps an in-memory page up to date
//! and serves it over HTTP.
//!
//! ## Modules
//!
//! - [`model`]: Wire types returned by the review API
//! - [`format`]: Duration, timestamp and HTML formatting
//! - [`chart`]: Chart.js configuration and per-canvas chart ownership
//! - [`page`]: The host document renderers write into
//! - [`render`]: Statistics, review list, repository table and review detail
//!   renderers
//! - [`client`]: HTTP client for the review API
//! - [`controller`]: Polling lifecycle and the per-viewer detail modal
//! - [`server`]: Axum server for the rendered page
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use review_dashboard::{
//!     AppState, Config, DashboardClient, DashboardController,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!
//!     let client = DashboardClient::new(config.client_config())?;
//!     let controller = Arc::new(DashboardController::new(
//!         Arc::new(client),
//!         config.dashboard_settings(),
//!     ));
//!
//!     // First refresh runs immediately, then every poll interval
//!     let polling = controller.start()?;
//!
//!     review_dashboard::serve(AppState::new(controller, config.server.clone())).await?;
//!     polling.abort();
//!
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod client;
pub mod config;
pub mod controller;
pub mod format;
pub mod logging;
pub mod model;
pub mod page;
pub mod render;
pub mod server;

// Re-export top-level types for convenience
pub use model::{
    CategoryDistribution, Comment, DashboardStatistics, OverallStats, RecentActivity,
    RepositoryStatistics, ReviewDetail, ReviewSummary, Severity, SeverityCounts, TrendData,
};

pub use client::{ClientConfig, DashboardApi, DashboardClient, FetchError};

pub use controller::{
    ControllerError, DashboardController, DashboardSettings, HealthReport, LifecycleState,
    PointerTarget, RefreshOutcome, ReviewModal,
};

pub use format::Locale;

pub use page::{ModalState, Page, PageSnapshot, PageSurface};

pub use server::{build_router, serve, AppState, ServerError};

pub use config::{generate_default_config, Config, ConfigError, LoggingConfig};
