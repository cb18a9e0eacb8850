//! Application State
//!
//! Shared state accessible by all handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::controller::DashboardController;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Controller owning the page
    pub controller: Arc<DashboardController>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(controller: Arc<DashboardController>, config: ServerConfig) -> Self {
        Self {
            controller,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
