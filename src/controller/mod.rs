//! Polling/Lifecycle Controller
//!
//! Drives the dashboard: one immediate refresh when polling starts, then a
//! refresh every poll interval. The review detail modal belongs to each
//! viewer as a [`ReviewModal`]; everything else on the page is shared.
//!
//! ## Concurrency
//!
//! - Every tick spawns its own refresh task, so cycles can overlap and
//!   resolve out of order. With `strict_refresh` a per-endpoint
//!   [`InFlightGuard`] skips a refresh while the previous one is unresolved.
//! - The page lock is never held across a network request.

mod guard;
mod lifecycle;
mod modal;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use guard::{InFlightGuard, InFlightPermit};
pub use lifecycle::{
    CycleReport, DashboardController, DashboardSettings, EndpointHealth, HealthReport,
};
pub use modal::ReviewModal;

/// Misuse of the controller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("dashboard is already polling")]
    AlreadyPolling,

    #[error("review detail is disabled")]
    DetailDisabled,

    /// The id never appeared in a rendered review list
    #[error("review {0} is not in the recent list")]
    UnknownReview(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Uninitialized,
    Polling,
}

/// Where a pointer-down on the open modal landed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerTarget {
    /// The overlay behind the dialog
    Backdrop,
    /// Anything inside the dialog
    Content,
}

/// Result of one endpoint refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// Fresh data was written
    Rendered,
    /// The fetch failed and the degraded state was written
    Degraded,
    /// Nothing was fetched
    Skipped,
}
