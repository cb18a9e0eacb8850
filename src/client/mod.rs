//! Dashboard API Client
//!
//! Read-only access to the review backend's dashboard endpoints. The
//! controller talks to `DashboardApi`; `DashboardClient` is the HTTP
//! implementation.

mod http;
mod error;

use async_trait::async_trait;

use crate::model::{
    DashboardStatistics, RepositoryStatistics, ReviewDetail, ReviewSummary, TrendData,
};

pub use http::{ClientConfig, DashboardClient};
pub use error::FetchError;

/// Source of dashboard data
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /api/dashboard/statistics`
    async fn fetch_statistics(&self) -> Result<DashboardStatistics, FetchError>;

    /// `GET /api/dashboard/reviews/recent?limit=N`
    async fn fetch_recent_reviews(&self, limit: usize) -> Result<Vec<ReviewSummary>, FetchError>;

    /// `GET /api/dashboard/reviews/{id}`
    async fn fetch_review_detail(&self, id: u64) -> Result<ReviewDetail, FetchError>;

    /// `GET /api/dashboard/trends?days=N`
    async fn fetch_trends(&self, days: u32) -> Result<TrendData, FetchError>;

    /// `GET /api/dashboard/repositories/statistics`
    async fn fetch_repository_statistics(&self) -> Result<RepositoryStatistics, FetchError>;
}
