//! Dashboard Data Model
//!
//! Transient view-model shapes fetched from the review API. Ownership of the
//! underlying records lives server-side; each poll cycle replaces these
//! values wholesale.

mod types;

pub use types::{
    CategoryDistribution, Comment, DashboardStatistics, OverallStats, ParseSeverityError,
    PullRequestInfo, RecentActivity, RepositoryRef, RepositoryStatistics, ReviewDetail,
    ReviewSummary, Severity, SeverityCounts, TrendData, TrendPoint,
};
