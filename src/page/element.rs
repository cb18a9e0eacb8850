//! Named elements of the host document

use std::fmt;

/// Elements the renderer is allowed to write into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    TotalRepositories,
    TotalReviews,
    TotalComments,
    AvgProcessingTime,
    TotalPullRequests,
    AvgCommentsPerReview,
    TotalTokensUsed,
    ReviewsToday,
    ReviewsThisWeek,
    ReviewsThisMonth,
    LastReviewTime,
    StatsStatus,
    ReviewList,
    RepositoryStats,
    ReviewDetailContent,
}

impl ElementId {
    pub const ALL: [ElementId; 15] = [
        ElementId::TotalRepositories,
        ElementId::TotalReviews,
        ElementId::TotalComments,
        ElementId::AvgProcessingTime,
        ElementId::TotalPullRequests,
        ElementId::AvgCommentsPerReview,
        ElementId::TotalTokensUsed,
        ElementId::ReviewsToday,
        ElementId::ReviewsThisWeek,
        ElementId::ReviewsThisMonth,
        ElementId::LastReviewTime,
        ElementId::StatsStatus,
        ElementId::ReviewList,
        ElementId::RepositoryStats,
        ElementId::ReviewDetailContent,
    ];

    /// DOM id of the element
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::TotalRepositories => "totalRepositories",
            ElementId::TotalReviews => "totalReviews",
            ElementId::TotalComments => "totalComments",
            ElementId::AvgProcessingTime => "avgProcessingTime",
            ElementId::TotalPullRequests => "totalPullRequests",
            ElementId::AvgCommentsPerReview => "avgCommentsPerReview",
            ElementId::TotalTokensUsed => "totalTokensUsed",
            ElementId::ReviewsToday => "reviewsToday",
            ElementId::ReviewsThisWeek => "reviewsThisWeek",
            ElementId::ReviewsThisMonth => "reviewsThisMonth",
            ElementId::LastReviewTime => "lastReviewTime",
            ElementId::StatsStatus => "statsStatus",
            ElementId::ReviewList => "reviewList",
            ElementId::RepositoryStats => "repositoryStats",
            ElementId::ReviewDetailContent => "reviewDetailContent",
        }
    }

    /// Elements that belong to one viewer's modal and are never stored in
    /// the shared page
    pub fn is_per_viewer(&self) -> bool {
        matches!(self, ElementId::ReviewDetailContent)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
