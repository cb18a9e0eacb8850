//! Review API Types
//!
//! Read-only shapes returned by the code-review assistant's dashboard
//! endpoints. Keys are camelCase on the wire. Counts that arrive as `null`
//! or are missing decode as zero.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================
// Severity
// ============================================

/// Importance of a review comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Order used by the severity chart
    pub const CHART_ORDER: [Severity; 3] = [Severity::Info, Severity::Warning, Severity::Error];

    /// Order used when rendering badges
    pub const BADGE_ORDER: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    /// Lowercase wire name, also used as CSS class suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for severity strings outside info/warning/error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown severity: {0:?}")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Per-severity comment counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    #[serde(default, deserialize_with = "null_as_default")]
    pub info: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warning: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: u64,
}

impl SeverityCounts {
    pub fn new(info: u64, warning: u64, error: u64) -> Self {
        Self { info, warning, error }
    }

    /// Count for a single severity
    pub fn get(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Info => self.info,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }

    pub fn total(&self) -> u64 {
        self.info + self.warning + self.error
    }
}

// ============================================
// Statistics
// ============================================

/// Aggregate statistics for the dashboard header and charts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatistics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_stats: OverallStats,
    #[serde(default)]
    pub recent_activity: Option<RecentActivity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_distribution: Option<SeverityCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_distribution: Option<CategoryDistribution>,
}

/// Totals across every repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_repositories: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pull_requests: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_reviews: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_comments_per_review: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_processing_time_ms: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tokens_used: u64,
}

/// Totals per repository, keyed by `owner/name` and sorted by key
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RepositoryStatistics {
    repositories: BTreeMap<String, OverallStats>,
}

impl RepositoryStatistics {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, OverallStats)>,
        K: Into<String>,
    {
        Self {
            repositories: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OverallStats)> {
        self.repositories.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, repository: &str) -> Option<&OverallStats> {
        self.repositories.get(repository)
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

impl<'de> Deserialize<'de> for RepositoryStatistics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<OverallStats>>::deserialize(deserializer)?;
        Ok(Self {
            repositories: raw
                .into_iter()
                .map(|(k, v)| (k, v.unwrap_or_default()))
                .collect(),
        })
    }
}

/// Review counts over recent windows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews_today: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews_this_week: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reviews_this_month: u64,
    #[serde(default)]
    pub last_review_time: Option<String>,
}

/// Category name to count, in the order the server sent the keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDistribution {
    entries: Vec<(String, u64)>,
}

impl CategoryDistribution {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CategoryDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedCounts;

        impl<'de> Visitor<'de> for OrderedCounts {
            type Value = CategoryDistribution;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Option<u64>>()? {
                    entries.push((key, value.unwrap_or(0)));
                }
                Ok(CategoryDistribution { entries })
            }
        }

        deserializer.deserialize_map(OrderedCounts)
    }
}

// ============================================
// Reviews
// ============================================

/// One row of the recent-review list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    #[serde(alias = "reviewId")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository_owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pr_number: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pr_title: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity_counts: SeverityCounts,
    #[serde(default)]
    pub processing_time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
}

impl ReviewSummary {
    /// `owner/name`
    pub fn repository(&self) -> String {
        format!("{}/{}", self.repository_owner, self.repository_name)
    }
}

/// Full detail of one review, including its comments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDetail {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub review_status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_comments: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity_counts: SeverityCounts,
    #[serde(default)]
    pub processing_time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository: RepositoryRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pull_request: PullRequestInfo,
    #[serde(default)]
    pub ai_model: Option<String>,
    #[serde(default)]
    pub tokens_used: Option<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Repository the reviewed pull request belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Pull request metadata shown in the detail view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single review comment attached to a file location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub severity: Severity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_path: String,
    #[serde(default)]
    pub line_number: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub code_example: Option<String>,
}

// ============================================
// Trends
// ============================================

/// Daily review activity over a window of days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_reviews: Vec<TrendPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_comments: Vec<TrendPoint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub daily_issues: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_parse_is_case_insensitive() {
        assert_eq!("INFO".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!(" Warning ".parse::<Severity>().unwrap(), Severity::Warning);
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn test_comment_rejects_unknown_severity() {
        let json = r#"{"severity":"fatal","category":"x","filePath":"a.rs","message":"m"}"#;
        assert!(serde_json::from_str::<Comment>(json).is_err());
    }

    #[test]
    fn test_repository_statistics_sorted_by_name() {
        let json = r#"{
            "zeta/web": {"totalReviews": 3, "totalComments": 9},
            "acme/api": {"totalReviews": 12, "averageProcessingTimeMs": 1500},
            "acme/empty": null
        }"#;
        let repos: RepositoryStatistics = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = repos.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["acme/api", "acme/empty", "zeta/web"]);
        assert_eq!(repos.get("acme/api").unwrap().total_reviews, 12);
        assert_eq!(repos.get("acme/empty").unwrap(), &OverallStats::default());
        assert_eq!(repos.get("zeta/web").unwrap().total_comments, 9);
    }

    #[test]
    fn test_statistics_missing_and_null_fields_default_to_zero() {
        let json = r#"{
            "overallStats": {"totalRepositories": 5, "totalReviews": null},
            "severityDistribution": {"info": 10, "warning": null}
        }"#;
        let stats: DashboardStatistics = serde_json::from_str(json).unwrap();

        assert_eq!(stats.overall_stats.total_repositories, 5);
        assert_eq!(stats.overall_stats.total_reviews, 0);
        assert_eq!(stats.overall_stats.average_processing_time_ms, 0);
        assert!(stats.recent_activity.is_none());
        assert!(stats.category_distribution.is_none());
        assert_eq!(stats.severity_distribution, Some(SeverityCounts::new(10, 0, 0)));
    }

    #[test]
    fn test_null_overall_stats() {
        let stats: DashboardStatistics =
            serde_json::from_str(r#"{"overallStats": null}"#).unwrap();
        assert_eq!(stats.overall_stats, OverallStats::default());
    }

    #[test]
    fn test_category_distribution_keeps_source_order() {
        let json = r#"{"security": 4, "performance": 2, "style": 9, "bug": null}"#;
        let dist: CategoryDistribution = serde_json::from_str(json).unwrap();

        assert_eq!(dist.labels(), vec!["security", "performance", "style", "bug"]);
        assert_eq!(dist.counts(), vec![4, 2, 9, 0]);
        assert_eq!(
            serde_json::to_string(&dist).unwrap(),
            r#"{"security":4,"performance":2,"style":9,"bug":0}"#
        );
    }

    #[test]
    fn test_review_summary_accepts_review_id_alias() {
        let json = r#"{
            "reviewId": 42,
            "repositoryOwner": "acme",
            "repositoryName": "api",
            "prNumber": 7,
            "prTitle": "Add cache",
            "createdAt": "2024-01-15T10:30:00",
            "totalComments": 3,
            "severityCounts": {"info": 1, "warning": 2},
            "processingTimeMs": 1200,
            "commitSha": "abc123"
        }"#;
        let review: ReviewSummary = serde_json::from_str(json).unwrap();

        assert_eq!(review.id, 42);
        assert_eq!(review.repository(), "acme/api");
        assert_eq!(review.severity_counts, SeverityCounts::new(1, 2, 0));
        assert_eq!(review.commit_sha.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_review_detail_with_comments() {
        let json = r#"{
            "id": 1,
            "reviewStatus": "completed",
            "createdAt": "2024-01-15T10:30:00",
            "totalComments": 1,
            "severityCounts": {"error": 1},
            "processingTimeMs": 900,
            "aiModel": null,
            "tokensUsed": null,
            "errorMessage": null,
            "repository": {"owner": "acme", "name": "api"},
            "pullRequest": {"number": 7, "title": "Add cache", "author": "kim", "description": null},
            "comments": [{
                "id": 10,
                "filePath": "src/lib.rs",
                "lineNumber": 12,
                "severity": "ERROR",
                "category": "bug",
                "message": "Possible overflow",
                "suggestion": null,
                "codeExample": "a.checked_add(b)",
                "createdAt": "2024-01-15T10:30:01"
            }]
        }"#;
        let detail: ReviewDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.pull_request.author, "kim");
        assert!(detail.ai_model.is_none());
        assert_eq!(detail.comments.len(), 1);
        assert_eq!(detail.comments[0].severity, Severity::Error);
        assert_eq!(detail.comments[0].line_number, Some(12));
    }

    #[test]
    fn test_severity_counts_total() {
        let counts = SeverityCounts::new(1, 2, 3);
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.get(Severity::Warning), 2);
    }
}
