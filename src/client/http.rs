//! HTTP implementation of `DashboardApi`

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{DashboardApi, FetchError};
use crate::model::{
    DashboardStatistics, RepositoryStatistics, ReviewDetail, ReviewSummary, TrendData,
};

/// Configuration for the dashboard client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin serving `/api/dashboard/*` (e.g., "http://localhost:8080")
    pub base_url: String,
    /// Timeout applied to each request
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// reqwest-backed dashboard client. Requests are never retried.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(config: ClientConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "GET");

        let transport = |source| FetchError::Transport {
            endpoint: path.to_string(),
            source,
        };

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DashboardApi for DashboardClient {
    async fn fetch_statistics(&self) -> Result<DashboardStatistics, FetchError> {
        self.get_json("/api/dashboard/statistics", &[]).await
    }

    async fn fetch_recent_reviews(&self, limit: usize) -> Result<Vec<ReviewSummary>, FetchError> {
        self.get_json("/api/dashboard/reviews/recent", &[("limit", limit.to_string())])
            .await
    }

    async fn fetch_review_detail(&self, id: u64) -> Result<ReviewDetail, FetchError> {
        self.get_json(&format!("/api/dashboard/reviews/{}", id), &[])
            .await
    }

    async fn fetch_trends(&self, days: u32) -> Result<TrendData, FetchError> {
        self.get_json("/api/dashboard/trends", &[("days", days.to_string())])
            .await
    }

    async fn fetch_repository_statistics(&self) -> Result<RepositoryStatistics, FetchError> {
        self.get_json("/api/dashboard/repositories/statistics", &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> DashboardClient {
        DashboardClient::new(ClientConfig {
            base_url,
            request_timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn stub_router() -> Router {
        Router::new()
            .route(
                "/api/dashboard/statistics",
                get(|| async {
                    Json(json!({
                        "overallStats": {
                            "totalRepositories": 5,
                            "totalReviews": 120,
                            "totalComments": 340,
                            "averageProcessingTimeMs": 2500
                        },
                        "severityDistribution": {"info": 10, "warning": 3, "error": 1}
                    }))
                }),
            )
            .route(
                "/api/dashboard/reviews/recent",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let limit: usize = params
                        .get("limit")
                        .and_then(|l| l.parse().ok())
                        .unwrap_or(0);
                    let rows: Vec<Value> = (1..=limit as u64)
                        .map(|id| {
                            json!({
                                "id": id,
                                "repositoryOwner": "acme",
                                "repositoryName": "api",
                                "prNumber": id,
                                "prTitle": format!("PR {}", id)
                            })
                        })
                        .collect();
                    Json(Value::Array(rows))
                }),
            )
            .route(
                "/api/dashboard/reviews/:id",
                get(|Path(id): Path<u64>| async move {
                    if id == 404 {
                        return Err(StatusCode::NOT_FOUND);
                    }
                    Ok(Json(json!({
                        "id": id,
                        "reviewStatus": "completed",
                        "repository": {"owner": "acme", "name": "api"},
                        "pullRequest": {"number": 7, "title": "t", "author": "kim"},
                        "comments": []
                    })))
                }),
            )
            .route(
                "/api/dashboard/trends",
                get(|| async { "not json" }),
            )
            .route(
                "/api/dashboard/repositories/statistics",
                get(|| async {
                    Json(json!({
                        "acme/web": {"totalReviews": 4, "totalComments": 11},
                        "acme/api": {"totalReviews": 9, "averageProcessingTimeMs": 1200}
                    }))
                }),
            )
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client_for("http://localhost:8080/".to_string());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_fetch_statistics() {
        let client = client_for(spawn_stub(stub_router()).await);
        let stats = client.fetch_statistics().await.unwrap();

        assert_eq!(stats.overall_stats.total_reviews, 120);
        assert_eq!(stats.severity_distribution.unwrap().info, 10);
        assert!(stats.category_distribution.is_none());
    }

    #[tokio::test]
    async fn test_fetch_recent_reviews_sends_limit() {
        let client = client_for(spawn_stub(stub_router()).await);
        let reviews = client.fetch_recent_reviews(10).await.unwrap();

        assert_eq!(reviews.len(), 10);
        assert_eq!(reviews[9].id, 10);
        assert_eq!(reviews[0].repository(), "acme/api");
    }

    #[tokio::test]
    async fn test_fetch_review_detail() {
        let client = client_for(spawn_stub(stub_router()).await);
        let detail = client.fetch_review_detail(3).await.unwrap();

        assert_eq!(detail.id, 3);
        assert_eq!(detail.pull_request.author, "kim");
    }

    #[tokio::test]
    async fn test_fetch_repository_statistics() {
        let client = client_for(spawn_stub(stub_router()).await);
        let repos = client.fetch_repository_statistics().await.unwrap();

        assert_eq!(repos.len(), 2);
        let names: Vec<&str> = repos.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["acme/api", "acme/web"]);
        assert_eq!(repos.get("acme/api").unwrap().average_processing_time_ms, 1200);
        assert_eq!(repos.get("acme/web").unwrap().total_comments, 11);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let client = client_for(spawn_stub(stub_router()).await);
        let err = client.fetch_review_detail(404).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.endpoint(), "/api/dashboard/reviews/404");
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let client = client_for(spawn_stub(stub_router()).await);
        let err = client.fetch_trends(7).await.unwrap_err();

        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_origin_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));
        let err = client.fetch_statistics().await.unwrap_err();

        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
