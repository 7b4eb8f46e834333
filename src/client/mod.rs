//! Typed HTTP client for the scoring backend
//!
//! One method per backend operation. Every method is a single request with no
//! retry; failures surface as [`ClientError`] and callers decide how to
//! render them.

mod error;
pub mod models;

pub use error::ClientError;
pub use models::{
    DistDetail, GitDetail, LangDetail, Page, PackageRow, RankingResult, ScoreResult,
    UpdateAck, UpdateGitLink,
};

use anyhow::{Context, Result};
use models::{
    HistoriesQuery, PackagePage, RankingsQuery, ResultsQuery, SearchPackagesQuery, TableQuery,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::BackendConfig;

/// Largest `take` the backend honours for list endpoints
pub const MAX_TAKE: u64 = 1000;

/// Client for the backend's `/api/v1` surface
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client with connection pooling and the configured timeout
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_http(http, config.api_base()))
    }

    /// Wrap an existing reqwest client (shared pool, tests)
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Underlying HTTP client, shared with the `/api` forwarder
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /results - search score results by link
    pub async fn get_results(
        &self,
        q: &str,
        start: u64,
        take: u64,
    ) -> Result<Page<ScoreResult>, ClientError> {
        let query = ResultsQuery {
            q,
            start,
            take: take.min(MAX_TAKE),
        };
        self.get_json("/results", &query).await
    }

    /// GET /histories - score history of one link
    pub async fn get_histories(
        &self,
        link: &str,
        start: u64,
        take: u64,
    ) -> Result<Page<ScoreResult>, ClientError> {
        let query = HistoriesQuery {
            link,
            start,
            take: take.min(MAX_TAKE),
        };
        self.get_json("/histories", &query).await
    }

    /// GET /results/{scoreid} - one score with all detail rows
    pub async fn get_result_by_score_id(&self, score_id: i64) -> Result<ScoreResult, ClientError> {
        let path = format!("/results/{}", score_id);
        let no_query: [(&str, &str); 0] = [];
        let result: Option<ScoreResult> = self.get_json(&path, &no_query).await?;
        result.ok_or(ClientError::Empty { path })
    }

    /// GET /rankings - global ranking
    pub async fn get_rankings(
        &self,
        start: u64,
        take: u64,
        detail: bool,
    ) -> Result<Page<RankingResult>, ClientError> {
        let query = RankingsQuery {
            start,
            take: take.min(MAX_TAKE),
            detail,
        };
        self.get_json("/rankings", &query).await
    }

    /// GET /query-with-pagination - raw rows of a package table
    pub async fn get_query_with_pagination(
        &self,
        table_name: &str,
        page_size: u64,
        offset: u64,
        confidence: bool,
    ) -> Result<Page<PackageRow>, ClientError> {
        let query = TableQuery {
            table_name,
            page_size,
            offset,
            confidence,
        };
        let raw: PackagePage = self.get_json("/query-with-pagination", &query).await?;
        Ok(raw.into_page(offset, page_size))
    }

    /// GET /search-packages - package rows matching a search query
    pub async fn get_search_packages(
        &self,
        table_name: &str,
        page_size: u64,
        offset: u64,
        search_query: &str,
    ) -> Result<Page<PackageRow>, ClientError> {
        let query = SearchPackagesQuery {
            table_name,
            page_size,
            offset,
            search_query,
        };
        let raw: PackagePage = self.get_json("/search-packages", &query).await?;
        Ok(raw.into_page(offset, page_size))
    }

    /// POST /update-gitlink - correct a package's upstream link
    pub async fn post_update_gitlink(&self, body: &UpdateGitLink) -> Result<UpdateAck, ClientError> {
        let path = "/update-gitlink";
        tracing::debug!(
            package = %body.package_name,
            table = %body.table_name,
            "POST {}",
            path
        );

        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                path: path.to_string(),
                source,
            })?;

        decode(path, response).await
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        tracing::debug!("GET {}", path);

        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                path: path.to_string(),
                source,
            })?;

        decode(path, response).await
    }
}

/// Turn a response into `T`, mapping status and body problems to errors
async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|source| ClientError::Transport {
            path: path.to_string(),
            source,
        })?;

    if !status.is_success() {
        tracing::warn!("Backend returned {} for {}", status, path);
        return Err(ClientError::Status {
            path: path.to_string(),
            status,
            body: error_message(&text),
        });
    }

    serde_json::from_str(&text).map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}

/// The backend reports errors either as a bare JSON string or as `{"error": ...}`
fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => map
            .get("error")
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| body.to_string()),
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BackendClient {
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        BackendClient::with_http(http, format!("{}/api/v1/", server.uri()))
    }

    #[tokio::test]
    async fn test_get_results_sends_paging_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/results"))
            .and(query_param("q", "redis"))
            .and(query_param("start", "0"))
            .and(query_param("take", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 1,
                "start": 0,
                "count": 1,
                "items": [{"scoreID": 1, "link": "https://github.com/redis/redis", "score": 0.9}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server).get_results("redis", 0, 10).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].link, "https://github.com/redis/redis");
    }

    #[tokio::test]
    async fn test_take_is_capped() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/histories"))
            .and(query_param("take", "1000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 0, "start": 0, "count": 0, "items": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let page = client_for(&server)
            .get_histories("https://github.com/a/b", 0, 5000)
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_status_error_carries_backend_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/results/9"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!("Error occurred when querying result")),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).get_result_by_score_id(9).await.unwrap_err();
        match err {
            ClientError::Status { status, body, .. } => {
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "Error occurred when querying result");
            }
            other => panic!("Expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_null_detail_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/results/3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_result_by_score_id(3).await.unwrap_err();
        assert!(matches!(err, ClientError::Empty { .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/rankings"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_rankings(0, 10, false).await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_package_endpoints() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/query-with-pagination"))
            .and(query_param("tableName", "arch_packages"))
            .and(query_param("pageSize", "10"))
            .and(query_param("offset", "10"))
            .and(query_param("confidence", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"package": "bash", "git_link": "https://git.savannah.gnu.org/git/bash.git"}],
                "totalPages": 3
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/search-packages"))
            .and(query_param("searchQuery", "ba"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": null,
                "totalPages": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let page = client
            .get_query_with_pagination("arch_packages", 10, 10, false)
            .await
            .unwrap();
        assert_eq!(page.total, 30);
        assert_eq!(page.items[0].key, "bash");

        let empty = client
            .get_search_packages("arch_packages", 10, 0, "ba")
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_post_update_gitlink() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/update-gitlink"))
            .and(body_json(json!({
                "packageName": "bash",
                "tableName": "arch_packages",
                "newGitLink": "https://git.savannah.gnu.org/git/bash.git",
                "linkConfidence": "0.9"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "GitLink updated successfully"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let ack = client_for(&server)
            .post_update_gitlink(&UpdateGitLink {
                package_name: "bash".to_string(),
                table_name: "arch_packages".to_string(),
                new_git_link: "https://git.savannah.gnu.org/git/bash.git".to_string(),
                link_confidence: Some(0.9),
            })
            .await
            .unwrap();
        assert_eq!(ack.message.as_deref(), Some("GitLink updated successfully"));
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message("\"Invalid query parameters\""), "Invalid query parameters");
        assert_eq!(error_message("{\"error\":\"no such table\"}"), "no such table");
        assert_eq!(error_message("plain text"), "plain text");
    }
}
