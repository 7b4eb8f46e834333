// Router tests against a mocked scoring backend

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{router, AppState};
use crate::client::BackendClient;
use crate::config::Config;

fn app_for(server: &MockServer) -> Router {
    let mut config = Config::default();
    config.backend.url = server.uri();

    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to create HTTP client");
    let client = BackendClient::with_http(http, config.backend.api_base());
    router(AppState::with_client(config, client))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read(response).await
}

async fn post_form(app: Router, uri: &str, form: &str) -> axum::response::Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

async fn read(response: axum::response::Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn score(id: i64, link: &str) -> serde_json::Value {
    json!({
        "scoreID": id,
        "link": link,
        "score": 0.5,
        "gitScore": 0.25,
        "langScore": 0.125,
        "distroScore": 0.0625,
        "updateTime": "2024-05-01T12:00:00Z",
        "gitDetail": null,
        "langDetail": null,
        "distDetail": null
    })
}

fn packages() -> serde_json::Value {
    json!({
        "items": [
            {
                "package": "bash",
                "description": "The GNU Bourne Again shell",
                "homepage": "https://www.gnu.org/software/bash/",
                "git_link": "https://git.savannah.gnu.org/git/bash.git",
                "link_confidence": "0.8"
            },
            {
                "package": "zlib",
                "description": null,
                "homepage": null,
                "git_link": null,
                "link_confidence": null
            }
        ],
        "totalPages": 3
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Search results
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_results_fetches_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/results"))
        .and(query_param("q", "redis"))
        .and(query_param("start", "0"))
        .and(query_param("take", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [score(1, "https://github.com/redis/redis"), score(2, "https://gitlab.com/redis/hiredis")],
            "total": 25,
            "start": 0,
            "count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/results?q=redis&take=10").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches(r#"class="card score-card""#).count(), 2);
    assert!(html.contains("Total 25"));
    assert!(html.contains("Updated at 2024-05-01 12:00:00 UTC"));
    assert!(html.contains(r#"href="/results/detail/1?q=redis&amp;start=0&amp;take=10""#));
    assert!(html.contains(r#"class="next" href="/results?q=redis&amp;start=10&amp;take=10""#));
}

#[tokio::test]
async fn test_results_offset_from_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/results"))
        .and(query_param("start", "40"))
        .and(query_param("take", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [score(9, "https://github.com/a/b")],
            "total": 41,
            "start": 40,
            "count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/results?q=a&start=40&take=20").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<span class="page current" aria-current="page">3</span>"#));
}

#[tokio::test]
async fn test_results_empty_query_asks_for_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/results?q=%20%20").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Please enter a search query"));
}

#[tokio::test]
async fn test_results_empty_set() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/results"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": null,
            "total": 0,
            "start": 0,
            "count": 0
        })))
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/results?q=nothing").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("No Results Found"));
    assert!(html.contains("Sorry, we couldn&#39;t find any results for your search."));
}

#[tokio::test]
async fn test_results_backend_failure_is_not_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/results"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/results?q=redis").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("Backend unavailable"));
    assert!(html.contains("db down"));
    assert!(!html.contains("No Results Found"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Detail views
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_score_id_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/detail/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Invalid Score ID"));
    assert!(html.contains("Score ID must be an integer"));

    let (status, _) = get(app_for(&server), "/results/detail/1.5?q=redis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_detail_page_tables() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/results/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "scoreID": 12,
            "link": "https://github.com/redis/redis",
            "score": 0.9,
            "gitDetail": [{"license": ["BSD-3-Clause"], "language": ["C"], "contributorCount": 700}],
            "langDetail": [{"type": 0, "depCount": 10}, {"type": 99, "depCount": 2}],
            "distDetail": [{"type": 1, "count": 3}, {"type": 4}, {"type": 10}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/detail/12").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Total Score: 0.9000"));
    assert_eq!(html.matches(r#"class="git-row""#).count(), 1);
    assert_eq!(html.matches(r#"class="lang-row""#).count(), 2);
    assert_eq!(html.matches(r#"class="dist-row""#).count(), 3);
    assert!(html.contains("<td>Npm</td>"));
    assert!(html.contains("<td>Unknown</td>"));
    assert!(html.contains("<td>Alpine</td>"));
}

#[tokio::test]
async fn test_detail_null_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/results/5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/detail/5").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(html.contains("Maybe server error occurs"));
}

#[tokio::test]
async fn test_detail_overlay_over_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/results"))
        .and(query_param("q", "redis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [score(3, "https://github.com/redis/redis")],
            "total": 1,
            "start": 0,
            "count": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/results/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(score(3, "https://github.com/redis/redis")))
        .expect(1)
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/results/detail/3?q=redis&start=0&take=10").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"class="card score-card""#));
    assert!(html.contains("overlay overlay-modal"));
    assert!(html.contains(r#"class="close" href="/results?q=redis&amp;start=0&amp;take=10""#));
    assert!(html.contains(r#"class="detail-git""#));
}

#[tokio::test]
async fn test_histories_drawer_pages_independently() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/results"))
        .and(query_param("start", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [score(3, "https://github.com/redis/redis")],
            "total": 11,
            "start": 10,
            "count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/histories"))
        .and(query_param("link", "https://github.com/redis/redis"))
        .and(query_param("start", "0"))
        .and(query_param("take", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [score(3, "https://github.com/redis/redis"), score(2, "https://github.com/redis/redis")],
            "total": 12,
            "start": 0,
            "count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, html) = get(
        app_for(&server),
        "/results/histories?q=redis&start=10&take=10&link=https%3A%2F%2Fgithub.com%2Fredis%2Fredis",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("overlay overlay-drawer"));
    assert!(html.contains(
        "/results/histories?q=redis&amp;start=10&amp;take=10&amp;link=https%3A%2F%2Fgithub.com%2Fredis%2Fredis&amp;hstart=10&amp;htake=10"
    ));
}

#[tokio::test]
async fn test_histories_page_hides_history_link() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/histories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [score(4, "https://github.com/a/b")],
            "total": 1,
            "start": 0,
            "count": 1
        })))
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/histories?link=https://github.com/a/b").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"href="/detail/4""#));
    assert!(!html.contains(">Histories</a>"));
}

#[tokio::test]
async fn test_rankings_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/rankings"))
        .and(query_param("detail", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"scoreID": 1, "link": "https://github.com/torvalds/linux", "score": 0.99, "ranking": 1}],
            "total": 1,
            "start": 0,
            "count": 1
        })))
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/rankings").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<a href="/rankings" class="active">Rankings</a>"#));
    assert_eq!(html.matches(r#"class="ranking-row""#).count(), 1);
}

#[tokio::test]
async fn test_rankings_full_page_offers_next() {
    let server = MockServer::start().await;
    let items: Vec<_> = (1..=10)
        .map(|i| json!({"scoreID": i, "link": format!("https://github.com/o/r{i}"), "ranking": i}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/v1/rankings"))
        .and(query_param("take", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": items,
            "total": 10,
            "start": 0,
            "count": 10
        })))
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/rankings?start=0&take=10").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"class="next" href="/rankings?start=10&amp;take=10""#));
    assert!(html.contains(r#"<span class="prev disabled">"#));

    let (status, html) = get(app_for(&server), "/rankings?start=10&take=10").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"class="prev" href="/rankings?start=0&amp;take=10""#));
    assert!(html.contains(r#"class="next" href="/rankings?start=20&amp;take=10""#));
}

// ─────────────────────────────────────────────────────────────────────────────
// GitLink editor
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_gitlink_list_and_edit_modal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/query-with-pagination"))
        .and(query_param("tableName", "arch_packages"))
        .and(query_param("pageSize", "10"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(packages()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, html) = get(app_for(&server), "/gitlink?edit=bash").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(html.matches(r#"class="package-row""#).count(), 2);
    assert!(html.contains("Total 30"));
    assert!(html.contains("<td>0.8</td>"));
    assert!(html.contains("Edit GitLink"));
    assert!(html.contains(r#"value="https://git.savannah.gnu.org/git/bash.git""#));
}

#[tokio::test]
async fn test_gitlink_search_uses_search_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/search-packages"))
        .and(query_param("tableName", "alpine_packages"))
        .and(query_param("searchQuery", "bash"))
        .respond_with(ResponseTemplate::new(200).set_body_json(packages()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = get(app_for(&server), "/gitlink?table=alpine_packages&q=bash").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_gitlink_unknown_table() {
    let server = MockServer::start().await;
    let (status, html) = get(app_for(&server), "/gitlink?table=nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("Unknown Table"));
}

#[tokio::test]
async fn test_empty_link_rejected_before_write() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/query-with-pagination"))
        .respond_with(ResponseTemplate::new(200).set_body_json(packages()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/update-gitlink"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = post_form(
        app_for(&server),
        "/gitlink/update",
        "package=bash&table=arch_packages&link=%20%20&confidence=1&return_to=%2Fgitlink",
    )
    .await;
    let (status, html) = read(response).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Please enter a new git link"));
    assert!(html.contains("Edit GitLink"));
}

#[tokio::test]
async fn test_edit_success_redirects_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/update-gitlink"))
        .and(body_json(json!({
            "packageName": "bash",
            "tableName": "arch_packages",
            "newGitLink": "https://github.com/bminor/bash",
            "linkConfidence": "0.9"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = post_form(
        app_for(&server),
        "/gitlink/update",
        "package=bash&table=arch_packages&link=https%3A%2F%2Fgithub.com%2Fbminor%2Fbash&confidence=0.9&return_to=%2Fgitlink%3Fstart%3D10%26take%3D10",
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/gitlink?start=10&take=10"
    );
}

#[tokio::test]
async fn test_edit_write_failure_stays_in_modal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/query-with-pagination"))
        .respond_with(ResponseTemplate::new(200).set_body_json(packages()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/update-gitlink"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "update failed"})))
        .expect(1)
        .mount(&server)
        .await;

    let response = post_form(
        app_for(&server),
        "/gitlink/update",
        "package=bash&table=arch_packages&link=https%3A%2F%2Fexample.org%2Fbash&confidence=1&return_to=%2Fgitlink",
    )
    .await;
    let (status, html) = read(response).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("Update failed."));
    assert!(html.contains(r#"value="https://example.org/bash""#));
}

// ─────────────────────────────────────────────────────────────────────────────
// Misc routes
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_api_requests_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/rankings"))
        .and(query_param("take", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-backend", "scores")
                .set_body_json(json!({"items": [], "total": 0})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = app_for(&server)
        .oneshot(
            Request::builder()
                .uri("/api/v1/rankings?take=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-backend").unwrap(), "scores");
    let (status, body) = read(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&body).unwrap(),
        json!({"items": [], "total": 0})
    );
}

#[tokio::test]
async fn test_home_and_health() {
    let server = MockServer::start().await;

    let (status, html) = get(app_for(&server), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"action="/results""#));
    assert!(!html.contains("Please enter a search query"));

    let (status, body) = get(app_for(&server), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _) = get(app_for(&server), "/no/such/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
