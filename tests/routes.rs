use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use http::{header, HeaderValue, StatusCode};
use mockito::Server;
use pretty_assertions::assert_eq;
use serde_json::json;

use trending_stories::api::mock::MockArticleSource;
use trending_stories::api::{ApiConfig, HttpArticleClient};
use trending_stories::article::{ApiArticle, ApiImage};
use trending_stories::http::{router, AppState};
use trending_stories::markdown::StyleRules;
use trending_stories::resolve::RouteResolver;
use trending_stories::store::SessionRegistry;

const UNUSED_UPSTREAM: &str = "http://127.0.0.1:9";

fn record(id: i64, keywords: &str, ingested: &str) -> ApiArticle {
    ApiArticle {
        id,
        news: Some(format!("**{keywords}** is trending.")),
        date: Some("2025-09-18 08:00:00".to_string()),
        keywords: Some(keywords.to_string()),
        image: Some(ApiImage {
            file_name: Some(format!("{id}.jpg")),
            url: Some(format!("https://img.example/{id}.jpg")),
        }),
        tag: Some(vec!["Tech".to_string()]),
        serpapi_data_date: Some(ingested.to_string()),
    }
}

fn server_with(source: &Arc<MockArticleSource>, upstream_url: &str) -> TestServer {
    server_with_sessions(source, upstream_url, SessionRegistry::in_memory(Duration::from_secs(60)))
}

fn server_with_sessions(
    source: &Arc<MockArticleSource>,
    upstream_url: &str,
    sessions: SessionRegistry,
) -> TestServer {
    let upstream = HttpArticleClient::new(ApiConfig::new(upstream_url).unwrap()).unwrap();
    let state = AppState {
        resolver: RouteResolver::new(source.clone()),
        upstream: Arc::new(upstream),
        sessions,
        rules: Arc::new(StyleRules::new()),
    };
    TestServer::new(router(state)).unwrap()
}

/// `name=value` part of the session cookie a response started.
fn session_cookie(response: &axum_test::TestResponse) -> HeaderValue {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let pair = set_cookie.split(';').next().unwrap();
    HeaderValue::from_str(pair).unwrap()
}

#[tokio::test]
async fn test_home_renders_latest_batch_only() {
    let source = Arc::new(MockArticleSource::new().with_latest(vec![
        record(1, "Harvest moon", "2025-09-18"),
        record(2, "Old news", "2025-09-17"),
        record(3, "Comet sighting", "2025-09-18"),
    ]));
    let server = server_with(&source, UNUSED_UPSTREAM);

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let html = response.text();
    assert!(html.contains("Harvest moon"));
    assert!(html.contains("Comet sighting"));
    assert!(!html.contains("Old news"));
    assert!(html.contains(r#"href="/article/1?date=20250918""#));
}

#[tokio::test]
async fn test_home_upstream_failure_renders_error() {
    let source = Arc::new(MockArticleSource::new().failing());
    let server = server_with(&source, UNUSED_UPSTREAM);

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    assert!(response.text().contains("Error: Failed to fetch news"));
}

#[tokio::test]
async fn test_date_without_data_renders_apology() {
    let source = Arc::new(MockArticleSource::new());
    let server = server_with(&source, UNUSED_UPSTREAM);

    let response = server.get("/date/20250101").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let html = response.text();
    assert!(html.contains("No Data Available"));
    assert!(!html.contains("Failed to fetch news"));
}

#[tokio::test]
async fn test_invalid_date_never_fetches() {
    let source = Arc::new(MockArticleSource::new());
    let server = server_with(&source, UNUSED_UPSTREAM);

    for raw in ["2025-09-18", "209918", "abcd1234"] {
        let response = server.get(&format!("/date/{raw}")).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert!(response.text().contains("Invalid date format"));
    }
    assert_eq!(source.total_calls(), 0);
}

#[tokio::test]
async fn test_date_page_related_and_modal_views() {
    let source = Arc::new(MockArticleSource::new().with_date(
        "20250918",
        vec![record(5, "five", "2025-09-18"), record(7, "seven", "2025-09-18")],
    ));
    let server = server_with(&source, UNUSED_UPSTREAM);

    let html = server.get("/date/20250918").await.text();
    assert!(html.contains("Trends for September 18, 2025"));
    assert!(html.contains(r#"href="/date/20250918?article=7""#));

    let html = server.get("/date/20250918?article=7").await.text();
    assert!(html.contains(r#"role="dialog""#));

    let html = server.get("/date/20250918?category=tech").await.text();
    assert!(html.contains("2 articles found"));
}

#[tokio::test]
async fn test_dated_detail_uses_day_batch_and_session_cache() {
    let source = Arc::new(MockArticleSource::new().with_date(
        "20250918",
        vec![record(5, "five", "2025-09-18"), record(7, "seven", "2025-09-18")],
    ));
    let server = server_with(&source, UNUSED_UPSTREAM);

    let first = server.get("/article/7?date=20250918").await;
    assert_eq!(first.status_code(), StatusCode::OK);
    assert!(first.text().contains("seven"));
    let cookie = session_cookie(&first);

    let second = server
        .get("/article/7?date=20250918")
        .add_header(header::COOKIE, cookie)
        .await;
    assert!(second.text().contains("seven"));
    assert!(second.headers().get(header::SET_COOKIE).is_none());

    assert_eq!(source.by_id_calls(), 0);
    assert_eq!(source.by_date_calls(), 1);
}

#[tokio::test]
async fn test_detail_not_found_and_bad_id() {
    let source = Arc::new(MockArticleSource::new());
    let server = server_with(&source, UNUSED_UPSTREAM);

    let response = server.get("/article/42").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert!(response.text().contains("Article not found"));

    let response = server.get("/article/forty-two").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(source.by_id_calls(), 1);
}

#[tokio::test]
async fn test_scroll_offset_restored_once() {
    let source = Arc::new(
        MockArticleSource::new().with_latest(vec![record(1, "Harvest moon", "2025-09-18")]),
    );
    let server = server_with(&source, UNUSED_UPSTREAM);

    let cookie = session_cookie(&server.get("/").await);

    let beacon = server
        .post("/api/navigation/departure")
        .add_header(header::COOKIE, cookie.clone())
        .json(&json!({"path": "/", "offsetY": 1200}))
        .await;
    assert_eq!(beacon.status_code(), StatusCode::NO_CONTENT);

    let back = server.get("/").add_header(header::COOKIE, cookie.clone()).await;
    assert!(back.text().contains(r#"data-restore-scroll="1200""#));

    let again = server.get("/").add_header(header::COOKIE, cookie).await;
    assert!(!again.text().contains("data-restore-scroll"));
}

#[tokio::test]
async fn test_cookieless_reads_do_not_register_sessions() {
    let source = Arc::new(
        MockArticleSource::new().with_latest(vec![record(1, "Harvest moon", "2025-09-18")]),
    );
    let sessions = SessionRegistry::in_memory(Duration::from_secs(60));
    let server = server_with_sessions(&source, UNUSED_UPSTREAM, sessions.clone());

    for _ in 0..50 {
        let response = server.get("/").await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
    assert_eq!(sessions.active_sessions().await, 0);

    let cookie = session_cookie(&server.get("/article/1").await);
    assert_eq!(sessions.active_sessions().await, 1);

    server.get("/").add_header(header::COOKIE, cookie).await;
    assert_eq!(sessions.active_sessions().await, 1);
}

#[tokio::test]
async fn test_back_control_follows_internal_navigation() {
    let source = Arc::new(MockArticleSource::new().with_latest(vec![record(1, "Harvest moon", "2025-09-18")]));
    let server = server_with(&source, UNUSED_UPSTREAM);
    let back_button = r#"<button type="button" data-action="back" class="mb-6"#;

    let direct = server.get("/article/1").await;
    assert!(!direct.text().contains(back_button));
    let cookie = session_cookie(&direct);

    server
        .post("/api/navigation/departure")
        .add_header(header::COOKIE, cookie.clone())
        .json(&json!({"path": "/", "offsetY": 0}))
        .await;

    let followed = server.get("/article/1").add_header(header::COOKIE, cookie).await;
    assert!(followed.text().contains(back_button));
}

#[tokio::test]
async fn test_departure_rejects_absolute_path() {
    let source = Arc::new(MockArticleSource::new());
    let server = server_with(&source, UNUSED_UPSTREAM);

    let response = server
        .post("/api/navigation/departure")
        .json(&json!({"path": "https://elsewhere.example/", "offsetY": 10}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<serde_json::Value>()["code"], 400);
}

#[tokio::test]
async fn test_article_body_script_links_are_not_clickable() {
    let mut tricky = record(9, "Tricky", "2025-09-18");
    tricky.news = Some("[click](java&#9;script:alert(document.cookie)) and [safe](https://example.com)".to_string());
    let source = Arc::new(MockArticleSource::new().with_latest(vec![tricky]));
    let server = server_with(&source, UNUSED_UPSTREAM);

    let html = server.get("/article/9").await.text();
    assert!(!html.contains("script:alert"));
    assert!(html.contains(r#"href="https://example.com""#));
}

#[tokio::test]
async fn test_proxy_article_404_shape() {
    let mut upstream = Server::new_async().await;
    upstream
        .mock("GET", "/article/99")
        .with_status(404)
        .with_body(r#"{"detail": "missing"}"#)
        .create_async()
        .await;
    let server = server_with(&Arc::new(MockArticleSource::new()), &upstream.url());

    let response = server.get("/api/article/99").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({"code": 404, "error": "Article not found"})
    );
}

#[tokio::test]
async fn test_proxy_passes_success_through() {
    let body = r#"{"records":[{"id":1,"keywords":"moon"}]}"#;
    let mut upstream = Server::new_async().await;
    upstream
        .mock("GET", "/latest")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;
    let server = server_with(&Arc::new(MockArticleSource::new()), &upstream.url());

    let response = server.get("/api/latest").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), body);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL),
        Some(&HeaderValue::from_static("no-store"))
    );
}

#[tokio::test]
async fn test_proxy_failure_uses_upstream_message() {
    let mut upstream = Server::new_async().await;
    upstream
        .mock("GET", "/date/20250918")
        .with_status(503)
        .with_body(r#"{"error": "maintenance"}"#)
        .create_async()
        .await;
    let server = server_with(&Arc::new(MockArticleSource::new()), &upstream.url());

    let response = server.get("/api/date/20250918").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({"code": 503, "error": "maintenance"})
    );
}

#[tokio::test]
async fn test_proxy_rejects_bad_date_without_upstream_call() {
    let mut upstream = Server::new_async().await;
    let mock = upstream
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let server = server_with(&Arc::new(MockArticleSource::new()), &upstream.url());

    let response = server.get("/api/date/2025-09-18").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<serde_json::Value>()["code"], 400);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_proxy_transport_failure() {
    let server = server_with(&Arc::new(MockArticleSource::new()), UNUSED_UPSTREAM);

    let response = server.get("/api/latest").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>(),
        json!({"code": 500, "error": "Internal server error"})
    );
}

#[tokio::test]
async fn test_health() {
    let server = server_with(&Arc::new(MockArticleSource::new()), UNUSED_UPSTREAM);

    let body = server.get("/health").await.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
