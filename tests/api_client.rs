use mockito::Server;
use pretty_assertions::assert_eq;
use serde_json::json;

use trending_stories::api::{ApiConfig, ArticleSource, FetchError, HttpArticleClient};
use trending_stories::article::AUTHOR;
use trending_stories::resolve::DateParam;

fn client_for(server: &Server) -> HttpArticleClient {
    HttpArticleClient::new(ApiConfig::new(server.url()).unwrap()).unwrap()
}

fn record(id: i64, keywords: &str, ingested: &str) -> serde_json::Value {
    json!({
        "id": id,
        "news": format!("## {keywords}\n\nBody for {id}"),
        "date": "2025-09-18 08:00:00",
        "keywords": keywords,
        "image": {"file_name": format!("{id}.jpg"), "url": format!("https://img.example/{id}.jpg")},
        "tag": ["Tech", "Science"],
        "serpapi_data_date": ingested,
    })
}

#[tokio::test]
async fn test_latest_keeps_only_newest_ingestion_date() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/latest")
        .match_header("cache-control", "no-cache")
        .match_header("pragma", "no-cache")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"records": [
                record(1, "first", "2025-09-18"),
                record(2, "second", "2025-09-17"),
                record(3, "third", "2025-09-18"),
            ]})
            .to_string(),
        )
        .create_async()
        .await;

    let articles = client_for(&server).fetch_latest().await.unwrap();
    mock.assert_async().await;

    let ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(articles[0].title, "first");
    assert_eq!(articles[0].category, "Tech");
    assert_eq!(articles[0].author, AUTHOR);
    assert_eq!(articles[0].image_url, "https://img.example/1.jpg");
}

#[tokio::test]
async fn test_latest_empty_batch() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/latest")
        .with_status(200)
        .with_body(r#"{"records": []}"#)
        .create_async()
        .await;

    let articles = client_for(&server).fetch_latest().await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_by_id_404_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/article/99")
        .with_status(404)
        .with_body(r#"{"code": 404, "error": "Article not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server).fetch_by_id(99).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_by_id_success() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/article/5")
        .with_status(200)
        .with_body(record(5, "five", "2025-09-18").to_string())
        .create_async()
        .await;

    let article = client_for(&server).fetch_by_id(5).await.unwrap();
    assert_eq!(article.id, 5);
    assert_eq!(article.title, "five");
}

#[tokio::test]
async fn test_date_no_data_payload_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/date/20250101")
        .with_status(200)
        .with_body(r#"{"code": 404, "error": "No data found for the requested date"}"#)
        .create_async()
        .await;

    let day = DateParam::parse("20250101").unwrap();
    let err = client_for(&server).fetch_by_date(&day).await.unwrap_err();
    assert!(matches!(err, FetchError::NotFound(_)));
}

#[tokio::test]
async fn test_date_without_records_is_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/date/20250918")
        .with_status(200)
        .with_body(r#"{"date": "20250918"}"#)
        .create_async()
        .await;

    let day = DateParam::parse("20250918").unwrap();
    let articles = client_for(&server).fetch_by_date(&day).await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_server_error_is_transport_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/date/20250918")
        .with_status(500)
        .with_body(r#"{"error": "database unavailable"}"#)
        .create_async()
        .await;

    let day = DateParam::parse("20250918").unwrap();
    let err = client_for(&server).fetch_by_date(&day).await.unwrap_err();
    match err {
        FetchError::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database unavailable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_json_is_decode_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/latest")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let err = client_for(&server).fetch_latest().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}
