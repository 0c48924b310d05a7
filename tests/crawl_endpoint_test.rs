// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

// End-to-end tests against an in-process stand-in for the crawl API.
// The stub answers each POST with whatever the test's closure returns and
// records every payload it received.

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use crawl_relay::app::{create_router, AppState};
use crawl_relay::models::crawler::{CrawlResponseItem, ErrorResponse};
use crawl_relay::services::crawler::CrawlApiClient;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

type Received = Arc<Mutex<Vec<Value>>>;

async fn spawn_upstream<F>(respond: F) -> (String, Received)
where
    F: Fn(&Value) -> (StatusCode, String) + Send + Sync + 'static,
{
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);
    let seen = received.clone();

    let stub = Router::new().route(
        "/md",
        post(move |body: Bytes| {
            let respond = respond.clone();
            let seen = seen.clone();
            async move {
                let payload: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                let reply = respond(&payload);
                seen.lock().unwrap().push(payload);
                reply
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });

    (format!("http://{}/md", addr), received)
}

async fn post_crawl(endpoint: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let app = create_router(AppState::new(CrawlApiClient::new(endpoint).unwrap()));
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/crawl")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn ok(body: Value) -> (StatusCode, String) {
    (StatusCode::OK, body.to_string())
}

#[tokio::test]
async fn test_single_url_falls_back_to_url_list() {
    let (endpoint, received) = spawn_upstream(|payload| {
        if payload.get("url").is_some() {
            return (StatusCode::UNPROCESSABLE_ENTITY, "url field not supported".to_string());
        }
        ok(json!({
            "results": [{
                "url": "https://example.com",
                "markdown": {"fit_markdown": "Hello"}
            }]
        }))
    })
    .await;

    let (status, body) = post_crawl(&endpoint, json!({"url": "https://example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    let items: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        items,
        json!([{"content": "Hello", "metadata": {"source": "https://example.com"}}])
    );

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0]["url"], "https://example.com");
    assert_eq!(received[1]["urls"], json!(["https://example.com"]));
    assert_eq!(received[0]["crawlerRunConfig"], received[1]["crawlerRunConfig"]);
    assert_eq!(received[1]["browserConfig"]["text_mode"], true);
}

#[tokio::test]
async fn test_first_success_short_circuits() {
    let (endpoint, received) =
        spawn_upstream(|_| ok(json!([{"url": "https://example.com", "content": "body"}]))).await;

    let (status, body) = post_crawl(&endpoint, json!({"url": "https://example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    let items: Vec<CrawlResponseItem> = serde_json::from_slice(&body).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "body");

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].get("url").is_some());
}

#[tokio::test]
async fn test_multiple_urls_sent_as_single_list_payload() {
    let (endpoint, received) = spawn_upstream(|_| {
        ok(json!({"data": [
            {"url": "https://a.example", "content": "A"},
            "ignored",
            {"url": "https://b.example", "page_content": "B"}
        ]}))
    })
    .await;

    let (status, body) = post_crawl(
        &endpoint,
        json!({"urls": ["https://a.example", ""], "url": "https://b.example"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let items: Vec<CrawlResponseItem> = serde_json::from_slice(&body).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].content, "A");
    assert_eq!(items[0].metadata["source"], "https://a.example");
    assert_eq!(items[1].content, "B");
    assert_eq!(items[1].metadata["source"], "https://b.example");

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0]["urls"],
        json!(["https://a.example", "https://b.example"])
    );
    assert!(received[0].get("url").is_none());
}

#[tokio::test]
async fn test_last_failure_is_reported_when_all_candidates_fail() {
    let (endpoint, received) = spawn_upstream(|payload| {
        if payload.get("url").is_some() {
            (StatusCode::INTERNAL_SERVER_ERROR, "single shape failed".to_string())
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "list shape failed".to_string())
        }
    })
    .await;

    let (status, body) = post_crawl(&endpoint, json!({"url": "https://example.com"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "bad gateway");
    assert_eq!(
        error.detail.as_deref(),
        Some("crawl api returned status 503: list shape failed")
    );
    assert_eq!(received.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_long_error_body_is_truncated_in_detail() {
    let (endpoint, _) = spawn_upstream(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("\n  {}  \n", "x".repeat(1000)),
        )
    })
    .await;

    let (status, body) = post_crawl(&endpoint, json!({"urls": ["a", "b"]})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    let detail = error.detail.unwrap();
    let expected = format!("crawl api returned status 400: {}...", "x".repeat(300));
    assert_eq!(detail, expected);
}

#[tokio::test]
async fn test_non_json_success_body_is_bad_gateway() {
    let (endpoint, _) =
        spawn_upstream(|_| (StatusCode::OK, "<html>not json</html>".to_string())).await;

    let (status, body) = post_crawl(&endpoint, json!({"urls": ["a", "b"]})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        error.detail.as_deref(),
        Some("invalid json received from crawl api")
    );
}

#[tokio::test]
async fn test_scalar_payload_is_malformed_structure() {
    let (endpoint, _) = spawn_upstream(|_| ok(json!("queued"))).await;

    let (status, body) = post_crawl(&endpoint, json!({"url": "https://example.com"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "bad gateway");
    assert_eq!(
        error.detail.as_deref(),
        Some("invalid json structure received from crawl api")
    );
}

#[tokio::test]
async fn test_empty_result_list_is_empty_success() {
    let (endpoint, _) = spawn_upstream(|_| ok(json!({"results": []}))).await;

    let (status, body) = post_crawl(&endpoint, json!({"url": "https://example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    let items: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(items, json!([]));
}

#[tokio::test]
async fn test_bare_object_and_metadata_filtering() {
    let (endpoint, _) = spawn_upstream(|_| {
        ok(json!({
            "url": "https://example.com",
            "markdown": "# Title",
            "metadata": {
                "source": "upstream",
                "title": "Example",
                "status_code": 200,
                "description": ""
            }
        }))
    })
    .await;

    let (status, body) = post_crawl(&endpoint, json!({"url": "https://example.com"})).await;

    assert_eq!(status, StatusCode::OK);
    let items: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        items,
        json!([{
            "content": "# Title",
            "metadata": {"source": "https://example.com", "title": "Example"}
        }])
    );
}

#[tokio::test]
async fn test_record_without_content_yields_empty_item() {
    let (endpoint, _) = spawn_upstream(|_| ok(json!([{"success": false}]))).await;

    let (status, body) = post_crawl(&endpoint, json!({"urls": ["a", "b"]})).await;

    assert_eq!(status, StatusCode::OK);
    let items: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(items, json!([{"content": "", "metadata": {}}]));
}

#[tokio::test]
async fn test_unreachable_upstream_reports_transport_failure() {
    // Bind then drop a listener so the port is known to be closed
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, body) = post_crawl(
        &format!("http://{}/md", addr),
        json!({"url": "https://example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.error, "bad gateway");
    let detail = error.detail.unwrap();
    assert!(!detail.starts_with("crawl api returned status"));
    assert!(
        detail.to_lowercase().contains("connect"),
        "detail should describe the connection failure: {}",
        detail
    );
}

#[tokio::test]
async fn test_payload_posted_as_json() {
    let content_types: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let seen = content_types.clone();

    let stub = Router::new().route(
        "/md",
        post(move |headers: HeaderMap| {
            let seen = seen.clone();
            async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                seen.lock().unwrap().push(content_type);
                ok(json!([]))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });

    let (status, _) = post_crawl(
        &format!("http://{}/md", addr),
        json!({"urls": ["a", "b"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(*content_types.lock().unwrap(), vec!["application/json"]);
}
