//! `POST /api/generate-essay` through the axum router

use super::mock_server::{MockServerFixture, API_KEY};
use ark_client::essay::{router, AppState};
use ark_client::ProvisionOptions;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

fn app(api_key: Option<&str>, base_url: &str) -> Router {
    let options = ProvisionOptions::default()
        .base_url(base_url)
        .max_retries(1)
        .retry_delay(Duration::from_millis(1));
    router(AppState::new(api_key.map(str::to_string), options))
}

async fn post(app: Router, body: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-essay")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_get_is_method_not_allowed() {
    let resp = app(Some(API_KEY), "http://127.0.0.1:9")
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/generate-essay")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unparsable_body_is_bad_request() {
    let (status, body) = post(app(Some(API_KEY), "http://127.0.0.1:9"), "{topic:").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_missing_topic_is_bad_request() {
    for payload in [r#"{}"#, r#"{"topic":""}"#, r#"{"wordCount":500}"#] {
        let (status, body) = post(app(Some(API_KEY), "http://127.0.0.1:9"), payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", payload);
        assert_eq!(body["error"], "Topic is required");
    }
}

#[tokio::test]
async fn test_missing_api_key_short_circuits() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_error_response(500, "{}", 0).await;

    let (status, body) = post(app(None, &fixture.base_url), r#"{"topic":"数字政府"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "ARK_API_KEY not configured");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_successful_generation() {
    let mut fixture = MockServerFixture::new().await;
    let content = "数字政府建设\n\n  推进数字政府建设 意义重大。";
    let upstream = json!({
        "choices": [{"message": {"role": "assistant", "content": content, "reasoning_content": "先立意"}}],
        "usage": {"prompt_tokens": 120, "completion_tokens": 300, "total_tokens": 420}
    });
    let mock = fixture
        .mock_matching_body(
            json!({"model": "deepseek-r1-250528", "temperature": 0.7, "max_tokens": 3000}),
            &upstream.to_string(),
        )
        .await;

    let (status, body) = post(
        app(Some(API_KEY), &fixture.base_url),
        r#"{"topic":"数字政府","essayType":"analysis","wordCount":2000}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["content"], content);
    assert_eq!(body["reasoning"], "先立意");
    assert_eq!(body["wordCount"], 19);
    assert_eq!(body["usage"]["totalTokens"], 420);
    assert!(body["generatedAt"].as_str().unwrap().ends_with('Z'));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_errors_map_by_kind() {
    let cases = [
        (401usize, 1usize, StatusCode::UNAUTHORIZED, "Invalid API key"),
        (
            429,
            2,
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded, please try again later",
        ),
        (400, 1, StatusCode::BAD_REQUEST, "Invalid request parameters"),
        (500, 2, StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    ];

    for (upstream, hits, expected, message) in cases {
        let mut fixture = MockServerFixture::new().await;
        let mock = fixture
            .mock_error_response(upstream, r#"{"error":{"message":"upstream said no"}}"#, hits)
            .await;

        let (status, body) = post(
            app(Some(API_KEY), &fixture.base_url),
            r#"{"topic":"乡村振兴"}"#,
        )
        .await;

        assert_eq!(status, expected, "upstream {}", upstream);
        assert_eq!(body["error"], message);
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_health() {
    let resp = app(None, "http://127.0.0.1:9")
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
