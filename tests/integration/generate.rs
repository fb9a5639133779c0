//! Text-generation facade over a mock HTTP server

use super::mock_server::{minimal_success_body, MockServerFixture};
use super::scripted::{ok, ScriptedTransport};
use ark_client::{ArkClient, ErrorKind, GenerateOptions, MessageRole};
use serde_json::json;

#[tokio::test]
async fn test_generate_text_minimal_response() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_matching_body(
            json!({
                "model": "model-x",
                "messages": [{"role": "user", "content": "hello"}],
                "temperature": 0.7,
                "max_tokens": 2000
            }),
            &minimal_success_body("hi"),
        )
        .await;

    let client = fixture.client(3);
    let result = client
        .generate_text("model-x", "hello", &GenerateOptions::new())
        .await
        .unwrap();

    assert_eq!(result.content, "hi");
    assert_eq!(result.reasoning, None);
    assert_eq!(result.usage.prompt_tokens, 1);
    assert_eq!(result.usage.completion_tokens, 1);
    assert_eq!(result.usage.total_tokens, 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_text_returns_reasoning() {
    let mut fixture = MockServerFixture::new().await;
    let body = json!({
        "id": "chatcmpl-9",
        "object": "chat.completion",
        "created": 1720000000,
        "model": "deepseek-r1-250528",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "essay", "reasoning_content": "plan"},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
    });
    let mock = fixture.mock_json_response(&body.to_string(), 1).await;

    let result = fixture
        .client(0)
        .generate_text("deepseek-r1-250528", "topic", &GenerateOptions::new())
        .await
        .unwrap();

    assert_eq!(result.content, "essay");
    assert_eq!(result.reasoning.as_deref(), Some("plan"));
    assert_eq!(result.usage.total_tokens, 30);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_content_is_an_error() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response(&minimal_success_body(""), 1)
        .await;

    let err = fixture
        .client(3)
        .generate_text("model-x", "hello", &GenerateOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EmptyContent);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_choices_is_an_error() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_json_response(r#"{"usage":{"prompt_tokens":1,"completion_tokens":0,"total_tokens":1}}"#, 1)
        .await;

    let err = fixture
        .client(3)
        .generate_text("model-x", "hello", &GenerateOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EmptyContent);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_system_prompt_precedes_user_message() {
    let transport = ScriptedTransport::always(ok("fine"));
    let client = ArkClient::builder()
        .api_key("k")
        .base_url("http://127.0.0.1:9/api/v3")
        .transport(transport.clone())
        .build()
        .unwrap();

    client
        .generate_text(
            "model-x",
            "hello",
            &GenerateOptions::new()
                .system_prompt("be formal")
                .temperature(0.3)
                .max_tokens(64),
        )
        .await
        .unwrap();
    client
        .generate_text("model-x", "again", &GenerateOptions::new())
        .await
        .unwrap();

    let seen = transport.requests();
    assert_eq!(seen.len(), 2);

    let first = &seen[0];
    assert_eq!(first.messages.len(), 2);
    assert_eq!(first.messages[0].role, MessageRole::System);
    assert_eq!(first.messages[0].content, "be formal");
    assert_eq!(first.messages[1].role, MessageRole::User);
    assert_eq!(first.temperature, Some(0.3));
    assert_eq!(first.max_tokens, Some(64));

    let second = &seen[1];
    assert_eq!(second.messages.len(), 1);
    assert_eq!(second.messages[0].role, MessageRole::User);
    assert_eq!(second.messages[0].content, "again");
}
