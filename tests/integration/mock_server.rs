//! Mock HTTP server setup for integration tests

use ark_client::ArkClient;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::time::Duration;

pub const API_KEY: &str = "test-key";
pub const COMPLETIONS_PATH: &str = "/api/v3/chat/completions";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = format!("{}/api/v3", server.url());
        Self { server, base_url }
    }

    /// Client pointed at the mock server with a short backoff.
    pub fn client(&self, max_retries: u32) -> ArkClient {
        ArkClient::builder()
            .api_key(API_KEY)
            .base_url(&self.base_url)
            .max_retries(max_retries)
            .retry_delay(Duration::from_millis(1))
            .request_timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build client")
    }

    /// Create a mock for a successful JSON response
    pub async fn mock_json_response(&mut self, body: &str, hits: usize) -> Mock {
        self.server
            .mock("POST", COMPLETIONS_PATH)
            .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(hits)
            .create_async()
            .await
    }

    /// Create a mock for an error response
    pub async fn mock_error_response(&mut self, status: usize, error_body: &str, hits: usize) -> Mock {
        self.server
            .mock("POST", COMPLETIONS_PATH)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(error_body)
            .expect(hits)
            .create_async()
            .await
    }

    /// Mock that only answers when the body matches `partial`.
    pub async fn mock_matching_body(
        &mut self,
        partial: serde_json::Value,
        body: &str,
    ) -> Mock {
        self.server
            .mock("POST", COMPLETIONS_PATH)
            .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
            .match_header("content-type", Matcher::Regex("application/json".into()))
            .match_body(Matcher::PartialJson(partial))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(1)
            .create_async()
            .await
    }
}

pub fn minimal_success_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{"message": {"content": content}}],
        "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    })
    .to_string()
}
