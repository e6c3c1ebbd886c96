use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument, warn};

use crate::config::settings::LlmConfig;
use crate::error::AppError;
use crate::generation::{CompletionProvider, ProviderError};
use crate::utils::http_client::new_api_client;

use super::structs::*;

/// Client for OpenAI-compatible chat-completions endpoints.
#[derive(Debug)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout_secs: u64,
    request_id_counter: AtomicU64,
}

impl OpenAIClient {
    pub fn new(config: &LlmConfig) -> Result<Self, AppError> {
        let client = new_api_client(std::time::Duration::from_secs(config.request_timeout_secs))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            timeout_secs: config.request_timeout_secs,
            request_id_counter: AtomicU64::new(0),
        })
    }

    fn next_request_id(&self) -> u64 {
        self.request_id_counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &OpenAIChatRequest,
    ) -> Result<OpenAIChatResponse, ProviderError> {
        let request_id = self.next_request_id();
        let url = format!("{}/chat/completions", self.base_url);
        debug!(request_id, url = %url, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("X-Request-ID", request_id.to_string())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout_secs)
                } else {
                    ProviderError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response".to_string());
            warn!(request_id, status = %status, "Chat completion rejected by provider");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<OpenAIChatResponse>()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl CompletionProvider for OpenAIClient {
    async fn complete(&self, prompt: &str, max_output_tokens: u32) -> Result<String, ProviderError> {
        let request = OpenAIChatRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage::user(prompt)],
            max_tokens: Some(max_output_tokens),
            temperature: None,
            user: None,
        };

        let response = self.chat_completion(&request).await?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            ProviderError::MalformedResponse("response contained no choices".to_string())
        })?;

        Ok(choice.message.content.unwrap_or_default())
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn config(base_url: String) -> LlmConfig {
        LlmConfig {
            api_key: "sk-test".to_string(),
            base_url,
            model: "gpt-test".to_string(),
            request_timeout_secs: 5,
            body_max_tokens: 200,
            title_max_tokens: 30,
        }
    }

    fn completion_body(content: serde_json::Value) -> String {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-test",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_complete_sends_prompt_and_ceiling() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-test",
                "max_tokens": 30,
                "messages": [{"role": "user", "content": "Name this task"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(json!("\"Garden Letters\"")))
            .create_async()
            .await;

        let client = OpenAIClient::new(&config(format!("{}/v1/", server.url()))).unwrap();
        let text = client.complete("Name this task", 30).await.unwrap();

        assert_eq!(text, "\"Garden Letters\"");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_null_content_is_empty_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(serde_json::Value::Null))
            .create_async()
            .await;

        let client = OpenAIClient::new(&config(format!("{}/v1", server.url()))).unwrap();
        assert_eq!(client.complete("prompt", 200).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"quota exceeded"}}"#)
            .create_async()
            .await;

        let client = OpenAIClient::new(&config(format!("{}/v1", server.url()))).unwrap();
        let err = client.complete("prompt", 200).await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_malformed_payloads() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"x","model":"gpt-test","choices":[]}"#)
            .create_async()
            .await;

        let client = OpenAIClient::new(&config(format!("{}/v1", server.url()))).unwrap();
        let err = client.complete("prompt", 200).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));

        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = OpenAIClient::new(&config(format!("{}/v1", server.url()))).unwrap();
        let err = client.complete("prompt", 200).await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections
        let client = OpenAIClient::new(&config("http://127.0.0.1:9/v1".to_string())).unwrap();
        let err = client.complete("prompt", 200).await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_) | ProviderError::Timeout(_)));
    }
}
