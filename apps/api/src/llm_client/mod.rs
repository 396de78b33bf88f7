/// LLM Client — the single point of entry for all model-service calls.
///
/// ARCHITECTURAL RULE: No other module may call the model service directly.
/// All chat completions MUST go through this module.
///
/// The model name is configuration (`LLM_MODEL`), never a literal at call
/// sites, so the pipeline stays testable against mock services.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model service unavailable after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

/// Bounded retry with exponential backoff and a per-request deadline.
/// Injectable so tests can collapse the delays to near-zero.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// The chat-completion seam between the pipeline and the model service.
/// `LlmClient` is the production implementation; tests substitute
/// deterministic fakes without touching orchestration logic.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends a `system` message, optionally followed by a `user` message,
    /// and returns the model's reply text. An empty reply is returned
    /// as-is — degrading an empty reply is the parser's job, not ours.
    async fn complete(&self, system: &str, user: Option<&str>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// The single LLM client used by all services.
/// Wraps an Ollama-style `/api/chat` endpoint with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    model: String,
    policy: RetryPolicy,
}

impl LlmClient {
    pub fn new(base_url: String, model: String, policy: RetryPolicy) -> Self {
        Self {
            client: Client::builder()
                .timeout(policy.request_timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            model,
            policy,
        }
    }

    /// Makes a chat call with the given ordered messages.
    /// Retries transport failures, 429, and 5xx with exponential backoff;
    /// any other non-2xx fails fast.
    async fn call(&self, messages: Vec<ChatMessage<'_>>) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages,
            stream: false,
        };
        let url = format!("{}/api/chat", self.base_url);

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.policy.max_attempts {
            if attempt > 0 {
                // Exponential backoff: base, 2x base, 4x base, ...
                let delay = self.policy.base_delay * (1u32 << (attempt - 1));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self.client.post(&url).json(&request_body).send().await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Model service returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let chat_response: ChatResponse = response.json().await?;
            let text = chat_response
                .message
                .map(|m| m.content)
                .unwrap_or_default();

            debug!("LLM call succeeded: reply_chars={}", text.len());

            return Ok(text);
        }

        Err(last_error.unwrap_or(LlmError::Exhausted {
            attempts: self.policy.max_attempts,
        }))
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete(&self, system: &str, user: Option<&str>) -> Result<String, LlmError> {
        let mut messages = vec![ChatMessage {
            role: "system",
            content: system,
        }];
        if let Some(user) = user {
            messages.push(ChatMessage {
                role: "user",
                content: user,
            });
        }
        self.call(messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            request_timeout: Duration::from_secs(5),
        }
    }

    fn client_for(server: &mockito::ServerGuard, attempts: u32) -> LlmClient {
        LlmClient::new(server.url(), "phi".to_string(), fast_policy(attempts))
    }

    #[tokio::test]
    async fn test_complete_sends_system_then_user_and_returns_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::PartialJson(json!({
                "model": "phi",
                "stream": false,
                "messages": [
                    {"role": "system", "content": "You summarize."},
                    {"role": "user", "content": "Summarize this."}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": {"role": "assistant", "content": "A summary."}}"#)
            .create_async()
            .await;

        let client = client_for(&server, 1);
        let reply = client
            .complete("You summarize.", Some("Summarize this."))
            .await
            .unwrap();

        assert_eq!(reply, "A summary.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_system_only_call_sends_single_message() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::PartialJson(json!({
                "messages": [{"role": "system", "content": "Summarize this job description: JD"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": {"role": "assistant", "content": "ok"}}"#)
            .create_async()
            .await;

        let client = client_for(&server, 1);
        let reply = client
            .complete("Summarize this job description: JD", None)
            .await
            .unwrap();

        assert_eq!(reply, "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_message_field_is_empty_reply_not_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"done": true}"#)
            .create_async()
            .await;

        let client = client_for(&server, 1);
        let reply = client.complete("system", None).await.unwrap();

        assert_eq!(reply, "");
    }

    #[tokio::test]
    async fn test_server_errors_consume_the_retry_budget() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("upstream down")
            .expect(3)
            .create_async()
            .await;

        let client = client_for(&server, 3);
        let err = client.complete("system", None).await.unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 500, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_errors_fail_fast_without_retry() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body("model not found")
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server, 3);
        let err = client.complete("system", None).await.unwrap_err();

        assert!(matches!(err, LlmError::Api { status: 404, .. }));
        mock.assert_async().await;
    }
}
