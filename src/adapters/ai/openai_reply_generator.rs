//! OpenAI Reply Generator - ReplyGenerator over OpenAI's chat completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_timeout(Duration::from_secs(5));
//!
//! let generator = OpenAIReplyGenerator::new(config);
//! ```
//!
//! A single attempt is made per reply. The caller already races the call
//! against its own deadline and falls back to canned bait, so retrying
//! here would only burn that budget.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::session::{Turn, TurnRole};
use crate::ports::{ReplyError, ReplyGenerator, ReplyRequest};

/// Configuration for the OpenAI reply generator.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-backed persona reply generator.
pub struct OpenAIReplyGenerator {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIReplyGenerator {
    /// Creates a generator with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "HTTP client builder failed, using defaults");
                Client::new()
            });

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts a reply request to OpenAI's chat format.
    ///
    /// Sender turns become `user` messages and engine turns become
    /// `assistant` messages, so the model speaks as the persona.
    fn to_openai_request(&self, request: &ReplyRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.history.len() + 1);
        messages.push(OpenAIMessage {
            role: "system".to_string(),
            content: request.persona.system_prompt(),
        });
        messages.extend(request.history.iter().map(to_openai_message));

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: Some(request.persona.max_tokens),
            temperature: Some(request.persona.temperature),
        }
    }

    async fn send_request(&self, request: &ReplyRequest) -> Result<Response, ReplyError> {
        let openai_request = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReplyError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    ReplyError::network(format!("Connection failed: {}", e))
                } else {
                    ReplyError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(response: Response) -> Result<Response, ReplyError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(Self::status_error(status.as_u16(), &error_body))
    }

    fn status_error(status: u16, error_body: &str) -> ReplyError {
        match status {
            401 | 403 => ReplyError::AuthenticationFailed,
            429 => ReplyError::unavailable(format!("Rate limited: {}", error_body)),
            500..=599 => {
                ReplyError::unavailable(format!("Server error {}: {}", status, error_body))
            }
            _ => ReplyError::network(format!("Unexpected status {}: {}", status, error_body)),
        }
    }

    async fn parse_response(response: Response) -> Result<String, ReplyError> {
        let response = Self::handle_response_status(response).await?;

        let body: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| ReplyError::parse(format!("Failed to parse response: {}", e)))?;

        extract_reply(body)
    }
}

fn to_openai_message(turn: &Turn) -> OpenAIMessage {
    let role = match turn.role {
        TurnRole::Sender => "user",
        TurnRole::Engine => "assistant",
    };
    OpenAIMessage {
        role: role.to_string(),
        content: turn.text.clone(),
    }
}

fn extract_reply(body: OpenAIResponse) -> Result<String, ReplyError> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ReplyError::parse("No choices in response"))?;

    let text = choice.message.content.trim().to_string();
    if text.is_empty() {
        return Err(ReplyError::EmptyReply);
    }
    Ok(text)
}

#[async_trait]
impl ReplyGenerator for OpenAIReplyGenerator {
    async fn generate(&self, request: ReplyRequest) -> Result<String, ReplyError> {
        let response = self.send_request(&request).await?;
        Self::parse_response(response).await
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::persona::{ConversationMetadata, PersonaConfig};

    fn generator() -> OpenAIReplyGenerator {
        OpenAIReplyGenerator::new(OpenAIConfig::new("test-key"))
    }

    fn sms_request(history: Vec<Turn>) -> ReplyRequest {
        let metadata = ConversationMetadata {
            channel: Some("SMS".to_string()),
            language: None,
            locale: Some("IN".to_string()),
        };
        let persona = PersonaConfig::from_metadata(&metadata, 0.7);
        ReplyRequest::new(history, persona, metadata)
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com")
            .with_timeout(Duration::from_secs(2));

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = OpenAIConfig::new("sk-very-secret");
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let generator = OpenAIReplyGenerator::new(
            OpenAIConfig::new("k").with_base_url("http://localhost:9000/v1/"),
        );
        assert_eq!(
            generator.completions_url(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn request_maps_roles_and_prepends_persona() {
        let request = sms_request(vec![
            Turn::sender("Your account is blocked"),
            Turn::engine("Oh no, what happened sir?"),
            Turn::sender("Pay to fraud@ybl"),
        ]);

        let body = generator().to_openai_request(&request);

        let roles: Vec<_> = body.messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
        assert!(body.messages[0].content.contains("at most 25 words"));
        assert_eq!(body.max_tokens, Some(80));
        assert_eq!(body.model, "gpt-4o-mini");
    }

    #[test]
    fn status_errors_are_mapped() {
        assert_eq!(
            OpenAIReplyGenerator::status_error(401, ""),
            ReplyError::AuthenticationFailed
        );
        assert!(matches!(
            OpenAIReplyGenerator::status_error(503, "down"),
            ReplyError::Unavailable(_)
        ));
        assert_eq!(
            OpenAIReplyGenerator::status_error(429, "slow down"),
            ReplyError::Unavailable("Rate limited: slow down".to_string())
        );
    }

    #[test]
    fn extract_reply_trims_text() {
        let body: OpenAIResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Which UPI app sir?  "}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_reply(body).unwrap(), "Which UPI app sir?");
    }

    #[test]
    fn extract_reply_rejects_blank_and_missing_choices() {
        let blank: OpenAIResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"   "}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_reply(blank), Err(ReplyError::EmptyReply));

        let none: OpenAIResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_reply(none), Err(ReplyError::Parse(_))));
    }
}
