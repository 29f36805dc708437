//! HTTP client for the Claude Messages API.
//!
//! Thin boundary: send one system + user prompt pair, get back the response
//! text and token usage. The API key is explicit configuration passed in at
//! construction (or read once by [`ClaudeClient::from_env`]); nothing here
//! reads the environment ad hoc.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default model, matching the annotation task this tool ships with.
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-latest";

/// Messages API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("ANTHROPIC_API_KEY is not set")]
    MissingApiKey,

    /// Invalid or rejected credentials (HTTP 401/403).
    #[error("authentication failed (status {status}): {message}")]
    Authentication { status: u16, message: String },

    /// Network failure, timeout, or rate limiting. The caller may retry;
    /// this client never does.
    #[error("transient API failure: {0}")]
    Transient(String),

    /// Any other non-2xx response, or an undecodable success body.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    /// Anthropic API key.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// API base URL (override for test doubles).
    pub base_url: String,
    /// Completion token cap per request.
    pub max_tokens: u32,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClaudeConfig {
    /// Config with defaults for everything except the key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 4000,
            timeout: Duration::from_secs(300),
        }
    }
}

/// Token usage reported by the API for one request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    /// Input plus output tokens.
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// One completed model call.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Concatenated text blocks of the response.
    pub text: String,
    /// Token usage for the request.
    pub usage: TokenUsage,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: TokenUsage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Claude Messages API client.
#[derive(Debug)]
pub struct ClaudeClient {
    http: reqwest::Client,
    config: ClaudeConfig,
}

impl ClaudeClient {
    /// Create a client from explicit configuration.
    pub fn new(config: ClaudeConfig) -> Result<Self, ClientError> {
        if config.api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Transient(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Create a client from `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or(ClientError::MissingApiKey)?;
        Self::new(ClaudeConfig::new(api_key))
    }

    /// Model this client sends requests to.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one system + user prompt pair and return the response.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<Completion, ClientError> {
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Transient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(match status.as_u16() {
                401 | 403 => ClientError::Authentication {
                    status: status.as_u16(),
                    message,
                },
                // 429 = rate limited, 529 = API overloaded
                429 | 529 => {
                    ClientError::Transient(format!("status {}: {}", status.as_u16(), message))
                }
                _ => ClientError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body: MessagesResponse = response.json().await.map_err(|e| ClientError::Api {
            status: status.as_u16(),
            message: format!("unexpected response body: {e}"),
        })?;

        let text = body
            .content
            .into_iter()
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        Ok(Completion {
            text,
            usage: body.usage,
        })
    }
}

/// Pull the API's error message out of a failure body, falling back to the
/// raw text when it is not the documented shape.
async fn error_message(response: reqwest::Response) -> String {
    let raw = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&raw) {
        Ok(parsed) => parsed.error.message,
        Err(_) if raw.is_empty() => "no error body".to_string(),
        Err(_) => raw,
    }
}
