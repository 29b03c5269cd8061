//! OpenAI-compatible chat completion client for socratic-forge.
//!
//! Groq, LiteLLM proxies and most hosted inference services expose the same
//! `/chat/completions` shape, so a single client covers all of them.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::LlmError;

/// Base URL of Groq's OpenAI-compatible API.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Model used for dataset generation unless overridden.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// One chat message, with the role spelled as the wire expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    fn with_role(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role("assistant", content)
    }
}

/// Chat completion request. Serializes directly as the request body; unset
/// sampling fields are left to the server's defaults.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Completion returned by a provider.
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

impl GenerationResponse {
    /// Text of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub index: u32,
    pub message: Message,
    /// "stop", "length", ... Empty when the server omits it.
    pub finish_reason: String,
}

/// Token accounting. All zero when the server omits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Anything that can turn a [`GenerationRequest`] into a completion.
///
/// The dataset generator only talks to this trait, so tests swap in scripted
/// implementations.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError>;
}

/// HTTP client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct LiteLlmClient {
    endpoint: String,
    api_key: Option<String>,
    http_client: Client,
}

impl LiteLlmClient {
    /// Creates a client for `api_base` (e.g. "http://localhost:4000/v1").
    /// A trailing slash is ignored. Without a key no `Authorization` header is sent.
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        let api_base = api_base.into();
        Self {
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            api_key,
            http_client: build_http_client(),
        }
    }

    /// Client for Groq's hosted API.
    pub fn groq(api_key: String) -> Self {
        Self::new(GROQ_API_BASE, Some(api_key))
    }
}

fn build_http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client - system TLS configuration error")
}

// Wire shapes. Servers disagree on which fields may be null or missing.

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    #[serde(default)]
    index: u32,
    message: WireMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: WireErrorMessage,
}

#[derive(Debug, Deserialize)]
struct WireErrorMessage {
    message: String,
}

impl From<WireResponse> for GenerationResponse {
    fn from(wire: WireResponse) -> Self {
        let choices = wire
            .choices
            .into_iter()
            .map(|choice| Choice {
                index: choice.index,
                message: Message {
                    role: choice.message.role.unwrap_or_else(|| "assistant".to_string()),
                    content: choice.message.content.unwrap_or_default(),
                },
                finish_reason: choice.finish_reason.unwrap_or_default(),
            })
            .collect();

        Self {
            id: wire.id,
            model: wire.model,
            choices,
            usage: wire.usage.unwrap_or_default(),
        }
    }
}

/// Map a non-success HTTP status and body to an `LlmError`.
fn classify_error(status_code: u16, body: &str) -> LlmError {
    let message = serde_json::from_str::<WireError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status_code {
        429 => LlmError::RateLimited(message),
        401 | 403 => LlmError::Unauthorized(message),
        code => LlmError::ApiError { code, message },
    }
}

#[async_trait]
impl LlmProvider for LiteLlmClient {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LlmError> {
        let mut http_request = self.http_client.post(&self.endpoint).json(&request);
        if let Some(ref api_key) = self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let http_response = http_request
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = http_response.status();
        if !status.is_success() {
            let body = http_response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(classify_error(status.as_u16(), &body));
        }

        let wire: WireResponse = http_response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(format!("Failed to parse API response: {}", e)))?;

        Ok(wire.into())
    }
}
