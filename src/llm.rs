//! Text-generation backends
//!
//! Two backends behind [`TextGenerator`]:
//! - [`ChatCompletionsClient`]: any OpenAI-compatible `/chat/completions` API (DeepSeek by default)
//! - [`OllamaClient`]: a local Ollama server
//!
//! Every request has a timeout. Failures are returned, never retried.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TEMPERATURE: f32 = 1.3;
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "deepseek-r1:8b";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A service that turns a prompt into one text completion
pub trait TextGenerator {
    fn model(&self) -> &str;

    fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

fn messages<'a>(system: &'a str, prompt: &'a str) -> Vec<ChatMessage<'a>> {
    vec![
        ChatMessage {
            role: "system",
            content: system,
        },
        ChatMessage {
            role: "user",
            content: prompt,
        },
    ]
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorBody {
    Detailed { message: String },
    Plain(String),
}

impl ApiErrorBody {
    fn into_message(self) -> String {
        match self {
            ApiErrorBody::Detailed { message } | ApiErrorBody::Plain(message) => message,
        }
    }
}

/// OpenAI-compatible chat completions client
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl ChatCompletionsClient {
    pub fn new(
        base_url: &str,
        api_key: String,
        model: String,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            temperature,
        })
    }
}

impl TextGenerator for ChatCompletionsClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let request = ChatCompletionsRequest {
            model: &self.model,
            messages: messages(system, prompt),
            temperature: self.temperature,
            stream: false,
        };

        info!(model = %self.model, "requesting chat completion");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        let body = read_success_body(response)?;
        chat_completion_content(&body)
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ResponseMessage,
}

/// Local Ollama `/api/chat` client
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

impl TextGenerator for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let request = OllamaChatRequest {
            model: &self.model,
            messages: messages(system, prompt),
            stream: false,
        };

        info!(model = %self.model, "requesting Ollama chat");

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()?;

        let body = read_success_body(response)?;
        ollama_content(&body)
    }
}

fn read_success_body(response: reqwest::blocking::Response) -> Result<String, LlmError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(LlmError::Api {
            status: status.as_u16(),
            message: api_error_message(body),
        });
    }

    Ok(response.text()?)
}

/// `error.message` (OpenAI style) or `error` (Ollama style), else the raw body
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.into_message())
        .unwrap_or(body)
}

fn chat_completion_content(body: &str) -> Result<String, LlmError> {
    let response: ChatCompletionsResponse = serde_json::from_str(body)?;

    if let Some(usage) = &response.usage {
        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "chat completion succeeded"
        );
    }

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(LlmError::EmptyContent)
}

fn ollama_content(body: &str) -> Result<String, LlmError> {
    let response: OllamaChatResponse = serde_json::from_str(body)?;

    response
        .message
        .content
        .filter(|content| !content.trim().is_empty())
        .ok_or(LlmError::EmptyContent)
}

/// Strips a ```latex ... ``` (or any other ```lang) fence wrapping model output.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag on the opening line
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}
