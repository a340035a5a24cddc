use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;

/// One single-shot completion: fixed system directive plus the composed prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// The text-generation service, as seen by the generator.
pub trait TextGenerator: Send {
    fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Short status line for the settings screen.
    fn test_connection(&self) -> Result<String> {
        Err(anyhow!("connection check not supported"))
    }
}

impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        (**self).complete(request)
    }

    fn test_connection(&self) -> Result<String> {
        (**self).test_connection()
    }
}

#[derive(Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub struct Choice {
    pub message: ChatMessageResponse,
}

#[derive(Deserialize)]
pub struct ChatMessageResponse {
    #[serde(default)]
    pub content: Option<String>,
}

impl From<&CompletionRequest> for ChatCompletionRequest {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: request.user.clone(),
                },
            ],
        }
    }
}

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(&config.api_base, config.api_key())
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| anyhow!("no API key configured"))
    }
}

impl TextGenerator for OpenAiClient {
    /// Lists the endpoint's models as a reachability check.
    fn test_connection(&self) -> Result<String> {
        let resp: serde_json::Value = self
            .client
            .get(format!("{}/models", self.api_base))
            .bearer_auth(self.api_key()?)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(format!(
            "Connected ({} models available)",
            resp["data"].as_array().map(|a| a.len()).unwrap_or(0)
        ))
    }

    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatCompletionRequest::from(request);

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(self.api_key()?)
            .json(&body)
            .send()
            .context("request to generation service failed")?
            .error_for_status()?
            .json::<ChatCompletionResponse>()
            .context("unreadable response from generation service")?;

        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("generation service returned no content"))
    }
}
