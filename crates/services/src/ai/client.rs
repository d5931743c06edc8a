use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::TextGenerator;
use crate::error::AiError;

#[derive(Clone, Debug)]
pub struct AiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl AiConfig {
    /// Read `AI_API_KEY`, `AI_BASE_URL` and `AI_MODEL`.
    ///
    /// Returns `None` when no key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// OpenAI-compatible `chat/completions` client.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    config: Option<AiConfig>,
}

impl ChatCompletionsClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(AiConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<AiConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let config = self.config.as_ref().ok_or(AiError::Disabled)?;

        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: &config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.4,
        };

        log::debug!("chat completion request to {url} ({} chars)", prompt.len());
        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            log::warn!("AI provider answered {}", response.status());
            return Err(AiError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(AiError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
