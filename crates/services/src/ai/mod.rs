//! AI text generation: the provider seam, the chat-completions client and the
//! course-specific prompt layer on top of it.

mod client;
mod course_ai;
mod prompts;

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AiError;

pub use client::{AiConfig, ChatCompletionsClient};
pub use course_ai::{CourseAi, DEFAULT_LANGUAGE, strip_code_fences};

/// Anything that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// # Errors
    ///
    /// Returns `AiError` when the provider is unavailable or answers with
    /// nothing usable.
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// Generator that replays queued responses in order and records prompts.
///
/// Runs out with `AiError::EmptyResponse`.
#[derive(Debug, Default)]
pub struct CannedGenerator {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    #[must_use]
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, response: impl Into<String>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response.into());
        }
    }

    /// Prompts received so far, oldest first.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.prompts.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        if let Ok(mut seen) = self.prompts.lock() {
            seen.push(prompt.to_owned());
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .ok_or(AiError::EmptyResponse)
    }
}
