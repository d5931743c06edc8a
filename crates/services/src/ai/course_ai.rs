use std::env;
use std::sync::Arc;

use course_core::model::{
    EXPLANATION_CONTEXT_CHARS, Mistake, QuizQuestion, QuizQuestionDraft, SummaryStyle, excerpt,
};

use super::{TextGenerator, prompts};
use crate::error::AiError;

/// Output language used when `AI_LANGUAGE` is not set.
pub const DEFAULT_LANGUAGE: &str = "French";

/// Course-level AI operations: quizzes, summaries and mistake explanations.
#[derive(Clone)]
pub struct CourseAi {
    generator: Arc<dyn TextGenerator>,
    language: String,
}

impl CourseAi {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, language: impl Into<String>) -> Self {
        Self {
            generator,
            language: language.into(),
        }
    }

    /// Language from `AI_LANGUAGE`, falling back to [`DEFAULT_LANGUAGE`].
    #[must_use]
    pub fn language_from_env() -> String {
        env::var("AI_LANGUAGE")
            .ok()
            .map(|lang| lang.trim().to_owned())
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Ask for `count` multiple-choice questions about `text`.
    ///
    /// The provider may return more or fewer questions than requested;
    /// callers decide what to keep.
    ///
    /// # Errors
    ///
    /// Returns `AiError::MalformedQuiz` when the response is not a JSON array
    /// of questions and `AiError::InvalidQuestion` when a question breaks the
    /// four-option shape.
    pub async fn generate_quiz(
        &self,
        text: &str,
        count: usize,
    ) -> Result<Vec<QuizQuestion>, AiError> {
        log::info!("requesting {count} quiz questions");
        let raw = self
            .generator
            .generate(&prompts::quiz(text, count, &self.language))
            .await?;
        parse_quiz(&raw)
    }

    /// # Errors
    ///
    /// Propagates provider failures.
    pub async fn generate_summary(&self, content: &str) -> Result<String, AiError> {
        log::info!("requesting course summary");
        let raw = self
            .generator
            .generate(&prompts::summary(content, &self.language))
            .await?;
        non_empty(strip_code_fences(&raw))
    }

    /// # Errors
    ///
    /// Propagates provider failures.
    pub async fn generate_styled_summary(
        &self,
        content: &str,
        style: SummaryStyle,
    ) -> Result<String, AiError> {
        log::info!("requesting {style} summary");
        let raw = self
            .generator
            .generate(&prompts::styled_summary(content, style, &self.language))
            .await?;
        non_empty(strip_code_fences(&raw))
    }

    /// Explain `mistakes` using the leading part of the course text as context.
    ///
    /// # Errors
    ///
    /// Propagates provider failures.
    pub async fn explain_mistakes(
        &self,
        mistakes: &[Mistake],
        course_text: &str,
    ) -> Result<String, AiError> {
        log::info!("requesting explanation for {} mistakes", mistakes.len());
        let context = excerpt(course_text, EXPLANATION_CONTEXT_CHARS);
        let raw = self
            .generator
            .generate(&prompts::explain_mistakes(mistakes, context, &self.language))
            .await?;
        non_empty(raw.trim())
    }
}

fn non_empty(text: &str) -> Result<String, AiError> {
    if text.is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text.to_owned())
}

fn parse_quiz(raw: &str) -> Result<Vec<QuizQuestion>, AiError> {
    let body = strip_code_fences(raw);
    let drafts: Vec<QuizQuestionDraft> = match serde_json::from_str(body) {
        Ok(drafts) => drafts,
        Err(err) => {
            // Some models wrap the array in prose; retry on the outermost brackets.
            let inner = body
                .find('[')
                .zip(body.rfind(']'))
                .filter(|(start, end)| start < end)
                .map(|(start, end)| &body[start..=end])
                .ok_or_else(|| AiError::MalformedQuiz(err.to_string()))?;
            serde_json::from_str(inner).map_err(|e| AiError::MalformedQuiz(e.to_string()))?
        }
    };

    drafts
        .into_iter()
        .map(|d| QuizQuestion::new(d.question, d.options, d.correct_answer_index))
        .collect::<Result<_, _>>()
        .map_err(AiError::from)
}

/// Remove a surrounding Markdown code fence (with optional language tag).
#[must_use]
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.split_once('\n') {
        Some((_tag, body)) => body,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}
