use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every quiz question carries exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("a question needs exactly {OPTIONS_PER_QUESTION} options, got {0}")]
    WrongOptionCount(usize),

    #[error("option {0} cannot be empty")]
    EmptyOption(usize),

    #[error("correct answer index {0} is out of range")]
    CorrectIndexOutOfRange(usize),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated wire shape of a question, as produced by the AI provider or
/// sent back by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestionDraft {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
}

/// A multiple-choice question with four options and one correct option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuizQuestionDraft", into = "QuizQuestionDraft")]
pub struct QuizQuestion {
    question: String,
    options: [String; OPTIONS_PER_QUESTION],
    correct_answer_index: usize,
}

impl QuizQuestion {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the text or an option is blank, the option count
    /// is not four, or the correct index does not point at an option.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer_index: usize,
    ) -> Result<Self, QuizError> {
        let question = question.into().trim().to_owned();
        if question.is_empty() {
            return Err(QuizError::EmptyQuestion);
        }
        let count = options.len();
        let options: [String; OPTIONS_PER_QUESTION] = options
            .try_into()
            .map_err(|_| QuizError::WrongOptionCount(count))?;
        if let Some(pos) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuizError::EmptyOption(pos));
        }
        if correct_answer_index >= OPTIONS_PER_QUESTION {
            return Err(QuizError::CorrectIndexOutOfRange(correct_answer_index));
        }
        Ok(Self {
            question,
            options,
            correct_answer_index,
        })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer_index]
    }

    /// Option text for a chosen index, if the index is in range.
    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn is_correct(&self, answer: Option<usize>) -> bool {
        answer == Some(self.correct_answer_index)
    }
}

impl TryFrom<QuizQuestionDraft> for QuizQuestion {
    type Error = QuizError;

    fn try_from(draft: QuizQuestionDraft) -> Result<Self, Self::Error> {
        Self::new(draft.question, draft.options, draft.correct_answer_index)
    }
}

impl From<QuizQuestion> for QuizQuestionDraft {
    fn from(q: QuizQuestion) -> Self {
        Self {
            question: q.question,
            options: q.options.into(),
            correct_answer_index: q.correct_answer_index,
        }
    }
}
