use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::CourseId;
use crate::model::quiz::QuizQuestion;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("course content cannot be empty")]
    EmptyContent,
}

fn required(value: String, err: CourseError) -> Result<String, CourseError> {
    if value.trim().is_empty() {
        Err(err)
    } else {
        Ok(value)
    }
}

//
// ─── NEW COURSE ────────────────────────────────────────────────────────────────
//

/// A validated course that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    title: String,
    content: String,
    quiz: Vec<QuizQuestion>,
    summary: Option<String>,
    created_at: DateTime<Utc>,
}

impl NewCourse {
    /// # Errors
    ///
    /// Returns `CourseError` if the title or content is blank.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        quiz: Vec<QuizQuestion>,
        summary: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CourseError> {
        Ok(Self {
            title: required(title.into().trim().to_owned(), CourseError::EmptyTitle)?,
            content: required(content.into(), CourseError::EmptyContent)?,
            quiz,
            summary,
            created_at,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn assign_id(self, id: CourseId) -> Course {
        Course {
            id,
            title: self.title,
            content: self.content,
            quiz: self.quiz,
            summary: self.summary,
            created_at: self.created_at,
        }
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A persisted course with its quiz and optional generated summary.
///
/// The quiz is append-only: no method removes or replaces questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    content: String,
    quiz: Vec<QuizQuestion>,
    summary: Option<String>,
    created_at: DateTime<Utc>,
}

impl Course {
    /// Rehydrate a course from storage.
    ///
    /// # Errors
    ///
    /// Returns `CourseError` if the stored title or content is blank.
    pub fn from_persisted(
        id: CourseId,
        title: String,
        content: String,
        quiz: Vec<QuizQuestion>,
        summary: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CourseError> {
        Ok(NewCourse::new(title, content, quiz, summary, created_at)?.assign_id(id))
    }

    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Text handed to the AI provider: the content, or the summary when the
    /// content is blank.
    #[must_use]
    pub fn source_text(&self) -> &str {
        if self.content.trim().is_empty() {
            self.summary.as_deref().unwrap_or_default()
        } else {
            &self.content
        }
    }

    /// Number of questions missing to reach `minimum`.
    #[must_use]
    pub fn quiz_deficit(&self, minimum: usize) -> usize {
        minimum.saturating_sub(self.quiz.len())
    }

    /// Append questions after the existing ones.
    pub fn append_questions(&mut self, questions: impl IntoIterator<Item = QuizQuestion>) {
        self.quiz.extend(questions);
    }

    pub fn set_summary(&mut self, summary: String) {
        self.summary = Some(summary);
    }

    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` if `title` is blank.
    pub fn rename(&mut self, title: String) -> Result<(), CourseError> {
        self.title = required(title.trim().to_owned(), CourseError::EmptyTitle)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `CourseError::EmptyContent` if `content` is blank.
    pub fn replace_content(&mut self, content: String) -> Result<(), CourseError> {
        self.content = required(content, CourseError::EmptyContent)?;
        Ok(())
    }
}
