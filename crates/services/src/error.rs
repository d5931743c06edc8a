//! Shared error types for the services crate.

use thiserror::Error;

use course_core::model::{CourseError, QuizError, UnknownStyle, UserError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the AI provider and the quiz/summary generator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiError {
    #[error("AI provider is not configured")]
    Disabled,
    #[error("AI provider returned an empty response")]
    EmptyResponse,
    #[error("AI provider request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("AI provider returned malformed quiz JSON: {0}")]
    MalformedQuiz(String),
    #[error("AI provider returned an invalid question: {0}")]
    InvalidQuestion(#[from] QuizError),
}

/// Errors emitted by a `TextExtractor`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    #[error("not a readable PDF: {0}")]
    Pdf(String),
    #[error("document contains no text")]
    NoText,
}

/// Errors emitted by `CourseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseServiceError {
    #[error("Title and content (or PDF files) are required")]
    MissingContent,
    #[error("at most {max} files can be uploaded at once")]
    TooManyFiles { max: usize },
    #[error("count must be a positive number")]
    InvalidCount,
    #[error("could not read {filename}: {source}")]
    Extract {
        filename: String,
        #[source]
        source: ExtractError,
    },
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Style(#[from] UnknownStyle),
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthServiceError {
    #[error("User already exists")]
    DuplicateEmail,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("token is invalid")]
    InvalidToken,
    #[error("token has expired")]
    ExpiredToken,
    #[error(transparent)]
    User(#[from] UserError),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    User(#[from] UserError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
