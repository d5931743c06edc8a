use actix_multipart::MultipartError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use services::{AuthServiceError, CourseServiceError, ProgressServiceError};
use storage::repository::StorageError;

use crate::models::ErrorResponse;

/// Every handler failure, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Internal(msg) = self {
            log::error!("request failed: {msg}");
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

impl From<CourseServiceError> for ApiError {
    fn from(err: CourseServiceError) -> Self {
        match err {
            CourseServiceError::Storage(StorageError::NotFound) => {
                Self::NotFound("Course not found".into())
            }
            CourseServiceError::MissingContent
            | CourseServiceError::TooManyFiles { .. }
            | CourseServiceError::InvalidCount
            | CourseServiceError::Extract { .. }
            | CourseServiceError::Course(_)
            | CourseServiceError::Style(_) => Self::BadRequest(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::DuplicateEmail | AuthServiceError::User(_) => {
                Self::BadRequest(err.to_string())
            }
            AuthServiceError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AuthServiceError::InvalidToken | AuthServiceError::ExpiredToken => {
                Self::Unauthorized(crate::auth::TOKEN_FAILED.into())
            }
            AuthServiceError::Storage(StorageError::NotFound) => {
                Self::NotFound("User not found".into())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<ProgressServiceError> for ApiError {
    fn from(err: ProgressServiceError) -> Self {
        match err {
            ProgressServiceError::User(_) => Self::BadRequest(err.to_string()),
            ProgressServiceError::Storage(StorageError::NotFound) => {
                Self::NotFound("User not found".into())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::BadRequest(format!("invalid upload: {err}"))
    }
}
