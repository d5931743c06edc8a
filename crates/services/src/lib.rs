#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod auth_service;
pub mod course_service;
pub mod error;
pub mod extract;
pub mod progress_service;

pub use course_core::Clock;

pub use ai::{AiConfig, CannedGenerator, ChatCompletionsClient, CourseAi, TextGenerator};
pub use app_services::{AppServices, ServiceDeps};
pub use auth_service::{AuthService, AuthSession, JwtConfig, TOKEN_TTL_DAYS};
pub use course_service::{
    CourseService, CourseUpdate, DEFAULT_QUIZ_SIZE, NO_MISTAKES_MESSAGE, NewCourseRequest,
};
pub use error::{
    AiError, AppServicesError, AuthServiceError, CourseServiceError, ExtractError,
    ProgressServiceError,
};
pub use extract::{MAX_UPLOAD_FILES, PdfTextExtractor, TextExtractor, UploadedFile};
pub use progress_service::{ProgressService, ProgressSnapshot};
