use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::ai::{ChatCompletionsClient, CourseAi, TextGenerator};
use crate::auth_service::{AuthService, JwtConfig};
use crate::course_service::CourseService;
use crate::error::AppServicesError;
use crate::extract::{PdfTextExtractor, TextExtractor};
use crate::progress_service::ProgressService;

/// Collaborators that differ between production and tests.
#[derive(Clone)]
pub struct ServiceDeps {
    pub generator: Arc<dyn TextGenerator>,
    pub extractor: Arc<dyn TextExtractor>,
    pub language: String,
    pub jwt: JwtConfig,
}

impl ServiceDeps {
    /// Chat-completions generator, PDF extractor and JWT secret read from the
    /// environment.
    #[must_use]
    pub fn from_env() -> Self {
        let client = ChatCompletionsClient::from_env();
        if !client.enabled() {
            log::warn!("AI_API_KEY is not set; quiz and summary generation will fail");
        }
        Self {
            generator: Arc::new(client),
            extractor: Arc::new(PdfTextExtractor),
            language: CourseAi::language_from_env(),
            jwt: JwtConfig::from_env(),
        }
    }
}

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    courses: Arc<CourseService>,
    auth: Arc<AuthService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        deps: ServiceDeps,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, deps))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, deps: ServiceDeps) -> Self {
        let ai = CourseAi::new(deps.generator, deps.language);
        let courses = Arc::new(CourseService::new(
            clock,
            Arc::clone(&storage.courses),
            ai,
            deps.extractor,
        ));
        let auth = Arc::new(AuthService::new(clock, Arc::clone(&storage.users), deps.jwt));
        let progress = Arc::new(ProgressService::new(clock, Arc::clone(&storage.users)));

        Self {
            courses,
            auth,
            progress,
        }
    }

    #[must_use]
    pub fn courses(&self) -> Arc<CourseService> {
        Arc::clone(&self.courses)
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
