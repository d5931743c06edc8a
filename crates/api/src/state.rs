use std::sync::Arc;

use services::{AppServices, AuthService, CourseService, ProgressService};

/// Services shared by every worker.
pub struct AppState {
    pub courses: Arc<CourseService>,
    pub auth: Arc<AuthService>,
    pub progress: Arc<ProgressService>,
}

impl From<&AppServices> for AppState {
    fn from(services: &AppServices) -> Self {
        Self {
            courses: services.courses(),
            auth: services.auth(),
            progress: services.progress(),
        }
    }
}
