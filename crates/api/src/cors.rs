//! Cross-origin policy for browser clients.

use actix_cors::Cors;

/// Seconds a browser may cache a preflight answer.
const PREFLIGHT_MAX_AGE: usize = 3600;

/// Origins allowed to call the API. Empty means any origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsConfig {
    allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Accept requests from any origin.
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Parse a comma separated allow-list; blank entries are skipped.
    pub fn from_list(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| origin.trim_end_matches('/').to_string())
            .collect();
        Self { allowed_origins }
    }

    /// Read `CORS_ALLOWED_ORIGINS`; unset or blank keeps the policy permissive.
    pub fn from_env() -> Self {
        std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|raw| Self::from_list(&raw))
            .unwrap_or_default()
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Build the middleware. Called once per worker.
    pub fn middleware(&self) -> Cors {
        let cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .max_age(PREFLIGHT_MAX_AGE);

        if self.allowed_origins.is_empty() {
            return cors.allow_any_origin();
        }

        self.allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}
