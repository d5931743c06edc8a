use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};

use course_core::model::UserId;

use crate::error::ApiError;
use crate::state::AppState;

pub(crate) const NO_TOKEN: &str = "Not authorized, no token";
pub(crate) const TOKEN_FAILED: &str = "Not authorized, token failed";

/// Extractor for routes that require `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let token = bearer_token(req).ok_or_else(|| ApiError::Unauthorized(NO_TOKEN.into()))?;
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("application state is not configured".into()))?;

    let user_id = state.auth.verify_token(token).map_err(|err| {
        log::debug!("rejected bearer token: {err}");
        ApiError::Unauthorized(TOKEN_FAILED.into())
    })?;
    Ok(AuthenticatedUser { user_id })
}
