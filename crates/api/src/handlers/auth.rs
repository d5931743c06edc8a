use actix_web::{HttpResponse, web};

use course_core::model::CourseId;

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::state::AppState;

pub async fn register(
    data: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let session = data
        .auth
        .register(&req.name, &req.email, &req.password)
        .await?;
    Ok(HttpResponse::Created().json(AuthResponse::new(&session.user, session.token)))
}

pub async fn login(
    data: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let session = data.auth.login(&req.email, &req.password).await?;
    Ok(HttpResponse::Ok().json(AuthResponse::new(&session.user, session.token)))
}

/// `user` comes first so a missing token is reported before any path error.
pub async fn course_progress(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
    path: web::Path<CourseId>,
) -> Result<HttpResponse, ApiError> {
    let snapshot = data
        .progress
        .progress_for(user.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(snapshot))
}
