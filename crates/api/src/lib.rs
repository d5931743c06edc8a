#![forbid(unsafe_code)]

use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::guard::{self, GuardContext};
use actix_web::http::header::ContentType;
use actix_web::{App, HttpServer, middleware, web};

use services::AppServices;

pub mod auth;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;

pub use cors::CorsConfig;
use error::ApiError;
use state::AppState;

/// Largest accepted JSON body.
const JSON_LIMIT: usize = 2 * 1024 * 1024;

/// Start serving on an already bound listener.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot be handed to the server.
pub fn run(
    listener: TcpListener,
    services: AppServices,
    cors: CorsConfig,
) -> Result<Server, std::io::Error> {
    let data = web::Data::new(AppState::from(&services));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(cors.middleware())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Routes and extractor settings; the caller supplies `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .route("/health", web::get().to(handlers::health_check))
    .service(
        web::scope("/api/auth")
            .route("/register", web::post().to(handlers::auth::register))
            .route("/login", web::post().to(handlers::auth::login))
            .route(
                "/progress/{course_id}",
                web::get().to(handlers::auth::course_progress),
            ),
    )
    .service(
        web::scope("/api/courses")
            .route(
                "",
                web::post()
                    .guard(guard::fn_guard(is_json))
                    .to(handlers::courses::create_course_json),
            )
            .route("", web::post().to(handlers::courses::create_course))
            .route("", web::get().to(handlers::courses::list_courses))
            .route("/{id}", web::get().to(handlers::courses::get_course))
            .route("/{id}", web::put().to(handlers::courses::update_course))
            .route("/{id}", web::delete().to(handlers::courses::delete_course))
            .route(
                "/{id}/summary",
                web::put().to(handlers::courses::restyle_summary),
            )
            .route(
                "/{id}/quiz/ensure",
                web::post().to(handlers::courses::ensure_quiz),
            )
            .route(
                "/{id}/quiz/submit",
                web::post().to(handlers::courses::submit_quiz),
            )
            .route(
                "/{id}/quiz/review",
                web::post().to(handlers::courses::review_quiz),
            ),
    );
}

fn is_json(ctx: &GuardContext<'_>) -> bool {
    ctx.header::<ContentType>()
        .is_some_and(|ct| ct.0.essence_str() == "application/json")
}
