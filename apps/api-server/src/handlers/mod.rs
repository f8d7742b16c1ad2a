//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod uploads;

use actix_web::{HttpRequest, error, web};

use crate::middleware::error::AppError;

/// Raw-body ceiling for uploads; the storage layer enforces the real
/// configured cap.
const MAX_RAW_UPLOAD: usize = 10 * 1024 * 1024;

fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    // Malformed ids in the path read as bad requests, not missing
    // resources.
    AppError::BadRequest(err.to_string()).into()
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .app_data(web::PayloadConfig::new(MAX_RAW_UPLOAD))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/me", web::get().to(auth::me)),
                )
                // Post routes
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create))
                        .route("", web::get().to(posts::list))
                        .route("/{id}", web::get().to(posts::get))
                        .route("/{id}", web::put().to(posts::update))
                        .route("/{id}", web::delete().to(posts::delete))
                        .route("/{id}/like", web::post().to(posts::like)),
                )
                // Comment routes
                .service(
                    web::scope("/comments")
                        .route("", web::post().to(comments::create))
                        .route("/post/{post_id}", web::get().to(comments::list_by_post))
                        .route("/{id}", web::put().to(comments::update))
                        .route("/{id}", web::delete().to(comments::delete))
                        .route("/{id}/like", web::post().to(comments::like)),
                )
                // Upload routes
                .service(
                    web::scope("/uploads")
                        .route("/image", web::post().to(uploads::upload_image)),
                ),
        );
}
