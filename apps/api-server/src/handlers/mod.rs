//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpRequest, error, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Post routes; literal segments before "/{id}"
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create_post))
                        .route("", web::get().to(posts::get_all_posts))
                        .route("/published", web::get().to(posts::get_published_posts))
                        .route("/tags", web::get().to(posts::get_all_tags))
                        .route("/search", web::get().to(posts::search_posts))
                        .route(
                            "/author/name/{author}",
                            web::get().to(posts::get_posts_by_author),
                        )
                        .route(
                            "/author/{author}",
                            web::delete().to(posts::delete_posts_by_author),
                        )
                        .route("/tag/{tag}", web::get().to(posts::get_posts_by_tag))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update_post))
                        .route("/{id}", web::delete().to(posts::delete_post))
                        .route("/{id}/publish", web::put().to(posts::publish_post))
                        .route("/{id}/unpublish", web::put().to(posts::unpublish_post)),
                ),
        );
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}
