//! HTTP handlers and route configuration.

mod comments;
mod health;
mod likes;
mod posts;


use actix_web::web;
use socialapp_shared::dto::ContentRequest;
use uuid::Uuid;

use crate::middleware::error::{AppError, AppResult, json_error_handler};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list_posts))
                .route("", web::post().to(posts::create_post))
                .route("/{post_id}", web::get().to(posts::get_post))
                .route("/{post_id}", web::patch().to(posts::update_post))
                .route("/{post_id}", web::delete().to(posts::delete_post))
                // Comments
                .route("/{post_id}/comments", web::get().to(comments::list_comments))
                .route("/{post_id}/comments", web::post().to(comments::create_comment))
                .route(
                    "/{post_id}/comments/{comment_id}",
                    web::get().to(comments::get_comment),
                )
                .route(
                    "/{post_id}/comments/{comment_id}",
                    web::patch().to(comments::update_comment),
                )
                .route(
                    "/{post_id}/comments/{comment_id}",
                    web::delete().to(comments::delete_comment),
                )
                // Likes
                .route("/{post_id}/likes", web::post().to(likes::like_post))
                .route("/{post_id}/likes", web::delete().to(likes::unlike_post)),
        );
}

/// Parse an ID path segment. Anything that is not a UUID names no row, so it
/// is reported the same way as an unknown ID.
fn parse_id(raw: &str, entity_type: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("{} not found", entity_type)))
}

/// Validate a username/content body and move its fields into `build`.
fn content_fields<T>(
    body: web::Json<ContentRequest>,
    build: fn(String, String) -> T,
) -> AppResult<T> {
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;
    Ok(build(req.username, req.content))
}
