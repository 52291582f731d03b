//! Like handlers.

use actix_web::{HttpResponse, web};
use socialapp_shared::dto::LikeRequest;

use super::parse_id;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const POST: &str = "Post";

/// POST /posts/{post_id}/likes
pub async fn like_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<LikeRequest>,
) -> AppResult<HttpResponse> {
    let post_id = parse_id(&path, POST)?;
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    state.social.like_post(post_id, &req.username).await?;
    Ok(HttpResponse::Created().finish())
}

/// DELETE /posts/{post_id}/likes
pub async fn unlike_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<LikeRequest>,
) -> AppResult<HttpResponse> {
    let post_id = parse_id(&path, POST)?;
    let req = body.into_inner();
    req.validate().map_err(AppError::Validation)?;

    state.social.unlike_post(post_id, &req.username).await?;
    Ok(HttpResponse::NoContent().finish())
}
