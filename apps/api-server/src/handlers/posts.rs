//! Post handlers.

use actix_web::{HttpResponse, web};

use socialapp_core::domain::{PostFields, PostWithCounts};
use socialapp_shared::dto::{ContentRequest, PostResponse};

use super::{content_fields, parse_id};
use crate::middleware::error::AppResult;
use crate::state::AppState;

const POST: &str = "Post";

fn to_response(item: PostWithCounts) -> PostResponse {
    PostResponse {
        id: item.post.id,
        username: item.post.username,
        content: item.post.content,
        created_at: item.post.created_at,
        updated_at: item.post.updated_at,
        like_count: item.like_count,
        comment_count: item.comment_count,
    }
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.social.list_posts().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<ContentRequest>,
) -> AppResult<HttpResponse> {
    let fields = content_fields(body, |username, content| PostFields { username, content })?;
    let post = state.social.create_post(fields).await?;
    Ok(HttpResponse::Created().json(to_response(post)))
}

/// GET /posts/{post_id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, POST)?;
    let post = state.social.get_post(id).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// PATCH /posts/{post_id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ContentRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, POST)?;
    let fields = content_fields(body, |username, content| PostFields { username, content })?;
    let post = state.social.update_post(id, fields).await?;
    Ok(HttpResponse::Ok().json(to_response(post)))
}

/// DELETE /posts/{post_id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path, POST)?;
    state.social.delete_post(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
