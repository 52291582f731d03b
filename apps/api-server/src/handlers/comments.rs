//! Comment handlers, all nested under a post.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use socialapp_core::domain::{Comment, CommentFields};
use socialapp_shared::dto::{CommentResponse, ContentRequest};

use super::{content_fields, parse_id};
use crate::middleware::error::AppResult;
use crate::state::AppState;

const POST: &str = "Post";
const COMMENT: &str = "Comment";

fn to_response(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        post_id: comment.post_id,
        username: comment.username,
        content: comment.content,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

/// Both IDs of a comment path; a malformed one means the comment is unknown.
fn parse_ids(path: &(String, String)) -> AppResult<(Uuid, Uuid)> {
    Ok((parse_id(&path.0, COMMENT)?, parse_id(&path.1, COMMENT)?))
}

/// GET /posts/{post_id}/comments
///
/// An unknown post has no comments, so this answers with an empty list
/// instead of a 404.
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let comments = match Uuid::parse_str(&path) {
        Ok(post_id) => state.social.list_comments(post_id).await?,
        Err(_) => Vec::new(),
    };
    let body: Vec<CommentResponse> = comments.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /posts/{post_id}/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ContentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = parse_id(&path, POST)?;
    let fields = content_fields(body, |username, content| CommentFields { username, content })?;
    let comment = state.social.create_comment(post_id, fields).await?;
    Ok(HttpResponse::Created().json(to_response(comment)))
}

/// GET /posts/{post_id}/comments/{comment_id}
pub async fn get_comment(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = parse_ids(&path)?;
    let comment = state.social.get_comment(post_id, comment_id).await?;
    Ok(HttpResponse::Ok().json(to_response(comment)))
}

/// PATCH /posts/{post_id}/comments/{comment_id}
pub async fn update_comment(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    body: web::Json<ContentRequest>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = parse_ids(&path)?;
    let fields = content_fields(body, |username, content| CommentFields { username, content })?;
    let comment = state
        .social
        .update_comment(post_id, comment_id, fields)
        .await?;
    Ok(HttpResponse::Ok().json(to_response(comment)))
}

/// DELETE /posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = parse_ids(&path)?;
    state.social.delete_comment(post_id, comment_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
