use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, CommentFields, Like, Post, PostFields, PostWithCounts};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, LikeRepository, PostRepository};

const POST: &str = "Post";
const COMMENT: &str = "Comment";

/// Entry point for every post, comment and like operation.
///
/// Existence and uniqueness checks are delegated to the repositories so that
/// they run inside the store's own transaction; this layer only names the
/// failures.
#[derive(Clone)]
pub struct SocialService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    likes: Arc<dyn LikeRepository>,
}

impl SocialService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        likes: Arc<dyn LikeRepository>,
    ) -> Self {
        Self {
            posts,
            comments,
            likes,
        }
    }

    pub async fn list_posts(&self) -> Result<Vec<PostWithCounts>, DomainError> {
        self.posts.list().await.map_err(internal)
    }

    pub async fn create_post(&self, fields: PostFields) -> Result<PostWithCounts, DomainError> {
        self.posts.insert(Post::new(fields)).await.map_err(internal)
    }

    pub async fn get_post(&self, id: Uuid) -> Result<PostWithCounts, DomainError> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| DomainError::not_found(POST, id))
    }

    pub async fn update_post(
        &self,
        id: Uuid,
        fields: PostFields,
    ) -> Result<PostWithCounts, DomainError> {
        self.posts
            .update(id, fields)
            .await
            .map_err(missing(POST, id))
    }

    pub async fn delete_post(&self, id: Uuid) -> Result<(), DomainError> {
        self.posts.delete(id).await.map_err(missing(POST, id))
    }

    /// Comments of a post, oldest first. An unknown post yields an empty list
    /// rather than an error.
    pub async fn list_comments(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.comments.list_by_post(post_id).await.map_err(internal)
    }

    pub async fn create_comment(
        &self,
        post_id: Uuid,
        fields: CommentFields,
    ) -> Result<Comment, DomainError> {
        self.comments
            .insert(Comment::new(post_id, fields))
            .await
            .map_err(missing(POST, post_id))
    }

    pub async fn get_comment(&self, post_id: Uuid, id: Uuid) -> Result<Comment, DomainError> {
        self.comments
            .find(post_id, id)
            .await
            .map_err(internal)?
            .ok_or_else(|| DomainError::not_found(COMMENT, id))
    }

    pub async fn update_comment(
        &self,
        post_id: Uuid,
        id: Uuid,
        fields: CommentFields,
    ) -> Result<Comment, DomainError> {
        self.comments
            .update(post_id, id, fields)
            .await
            .map_err(missing(COMMENT, id))
    }

    pub async fn delete_comment(&self, post_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.comments
            .delete(post_id, id)
            .await
            .map_err(missing(COMMENT, id))
    }

    /// Like a post once per user. A repeated like is a conflict and changes nothing.
    pub async fn like_post(&self, post_id: Uuid, username: &str) -> Result<(), DomainError> {
        self.likes
            .insert(Like::new(post_id, username))
            .await
            .map_err(|err| match err {
                RepoError::Constraint(_) => DomainError::Conflict("Already liked".to_string()),
                other => missing(POST, post_id)(other),
            })
    }

    /// Remove a like. Unliking a post the user never liked is not an error.
    pub async fn unlike_post(&self, post_id: Uuid, username: &str) -> Result<(), DomainError> {
        self.likes
            .delete(Like::new(post_id, username))
            .await
            .map_err(missing(POST, post_id))
    }
}

/// Map a repository failure where `NotFound` refers to the given entity.
fn missing(entity_type: &'static str, id: Uuid) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => internal(other),
    }
}

fn internal(err: RepoError) -> DomainError {
    match err {
        RepoError::Constraint(msg) => DomainError::Conflict(msg),
        other => DomainError::Internal(other.to_string()),
    }
}
