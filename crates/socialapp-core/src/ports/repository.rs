use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, CommentFields, Like, Post, PostFields, PostWithCounts};
use crate::error::RepoError;

/// Post storage. Counts are always derived from the child tables.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts with their counts, newest first.
    async fn list(&self) -> Result<Vec<PostWithCounts>, RepoError>;

    /// Find a post by its unique ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostWithCounts>, RepoError>;

    /// Insert a newly created post.
    async fn insert(&self, post: Post) -> Result<PostWithCounts, RepoError>;

    /// Apply `fields` to an existing post.
    ///
    /// Fails with [`RepoError::NotFound`] when no post has this ID.
    async fn update(&self, id: Uuid, fields: PostFields) -> Result<PostWithCounts, RepoError>;

    /// Delete a post; its comments and likes go with it.
    ///
    /// Fails with [`RepoError::NotFound`] when no post has this ID.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

/// Comment storage. Every lookup is scoped by the parent post.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments of a post, oldest first. Empty for an unknown post.
    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    async fn find(&self, post_id: Uuid, id: Uuid) -> Result<Option<Comment>, RepoError>;

    /// Insert a new comment.
    ///
    /// Fails with [`RepoError::NotFound`] when the parent post does not exist.
    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError>;

    /// Fails with [`RepoError::NotFound`] unless the comment exists under `post_id`.
    async fn update(
        &self,
        post_id: Uuid,
        id: Uuid,
        fields: CommentFields,
    ) -> Result<Comment, RepoError>;

    /// Fails with [`RepoError::NotFound`] unless the comment exists under `post_id`.
    async fn delete(&self, post_id: Uuid, id: Uuid) -> Result<(), RepoError>;
}

/// Like storage.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Record a like.
    ///
    /// Fails with [`RepoError::NotFound`] when the post does not exist and with
    /// [`RepoError::Constraint`] when the user already likes the post.
    async fn insert(&self, like: Like) -> Result<(), RepoError>;

    /// Remove a like if present. Fails with [`RepoError::NotFound`] only when
    /// the post itself does not exist.
    async fn delete(&self, like: Like) -> Result<(), RepoError>;
}
