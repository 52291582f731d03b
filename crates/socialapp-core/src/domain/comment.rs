use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stamp;

/// Comment entity - a reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable fields of a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFields {
    pub username: String,
    pub content: String,
}

impl Comment {
    /// Create a new comment under `post_id`.
    pub fn new(post_id: Uuid, fields: CommentFields) -> Self {
        let now = stamp::now();
        Self {
            id: stamp::new_id(),
            post_id,
            username: fields.username,
            content: fields.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite author and content. The parent post never changes.
    pub fn revise(&mut self, fields: CommentFields) {
        self.username = fields.username;
        self.content = fields.content;
        self.updated_at = stamp::refreshed(self.updated_at);
    }
}
