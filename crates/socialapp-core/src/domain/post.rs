use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::stamp;

/// Post entity - a top-level piece of content written by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable fields of a post, supplied on create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub username: String,
    pub content: String,
}

impl Post {
    /// Create a new post with generated ID and timestamps.
    pub fn new(fields: PostFields) -> Self {
        let now = stamp::now();
        Self {
            id: stamp::new_id(),
            username: fields.username,
            content: fields.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite author and content, refreshing `updated_at`.
    pub fn revise(&mut self, fields: PostFields) {
        self.username = fields.username;
        self.content = fields.content;
        self.updated_at = stamp::refreshed(self.updated_at);
    }
}

/// A post together with its engagement counts, computed at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithCounts {
    #[serde(flatten)]
    pub post: Post,
    pub like_count: u64,
    pub comment_count: u64,
}

impl PostWithCounts {
    /// A freshly created post, which cannot have likes or comments yet.
    pub fn fresh(post: Post) -> Self {
        Self {
            post,
            like_count: 0,
            comment_count: 0,
        }
    }
}
