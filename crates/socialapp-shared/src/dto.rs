//! Data Transfer Objects - request/response types for the API.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of post and comment create/update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    pub username: String,
    pub content: String,
}

impl ContentRequest {
    /// Messages for every blank required field; empty when valid.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.username.trim().is_empty() {
            errors.push("username is required".to_string());
        }
        if self.content.trim().is_empty() {
            errors.push("content is required".to_string());
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Body of like/unlike requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    pub username: String,
}

impl LikeRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        if self.username.trim().is_empty() {
            return Err(vec!["username is required".to_string()]);
        }
        Ok(())
    }
}

/// A post with its derived engagement counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub like_count: u64,
    pub comment_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
