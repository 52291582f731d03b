use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's endorsement of a post. Identified by the (post, user) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Like {
    pub post_id: Uuid,
    pub username: String,
}

impl Like {
    pub fn new(post_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            post_id,
            username: username.into(),
        }
    }
}
