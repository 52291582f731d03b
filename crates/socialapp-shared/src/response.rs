//! Error body returned by every failing endpoint.

use serde::{Deserialize, Serialize};

/// `{ "message": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_message() {
        let body = serde_json::to_value(ErrorResponse::new("Post not found")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Post not found" }));
    }
}
