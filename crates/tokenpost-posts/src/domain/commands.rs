//! Commands for the Posts context.

use std::fmt;

use tokenpost_core::command::Command;
use uuid::Uuid;

/// Command to create a post from raw, unsanitized input.
#[derive(Debug, Clone)]
pub struct CreatePost {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Raw title as submitted.
    pub title: String,
    /// Raw content as submitted.
    pub content: String,
}

impl Command for CreatePost {
    fn command_type(&self) -> &'static str {
        "posts.create_post"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete a post with its ownership token.
#[derive(Clone)]
pub struct DeletePost {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Raw identifier taken from the request path.
    pub post_id: String,
    /// Token presented by the caller, if any.
    pub token: Option<String>,
}

// Keeps the token out of logs.
impl fmt::Debug for DeletePost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeletePost")
            .field("correlation_id", &self.correlation_id)
            .field("post_id", &self.post_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Command for DeletePost {
    fn command_type(&self) -> &'static str {
        "posts.delete_post"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
