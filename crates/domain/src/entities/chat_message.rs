//! Chat message entity

use serde::{Deserialize, Serialize};

/// One turn of prior conversation.
///
/// The role is an open string ("user", "assistant", ...) because history is
/// supplied verbatim by the client and rendered verbatim into the prompt.
/// Order of messages is significant and must be preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the sender
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a new message with an arbitrary role
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create a new assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}
