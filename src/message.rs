//! Chat message types consumed by the downstream chat-completion call.

use serde::{Deserialize, Serialize};

/// The role of a chat message. Closed set, validated at construction
/// rather than carried as free-form strings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions to the model (persona prompts, retrieved context).
    System,
    /// A message from the end user.
    User,
    /// A previous model response.
    Assistant,
}

/// One entry in the ordered message list sent to the chat model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// The sender role.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a system-role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// Create a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// Create an assistant-role message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}
