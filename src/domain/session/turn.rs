//! Conversation turns.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The suspected fraud sender.
    Sender,
    /// The honeypot persona.
    Engine,
}

/// Sender tags callers use for the honeypot's own earlier replies.
const ENGINE_TAGS: &[&str] = &["user", "agent", "assistant", "engine", "honeypot", "victim"];

impl TurnRole {
    /// Maps a caller-supplied sender tag onto a role.
    ///
    /// Tags naming the honeypot side map to `Engine`; every other tag
    /// (typically `scammer`) is treated as the sender.
    pub fn from_sender_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if ENGINE_TAGS.contains(&tag.as_str()) {
            TurnRole::Engine
        } else {
            TurnRole::Sender
        }
    }
}

/// One message in a session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
}

impl Turn {
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn sender(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Sender, text)
    }

    pub fn engine(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Engine, text)
    }
}
