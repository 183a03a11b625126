//! Reply Generator Port - Interface for the persona's text generation.
//!
//! Abstracts the external text-generation service that writes the
//! honeypot's replies, so the lifecycle manager never couples to a
//! specific LLM provider.
//!
//! # Contract
//!
//! - Calls may be slow or fail; callers bound them with a deadline
//! - An empty reply is reported as [`ReplyError::EmptyReply`], never `Ok("")`
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct EchoGenerator;
//!
//! #[async_trait]
//! impl ReplyGenerator for EchoGenerator {
//!     async fn generate(&self, request: ReplyRequest) -> Result<String, ReplyError> {
//!         Ok("Sir, what should I do?".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "echo"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::domain::persona::{ConversationMetadata, PersonaConfig};
use crate::domain::session::Turn;

/// Port for generating persona replies.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generates the next engine reply for the given conversation tail.
    async fn generate(&self, request: ReplyRequest) -> Result<String, ReplyError>;

    /// Short provider name for logs.
    fn name(&self) -> &str;
}

/// Request for a single persona reply.
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    /// Most recent turns, oldest first. The last one is the sender's newest message.
    pub history: Vec<Turn>,
    /// Persona and styling instructions.
    pub persona: PersonaConfig,
    /// Conversation metadata, for providers that want it verbatim.
    pub metadata: ConversationMetadata,
}

impl ReplyRequest {
    pub fn new(history: Vec<Turn>, persona: PersonaConfig, metadata: ConversationMetadata) -> Self {
        Self {
            history,
            persona,
            metadata,
        }
    }
}

/// Reply generation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
    /// Provider is unavailable, rate limited, or failing server-side.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider returned no usable text.
    #[error("empty reply")]
    EmptyReply,

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl ReplyError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
