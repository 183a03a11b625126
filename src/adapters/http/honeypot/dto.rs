//! Request and response DTOs for the honeypot endpoint.

use serde::{Deserialize, Serialize};

use crate::application::{HandleMessageCommand, HandleMessageResult};
use crate::domain::foundation::{SessionKey, ValidationError};
use crate::domain::intelligence::Intelligence;
use crate::domain::persona::ConversationMetadata;
use crate::domain::session::{Turn, TurnRole};

/// Reply to a request that carries no message (endpoint probe).
pub const PROBE_REPLY: &str = "Honeypot endpoint is active";

fn default_sender() -> String {
    "scammer".to_string()
}

/// One message as sent by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    #[serde(default = "default_sender")]
    pub sender: String,
    pub text: String,
    /// Accepted for compatibility; epoch millis or ISO-8601, unused.
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
}

impl MessageDto {
    fn to_turn(&self) -> Turn {
        Turn::new(TurnRole::from_sender_tag(&self.sender), self.text.as_str())
    }
}

/// Request body for POST /honeypot.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneypotRequest {
    #[serde(default)]
    pub session_id: String,
    /// Absent on endpoint probes.
    #[serde(default)]
    pub message: Option<MessageDto>,
    #[serde(default)]
    pub conversation_history: Vec<MessageDto>,
    #[serde(default)]
    pub metadata: Option<ConversationMetadata>,
}

impl HoneypotRequest {
    /// Converts to an engine command. `Ok(None)` for a probe without message.
    pub fn into_command(self) -> Result<Option<HandleMessageCommand>, ValidationError> {
        let Some(message) = self.message else {
            return Ok(None);
        };

        let key = SessionKey::new(self.session_id)?;
        let prior = self
            .conversation_history
            .iter()
            .map(MessageDto::to_turn)
            .collect();

        Ok(Some(
            HandleMessageCommand::new(key, message.text)
                .with_sender(message.sender)
                .with_prior_history(prior)
                .with_metadata(self.metadata.unwrap_or_default()),
        ))
    }
}

/// Response body for POST /honeypot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneypotResponse {
    pub status: String,
    pub reply: String,
    pub scam_detected: bool,
    pub total_messages: u32,
    pub extracted_intelligence: Intelligence,
}

impl HoneypotResponse {
    pub fn probe() -> Self {
        Self {
            status: "success".to_string(),
            reply: PROBE_REPLY.to_string(),
            scam_detected: false,
            total_messages: 0,
            extracted_intelligence: Intelligence::default(),
        }
    }
}

impl From<HandleMessageResult> for HoneypotResponse {
    fn from(result: HandleMessageResult) -> Self {
        Self {
            status: "success".to_string(),
            reply: result.reply,
            scam_detected: result.scam_detected,
            total_messages: result.total_messages,
            extracted_intelligence: result.intelligence,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}
