//! Evaluator Client Port - outbound intelligence reports.
//!
//! One report is sent per finalized session. Delivery is best-effort and
//! at-most-once: implementations must not retry, and callers never retry
//! on their behalf. Upgrading this to at-least-once would also require
//! idempotency keys on the evaluator side.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::intelligence::{describe_tactics, Intelligence};
use crate::domain::session::FinalizationSnapshot;

/// Port for delivering finalization reports.
#[async_trait]
pub trait EvaluatorClient: Send + Sync {
    /// Sends one report. A single attempt.
    async fn report(&self, report: &EvaluatorReport) -> Result<(), EvaluatorError>;
}

/// Wire payload of an evaluator report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatorReport {
    pub session_id: String,
    pub scam_detected: bool,
    pub total_messages_exchanged: u32,
    pub extracted_intelligence: Intelligence,
    pub agent_notes: String,
}

impl From<&FinalizationSnapshot> for EvaluatorReport {
    fn from(snapshot: &FinalizationSnapshot) -> Self {
        Self {
            session_id: snapshot.session_key.to_string(),
            scam_detected: snapshot.scam_detected,
            total_messages_exchanged: snapshot.total_messages,
            extracted_intelligence: snapshot.intelligence.clone(),
            agent_notes: describe_tactics(&snapshot.intelligence),
        }
    }
}

/// Report delivery errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluatorError {
    #[error("evaluator request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("evaluator rejected report with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionKey;
    use crate::domain::intelligence::IntelligenceCategory;
    use crate::domain::session::FinalizationReason;

    #[test]
    fn report_serializes_with_evaluator_field_names() {
        let mut intel = Intelligence::new();
        intel.insert(IntelligenceCategory::UpiIds, "test@paytm");
        let snapshot = FinalizationSnapshot {
            session_key: SessionKey::new("abc").unwrap(),
            scam_detected: true,
            total_messages: 6,
            intelligence: intel,
            confidence: 0.85,
            reason: FinalizationReason::TurnCapReached,
        };

        let json = serde_json::to_value(EvaluatorReport::from(&snapshot)).unwrap();

        assert_eq!(json["sessionId"], "abc");
        assert_eq!(json["scamDetected"], true);
        assert_eq!(json["totalMessagesExchanged"], 6);
        assert_eq!(json["extractedIntelligence"]["upiIds"][0], "test@paytm");
        assert_eq!(
            json["agentNotes"],
            "Scammer used payment redirection tactics."
        );
        assert!(json.get("confidence").is_none());
    }
}
