//! SessionStatus - engagement lifecycle of a honeypot conversation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a session.
///
/// ```text
/// New ──► ActiveBenign ──► ActiveScamUnfinalized ──► ActiveScamFinalized
///  └─────────────────────────────▲
/// ```
///
/// The scam flag and the finalized flag are both derived from the status,
/// so neither can ever move back to false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    New,
    ActiveBenign,
    ActiveScamUnfinalized,
    ActiveScamFinalized,
}

impl SessionStatus {
    /// True once any message in the session has been classified as a scam.
    pub fn is_scam(&self) -> bool {
        matches!(
            self,
            SessionStatus::ActiveScamUnfinalized | SessionStatus::ActiveScamFinalized
        )
    }

    /// True once the evaluator report has been triggered.
    pub fn is_finalized(&self) -> bool {
        matches!(self, SessionStatus::ActiveScamFinalized)
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (New, ActiveBenign)
                | (New, ActiveScamUnfinalized)
                | (ActiveBenign, ActiveScamUnfinalized)
                | (ActiveScamUnfinalized, ActiveScamFinalized)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            New => vec![ActiveBenign, ActiveScamUnfinalized],
            ActiveBenign => vec![ActiveScamUnfinalized],
            ActiveScamUnfinalized => vec![ActiveScamFinalized],
            ActiveScamFinalized => vec![],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::New => "New",
            SessionStatus::ActiveBenign => "ActiveBenign",
            SessionStatus::ActiveScamUnfinalized => "ActiveScamUnfinalized",
            SessionStatus::ActiveScamFinalized => "ActiveScamFinalized",
        };
        write!(f, "{}", s)
    }
}
