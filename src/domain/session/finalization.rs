//! Finalization policy - decides when enough evidence has been gathered.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::SessionKey;
use crate::domain::intelligence::Intelligence;

/// Why a session was finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizationReason {
    /// Enough distinct actionable categories were collected.
    SufficientIntelligence,
    /// The conversation reached the turn cap.
    TurnCapReached,
    /// The session has been running longer than allowed.
    DurationExceeded,
}

impl fmt::Display for FinalizationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FinalizationReason::SufficientIntelligence => "sufficient_intelligence",
            FinalizationReason::TurnCapReached => "turn_cap_reached",
            FinalizationReason::DurationExceeded => "duration_exceeded",
        };
        f.write_str(s)
    }
}

/// Pure decision over intelligence, message count and session age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizationPolicy {
    pub min_actionable_categories: usize,
    pub turn_cap: u32,
    pub max_session_secs: u64,
}

impl Default for FinalizationPolicy {
    fn default() -> Self {
        Self {
            min_actionable_categories: 2,
            turn_cap: 10,
            max_session_secs: 600,
        }
    }
}

impl FinalizationPolicy {
    pub fn new(turn_cap: u32, max_session_secs: u64) -> Self {
        Self {
            turn_cap,
            max_session_secs,
            ..Self::default()
        }
    }

    /// Returns the first satisfied reason, if any.
    pub fn evaluate(
        &self,
        intelligence: &Intelligence,
        total_messages: u32,
        elapsed_secs: u64,
    ) -> Option<FinalizationReason> {
        if intelligence.actionable_category_count() >= self.min_actionable_categories {
            Some(FinalizationReason::SufficientIntelligence)
        } else if total_messages >= self.turn_cap {
            Some(FinalizationReason::TurnCapReached)
        } else if elapsed_secs > self.max_session_secs {
            Some(FinalizationReason::DurationExceeded)
        } else {
            None
        }
    }

    pub fn should_finalize(
        &self,
        intelligence: &Intelligence,
        total_messages: u32,
        elapsed_secs: u64,
    ) -> bool {
        self.evaluate(intelligence, total_messages, elapsed_secs)
            .is_some()
    }
}

/// Point-in-time view of a session at the moment it finalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalizationSnapshot {
    pub session_key: SessionKey,
    pub scam_detected: bool,
    pub total_messages: u32,
    pub intelligence: Intelligence,
    /// Confidence of the classification of the message that triggered it.
    pub confidence: f64,
    pub reason: FinalizationReason,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intelligence::IntelligenceCategory;

    fn intel(categories: &[IntelligenceCategory]) -> Intelligence {
        let mut intel = Intelligence::new();
        for c in categories {
            intel.insert(*c, "x");
        }
        intel
    }

    #[test]
    fn nothing_collected_does_not_fire() {
        let policy = FinalizationPolicy::default();
        assert!(!policy.should_finalize(&Intelligence::new(), 3, 30));
    }

    #[test]
    fn one_actionable_category_is_not_enough() {
        let policy = FinalizationPolicy::default();
        let intel = intel(&[
            IntelligenceCategory::UpiIds,
            IntelligenceCategory::SuspiciousKeywords,
        ]);
        assert!(!policy.should_finalize(&intel, 2, 10));
    }

    #[test]
    fn two_actionable_categories_fire() {
        let policy = FinalizationPolicy::default();
        let intel = intel(&[IntelligenceCategory::PhoneNumbers, IntelligenceCategory::BankAccounts]);
        assert_eq!(
            policy.evaluate(&intel, 2, 10),
            Some(FinalizationReason::SufficientIntelligence)
        );
    }

    #[test]
    fn turn_cap_fires_without_intelligence() {
        let policy = FinalizationPolicy::default();
        assert!(!policy.should_finalize(&Intelligence::new(), 9, 10));
        assert_eq!(
            policy.evaluate(&Intelligence::new(), 10, 10),
            Some(FinalizationReason::TurnCapReached)
        );
    }

    #[test]
    fn duration_must_strictly_exceed_ceiling() {
        let policy = FinalizationPolicy::default();
        assert!(!policy.should_finalize(&Intelligence::new(), 1, 600));
        assert_eq!(
            policy.evaluate(&Intelligence::new(), 1, 601),
            Some(FinalizationReason::DurationExceeded)
        );
    }

    #[test]
    fn custom_limits_are_respected() {
        let policy = FinalizationPolicy::new(4, 60);
        assert!(policy.should_finalize(&Intelligence::new(), 4, 0));
        assert!(policy.should_finalize(&Intelligence::new(), 0, 61));
        assert_eq!(policy.min_actionable_categories, 2);
    }
}
