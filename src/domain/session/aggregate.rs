//! Session aggregate entity.
//!
//! A session holds everything the honeypot knows about one conversation:
//! a bounded history, the intelligence gathered so far, and the lifecycle
//! status that carries the sticky scam and finalized flags.

use serde::Serialize;
use std::collections::VecDeque;

use super::{SessionStatus, Turn};
use crate::domain::foundation::{SessionKey, StateMachine, Timestamp};
use crate::domain::intelligence::{Intelligence, IntelligenceAggregator};

/// Default number of turns retained per session.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Session aggregate.
///
/// # Invariants
///
/// - `history.len() <= history_limit`, oldest turns evicted first
/// - `status` only moves forward (see [`SessionStatus`])
/// - `intelligence` only grows
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    key: SessionKey,
    history: VecDeque<Turn>,
    history_limit: usize,
    intelligence: Intelligence,
    status: SessionStatus,
    /// Every turn ever recorded, including ones evicted from `history`.
    messages_exchanged: u32,
    created_at: Timestamp,
    last_activity: Timestamp,
}

impl Session {
    /// Creates an empty session. A zero `history_limit` is raised to one.
    pub fn new(key: SessionKey, history_limit: usize, now: Timestamp) -> Self {
        let history_limit = history_limit.max(1);
        Self {
            key,
            history: VecDeque::with_capacity(history_limit),
            history_limit,
            intelligence: Intelligence::default(),
            status: SessionStatus::New,
            messages_exchanged: 0,
            created_at: now,
            last_activity: now,
        }
    }

    /// Creates a session pre-populated with caller-supplied prior turns.
    pub fn seeded(
        key: SessionKey,
        history_limit: usize,
        prior: impl IntoIterator<Item = Turn>,
        now: Timestamp,
    ) -> Self {
        let mut session = Self::new(key, history_limit, now);
        for turn in prior {
            session.push(turn);
        }
        session
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_scam(&self) -> bool {
        self.status.is_scam()
    }

    pub fn is_finalized(&self) -> bool {
        self.status.is_finalized()
    }

    pub fn history(&self) -> &VecDeque<Turn> {
        &self.history
    }

    /// The last `n` turns, oldest first.
    pub fn recent_history(&self, n: usize) -> Vec<Turn> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).cloned().collect()
    }

    pub fn intelligence(&self) -> &Intelligence {
        &self.intelligence
    }

    /// Turns currently retained, never above the history limit.
    ///
    /// This is the count reported to callers and used for the turn cap.
    pub fn total_messages(&self) -> u32 {
        u32::try_from(self.history.len()).unwrap_or(u32::MAX)
    }

    /// Every turn ever recorded, evicted ones included. Diagnostic only.
    pub fn messages_exchanged(&self) -> u32 {
        self.messages_exchanged
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn last_activity(&self) -> Timestamp {
        self.last_activity
    }

    /// Seconds since the session was created.
    pub fn elapsed_secs(&self, now: Timestamp) -> u64 {
        now.secs_since(&self.created_at)
    }

    /// Seconds since the last recorded turn.
    pub fn idle_secs(&self, now: Timestamp) -> u64 {
        now.secs_since(&self.last_activity)
    }

    /// Appends a turn, evicting the oldest when over the limit.
    pub fn record_turn(&mut self, turn: Turn, now: Timestamp) {
        self.push(turn);
        self.last_activity = now;
    }

    fn push(&mut self, turn: Turn) {
        self.history.push_back(turn);
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
        self.messages_exchanged = self.messages_exchanged.saturating_add(1);
    }

    /// Applies the verdict for the newest message.
    ///
    /// A positive verdict sets the sticky scam flag; a negative one only
    /// moves a brand-new session to `ActiveBenign`. Returns true when this
    /// call is the one that flipped the session to scam. Repeating a
    /// positive verdict on a scam session is a no-op.
    pub fn record_classification(&mut self, is_scam: bool) -> bool {
        let target = if is_scam {
            SessionStatus::ActiveScamUnfinalized
        } else {
            SessionStatus::ActiveBenign
        };
        match self.status.transition_to(target) {
            Ok(next) => {
                self.status = next;
                is_scam
            }
            Err(_) => false,
        }
    }

    /// Latches the finalized flag.
    ///
    /// Succeeds only for an unfinalized scam session, so exactly one caller
    /// ever observes `true` for a given session.
    pub fn finalize(&mut self) -> bool {
        match self.status.transition_to(SessionStatus::ActiveScamFinalized) {
            Ok(next) => {
                self.status = next;
                true
            }
            Err(_) => false,
        }
    }

    /// Replaces the session intelligence with its merge against `extraction`.
    pub fn absorb_intelligence(
        &mut self,
        aggregator: &IntelligenceAggregator,
        extraction: &Intelligence,
    ) {
        self.intelligence = aggregator.merge(&self.intelligence, extraction);
    }
}
