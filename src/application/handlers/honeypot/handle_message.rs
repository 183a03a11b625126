//! SessionLifecycleManager - per-message orchestration.
//!
//! For each inbound message:
//!
//! 1. Load the session, or create it (seeded from caller-supplied history)
//! 2. Append the message and classify it on its own text
//! 3. Update the sticky scam flag
//! 4. Reply: generated (bounded deadline, canned fallback) once the
//!    session is flagged, otherwise a fixed non-committal answer
//! 5. Extract intelligence from the message and merge it into the session
//! 6. Evaluate finalization and dispatch the evaluator report at most once
//! 7. Occasionally sweep idle sessions
//!
//! Steps 1 to 6 run under the session's own lock, so messages for the same
//! session are serialized while other sessions proceed independently.

use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use super::CallbackDispatcher;
use crate::domain::detection::{Classification, EntityExtractor, ScamClassifier};
use crate::domain::foundation::{SessionKey, Timestamp};
use crate::domain::intelligence::{Intelligence, IntelligenceAggregator};
use crate::domain::persona::{canned_bait, ConversationMetadata, PersonaConfig, BENIGN_REPLY};
use crate::domain::session::{
    FinalizationPolicy, FinalizationReason, FinalizationSnapshot, Session, SessionStatus, Turn,
    DEFAULT_HISTORY_LIMIT,
};
use crate::ports::{ReplyGenerator, ReplyRequest, SessionHandle, SessionStore};

/// Engine tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct LifecycleConfig {
    /// Turns retained per session.
    pub history_limit: usize,
    /// Most recent turns handed to the reply generator.
    pub history_window: usize,
    /// Deadline for one reply generation.
    pub reply_timeout: Duration,
    pub temperature: f32,
    /// Sessions idle longer than this are swept.
    pub idle_timeout_secs: u64,
    /// Chance per message of running the idle sweep.
    pub sweep_probability: f64,
    pub policy: FinalizationPolicy,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            history_window: 6,
            reply_timeout: Duration::from_secs(5),
            temperature: 0.7,
            idle_timeout_secs: 3600,
            sweep_probability: 0.05,
            policy: FinalizationPolicy::default(),
        }
    }
}

/// Command for one inbound message.
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    pub session_key: SessionKey,
    pub text: String,
    /// Caller's sender tag for this message. Only logged: the handled
    /// message is always recorded as a sender turn.
    pub sender: String,
    /// Earlier turns, used only when the session is new.
    pub prior_history: Vec<Turn>,
    pub metadata: ConversationMetadata,
}

impl HandleMessageCommand {
    pub fn new(session_key: SessionKey, text: impl Into<String>) -> Self {
        Self {
            session_key,
            text: text.into(),
            sender: "scammer".to_string(),
            prior_history: Vec::new(),
            metadata: ConversationMetadata::default(),
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn with_prior_history(mut self, prior_history: Vec<Turn>) -> Self {
        self.prior_history = prior_history;
        self
    }

    pub fn with_metadata(mut self, metadata: ConversationMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Where the reply text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Session not flagged; fixed non-committal reply.
    Benign,
    /// Produced by the reply generator.
    Generated,
    /// Generator failed or timed out; canned bait substituted.
    Fallback,
}

/// Outcome of one message.
#[derive(Debug, Clone)]
pub struct HandleMessageResult {
    pub reply: String,
    pub reply_source: ReplySource,
    /// Sticky session flag, not just this message's verdict.
    pub scam_detected: bool,
    /// Verdict for this message alone.
    pub classification: Classification,
    pub total_messages: u32,
    pub intelligence: Intelligence,
    pub status: SessionStatus,
    /// Set on the one message that finalized the session.
    pub finalized: Option<FinalizationReason>,
}

/// Orchestrates detection, engagement and reporting per message.
pub struct SessionLifecycleManager {
    store: Arc<dyn SessionStore>,
    generator: Arc<dyn ReplyGenerator>,
    dispatcher: CallbackDispatcher,
    classifier: ScamClassifier,
    extractor: EntityExtractor,
    aggregator: IntelligenceAggregator,
    config: LifecycleConfig,
}

impl SessionLifecycleManager {
    pub fn new(
        store: Arc<dyn SessionStore>,
        generator: Arc<dyn ReplyGenerator>,
        dispatcher: CallbackDispatcher,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            store,
            generator,
            dispatcher,
            classifier: ScamClassifier::new(),
            extractor: EntityExtractor::new(),
            aggregator: IntelligenceAggregator::new(),
            config,
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Handles one inbound message at the current time.
    pub async fn handle(&self, cmd: HandleMessageCommand) -> HandleMessageResult {
        self.handle_at(cmd, Timestamp::now()).await
    }

    /// Handles one inbound message with an explicit clock.
    pub async fn handle_at(&self, cmd: HandleMessageCommand, now: Timestamp) -> HandleMessageResult {
        let result = self.process(cmd, now).await;
        if self.should_sweep() {
            self.sweep(now).await;
        }
        result
    }

    /// Removes sessions idle past the configured timeout.
    pub async fn sweep(&self, now: Timestamp) -> usize {
        let removed = self
            .store
            .remove_expired(now, self.config.idle_timeout_secs)
            .await;
        if removed > 0 {
            tracing::info!(removed, "Swept idle sessions");
        }
        removed
    }

    fn should_sweep(&self) -> bool {
        let p = self.config.sweep_probability;
        p > 0.0 && rand::thread_rng().gen::<f64>() < p
    }

    async fn load_or_create(&self, cmd: &HandleMessageCommand, now: Timestamp) -> SessionHandle {
        if let Some(handle) = self.store.get(&cmd.session_key).await {
            return handle;
        }

        let session = Session::seeded(
            cmd.session_key.clone(),
            self.config.history_limit,
            cmd.prior_history.iter().cloned(),
            now,
        );
        let (handle, created) = self.store.insert_if_absent(session).await;
        if created {
            tracing::info!(
                session_id = %cmd.session_key,
                seeded_turns = cmd.prior_history.len(),
                "Session created"
            );
        }
        handle
    }

    async fn process(&self, cmd: HandleMessageCommand, now: Timestamp) -> HandleMessageResult {
        let handle = self.load_or_create(&cmd, now).await;
        let mut session = handle.lock().await;

        session.record_turn(Turn::sender(cmd.text.as_str()), now);

        let classification = self.classifier.classify(&cmd.text);
        if session.record_classification(classification.is_scam) {
            tracing::info!(
                session_id = %cmd.session_key,
                confidence = classification.confidence,
                "Session flagged as scam"
            );
        }
        tracing::debug!(
            session_id = %cmd.session_key,
            sender = %cmd.sender,
            is_scam = classification.is_scam,
            confidence = classification.confidence,
            urgency_matches = classification.urgency_matches,
            keyword_matches = classification.keyword_matches,
            "Message classified"
        );

        let (reply, reply_source) = if session.is_scam() {
            let (reply, source) = self.engage(&session, &cmd.metadata).await;
            session.record_turn(Turn::engine(reply.as_str()), now);
            (reply, source)
        } else {
            (BENIGN_REPLY.to_string(), ReplySource::Benign)
        };

        let extraction = self.extractor.extract(&cmd.text);
        session.absorb_intelligence(&self.aggregator, &extraction);

        let finalized = self.try_finalize(&mut session, classification, now);

        HandleMessageResult {
            reply,
            reply_source,
            scam_detected: session.is_scam(),
            classification,
            total_messages: session.total_messages(),
            intelligence: session.intelligence().clone(),
            status: session.status(),
            finalized,
        }
    }

    /// Asks the generator for a reply under the configured deadline.
    ///
    /// Never fails: errors, timeouts and blank replies become canned bait.
    async fn engage(
        &self,
        session: &Session,
        metadata: &ConversationMetadata,
    ) -> (String, ReplySource) {
        let persona = PersonaConfig::from_metadata(metadata, self.config.temperature);
        let request = ReplyRequest::new(
            session.recent_history(self.config.history_window),
            persona,
            metadata.clone(),
        );

        let outcome = tokio::time::timeout(self.config.reply_timeout, self.generator.generate(request)).await;

        match outcome {
            Ok(Ok(text)) if !text.trim().is_empty() => (text.trim().to_string(), ReplySource::Generated),
            Ok(Ok(_)) => {
                tracing::warn!(
                    session_id = %session.key(),
                    generator = self.generator.name(),
                    "Reply generator returned empty text, using canned bait"
                );
                (canned_bait().to_string(), ReplySource::Fallback)
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    session_id = %session.key(),
                    generator = self.generator.name(),
                    error = %e,
                    "Reply generation failed, using canned bait"
                );
                (canned_bait().to_string(), ReplySource::Fallback)
            }
            Err(_) => {
                tracing::warn!(
                    session_id = %session.key(),
                    generator = self.generator.name(),
                    timeout_ms = self.config.reply_timeout.as_millis() as u64,
                    "Reply generation timed out, using canned bait"
                );
                (canned_bait().to_string(), ReplySource::Fallback)
            }
        }
    }

    fn try_finalize(
        &self,
        session: &mut Session,
        classification: Classification,
        now: Timestamp,
    ) -> Option<FinalizationReason> {
        if !session.is_scam() || session.is_finalized() {
            return None;
        }

        let reason = self.config.policy.evaluate(
            session.intelligence(),
            session.total_messages(),
            session.elapsed_secs(now),
        )?;

        if !session.finalize() {
            return None;
        }

        tracing::info!(
            session_id = %session.key(),
            reason = %reason,
            total_messages = session.total_messages(),
            messages_exchanged = session.messages_exchanged(),
            intelligence_items = session.intelligence().total_items(),
            "Session finalized"
        );

        self.dispatcher.dispatch(FinalizationSnapshot {
            session_key: session.key().clone(),
            scam_detected: true,
            total_messages: session.total_messages(),
            intelligence: session.intelligence().clone(),
            confidence: classification.confidence,
            reason,
        });

        Some(reason)
    }
}
