//! CallbackDispatcher - Fire-and-forget delivery of finalization reports.
//!
//! Delivery contract: best-effort, at-most-once, no retry. Each snapshot is
//! handed to a detached tokio task, so the inbound request never waits on
//! the evaluator and a burst of finalizations cannot block new requests.
//! Failures are logged and dropped.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::session::FinalizationSnapshot;
use crate::ports::{EvaluatorClient, EvaluatorReport};

#[derive(Clone)]
pub struct CallbackDispatcher {
    client: Option<Arc<dyn EvaluatorClient>>,
}

impl CallbackDispatcher {
    pub fn new(client: Arc<dyn EvaluatorClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Dispatcher that drops every snapshot.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Spawns delivery of one report and returns immediately.
    ///
    /// The handle is only useful to tests; production callers drop it.
    pub fn dispatch(&self, snapshot: FinalizationSnapshot) -> Option<JoinHandle<()>> {
        let Some(client) = self.client.clone() else {
            tracing::info!(
                session_id = %snapshot.session_key,
                "Evaluator callback disabled, dropping report"
            );
            return None;
        };

        Some(tokio::spawn(async move {
            let report = EvaluatorReport::from(&snapshot);
            match client.report(&report).await {
                Ok(()) => tracing::info!(
                    session_id = %snapshot.session_key,
                    reason = %snapshot.reason,
                    confidence = snapshot.confidence,
                    total_messages = snapshot.total_messages,
                    "Evaluator report delivered"
                ),
                Err(e) => tracing::warn!(
                    session_id = %snapshot.session_key,
                    reason = %snapshot.reason,
                    error = %e,
                    "Evaluator report failed, not retrying"
                ),
            }
        }))
    }
}
