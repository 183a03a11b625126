//! In-memory evaluator client that records every report.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::sleep;

use crate::ports::{EvaluatorClient, EvaluatorError, EvaluatorReport};

/// Records reports instead of sending them.
///
/// Can be told to fail, in which case the report is still recorded as an
/// attempt but an error is returned.
#[derive(Debug, Clone, Default)]
pub struct RecordingEvaluatorClient {
    reports: Arc<RwLock<Vec<EvaluatorReport>>>,
    failure: Option<EvaluatorError>,
    delay: Duration,
}

impl RecordingEvaluatorClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every report attempt fail with `error`.
    pub fn failing_with(mut self, error: EvaluatorError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Sets simulated latency per report.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// All report attempts so far.
    pub async fn reports(&self) -> Vec<EvaluatorReport> {
        self.reports.read().await.clone()
    }

    pub async fn report_count(&self) -> usize {
        self.reports.read().await.len()
    }
}

#[async_trait]
impl EvaluatorClient for RecordingEvaluatorClient {
    async fn report(&self, report: &EvaluatorReport) -> Result<(), EvaluatorError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        self.reports.write().await.push(report.clone());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intelligence::Intelligence;

    fn report(id: &str) -> EvaluatorReport {
        EvaluatorReport {
            session_id: id.to_string(),
            scam_detected: true,
            total_messages_exchanged: 2,
            extracted_intelligence: Intelligence::new(),
            agent_notes: String::new(),
        }
    }

    #[tokio::test]
    async fn records_reports_in_order() {
        let client = RecordingEvaluatorClient::new();

        client.report(&report("a")).await.unwrap();
        client.report(&report("b")).await.unwrap();

        let ids: Vec<_> = client
            .reports()
            .await
            .into_iter()
            .map(|r| r.session_id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn failing_client_records_attempt_and_errors() {
        let client = RecordingEvaluatorClient::new().failing_with(EvaluatorError::Rejected {
            status: 500,
            body: "boom".to_string(),
        });

        let err = client.report(&report("a")).await.unwrap_err();

        assert!(matches!(err, EvaluatorError::Rejected { status: 500, .. }));
        assert_eq!(client.report_count().await, 1);
    }
}
