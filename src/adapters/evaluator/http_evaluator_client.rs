//! HTTP evaluator client.
//!
//! Posts each report as JSON with a short timeout. One attempt only.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::ports::{EvaluatorClient, EvaluatorError, EvaluatorReport};

/// Longest error body kept in [`EvaluatorError::Rejected`].
const MAX_ERROR_BODY: usize = 512;

pub struct HttpEvaluatorClient {
    url: String,
    timeout: Duration,
    client: Client,
}

impl HttpEvaluatorClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "HTTP client builder failed, using defaults");
                Client::new()
            });

        Self {
            url: url.into(),
            timeout,
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_send_error(&self, e: reqwest::Error) -> EvaluatorError {
        if e.is_timeout() {
            EvaluatorError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            EvaluatorError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl EvaluatorClient for HttpEvaluatorClient {
    async fn report(&self, report: &EvaluatorReport) -> Result<(), EvaluatorError> {
        let response = self
            .client
            .post(&self.url)
            .json(report)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        Err(EvaluatorError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
