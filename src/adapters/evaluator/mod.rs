//! Evaluator Client Adapters.
//!
//! - `HttpEvaluatorClient` - JSON POST to the evaluation endpoint
//! - `RecordingEvaluatorClient` - Captures reports in memory for tests

mod http_evaluator_client;
mod recording_evaluator_client;

pub use http_evaluator_client::HttpEvaluatorClient;
pub use recording_evaluator_client::RecordingEvaluatorClient;
