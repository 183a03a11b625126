//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ReplyGenerator` - Persona reply text generation (LLM)
//! - `EvaluatorClient` - One-shot delivery of finalization reports
//! - `SessionStore` - Keyed, per-session locked conversation state

mod evaluator_client;
mod reply_generator;
mod session_store;

pub use evaluator_client::{EvaluatorClient, EvaluatorError, EvaluatorReport};
pub use reply_generator::{ReplyError, ReplyGenerator, ReplyRequest};
pub use session_store::{SessionHandle, SessionStore};
