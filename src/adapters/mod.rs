//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Reply generators (OpenAI, canned, mock)
//! - `evaluator` - Finalization report delivery (HTTP, recording)
//! - `storage` - Session stores (in-memory)
//! - `http` - Axum router, middleware and DTOs

pub mod ai;
pub mod evaluator;
pub mod http;
pub mod storage;
