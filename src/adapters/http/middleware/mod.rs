//! HTTP middleware for axum.
//!
//! - `api_key` - Shared-secret `x-api-key` check

pub mod api_key;

pub use api_key::{require_api_key, ApiKeyState, API_KEY_HEADER};
