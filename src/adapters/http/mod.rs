//! HTTP adapters - REST API implementations.

pub mod error;
pub mod honeypot;
pub mod middleware;

pub use error::{ApiError, ErrorResponse};
pub use honeypot::{honeypot_router, HoneypotAppState};
pub use middleware::ApiKeyState;
