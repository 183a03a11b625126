//! HTTP adapter for the honeypot endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{HealthResponse, HoneypotRequest, HoneypotResponse, MessageDto, PROBE_REPLY};
pub use handlers::HoneypotAppState;
pub use routes::honeypot_router;
