//! Axum routes for the honeypot service.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use super::handlers::{handle_honeypot, health, HoneypotAppState};
use crate::adapters::http::middleware::{require_api_key, ApiKeyState};

/// Creates the full router.
///
/// - POST /honeypot - message handling, requires `x-api-key`
/// - GET / and GET /health - liveness, no auth
pub fn honeypot_router(state: HoneypotAppState, api_key: ApiKeyState) -> Router {
    let protected = Router::new()
        .route("/honeypot", post(handle_honeypot))
        .route_layer(middleware::from_fn_with_state(api_key, require_api_key))
        .with_state(state);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .merge(protected)
}
