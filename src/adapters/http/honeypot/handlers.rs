//! HTTP handlers for the honeypot endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{HealthResponse, HoneypotRequest, HoneypotResponse};
use crate::adapters::http::error::ApiError;
use crate::application::SessionLifecycleManager;
use crate::domain::foundation::RequestId;

/// Shared state for honeypot handlers.
#[derive(Clone)]
pub struct HoneypotAppState {
    pub manager: Arc<SessionLifecycleManager>,
}

impl HoneypotAppState {
    pub fn new(manager: Arc<SessionLifecycleManager>) -> Self {
        Self { manager }
    }
}

/// POST /honeypot - Process one inbound message.
///
/// # Errors
/// - 400 Bad Request: malformed JSON or blank `sessionId`
/// - 401 Unauthorized: handled by the API key middleware
#[tracing::instrument(name = "honeypot", skip_all, fields(request_id = %RequestId::new()))]
pub async fn handle_honeypot(
    State(state): State<HoneypotAppState>,
    payload: Result<Json<HoneypotRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Malformed honeypot request");
        ApiError::bad_request(rejection.body_text())
    })?;

    let Some(command) = request
        .into_command()
        .map_err(|e| ApiError::bad_request(e.to_string()))?
    else {
        return Ok((StatusCode::OK, Json(HoneypotResponse::probe())));
    };

    let session_id = command.session_key.clone();
    let result = state.manager.handle(command).await;
    tracing::info!(
        session_id = %session_id,
        scam_detected = result.scam_detected,
        total_messages = result.total_messages,
        "Honeypot message handled"
    );
    Ok((StatusCode::OK, Json(HoneypotResponse::from(result))))
}

/// GET / and GET /health - Liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::ok()))
}
