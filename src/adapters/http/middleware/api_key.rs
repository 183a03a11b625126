//! Shared-secret API key middleware.
//!
//! Callers authenticate with an `x-api-key` header. Requests without the
//! header, or with the wrong key, are rejected with 401 before any handler
//! (and therefore the session engine) runs.
//!
//! ```text
//! Request → require_api_key → handler
//!               ↓ (mismatch)
//!           401 {"status":"error","message":"Invalid API key"}
//! ```
//!
//! # Example
//!
//! ```ignore
//! let key = ApiKeyState::new("secret");
//!
//! let app = Router::new()
//!     .route("/honeypot", post(handle_honeypot))
//!     .layer(middleware::from_fn_with_state(key, require_api_key));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;

use crate::adapters::http::error::ApiError;

/// Header carrying the caller's key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The expected key, shared across requests.
#[derive(Clone)]
pub struct ApiKeyState(Arc<Secret<String>>);

impl ApiKeyState {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Arc::new(Secret::new(key.into())))
    }

    pub fn from_secret(key: Secret<String>) -> Self {
        Self(Arc::new(key))
    }

    /// Compares in constant time for keys of equal length.
    pub fn matches(&self, provided: &str) -> bool {
        let expected = self.0.expose_secret().as_bytes();
        !expected.is_empty() && bool::from(expected.ct_eq(provided.as_bytes()))
    }
}

/// Rejects requests whose `x-api-key` header does not match.
pub async fn require_api_key(
    State(key): State<ApiKeyState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        Some(provided) if key.matches(provided) => next.run(request).await,
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Rejected request with wrong API key");
            ApiError::Unauthorized.into_response()
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "Rejected request without API key");
            ApiError::Unauthorized.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/protected", get(|| async { "ok" }))
            .layer(middleware::from_fn_with_state(
                ApiKeyState::new("secret"),
                require_api_key,
            ))
    }

    async fn status_with(header: Option<&str>) -> StatusCode {
        let mut builder = axum::http::Request::builder().uri("/protected");
        if let Some(value) = header {
            builder = builder.header(API_KEY_HEADER, value);
        }
        app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[test]
    fn matches_only_exact_key() {
        let key = ApiKeyState::new("secret");
        assert!(key.matches("secret"));
        assert!(!key.matches("secret2"));
        assert!(!key.matches("Secret"));
        assert!(!key.matches(""));
    }

    #[test]
    fn empty_expected_key_matches_nothing() {
        assert!(!ApiKeyState::new("").matches(""));
    }

    #[tokio::test]
    async fn correct_key_passes() {
        assert_eq!(status_with(Some("secret")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_key_is_unauthorized() {
        assert_eq!(status_with(Some("nope")).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_key_is_unauthorized() {
        assert_eq!(status_with(None).await, StatusCode::UNAUTHORIZED);
    }
}
