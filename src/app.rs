//! Wiring: builds the running service from configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::ai::{CannedReplyGenerator, OpenAIConfig, OpenAIReplyGenerator};
use crate::adapters::evaluator::HttpEvaluatorClient;
use crate::adapters::http::{honeypot_router, ApiKeyState, HoneypotAppState};
use crate::adapters::storage::InMemorySessionStore;
use crate::application::{CallbackDispatcher, SessionLifecycleManager};
use crate::config::AppConfig;
use crate::ports::ReplyGenerator;

/// Picks the reply generator: OpenAI when a key is configured, canned bait otherwise.
pub fn reply_generator(config: &AppConfig) -> Arc<dyn ReplyGenerator> {
    match config.ai.openai_key() {
        Some(key) => {
            let openai = OpenAIConfig::new(key)
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout());
            Arc::new(OpenAIReplyGenerator::new(openai))
        }
        None => {
            tracing::warn!("No OpenAI API key configured, replies will use canned bait only");
            Arc::new(CannedReplyGenerator::new())
        }
    }
}

/// Builds the evaluator dispatcher, or a disabled one.
pub fn callback_dispatcher(config: &AppConfig) -> CallbackDispatcher {
    if config.callback.enabled {
        let client = HttpEvaluatorClient::new(config.callback.url.clone(), config.callback.timeout());
        CallbackDispatcher::new(Arc::new(client))
    } else {
        tracing::warn!("Evaluator callback disabled");
        CallbackDispatcher::disabled()
    }
}

/// Builds the lifecycle manager with in-memory session storage.
pub fn lifecycle_manager(config: &AppConfig) -> SessionLifecycleManager {
    SessionLifecycleManager::new(
        Arc::new(InMemorySessionStore::new()),
        reply_generator(config),
        callback_dispatcher(config),
        config.lifecycle(),
    )
}

/// Adds request tracing and the request deadline to a router.
pub fn with_http_layers(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Builds the complete HTTP application.
pub fn build_app(config: &AppConfig) -> Router {
    let manager = Arc::new(lifecycle_manager(config));
    let api_key = ApiKeyState::from_secret(config.auth.api_key.clone());
    let router = honeypot_router(HoneypotAppState::new(manager), api_key);
    with_http_layers(router, config.server.request_timeout())
}
