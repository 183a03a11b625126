//! Mock Reply Generator for testing.
//!
//! Provides a configurable implementation of the ReplyGenerator port so
//! lifecycle tests run without calling a real LLM.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Simulated delays for deadline testing
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockReplyGenerator::new()
//!     .with_reply("Which app should I use sir?")
//!     .with_delay(Duration::from_millis(100));
//!
//! let reply = generator.generate(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{ReplyError, ReplyGenerator, ReplyRequest};

const DEFAULT_REPLY: &str = "Sorry sir, I did not understand. Can you explain again?";

/// A configured mock outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Error(ReplyError),
}

/// Mock reply generator.
#[derive(Debug, Clone, Default)]
pub struct MockReplyGenerator {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<ReplyRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockReplyGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful reply to the queue.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        lock(&self.replies).push_back(MockReply::Text(text.into()));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: ReplyError) -> Self {
        lock(&self.replies).push_back(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// All recorded requests.
    pub fn get_calls(&self) -> Vec<ReplyRequest> {
        lock(&self.calls).clone()
    }

    fn next_reply(&self) -> MockReply {
        lock(&self.replies)
            .pop_front()
            .unwrap_or_else(|| MockReply::Text(DEFAULT_REPLY.to_string()))
    }
}

#[async_trait]
impl ReplyGenerator for MockReplyGenerator {
    async fn generate(&self, request: ReplyRequest) -> Result<String, ReplyError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(err) => Err(err),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
