//! Canned Reply Generator - offline stand-in when no LLM is configured.

use async_trait::async_trait;

use crate::domain::persona::canned_bait;
use crate::ports::{ReplyError, ReplyGenerator, ReplyRequest};

/// Always answers with a random canned bait.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedReplyGenerator;

impl CannedReplyGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReplyGenerator for CannedReplyGenerator {
    async fn generate(&self, _request: ReplyRequest) -> Result<String, ReplyError> {
        Ok(canned_bait().to_string())
    }

    fn name(&self) -> &str {
        "canned"
    }
}
