//! AI Reply Generator Adapters.
//!
//! Implementations of the ReplyGenerator port.
//!
//! ## Available Adapters
//!
//! - `OpenAIReplyGenerator` - OpenAI chat completions (gpt-4o-mini by default)
//! - `CannedReplyGenerator` - Random canned bait, used when no API key is set
//! - `MockReplyGenerator` - Configurable mock for testing

mod canned_reply_generator;
mod mock_reply_generator;
mod openai_reply_generator;

pub use canned_reply_generator::CannedReplyGenerator;
pub use mock_reply_generator::{MockReply, MockReplyGenerator};
pub use openai_reply_generator::{OpenAIConfig, OpenAIReplyGenerator};
