//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across ports.

pub mod honeypot;

pub use honeypot::{
    CallbackDispatcher, HandleMessageCommand, HandleMessageResult, LifecycleConfig, ReplySource,
    SessionLifecycleManager,
};
