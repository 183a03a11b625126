//! Honeypot message handling.

mod callback_dispatcher;
mod handle_message;

pub use callback_dispatcher::CallbackDispatcher;
pub use handle_message::{
    HandleMessageCommand, HandleMessageResult, LifecycleConfig, ReplySource,
    SessionLifecycleManager,
};
