//! Session domain module.
//!
//! One session per conversation with a suspected sender. The aggregate owns
//! the bounded history, accumulated intelligence, and the lifecycle status
//! whose transitions encode the sticky scam flag and the one-shot
//! finalization latch.

mod aggregate;
mod finalization;
mod status;
mod turn;

pub use aggregate::{Session, DEFAULT_HISTORY_LIMIT};
pub use finalization::{FinalizationPolicy, FinalizationReason, FinalizationSnapshot};
pub use status::SessionStatus;
pub use turn::{Turn, TurnRole};
