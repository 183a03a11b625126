//! Domain layer containing the honeypot decision logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps, errors, state machines)
//! - `detection` - Scam classification and entity extraction over single messages
//! - `intelligence` - Categorized identifier sets and their aggregation
//! - `session` - Conversation state, lifecycle, and finalization policy
//! - `persona` - Reply styling derived from conversation metadata

pub mod detection;
pub mod foundation;
pub mod intelligence;
pub mod persona;
pub mod session;
