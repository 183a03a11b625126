//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! - **InMemorySessionStore** - Process-local map of per-session locks

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
