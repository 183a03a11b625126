//! Session Store Port - keyed storage of live sessions.
//!
//! Each session sits behind its own async mutex. Callers hold that lock for
//! the whole read-modify-write of one inbound message, which serializes
//! messages for the same session while different sessions proceed
//! independently. The store's own bookkeeping lock is only held for map
//! lookups, never across a session update.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{SessionKey, Timestamp};
use crate::domain::session::Session;

/// Shared, individually locked session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Port for session storage.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Looks up a live session.
    async fn get(&self, key: &SessionKey) -> Option<SessionHandle>;

    /// Stores `session` unless its key is already present.
    ///
    /// Returns the handle that ended up stored and whether `session` was
    /// the one inserted. When two requests race to create the same
    /// session, exactly one wins and both get the winner's handle.
    async fn insert_if_absent(&self, session: Session) -> (SessionHandle, bool);

    /// Removes sessions idle for longer than `idle_timeout_secs`.
    ///
    /// Sessions currently locked by a request are skipped. Returns the
    /// number of sessions removed.
    async fn remove_expired(&self, now: Timestamp, idle_timeout_secs: u64) -> usize;

    /// Number of live sessions.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
