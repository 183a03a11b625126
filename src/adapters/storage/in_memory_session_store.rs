//! In-Memory Session Store Adapter
//!
//! Keeps live sessions in a map guarded by an async RwLock. Each entry is
//! its own `Arc<Mutex<Session>>`, so the map lock is only held for lookups
//! and inserts, never while a request works on a session.

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{SessionKey, Timestamp};
use crate::domain::session::Session;
use crate::ports::{SessionHandle, SessionStore};

/// In-memory storage for live sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, SessionHandle>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every session (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &SessionKey) -> Option<SessionHandle> {
        self.sessions.read().await.get(key).cloned()
    }

    async fn insert_if_absent(&self, session: Session) -> (SessionHandle, bool) {
        let mut sessions = self.sessions.write().await;
        match sessions.entry(session.key().clone()) {
            Entry::Occupied(existing) => (existing.get().clone(), false),
            Entry::Vacant(slot) => {
                let handle = Arc::new(Mutex::new(session));
                slot.insert(handle.clone());
                (handle, true)
            }
        }
    }

    async fn remove_expired(&self, now: Timestamp, idle_timeout_secs: u64) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.idle_secs(now) <= idle_timeout_secs,
            // In use by a request, so not idle.
            Err(_) => true,
        });
        before - sessions.len()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> SessionKey {
        SessionKey::new(s).unwrap()
    }

    fn at(secs: u64) -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000 + secs)
    }

    fn session(s: &str, created: u64) -> Session {
        Session::new(key(s), 10, at(created))
    }

    #[tokio::test]
    async fn get_returns_none_for_unknown_key() {
        let store = InMemorySessionStore::new();
        assert!(store.get(&key("missing")).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn first_insert_wins() {
        let store = InMemorySessionStore::new();

        let (first, inserted_first) = store.insert_if_absent(session("a", 0)).await;
        let (second, inserted_second) = store.insert_if_absent(session("a", 50)).await;

        assert!(inserted_first);
        assert!(!inserted_second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lock().await.created_at(), at(0));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_inserts_share_one_session() {
        let store = InMemorySessionStore::new();

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.insert_if_absent(session("race", i)).await.1 })
            })
            .collect();

        let mut winners = 0;
        for task in tasks {
            if task.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn remove_expired_drops_idle_sessions_only() {
        let store = InMemorySessionStore::new();
        store.insert_if_absent(session("old", 0)).await;
        store.insert_if_absent(session("fresh", 3_000)).await;

        let removed = store.remove_expired(at(3_700), 3_600).await;

        assert_eq!(removed, 1);
        assert!(store.get(&key("old")).await.is_none());
        assert!(store.get(&key("fresh")).await.is_some());
    }

    #[tokio::test]
    async fn remove_expired_skips_locked_sessions() {
        let store = InMemorySessionStore::new();
        let (handle, _) = store.insert_if_absent(session("busy", 0)).await;

        let guard = handle.lock().await;
        let removed = store.remove_expired(at(10_000), 3_600).await;
        drop(guard);

        assert_eq!(removed, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn clear_empties_store() {
        let store = InMemorySessionStore::new();
        store.insert_if_absent(session("a", 0)).await;
        store.clear().await;
        assert!(store.is_empty().await);
    }
}
