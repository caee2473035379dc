//! In-memory session store
//!
//! Session locations live only as long as the process. The store is bounded:
//! the least recently used session is dropped once `max_sessions` is reached,
//! and sessions idle for longer than the idle timeout expire.

use std::time::Duration;

use application::ports::SessionStore;
use async_trait::async_trait;
use domain::{Location, SessionId};
use moka::{future::Cache, policy::EvictionPolicy};

/// Default upper bound on stored sessions
pub const DEFAULT_MAX_SESSIONS: u64 = 10_000;

/// Default idle time after which a session is forgotten
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(24 * 60 * 60);

/// [`SessionStore`] backed by a bounded moka cache
#[derive(Clone)]
pub struct InMemorySessionStore {
    locations: Cache<SessionId, Location>,
}

impl std::fmt::Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySessionStore")
            .field("entries", &self.locations.entry_count())
            .field("max_sessions", &self.locations.policy().max_capacity())
            .finish()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE)
    }
}

impl InMemorySessionStore {
    /// Create an empty store with the default limits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store holding at most `max_sessions` sessions, each
    /// forgotten after `idle` without a read or write
    #[must_use]
    pub fn with_limits(max_sessions: u64, idle: Duration) -> Self {
        let locations = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self { locations }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn location(&self, session: &SessionId) -> Option<Location> {
        self.locations.get(session).await
    }

    async fn set_location(&self, session: SessionId, location: Location) {
        self.locations.insert(session, location).await;
    }

    async fn session_count(&self) -> usize {
        self.locations.run_pending_tasks().await;
        usize::try_from(self.locations.entry_count()).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_session_has_no_location() {
        let store = InMemorySessionStore::new();
        assert!(store.location(&SessionId::new()).await.is_none());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn set_then_get() {
        let store = InMemorySessionStore::new();
        let session = SessionId::new();

        store
            .set_location(session, Location::new("Vienna").unwrap())
            .await;

        assert_eq!(
            store.location(&session).await.map(|l| l.to_string()),
            Some("Vienna".to_string())
        );
    }

    #[tokio::test]
    async fn set_replaces_previous_location() {
        let store = InMemorySessionStore::new();
        let session = SessionId::new();

        store.set_location(session, Location::new("Rome").unwrap()).await;
        store.set_location(session, Location::new("Milan").unwrap()).await;

        assert_eq!(store.location(&session).await.unwrap().as_str(), "Milan");
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        let a = SessionId::new();
        let b = SessionId::new();

        store.set_location(a, Location::new("Oslo").unwrap()).await;
        store.set_location(b, Location::new("Bergen").unwrap()).await;

        assert_eq!(store.location(&a).await.unwrap().as_str(), "Oslo");
        assert_eq!(store.location(&b).await.unwrap().as_str(), "Bergen");
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn session_count_stays_within_capacity() {
        let store = InMemorySessionStore::with_limits(100, DEFAULT_SESSION_IDLE);
        let city = Location::new("Lisbon").unwrap();

        let mut last = SessionId::new();
        for _ in 0..1_000 {
            last = SessionId::new();
            store.set_location(last, city.clone()).await;
        }

        let count = store.session_count().await;
        assert!(count <= 100, "{count} sessions stored");
        assert_eq!(store.location(&last).await.unwrap().as_str(), "Lisbon");
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let store = InMemorySessionStore::with_limits(10, Duration::from_millis(50));
        let session = SessionId::new();

        store
            .set_location(session, Location::new("Porto").unwrap())
            .await;
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(store.location(&session).await.is_none());
        assert_eq!(store.session_count().await, 0);
    }
}
