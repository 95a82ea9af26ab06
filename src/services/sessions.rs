use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;
use crate::core::{Catalog, ViewSynchronizer};
use crate::models::SessionOptions;
use crate::services::notifier::NoticeQueue;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),
}

/// One browser session: its synchronizer and its pending notices
#[derive(Clone)]
pub struct Session {
    pub id: Uuid,
    pub sync: Arc<ViewSynchronizer>,
    pub notices: NoticeQueue,
}

/// In-memory store of discovery sessions
///
/// Sessions are dropped after the idle period or when capacity is exceeded;
/// nothing is ever written anywhere else.
pub struct SessionStore {
    sessions: moka::future::Cache<Uuid, Session>,
    catalog: Arc<Catalog>,
    options: SessionOptions,
}

impl SessionStore {
    pub fn new(catalog: Arc<Catalog>, options: SessionOptions, max_sessions: u64, idle: Duration) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_idle(idle)
            .build();

        Self {
            sessions,
            catalog,
            options,
        }
    }

    /// Start a new session with fresh search and selection state
    pub async fn create(&self) -> Session {
        let id = Uuid::new_v4();
        let notices = NoticeQueue::default();
        let sync = Arc::new(ViewSynchronizer::new(
            Arc::clone(&self.catalog),
            self.options,
            Arc::new(notices.clone()),
        ));

        let session = Session { id, sync, notices };
        self.sessions.insert(id, session.clone()).await;
        tracing::info!("Session created: {}", id);
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, SessionError> {
        match self.sessions.get(&id).await {
            Some(session) => {
                tracing::trace!("Session hit: {}", id);
                Ok(session)
            }
            None => Err(SessionError::NotFound(id)),
        }
    }

    pub async fn remove(&self, id: Uuid) {
        self.sessions.invalidate(&id).await;
        tracing::debug!("Session removed: {}", id);
    }

    pub fn active_sessions(&self) -> u64 {
        self.sessions.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionGranularity;

    fn store() -> SessionStore {
        let catalog = Catalog::from_hotels(vec![], RegionGranularity::State).unwrap();
        SessionStore::new(Arc::new(catalog), SessionOptions::default(), 100, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = store();
        let session = store.create().await;

        let found = store.get(session.id).await.unwrap();
        assert_eq!(found.id, session.id);
        assert!(Arc::ptr_eq(&found.sync, &session.sync));
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let store = store();
        let a = store.create().await;
        let b = store.create().await;

        a.sync.set_radius(30.0).await;
        assert_eq!(b.sync.search_state().await.radius_km, 10.0);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = store();
        let session = store.create().await;
        store.remove(session.id).await;

        assert!(matches!(store.get(session.id).await, Err(SessionError::NotFound(_))));
    }
}
