use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use moka::future::Cache;
use moka::notification::{ListenerFuture, RemovalCause};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::store::{FileStore, KvStore, MemoryStore, StoreError};

pub const DEFAULT_MAX_SESSIONS: u64 = 10_000;

#[derive(Debug, Clone)]
pub enum StoreBackend {
    Memory,
    /// One JSON file per session under this directory.
    File(PathBuf),
}

/// Maps session ids to their stores. A session ends once it has been idle for
/// the configured duration, or when the registry is full and it is the one
/// evicted. Its store is dropped with it.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Cache<Uuid, Arc<dyn KvStore>>,
    backend: StoreBackend,
    idle: Duration,
}

impl SessionRegistry {
    pub fn new(backend: StoreBackend, idle: Duration, max_sessions: u64) -> Self {
        let builder = Cache::builder()
            .time_to_idle(idle)
            .max_capacity(max_sessions);

        let sessions = match &backend {
            StoreBackend::Memory => builder.build(),
            StoreBackend::File(dir) => {
                let dir = dir.clone();
                builder
                    .async_eviction_listener(
                        move |session: Arc<Uuid>,
                              _store: Arc<dyn KvStore>,
                              cause: RemovalCause|
                              -> ListenerFuture {
                            let path = FileStore::path_for(&dir, &session);
                            Box::pin(async move {
                                if matches!(cause, RemovalCause::Replaced) {
                                    return;
                                }
                                match tokio::fs::remove_file(&path).await {
                                    Ok(()) => debug!("session {session} ended ({cause:?})"),
                                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                                    Err(e) => warn!("failed to remove {}: {e}", path.display()),
                                }
                            })
                        },
                    )
                    .build()
            }
        };

        Self {
            sessions,
            backend,
            idle,
        }
    }

    pub fn in_memory(idle: Duration) -> Self {
        Self::new(StoreBackend::Memory, idle, DEFAULT_MAX_SESSIONS)
    }

    /// The store for `session`, created on first use.
    pub async fn open(&self, session: Uuid) -> Arc<dyn KvStore> {
        self.sessions
            .get_with(session, async { self.create(&session) })
            .await
    }

    /// The store for `session` if one is already open.
    pub async fn existing(&self, session: &Uuid) -> Option<Arc<dyn KvStore>> {
        self.sessions.get(session).await
    }

    /// A store for `session` that reads as empty and only registers the
    /// session on its first write, so visitors that never write cost nothing.
    pub fn handle(&self, session: Uuid) -> Arc<dyn KvStore> {
        Arc::new(SessionHandle {
            session,
            registry: self.clone(),
        })
    }

    pub async fn end(&self, session: &Uuid) {
        self.sessions.invalidate(session).await;
        self.sessions.run_pending_tasks().await;
    }

    pub async fn active_sessions(&self) -> u64 {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }

    /// Picks up session files left by an earlier run. Files idle longer than
    /// the session timeout are deleted, the rest are reopened so they expire
    /// like any other session. Returns `(restored, removed)`.
    pub async fn load_persisted(&self) -> Result<(usize, usize), StoreError> {
        let StoreBackend::File(dir) = &self.backend else {
            return Ok((0, 0));
        };

        let (mut restored, mut removed) = (0, 0);
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(session) = session_id(&path) else {
                continue;
            };

            let modified = entry.metadata().await?.modified()?;
            let idle_for = SystemTime::now()
                .duration_since(modified)
                .unwrap_or_default();

            if idle_for > self.idle {
                tokio::fs::remove_file(&path).await?;
                removed += 1;
            } else {
                self.open(session).await;
                restored += 1;
            }
        }

        info!(
            "restored {restored} sessions from {}, removed {removed} stale",
            dir.display()
        );
        Ok((restored, removed))
    }

    fn create(&self, session: &Uuid) -> Arc<dyn KvStore> {
        debug!("opening store for session {session}");
        match &self.backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::File(dir) => Arc::new(FileStore::for_session(dir, session)),
        }
    }
}

/// `<uuid>.json` file names only.
fn session_id(path: &Path) -> Option<Uuid> {
    if path.extension()? != "json" {
        return None;
    }
    Uuid::parse_str(path.file_stem()?.to_str()?).ok()
}

struct SessionHandle {
    session: Uuid,
    registry: SessionRegistry,
}

#[async_trait]
impl KvStore for SessionHandle {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.registry.existing(&self.session).await {
            Some(store) => store.get(key).await,
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.registry.open(self.session).await.set(key, value).await
    }

    async fn take(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.registry.existing(&self.session).await {
            Some(store) => store.take(key).await,
            None => Ok(None),
        }
    }

    async fn len(&self) -> Result<usize, StoreError> {
        match self.registry.existing(&self.session).await {
            Some(store) => store.len().await,
            None => Ok(0),
        }
    }
}
