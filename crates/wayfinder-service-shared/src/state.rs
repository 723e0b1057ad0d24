//! Application state for the HTTP service.
//!
//! Graph mutations go through one SQLite connection behind a mutex, so they
//! are serialised. Routing only reads: for a file-backed store every routing
//! call opens its own read-only connection and never waits on that mutex.
//! In-memory stores have no second connection to open and share the mutex.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use wayfinder_lib::{Error as LibError, GraphStore};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to open or migrate the graph database.
    StoreOpen { path: PathBuf, source: LibError },
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreOpen { path, source } => {
                let path = path.display();
                write!(f, "failed to open graph store at {path}: {source}")
            }
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreOpen { source, .. } => Some(source),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; every clone refers to the same store.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use wayfinder_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let store = state.store();
///     let floors = store.list_floors();
/// }
///
/// let state = AppState::load("campus.db").unwrap();
/// let app = Router::new()
///     .route("/api/v1/floors", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Mutex<GraphStore>,
    db_path: Option<PathBuf>,
    opened_at: DateTime<Utc>,
}

/// Store handle for read-only work, see [`AppState::reader`].
pub enum StoreReader<'a> {
    /// Dedicated read-only connection to the database file.
    Dedicated(GraphStore),
    /// The locked writer connection.
    Shared(MutexGuard<'a, GraphStore>),
}

impl Deref for StoreReader<'_> {
    type Target = GraphStore;

    fn deref(&self) -> &GraphStore {
        match self {
            StoreReader::Dedicated(store) => store,
            StoreReader::Shared(guard) => guard,
        }
    }
}

impl AppState {
    /// Open (creating if needed) the graph database at `db_path`.
    pub fn load(db_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let db_path = db_path.as_ref();
        tracing::info!(path = %db_path.display(), "opening graph store");

        let store = GraphStore::open(db_path).map_err(|source| AppStateError::StoreOpen {
            path: db_path.to_path_buf(),
            source,
        })?;
        match store.floor_count() {
            Ok(floors) => tracing::info!(floors, "graph store ready"),
            Err(err) => tracing::warn!(error = %err, "graph store opened but floors not readable"),
        }
        Ok(Self::new(store, Some(db_path.to_path_buf())))
    }

    /// Wrap an already opened store, e.g. an in-memory one for tests.
    ///
    /// Reads share the store's connection because no database path is known.
    pub fn from_store(store: GraphStore) -> Self {
        Self::new(store, None)
    }

    fn new(store: GraphStore, db_path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: Mutex::new(store),
                db_path,
                opened_at: Utc::now(),
            }),
        }
    }

    /// Lock the store.
    ///
    /// A panic in another handler poisons the mutex; the connection itself is
    /// still usable because every mutation is transactional, so the poison is
    /// cleared rather than propagated.
    pub fn store(&self) -> MutexGuard<'_, GraphStore> {
        self.inner
            .store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store handle for routing and other read-only calls.
    ///
    /// Opens a dedicated read-only connection when the state was loaded from a
    /// file; falls back to the locked connection otherwise, or when that open
    /// fails.
    pub fn reader(&self) -> StoreReader<'_> {
        if let Some(path) = &self.inner.db_path {
            match GraphStore::open_read_only(path) {
                Ok(store) => return StoreReader::Dedicated(store),
                Err(err) => {
                    tracing::warn!(error = %err, "read-only connection failed, sharing the store");
                }
            }
        }
        StoreReader::Shared(self.store())
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.inner.opened_at
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("opened_at", &self.inner.opened_at)
            .finish()
    }
}
