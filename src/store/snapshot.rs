//! Snapshot storage interface and implementations
//!
//! The club document is read and written whole. The engine never talks to a
//! store itself; the host loads a snapshot, runs one operation and saves the
//! result. Concurrent writers race at document granularity (last write wins).

use crate::error::{LeagueError, Result};
use crate::types::Store;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Trait for club document persistence
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the stored document, `None` if nothing has been saved yet
    async fn load(&self) -> Result<Option<Store>>;

    /// Replace the stored document
    async fn save(&self, store: &Store) -> Result<()>;

    /// Read the stored document, falling back to a fresh one
    async fn load_or_init(&self, club_name: &str) -> Result<Store> {
        Ok(self
            .load()
            .await?
            .unwrap_or_else(|| Store::new(club_name)))
    }
}

/// JSON file on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Result<Option<Store>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(LeagueError::StorageError {
                    message: format!("Failed to read {}: {}", self.path.display(), e),
                }
                .into())
            }
        };

        let store: Store =
            serde_json::from_str(&contents).map_err(|e| LeagueError::StorageError {
                message: format!("Malformed snapshot {}: {}", self.path.display(), e),
            })?;
        debug!(
            "Loaded snapshot {} ({} seasons)",
            self.path.display(),
            store.seasons.len()
        );
        Ok(Some(store))
    }

    async fn save(&self, store: &Store) -> Result<()> {
        let json = serde_json::to_string_pretty(store).map_err(|e| LeagueError::StorageError {
            message: format!("Failed to serialize snapshot: {}", e),
        })?;

        // Write beside the target and rename so readers never see half a file
        let temp = self.temp_path();
        tokio::fs::write(&temp, json)
            .await
            .map_err(|e| LeagueError::StorageError {
                message: format!("Failed to write {}: {}", temp.display(), e),
            })?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| LeagueError::StorageError {
                message: format!("Failed to replace {}: {}", self.path.display(), e),
            })?;

        info!("Saved snapshot to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: RwLock<Option<Store>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(store: Store) -> Self {
        Self {
            document: RwLock::new(Some(store)),
        }
    }
}

#[async_trait]
impl SnapshotStore for InMemoryStore {
    async fn load(&self) -> Result<Option<Store>> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, store: &Store) -> Result<()> {
        *self.document.write().await = Some(store.clone());
        Ok(())
    }
}
