//! Purchase log persisted as a JSON array.

use std::path::PathBuf;

use common::StorageError;
use domain::Purchase;

use super::file::{ensure_file, read_json, write_json_atomic};
use super::{ExclusiveLock, WriteSection};

/// Append-only purchase log file.
pub struct PurchaseStore {
    path: PathBuf,
    lock: ExclusiveLock,
}

impl PurchaseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: ExclusiveLock::new(),
        }
    }

    /// Create a store and make sure its file exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self::new(path);
        if ensure_file(&store.path, &Vec::<Purchase>::new()).await? {
            tracing::info!(path = %store.path.display(), "Created empty purchase log");
        }
        Ok(store)
    }

    /// All logged purchases; a missing or malformed file reads as empty.
    pub async fn load(&self) -> Vec<Purchase> {
        read_json(&self.path).await.unwrap_or_default()
    }

    /// Replace the log. Requires the exclusive section.
    pub async fn save(
        &self,
        _section: &WriteSection,
        purchases: &[Purchase],
    ) -> Result<(), StorageError> {
        write_json_atomic(&self.path, purchases).await
    }

    pub async fn begin_write(&self) -> WriteSection {
        self.lock.acquire().await
    }
}
