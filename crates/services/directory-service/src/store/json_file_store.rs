//! User document persisted as a single JSON file.

use std::path::PathBuf;

use async_trait::async_trait;

use common::StorageError;
use domain::UserDocument;

use super::file::{ensure_file, read_json, write_json_atomic};
use super::{ExclusiveLock, UserDocumentStore, WriteSection};

/// File-backed implementation of [`UserDocumentStore`].
pub struct JsonFileStore {
    path: PathBuf,
    lock: ExclusiveLock,
}

impl JsonFileStore {
    /// Create a store over `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: ExclusiveLock::new(),
        }
    }

    /// Create a store and make sure its file exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self::new(path);
        store.init().await?;
        Ok(store)
    }

    /// Write an empty document if the file is absent.
    pub async fn init(&self) -> Result<(), StorageError> {
        if ensure_file(&self.path, &UserDocument::default()).await? {
            tracing::info!(path = %self.path.display(), "Created empty user document");
        }
        Ok(())
    }
}

#[async_trait]
impl UserDocumentStore for JsonFileStore {
    async fn load(&self) -> UserDocument {
        read_json(&self.path).await.unwrap_or_default()
    }

    async fn save(
        &self,
        _section: &WriteSection,
        document: &UserDocument,
    ) -> Result<(), StorageError> {
        write_json_atomic(&self.path, document).await
    }

    async fn begin_write(&self) -> WriteSection {
        self.lock.acquire().await
    }
}
