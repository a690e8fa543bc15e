//! In-process user document, for tests and diskless embedding.

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::StorageError;
use domain::UserDocument;

use super::{ExclusiveLock, UserDocumentStore, WriteSection};

/// Memory-backed implementation of [`UserDocumentStore`].
#[derive(Default)]
pub struct InMemoryStore {
    document: RwLock<UserDocument>,
    lock: ExclusiveLock,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document.
    pub fn with_document(document: UserDocument) -> Self {
        Self {
            document: RwLock::new(document),
            lock: ExclusiveLock::new(),
        }
    }
}

#[async_trait]
impl UserDocumentStore for InMemoryStore {
    async fn load(&self) -> UserDocument {
        self.document.read().await.clone()
    }

    async fn save(
        &self,
        _section: &WriteSection,
        document: &UserDocument,
    ) -> Result<(), StorageError> {
        *self.document.write().await = document.clone();
        Ok(())
    }

    async fn begin_write(&self) -> WriteSection {
        self.lock.acquire().await
    }
}
