//! Storage layer for the user document and the purchase log.
//!
//! Every mutation follows the same cycle: enter the store's exclusive write
//! section, load the whole document, change it in memory, save it back.
//! Holding the section for the full cycle is what keeps uniqueness checks
//! honest under concurrent writers. Reads do not lock; saves replace the file
//! atomically so a reader sees either the old or the new document.

mod file;
mod json_file_store;
mod memory_store;
mod purchase_store;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use common::StorageError;
use domain::UserDocument;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use json_file_store::JsonFileStore;
pub use memory_store::InMemoryStore;
pub use purchase_store::PurchaseStore;

/// Mutual exclusion for read-modify-write cycles on one document.
#[derive(Debug, Clone, Default)]
pub struct ExclusiveLock(Arc<Mutex<()>>);

impl ExclusiveLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and enter the exclusive section.
    pub async fn acquire(&self) -> WriteSection {
        WriteSection {
            _guard: self.0.clone().lock_owned().await,
        }
    }

    /// Enter the exclusive section only if nobody holds it.
    pub fn try_acquire(&self) -> Option<WriteSection> {
        self.0
            .clone()
            .try_lock_owned()
            .ok()
            .map(|guard| WriteSection { _guard: guard })
    }
}

/// Proof of holding a store's exclusive section. Released on drop.
#[derive(Debug)]
pub struct WriteSection {
    _guard: OwnedMutexGuard<()>,
}

/// User document store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserDocumentStore: Send + Sync {
    /// Current document. Never fails: unreadable or malformed content
    /// yields an empty document.
    async fn load(&self) -> UserDocument;

    /// Replace the stored document. Requires the exclusive section.
    async fn save(&self, section: &WriteSection, document: &UserDocument)
        -> Result<(), StorageError>;

    /// Enter the exclusive section for a read-modify-write cycle.
    async fn begin_write(&self) -> WriteSection;
}
