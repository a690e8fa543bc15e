//! Directory Service Library
//!
//! User registration, login and listing backed by a single JSON document,
//! plus the append-only purchase log. Transport-agnostic: the gateway crate
//! exposes these services over HTTP.

pub mod config;
pub mod service;
pub mod store;

use std::sync::Arc;

use tracing::info;

use common::StorageError;

use crate::config::DirectoryConfig;
use crate::service::{Directory, DirectoryService, PurchaseLog, PurchaseService};
use crate::store::{JsonFileStore, PurchaseStore};

/// Services wired over their file-backed stores.
#[derive(Clone)]
pub struct Services {
    pub directory: Arc<dyn DirectoryService>,
    pub purchases: Arc<dyn PurchaseService>,
}

/// Open (creating if absent) the configured data files and build the services.
pub async fn bootstrap(config: &DirectoryConfig) -> Result<Services, StorageError> {
    let user_store = Arc::new(JsonFileStore::open(&config.users_file).await?);
    let purchase_store = Arc::new(PurchaseStore::open(&config.purchases_file).await?);

    info!(
        users_file = %config.users_file.display(),
        purchases_file = %config.purchases_file.display(),
        "Directory stores ready"
    );

    Ok(Services {
        directory: Arc::new(Directory::new(user_store)),
        purchases: Arc::new(PurchaseLog::new(purchase_store)),
    })
}
