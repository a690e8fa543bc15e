//! Application state for dependency injection.

use std::sync::Arc;

use directory_service_lib::config::DirectoryConfig;
use directory_service_lib::service::{DirectoryService, PurchaseService};
use directory_service_lib::Services;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn DirectoryService>,
    pub purchases: Arc<dyn PurchaseService>,
    pub config: DirectoryConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(services: Services, config: DirectoryConfig) -> Self {
        Self {
            directory: services.directory,
            purchases: services.purchases,
            config,
        }
    }
}
