//! Service layer - business rules on top of the stores.

mod directory_service;
mod purchase_service;

pub use directory_service::{Directory, DirectoryService};
pub use purchase_service::{PurchaseLog, PurchaseService};
