//! Purchase service - append-only purchase log.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use common::AppResult;
use domain::{split_batch, Purchase};

use crate::store::PurchaseStore;

/// Purchase service trait for dependency injection.
#[async_trait]
pub trait PurchaseService: Send + Sync {
    /// Log one purchase object or an array of them. Returns how many were saved.
    async fn record(&self, body: Value) -> AppResult<usize>;

    /// Every logged purchase, oldest first
    async fn list(&self) -> AppResult<Vec<Purchase>>;
}

/// Concrete implementation of PurchaseService over the log file.
pub struct PurchaseLog {
    store: Arc<PurchaseStore>,
}

impl PurchaseLog {
    pub fn new(store: Arc<PurchaseStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PurchaseService for PurchaseLog {
    async fn record(&self, body: Value) -> AppResult<usize> {
        let entries = split_batch(body)?;
        if entries.is_empty() {
            return Ok(0);
        }

        let received_at = Utc::now();
        let saved = entries.len();

        let section = self.store.begin_write().await;
        let mut purchases = self.store.load().await;
        purchases.extend(
            entries
                .into_iter()
                .map(|fields| Purchase::stamped(fields, received_at)),
        );
        self.store.save(&section, &purchases).await?;
        drop(section);

        tracing::info!(count = saved, "Purchases recorded");
        Ok(saved)
    }

    async fn list(&self) -> AppResult<Vec<Purchase>> {
        Ok(self.store.load().await)
    }
}
