//! Per-student budget records in the private scope.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::backend::domain::models::budget::StudentBudgetRecord;
use crate::backend::storage::traits::{KeyValueStorage, StorageScope};

#[derive(Clone)]
pub struct BudgetRepository {
    storage: Arc<dyn KeyValueStorage>,
}

impl BudgetRepository {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// The record under `key`, or None if absent, unreadable or corrupt
    pub async fn load(&self, key: &str) -> Option<StudentBudgetRecord> {
        let raw = match self.storage.get(StorageScope::Private, key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No budget record stored under {}", key);
                return None;
            }
            Err(e) => {
                warn!("Failed to read budget record {}: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Budget record {} is not valid JSON: {}", key, e);
                None
            }
        }
    }

    pub async fn save(&self, key: &str, record: &StudentBudgetRecord) -> Result<()> {
        let text = serde_json::to_string(record).context("Failed to serialize budget record")?;
        self.storage
            .set(StorageScope::Private, key, &text)
            .await
            .with_context(|| format!("Failed to write budget record {}", key))?;
        debug!("Saved budget record {}", key);
        Ok(())
    }
}
