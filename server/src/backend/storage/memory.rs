//! In-process store used by tests and by `database_url: memory`.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::{KeyValueStorage, StorageScope};

#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<(StorageScope, String), String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

}

#[async_trait]
impl KeyValueStorage for MemoryStore {
    async fn get(&self, scope: StorageScope, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().await.get(&(scope, key.to_string())).cloned())
    }

    async fn set(&self, scope: StorageScope, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .await
            .insert((scope, key.to_string()), value.to_string());
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        scope: StorageScope,
        key: &str,
        expected: Option<&str>,
        new_value: &str,
    ) -> Result<bool> {
        let mut values = self.values.write().await;
        let slot = (scope, key.to_string());
        if values.get(&slot).map(String::as_str) != expected {
            return Ok(false);
        }
        values.insert(slot, new_value.to_string());
        Ok(true)
    }
}
