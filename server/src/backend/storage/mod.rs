//! # Storage Module
//!
//! Persistence for the passcode list and student budget records.
//!
//! The domain layer only sees the [`KeyValueStorage`] capability: text values
//! addressed by a scope and a key. Two implementations ship:
//!
//! - **SQLite** (`SqliteStore`): the `key_values` table, used in production
//! - **Memory** (`MemoryStore`): a process-local map for tests and demos
//!
//! Repositories sit on top and own the JSON encoding. Reads that fail are
//! logged and reported as "no data" so a storage outage looks like an empty
//! classroom rather than an error page.

pub mod memory;
pub mod repositories;
pub mod sqlite;
pub mod traits;

use anyhow::Result;
use std::sync::Arc;

pub use memory::MemoryStore;
pub use repositories::{BudgetRepository, PasscodeRepository};
pub use sqlite::SqliteStore;
pub use traits::{KeyValueStorage, StorageScope};

use crate::config::MEMORY_DATABASE;

/// Open the store named by `database_url`
pub async fn open_storage(database_url: &str) -> Result<Arc<dyn KeyValueStorage>> {
    if database_url == MEMORY_DATABASE {
        tracing::warn!("Using in-memory storage; data will be lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(SqliteStore::new(database_url).await?))
}
