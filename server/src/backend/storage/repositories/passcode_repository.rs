//! The shared passcode list, stored as one JSON array under a fixed key.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::backend::domain::models::passcode::PasscodeEntry;
use crate::backend::storage::traits::{KeyValueStorage, StorageScope};

/// Key of the passcode list in the shared scope
pub const PASSCODE_LIST_KEY: &str = "budget:passcodes";

/// The passcode list as read, plus the raw text needed to commit a change
/// with compare-and-swap.
#[derive(Debug, Clone)]
pub struct PasscodeSnapshot {
    raw: Option<String>,
    pub entries: Vec<PasscodeEntry>,
}

impl PasscodeSnapshot {
    pub fn find(&self, code: &str) -> Option<&PasscodeEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone)]
pub struct PasscodeRepository {
    storage: Arc<dyn KeyValueStorage>,
}

impl PasscodeRepository {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Read the list. Unreadable or unparsable data comes back as an empty
    /// list rather than an error.
    pub async fn load(&self) -> PasscodeSnapshot {
        let raw = match self.storage.get(StorageScope::Shared, PASSCODE_LIST_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to read passcode list, treating as empty: {}", e);
                None
            }
        };

        let entries = match raw.as_deref() {
            Some(text) => serde_json::from_str::<Vec<PasscodeEntry>>(text).unwrap_or_else(|e| {
                warn!("Stored passcode list is not valid JSON, treating as empty: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        debug!("Loaded {} passcodes", entries.len());
        PasscodeSnapshot { raw, entries }
    }

    /// Write `entries` only if the list is unchanged since `snapshot` was read.
    /// Returns false when another writer committed first.
    pub async fn replace(&self, snapshot: &PasscodeSnapshot, entries: &[PasscodeEntry]) -> Result<bool> {
        let text = serde_json::to_string(entries).context("Failed to serialize passcode list")?;
        self.storage
            .compare_and_swap(StorageScope::Shared, PASSCODE_LIST_KEY, snapshot.raw.as_deref(), &text)
            .await
            .context("Failed to write passcode list")
    }
}
