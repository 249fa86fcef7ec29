//! # Storage Traits
//!
//! The key-value capability the domain layer is written against. Any backend
//! that can get, set and compare-and-swap text values by `(scope, key)` can
//! stand in for the real store, which is how the services are tested.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

/// Namespace a key lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    /// Visible to every user of the installation (the passcode list)
    Shared,
    /// Per-student data
    Private,
}

impl StorageScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageScope::Shared => "shared",
            StorageScope::Private => "private",
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text values addressed by scope and key
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Fetch the value stored under `key`, if any
    async fn get(&self, scope: StorageScope, key: &str) -> Result<Option<String>>;

    /// Store `value`, replacing anything already under `key`
    async fn set(&self, scope: StorageScope, key: &str, value: &str) -> Result<()>;

    /// Replace the value only if it still equals `expected`.
    ///
    /// `expected = None` means "only if the key is absent". Returns false when
    /// another writer got there first.
    async fn compare_and_swap(
        &self,
        scope: StorageScope,
        key: &str,
        expected: Option<&str>,
        new_value: &str,
    ) -> Result<bool>;
}
