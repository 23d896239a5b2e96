//! Synchronous string key-value stores, the server-side stand-in for browser local storage.

mod file;
mod memory;

pub use self::file::FileKeyValueStore;
pub use self::memory::MemoryKeyValueStore;

use crate::dao::storage::StorageResult;

/// Abstraction over an origin-scoped string store addressed by key.
pub trait KeyValueStore: Send + Sync {
    /// Return the value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Check that the backend is reachable without touching stored values.
    fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}
