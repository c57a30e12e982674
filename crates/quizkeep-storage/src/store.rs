//! The durable key-value surface progress is saved to.

use std::sync::Arc;

use async_trait::async_trait;

use quizkeep_core::QuizConfig;

use crate::error::StorageError;
use crate::file::FileStore;

/// A string key-value store that survives restarts.
///
/// `set` either replaces the whole value or fails leaving the previous
/// value in place.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Human-readable store name (e.g. "file").
    fn name(&self) -> &str;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
}

/// Create the file-backed store described by the configuration.
pub fn create_store(config: &QuizConfig) -> Arc<dyn KeyValueStore> {
    let store = FileStore::new(config.data_dir.clone());
    let store = match config.max_value_bytes {
        Some(limit) => store.with_max_value_bytes(limit),
        None => store,
    };
    Arc::new(store)
}
