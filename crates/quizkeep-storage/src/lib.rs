//! quizkeep-storage — Durable progress storage.
//!
//! Implements the `KeyValueStore` trait for files on disk and for memory,
//! and builds the progress store and debounced auto-saver on top of it.

pub mod debounce;
pub mod error;
pub mod file;
pub mod memory;
pub mod progress;
pub mod store;

pub use debounce::{AutoSaver, Debouncer};
pub use error::{DecodeError, RestoreError, StorageError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use progress::ProgressStore;
pub use store::{create_store, KeyValueStore};
