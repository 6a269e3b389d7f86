#![forbid(unsafe_code)]

pub mod progress_store;
pub mod store;
pub mod vocab_cache;

pub use progress_store::{PROGRESS_KEY, ProgressStore};
pub use store::{JsonFileStore, MemoryStore, StateStore, StorageError};
pub use vocab_cache::{VOCAB_CACHE_KEY, VocabCache};
