use std::sync::Arc;

use goi_core::model::ProgressRecord;

use crate::store::{StateStore, StorageError};

/// Key holding the serialized progress record.
pub const PROGRESS_KEY: &str = "goi.progress";

/// Typed access to the single persisted progress record.
#[derive(Clone)]
pub struct ProgressStore {
    store: Arc<dyn StateStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Loads the record, falling back to a fresh one.
    ///
    /// A missing blob, an unreadable store, or malformed JSON all produce a
    /// zero-valued record; the failure is logged and never surfaced. Loading
    /// cannot fail from the caller's point of view.
    #[must_use]
    pub fn load(&self) -> ProgressRecord {
        match self.store.get(PROGRESS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!("stored progress is malformed, starting fresh: {}", err);
                    ProgressRecord::new()
                }
            },
            Ok(None) => ProgressRecord::new(),
            Err(err) => {
                tracing::warn!("could not read stored progress, starting fresh: {}", err);
                ProgressRecord::new()
            }
        }
    }

    /// Serializes and writes the full record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the backend write fails.
    pub fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let raw = serde_json::to_string(record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(PROGRESS_KEY, &raw)
    }
}
