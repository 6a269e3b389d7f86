use std::sync::Arc;

use goi_core::model::Lesson;

use crate::store::StateStore;

/// Key holding the cached vocabulary snapshot.
pub const VOCAB_CACHE_KEY: &str = "goi.vocab-cache";

/// Typed access to the cached lesson snapshot.
///
/// The cache is best-effort on both sides: a snapshot that fails to parse is
/// discarded so the next load refetches, and a failed write only costs a
/// refetch later. There is no expiry check against the live feed.
#[derive(Clone)]
pub struct VocabCache {
    store: Arc<dyn StateStore>,
}

impl VocabCache {
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Returns the cached library if a readable snapshot exists.
    ///
    /// A malformed snapshot is removed from the store before returning
    /// `None`, so it cannot shadow the feed forever.
    #[must_use]
    pub fn load(&self) -> Option<Vec<Lesson>> {
        match self.store.get(VOCAB_CACHE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(lessons) => Some(lessons),
                Err(err) => {
                    tracing::warn!("vocabulary cache is malformed, discarding: {}", err);
                    if let Err(err) = self.store.remove(VOCAB_CACHE_KEY) {
                        tracing::warn!("could not discard vocabulary cache: {}", err);
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                tracing::warn!("could not read vocabulary cache: {}", err);
                None
            }
        }
    }

    /// Stores a snapshot of the loaded library.
    ///
    /// Failures are logged and swallowed; the library still works, it just
    /// refetches on the next start.
    pub fn save(&self, lessons: &[Lesson]) {
        match serde_json::to_string(lessons) {
            Ok(raw) => {
                if let Err(err) = self.store.set(VOCAB_CACHE_KEY, &raw) {
                    tracing::warn!("could not cache vocabulary: {}", err);
                }
            }
            Err(err) => {
                tracing::warn!("could not serialize vocabulary cache: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use goi_core::model::WordEntry;

    fn build_lessons() -> Vec<Lesson> {
        let words = vec![WordEntry::new("犬", "chó").unwrap()];
        vec![Lesson::new(0, Lesson::default_name(0), words).unwrap()]
    }

    fn build_cache() -> (Arc<MemoryStore>, VocabCache) {
        let memory = Arc::new(MemoryStore::new());
        let cache = VocabCache::new(Arc::clone(&memory) as Arc<dyn StateStore>);
        (memory, cache)
    }

    #[test]
    fn empty_store_has_no_snapshot() {
        let (_, cache) = build_cache();
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_, cache) = build_cache();
        let lessons = build_lessons();

        cache.save(&lessons);
        assert_eq!(cache.load(), Some(lessons));
    }

    #[test]
    fn malformed_snapshot_is_discarded() {
        let (memory, cache) = build_cache();
        memory.set(VOCAB_CACHE_KEY, "[not lessons]").unwrap();

        assert_eq!(cache.load(), None);
        // The bad blob is gone, not just ignored.
        assert_eq!(memory.get(VOCAB_CACHE_KEY).unwrap(), None);
    }
}
