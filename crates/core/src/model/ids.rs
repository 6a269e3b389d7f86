use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity key for a vocabulary entry: the japanese and vietnamese text
/// joined with `-`.
///
/// Two entries with identical japanese and vietnamese text collapse to the
/// same id and share study state. Well-formed lesson data never duplicates
/// the pair, so the approximation is kept instead of a synthetic id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordId(String);

impl WordId {
    /// Derives the key from the entry's two required text fields.
    #[must_use]
    pub fn derive(japanese: &str, vietnamese: &str) -> Self {
        Self(format!("{japanese}-{vietnamese}"))
    }

    /// Wraps an already-derived key, e.g. one read back from storage.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits back into the japanese and vietnamese parts.
    ///
    /// Only the first two `-`-separated segments are returned; anything after
    /// a second `-` is dropped, matching how the recent-words display decodes
    /// stored ids.
    #[must_use]
    pub fn parts(&self) -> (Option<&str>, Option<&str>) {
        let mut segments = self.0.split('-');
        (segments.next(), segments.next())
    }
}

/// Identity key for a kanji drill card: `kanji-` followed by the word text.
///
/// The prefix keeps kanji study state apart from vocabulary study state even
/// when a drill word coincides with a lesson word.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KanjiId(String);

impl KanjiId {
    #[must_use]
    pub fn derive(word: &str) -> Self {
        Self(format!("kanji-{word}"))
    }

    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ephemeral identifier for one quiz or flashcard session, used to correlate
/// log lines. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for KanjiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_id_joins_japanese_and_vietnamese() {
        let id = WordId::derive("犬", "chó");
        assert_eq!(id.as_str(), "犬-chó");
        assert_eq!(id.to_string(), "犬-chó");
    }

    #[test]
    fn word_id_parts_drop_trailing_segments() {
        let id = WordId::from_raw("犬-chó-extra");
        assert_eq!(id.parts(), (Some("犬"), Some("chó")));
    }

    #[test]
    fn identical_pairs_collide() {
        assert_eq!(WordId::derive("水", "nước"), WordId::derive("水", "nước"));
    }

    #[test]
    fn kanji_id_carries_prefix() {
        let id = KanjiId::derive("勉強");
        assert_eq!(id.as_str(), "kanji-勉強");
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
