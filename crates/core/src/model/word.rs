use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ids::WordId;

//
// ─── WORD LEVEL ────────────────────────────────────────────────────────────────
//

/// Coarse difficulty label attached to an entry by the lesson data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl WordLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WordLevel::Beginner => "beginner",
            WordLevel::Intermediate => "intermediate",
            WordLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for WordLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected one of beginner, intermediate, advanced")]
pub struct ParseWordLevelError;

impl FromStr for WordLevel {
    type Err = ParseWordLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(WordLevel::Beginner),
            "intermediate" => Ok(WordLevel::Intermediate),
            "advanced" => Ok(WordLevel::Advanced),
            _ => Err(ParseWordLevelError),
        }
    }
}

//
// ─── KANJI MEANING ─────────────────────────────────────────────────────────────
//

/// One kanji character with its meaning gloss, as attached by the data feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiMeaning {
    pub kanji: String,
    pub mean: String,
}

//
// ─── WORD ENTRY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WordError {
    #[error("japanese text must not be empty")]
    EmptyJapanese,
    #[error("vietnamese text must not be empty")]
    EmptyVietnamese,
}

/// One vocabulary item with its translation and metadata.
///
/// Immutable once loaded. The data feed guarantees `japanese` and
/// `vietnamese` are present; every other field is optional. Identity for
/// progress tracking is the derived [`WordId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    japanese: String,
    vietnamese: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    romanji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kanji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difficulty: Option<WordLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    example: Option<String>,
    #[serde(
        default,
        rename = "kanji_search_results",
        skip_serializing_if = "Vec::is_empty"
    )]
    kanji_meanings: Vec<KanjiMeaning>,
}

impl WordEntry {
    /// Creates an entry from the two required text fields.
    ///
    /// # Errors
    ///
    /// Returns `WordError` if either text is empty after trimming.
    pub fn new(
        japanese: impl Into<String>,
        vietnamese: impl Into<String>,
    ) -> Result<Self, WordError> {
        let japanese = japanese.into();
        let vietnamese = vietnamese.into();
        if japanese.trim().is_empty() {
            return Err(WordError::EmptyJapanese);
        }
        if vietnamese.trim().is_empty() {
            return Err(WordError::EmptyVietnamese);
        }
        Ok(Self {
            japanese,
            vietnamese,
            romanji: None,
            kanji: None,
            category: None,
            difficulty: None,
            example: None,
            kanji_meanings: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_romanji(mut self, romanji: impl Into<String>) -> Self {
        self.romanji = Some(romanji.into());
        self
    }

    #[must_use]
    pub fn with_kanji(mut self, kanji: impl Into<String>) -> Self {
        self.kanji = Some(kanji.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: WordLevel) -> Self {
        self.difficulty = Some(level);
        self
    }

    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    #[must_use]
    pub fn with_kanji_meanings(mut self, meanings: Vec<KanjiMeaning>) -> Self {
        self.kanji_meanings = meanings;
        self
    }

    #[must_use]
    pub fn japanese(&self) -> &str {
        &self.japanese
    }

    #[must_use]
    pub fn vietnamese(&self) -> &str {
        &self.vietnamese
    }

    #[must_use]
    pub fn romanji(&self) -> Option<&str> {
        self.romanji.as_deref()
    }

    #[must_use]
    pub fn kanji(&self) -> Option<&str> {
        self.kanji.as_deref()
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn level(&self) -> Option<WordLevel> {
        self.difficulty
    }

    #[must_use]
    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    #[must_use]
    pub fn kanji_meanings(&self) -> &[KanjiMeaning] {
        &self.kanji_meanings
    }

    /// Derived identity key for progress tracking.
    #[must_use]
    pub fn id(&self) -> WordId {
        WordId::derive(&self.japanese, &self.vietnamese)
    }

    /// Reading shown for "how do you read" questions: the romanji when
    /// present, otherwise the japanese text itself.
    #[must_use]
    pub fn reading(&self) -> &str {
        self.romanji.as_deref().unwrap_or(&self.japanese)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_rejects_empty_required_fields() {
        assert!(matches!(
            WordEntry::new("", "chó"),
            Err(WordError::EmptyJapanese)
        ));
        assert!(matches!(
            WordEntry::new("犬", "  "),
            Err(WordError::EmptyVietnamese)
        ));
    }

    #[test]
    fn id_derives_from_required_fields() {
        let word = WordEntry::new("犬", "chó").unwrap();
        assert_eq!(word.id().as_str(), "犬-chó");
    }

    #[test]
    fn reading_falls_back_to_japanese() {
        let plain = WordEntry::new("犬", "chó").unwrap();
        assert_eq!(plain.reading(), "犬");

        let with_romanji = WordEntry::new("犬", "chó").unwrap().with_romanji("inu");
        assert_eq!(with_romanji.reading(), "inu");
    }

    #[test]
    fn deserializes_feed_shaped_entries() {
        let raw = r#"{
            "japanese": "勉強",
            "vietnamese": "học tập",
            "romanji": "benkyou",
            "kanji": "勉強",
            "category": "education",
            "difficulty": "intermediate",
            "example": "毎日勉強します",
            "kanji_search_results": [{"kanji": "勉", "mean": "gắng sức"}]
        }"#;
        let word: WordEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(word.japanese(), "勉強");
        assert_eq!(word.level(), Some(WordLevel::Intermediate));
        assert_eq!(word.kanji_meanings().len(), 1);
        assert_eq!(word.kanji_meanings()[0].kanji, "勉");
    }

    #[test]
    fn deserializes_minimal_entries() {
        let word: WordEntry =
            serde_json::from_str(r#"{"japanese": "犬", "vietnamese": "chó"}"#).unwrap();
        assert_eq!(word.romanji(), None);
        assert_eq!(word.kanji_meanings(), &[]);
    }

    #[test]
    fn word_level_parses_lowercase_names() {
        assert_eq!("beginner".parse::<WordLevel>(), Ok(WordLevel::Beginner));
        assert!("expert".parse::<WordLevel>().is_err());
    }
}
