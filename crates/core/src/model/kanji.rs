use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::KanjiId;
use super::word::KanjiMeaning;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KanjiError {
    #[error("kanji word must not be empty")]
    EmptyWord,
}

/// One kanji drill card from the kanji data file.
///
/// The feed may contain rows with an empty `word`; deck construction drops
/// those before a drill starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiEntry {
    word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    phonetic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    romaji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    short_mean: Option<String>,
    #[serde(
        default,
        rename = "kanji_search_results",
        skip_serializing_if = "Vec::is_empty"
    )]
    kanji_meanings: Vec<KanjiMeaning>,
}

impl KanjiEntry {
    /// Creates a drill card for the given word.
    ///
    /// # Errors
    ///
    /// Returns `KanjiError::EmptyWord` if the word is empty after trimming.
    pub fn new(word: impl Into<String>) -> Result<Self, KanjiError> {
        let word = word.into();
        if word.trim().is_empty() {
            return Err(KanjiError::EmptyWord);
        }
        Ok(Self {
            word,
            phonetic: None,
            romaji: None,
            short_mean: None,
            kanji_meanings: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_phonetic(mut self, phonetic: impl Into<String>) -> Self {
        self.phonetic = Some(phonetic.into());
        self
    }

    #[must_use]
    pub fn with_romaji(mut self, romaji: impl Into<String>) -> Self {
        self.romaji = Some(romaji.into());
        self
    }

    #[must_use]
    pub fn with_short_mean(mut self, short_mean: impl Into<String>) -> Self {
        self.short_mean = Some(short_mean.into());
        self
    }

    #[must_use]
    pub fn with_kanji_meanings(mut self, meanings: Vec<KanjiMeaning>) -> Self {
        self.kanji_meanings = meanings;
        self
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn phonetic(&self) -> Option<&str> {
        self.phonetic.as_deref()
    }

    #[must_use]
    pub fn romaji(&self) -> Option<&str> {
        self.romaji.as_deref()
    }

    #[must_use]
    pub fn short_mean(&self) -> Option<&str> {
        self.short_mean.as_deref()
    }

    #[must_use]
    pub fn kanji_meanings(&self) -> &[KanjiMeaning] {
        &self.kanji_meanings
    }

    /// Derived identity key, prefixed to stay apart from vocabulary ids.
    #[must_use]
    pub fn id(&self) -> KanjiId {
        KanjiId::derive(&self.word)
    }

    /// True when the row carries usable word text.
    #[must_use]
    pub fn has_word(&self) -> bool {
        !self.word.trim().is_empty()
    }
}
