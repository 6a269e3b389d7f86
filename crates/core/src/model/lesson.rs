use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::word::WordEntry;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonError {
    #[error("lesson name must not be empty")]
    EmptyName,
}

/// A named, ordered group of vocabulary entries.
///
/// Built once at load time from the data feed; read-only afterward. Word
/// order inside a lesson is the feed order and is preserved everywhere
/// (flashcard decks, the flat all-words view, the cache snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    ordinal: u32,
    name: String,
    words: Vec<WordEntry>,
}

impl Lesson {
    /// Creates a lesson from loaded entries.
    ///
    /// # Errors
    ///
    /// Returns `LessonError::EmptyName` if the name is empty after trimming.
    pub fn new(
        ordinal: u32,
        name: impl Into<String>,
        words: Vec<WordEntry>,
    ) -> Result<Self, LessonError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(LessonError::EmptyName);
        }
        Ok(Self {
            ordinal,
            name,
            words,
        })
    }

    /// Creates a lesson carrying the default name for its ordinal.
    #[must_use]
    pub fn numbered(ordinal: u32, words: Vec<WordEntry>) -> Self {
        Self {
            ordinal,
            name: Self::default_name(ordinal),
            words,
        }
    }

    /// Display name matching the feed file layout: ordinal 0 is the
    /// introduction, later lessons are numbered.
    #[must_use]
    pub fn default_name(ordinal: u32) -> String {
        if ordinal == 0 {
            "Introduction".to_string()
        } else {
            format!("Lesson {ordinal}")
        }
    }

    #[must_use]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_word(japanese: &str, vietnamese: &str) -> WordEntry {
        WordEntry::new(japanese, vietnamese).expect("valid word")
    }

    #[test]
    fn rejects_empty_name() {
        assert!(matches!(
            Lesson::new(1, "   ", vec![]),
            Err(LessonError::EmptyName)
        ));
    }

    #[test]
    fn default_names_follow_data_layout() {
        assert_eq!(Lesson::default_name(0), "Introduction");
        assert_eq!(Lesson::default_name(1), "Lesson 1");
        assert_eq!(Lesson::default_name(22), "Lesson 22");
    }

    #[test]
    fn preserves_word_order() {
        let words = vec![build_word("犬", "chó"), build_word("猫", "mèo")];
        let lesson = Lesson::new(3, Lesson::default_name(3), words.clone()).unwrap();
        assert_eq!(lesson.words(), words.as_slice());
        assert_eq!(lesson.word_count(), 2);
    }
}
