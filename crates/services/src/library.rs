//! Lesson library: loads, caches, and searches vocabulary content.

use std::collections::HashSet;

use goi_core::model::{KanjiEntry, Lesson, WordEntry, WordLevel};
use storage::VocabCache;

use crate::feed::LessonFeed;

/// Lessons fetched by default: the introduction plus lessons 1 through 22.
pub const DEFAULT_LESSON_COUNT: u32 = 23;

//
// ─── WORD QUERY ────────────────────────────────────────────────────────────────
//

/// Filter over the word list. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct WordQuery {
    text: Option<String>,
    category: Option<String>,
    level: Option<WordLevel>,
    lesson: Option<u32>,
}

impl WordQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to search for. Blank input clears the filter.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    /// Category the entry must carry. Blank input clears the filter.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: WordLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Restricts the search to one lesson.
    #[must_use]
    pub fn with_lesson(mut self, ordinal: u32) -> Self {
        self.lesson = Some(ordinal);
        self
    }

    /// True when the entry passes every set filter.
    ///
    /// Text search is a case-insensitive substring match over the japanese,
    /// vietnamese, and romanji fields.
    #[must_use]
    pub fn matches(&self, word: &WordEntry) -> bool {
        let matches_text = match &self.text {
            None => true,
            Some(text) => {
                let needle = text.to_lowercase();
                word.japanese().to_lowercase().contains(&needle)
                    || word.vietnamese().to_lowercase().contains(&needle)
                    || word
                        .romanji()
                        .is_some_and(|romanji| romanji.to_lowercase().contains(&needle))
            }
        };
        let matches_category = match self.category.as_deref() {
            None => true,
            Some(category) => word.category() == Some(category),
        };
        let matches_level = match self.level {
            None => true,
            Some(level) => word.level() == Some(level),
        };
        matches_text && matches_category && matches_level
    }
}

//
// ─── VOCABULARY SERVICE ────────────────────────────────────────────────────────
//

/// Read-only library of lessons, loaded once at startup.
pub struct VocabularyService {
    lessons: Vec<Lesson>,
}

impl VocabularyService {
    /// Loads the library, preferring the cache over the feed.
    ///
    /// Lessons that fail to fetch are skipped with a warning, so one broken
    /// file never takes down the rest. When nothing loads at all, a built-in
    /// sample lesson keeps the app usable; the cache is only written after a
    /// real feed load.
    pub async fn load(feed: &dyn LessonFeed, cache: &VocabCache, lesson_count: u32) -> Self {
        if let Some(lessons) = cache.load() {
            tracing::info!("loaded {} lessons from cache", lessons.len());
            return Self { lessons };
        }

        let mut lessons = Vec::new();
        for ordinal in 0..lesson_count {
            match feed.fetch_lesson(ordinal).await {
                Ok(words) => lessons.push(Lesson::numbered(ordinal, words)),
                Err(error) => {
                    tracing::warn!("failed to load lesson {}: {}", ordinal, error);
                }
            }
        }

        if lessons.is_empty() {
            tracing::warn!("no lessons loaded, falling back to the sample lesson");
            lessons = sample_lessons();
        } else {
            tracing::info!("loaded {} lessons from the feed", lessons.len());
            cache.save(&lessons);
        }
        Self { lessons }
    }

    #[must_use]
    pub fn from_lessons(lessons: Vec<Lesson>) -> Self {
        Self { lessons }
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Looks a lesson up by ordinal, which may be sparse after load skips.
    #[must_use]
    pub fn lesson(&self, ordinal: u32) -> Option<&Lesson> {
        self.lessons
            .iter()
            .find(|lesson| lesson.ordinal() == ordinal)
    }

    #[must_use]
    pub fn word_total(&self) -> usize {
        self.lessons.iter().map(Lesson::word_count).sum()
    }

    /// Every word across every lesson, in lesson order.
    #[must_use]
    pub fn all_words(&self) -> Vec<WordEntry> {
        self.lessons
            .iter()
            .flat_map(|lesson| lesson.words())
            .cloned()
            .collect()
    }

    /// Words passing the query, in lesson order.
    #[must_use]
    pub fn search(&self, query: &WordQuery) -> Vec<WordEntry> {
        self.lessons
            .iter()
            .filter(|lesson| match query.lesson {
                None => true,
                Some(ordinal) => lesson.ordinal() == ordinal,
            })
            .flat_map(|lesson| lesson.words())
            .filter(|word| query.matches(word))
            .cloned()
            .collect()
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for lesson in &self.lessons {
            for word in lesson.words() {
                if let Some(category) = word.category() {
                    if seen.insert(category.to_string()) {
                        out.push(category.to_string());
                    }
                }
            }
        }
        out
    }
}

/// Fetches the kanji reference list, dropping rows without word text.
///
/// Failure degrades to an empty list so the vocabulary features stay up.
pub async fn load_kanji(feed: &dyn LessonFeed) -> Vec<KanjiEntry> {
    match feed.fetch_kanji().await {
        Ok(entries) => entries.into_iter().filter(KanjiEntry::has_word).collect(),
        Err(error) => {
            tracing::warn!("failed to load kanji list: {}", error);
            Vec::new()
        }
    }
}

fn sample_lessons() -> Vec<Lesson> {
    let Ok(word) = WordEntry::new("おはよう ございます", "Chào buổi sáng") else {
        return Vec::new();
    };
    let word = word
        .with_romanji("ohayou gozaimasu")
        .with_category("greeting")
        .with_example("おはようございます。");
    match Lesson::new(0, "Bài mẫu", vec![word]) {
        Ok(lesson) => vec![lesson],
        Err(_) => Vec::new(),
    }
}
