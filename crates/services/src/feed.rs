//! Lesson and kanji content feeds.
//!
//! A feed hands back raw vocabulary arrays; grouping them into lessons is
//! the vocabulary service's job. `DirFeed` reads the JSON files from disk,
//! `HttpFeed` fetches the same layout over HTTP, and `StaticFeed` serves
//! fixed content for tests and offline use.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use goi_core::model::{KanjiEntry, WordEntry};

use crate::error::FeedError;

/// Location of the kanji reference list, relative to the feed root.
pub const KANJI_FILE: &str = "raw/kanji.json";

/// File name for one lesson's vocabulary, relative to the feed root.
///
/// Lesson 0 is the introduction and keeps its historical file name.
#[must_use]
pub fn lesson_file_name(ordinal: u32) -> String {
    if ordinal == 0 {
        "introduction_vocabulary.json".to_string()
    } else {
        format!("lesson_{ordinal}_vocabulary.json")
    }
}

//
// ─── LESSON FEED ───────────────────────────────────────────────────────────────
//

/// Source of lesson and kanji content.
#[async_trait]
pub trait LessonFeed: Send + Sync {
    /// Fetch the vocabulary for one lesson.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` when the lesson cannot be fetched or parsed.
    async fn fetch_lesson(&self, ordinal: u32) -> Result<Vec<WordEntry>, FeedError>;

    /// Fetch the kanji reference list.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` when the list cannot be fetched or parsed.
    async fn fetch_kanji(&self) -> Result<Vec<KanjiEntry>, FeedError>;
}

//
// ─── DIRECTORY FEED ────────────────────────────────────────────────────────────
//

/// Feed backed by a directory of vocabulary JSON files.
#[derive(Debug, Clone)]
pub struct DirFeed {
    root: PathBuf,
}

impl DirFeed {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl LessonFeed for DirFeed {
    async fn fetch_lesson(&self, ordinal: u32) -> Result<Vec<WordEntry>, FeedError> {
        let path = self.root.join(lesson_file_name(ordinal));
        let bytes = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn fetch_kanji(&self) -> Result<Vec<KanjiEntry>, FeedError> {
        let path = self.root.join(KANJI_FILE);
        let bytes = tokio::fs::read(&path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

//
// ─── HTTP FEED ─────────────────────────────────────────────────────────────────
//

/// Feed backed by an HTTP server exposing the same file layout as `DirFeed`.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: Client,
    base: Url,
}

impl HttpFeed {
    /// Build a feed rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::InvalidBaseUrl` when the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, FeedError> {
        let mut base = Url::parse(base_url)?;
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        relative: &str,
    ) -> Result<T, FeedError> {
        let url = self.base.join(relative)?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl LessonFeed for HttpFeed {
    async fn fetch_lesson(&self, ordinal: u32) -> Result<Vec<WordEntry>, FeedError> {
        self.fetch_json(&lesson_file_name(ordinal)).await
    }

    async fn fetch_kanji(&self) -> Result<Vec<KanjiEntry>, FeedError> {
        self.fetch_json(KANJI_FILE).await
    }
}

//
// ─── STATIC FEED ───────────────────────────────────────────────────────────────
//

/// In-memory feed with fixed content.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    lessons: BTreeMap<u32, Vec<WordEntry>>,
    kanji: Vec<KanjiEntry>,
    failing_lessons: BTreeSet<u32>,
    failing_kanji: bool,
}

impl StaticFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_lesson(mut self, ordinal: u32, words: Vec<WordEntry>) -> Self {
        self.lessons.insert(ordinal, words);
        self
    }

    #[must_use]
    pub fn with_kanji(mut self, kanji: Vec<KanjiEntry>) -> Self {
        self.kanji = kanji;
        self
    }

    /// Makes one lesson fail as if its file were missing.
    #[must_use]
    pub fn with_failing_lesson(mut self, ordinal: u32) -> Self {
        self.failing_lessons.insert(ordinal);
        self
    }

    /// Makes the kanji list fail as if its file were missing.
    #[must_use]
    pub fn with_failing_kanji(mut self) -> Self {
        self.failing_kanji = true;
        self
    }
}

#[async_trait]
impl LessonFeed for StaticFeed {
    async fn fetch_lesson(&self, ordinal: u32) -> Result<Vec<WordEntry>, FeedError> {
        if self.failing_lessons.contains(&ordinal) {
            return Err(std::io::Error::from(std::io::ErrorKind::NotFound).into());
        }
        match self.lessons.get(&ordinal) {
            Some(words) => Ok(words.clone()),
            None => Err(std::io::Error::from(std::io::ErrorKind::NotFound).into()),
        }
    }

    async fn fetch_kanji(&self) -> Result<Vec<KanjiEntry>, FeedError> {
        if self.failing_kanji {
            return Err(std::io::Error::from(std::io::ErrorKind::NotFound).into());
        }
        Ok(self.kanji.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build_word(japanese: &str, vietnamese: &str) -> WordEntry {
        WordEntry::new(japanese, vietnamese).expect("valid word")
    }

    #[test]
    fn test_lesson_file_names() {
        assert_eq!(lesson_file_name(0), "introduction_vocabulary.json");
        assert_eq!(lesson_file_name(1), "lesson_1_vocabulary.json");
        assert_eq!(lesson_file_name(12), "lesson_12_vocabulary.json");
    }

    #[test]
    fn test_http_feed_joins_relative_to_the_base_path() {
        let feed = HttpFeed::new("https://example.com/vocab").expect("valid base url");
        let url = feed
            .base
            .join(&lesson_file_name(3))
            .expect("join lesson file");
        assert_eq!(
            url.as_str(),
            "https://example.com/vocab/lesson_3_vocabulary.json"
        );

        let kanji = feed.base.join(KANJI_FILE).expect("join kanji file");
        assert_eq!(kanji.as_str(), "https://example.com/vocab/raw/kanji.json");
    }

    #[test]
    fn test_http_feed_rejects_garbage_base() {
        assert!(matches!(
            HttpFeed::new("not a url"),
            Err(FeedError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_static_feed_serves_and_fails_lessons() {
        let feed = StaticFeed::new()
            .with_lesson(1, vec![build_word("犬", "chó")])
            .with_failing_lesson(2);

        let words = feed.fetch_lesson(1).await.expect("lesson 1");
        assert_eq!(words.len(), 1);

        assert!(matches!(feed.fetch_lesson(2).await, Err(FeedError::Io(_))));
        assert!(matches!(feed.fetch_lesson(9).await, Err(FeedError::Io(_))));
    }

    #[tokio::test]
    async fn test_dir_feed_reads_lesson_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let payload = r#"[{"japanese": "犬", "vietnamese": "chó", "romanji": "inu"}]"#;
        std::fs::write(dir.path().join("lesson_1_vocabulary.json"), payload)
            .expect("write lesson file");

        let feed = DirFeed::new(dir.path());
        let words = feed.fetch_lesson(1).await.expect("lesson 1");
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].japanese(), "犬");

        assert!(matches!(feed.fetch_lesson(2).await, Err(FeedError::Io(_))));
    }

    #[tokio::test]
    async fn test_dir_feed_reads_the_kanji_list() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(dir.path().join("raw")).expect("create raw dir");
        let payload = r#"[{"word": "先生", "phonetic": "せんせい", "short_mean": "teacher"}]"#;
        std::fs::write(dir.path().join(KANJI_FILE), payload).expect("write kanji file");

        let feed = DirFeed::new(dir.path());
        let kanji = feed.fetch_kanji().await.expect("kanji list");
        assert_eq!(kanji.len(), 1);
        assert_eq!(kanji[0].word(), "先生");
    }
}
