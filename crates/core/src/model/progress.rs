use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{KanjiId, WordId};
use super::quiz::QuizReport;

//
// ─── DIFFICULTY RATING ─────────────────────────────────────────────────────────
//

/// The learner's judgment of one card, last-write-wins per id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyRating {
    Difficult,
    Normal,
    Easy,
}

impl DifficultyRating {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyRating::Difficult => "difficult",
            DifficultyRating::Normal => "normal",
            DifficultyRating::Easy => "easy",
        }
    }
}

impl fmt::Display for DifficultyRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected one of difficult, normal, easy")]
pub struct ParseRatingError;

impl FromStr for DifficultyRating {
    type Err = ParseRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "difficult" => Ok(DifficultyRating::Difficult),
            "normal" => Ok(DifficultyRating::Normal),
            "easy" => Ok(DifficultyRating::Easy),
            _ => Err(ParseRatingError),
        }
    }
}

//
// ─── QUIZ RECORD ───────────────────────────────────────────────────────────────
//

/// One finished quiz in the history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub score: u32,
    pub total: u32,
    pub percentage: u8,
    pub duration_seconds: u32,
    pub finished_at: DateTime<Utc>,
}

impl QuizRecord {
    #[must_use]
    pub fn from_report(report: &QuizReport, finished_at: DateTime<Utc>) -> Self {
        Self {
            score: report.score,
            total: report.total,
            percentage: report.accuracy_percent,
            duration_seconds: report.elapsed_seconds,
            finished_at,
        }
    }
}

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Read-only stats projection for a dashboard surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudySnapshot {
    pub words_studied: u32,
    pub accuracy_percent: u8,
    pub streak_days: u32,
    pub lessons_completed: u32,
}

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// The single persisted aggregate of all learning history for one profile.
///
/// Loaded at startup, mutated in place, and written back after every
/// mutating operation by the tracker that owns it. All fields default
/// individually, so a partial or older blob still loads.
///
/// `studied_words` is semantically a set, but insertion order is preserved
/// because the tail doubles as the "recent words" list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    studied_words: Vec<WordId>,
    word_difficulty: BTreeMap<WordId, DifficultyRating>,
    completed_lessons: BTreeSet<u32>,
    quiz_scores: BTreeMap<u32, u8>,
    streak_days: u32,
    last_study_date: Option<NaiveDate>,
    total_words_studied: u32,
    accuracy: u8,
    quiz_history: Vec<QuizRecord>,
    studied_kanji: Vec<KanjiId>,
    kanji_difficulty: BTreeMap<KanjiId, DifficultyRating>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a difficulty judgment for a vocabulary word.
    ///
    /// A previously-unseen id is appended to `studied_words` and counted
    /// once in `total_words_studied`; a repeat only overwrites the rating.
    /// Returns true when the id was new.
    pub fn record_word(&mut self, id: WordId, rating: DifficultyRating) -> bool {
        let newly_studied = !self.studied_words.contains(&id);
        if newly_studied {
            self.studied_words.push(id.clone());
            self.total_words_studied += 1;
        }
        self.word_difficulty.insert(id, rating);
        newly_studied
    }

    /// Records a difficulty judgment for a kanji drill card.
    ///
    /// Tracked apart from vocabulary: never touches `total_words_studied`.
    /// Returns true when the id was new.
    pub fn record_kanji(&mut self, id: KanjiId, rating: DifficultyRating) -> bool {
        let newly_studied = !self.studied_kanji.contains(&id);
        if newly_studied {
            self.studied_kanji.push(id.clone());
        }
        self.kanji_difficulty.insert(id, rating);
        newly_studied
    }

    /// Bumps the streak on the first study action of a new calendar day.
    ///
    /// This is a "days active" counter: any first action of a day counts,
    /// with no check that the previous day was active too. Returns true when
    /// the streak advanced.
    pub fn touch_study_day(&mut self, today: NaiveDate) -> bool {
        if self.last_study_date == Some(today) {
            return false;
        }
        self.streak_days += 1;
        self.last_study_date = Some(today);
        true
    }

    /// Stores a per-lesson quiz percentage (last-write-wins) and recomputes
    /// the overall accuracy as the unweighted mean of all stored lesson
    /// percentages. Returns the stored percentage.
    pub fn record_quiz_score(&mut self, lesson: u32, score: u32, total: u32) -> u8 {
        let percentage = QuizReport::percent(score, total);
        self.quiz_scores.insert(lesson, percentage);
        self.accuracy = self.mean_quiz_score();
        percentage
    }

    /// Appends one finished quiz to the history log.
    pub fn append_quiz_record(&mut self, record: QuizRecord) {
        self.quiz_history.push(record);
    }

    /// Marks a lesson completed. Idempotent; returns true when newly added.
    pub fn complete_lesson(&mut self, lesson: u32) -> bool {
        self.completed_lessons.insert(lesson)
    }

    fn mean_quiz_score(&self) -> u8 {
        if self.quiz_scores.is_empty() {
            return 0;
        }
        let sum: u32 = self.quiz_scores.values().map(|p| u32::from(*p)).sum();
        let count = u32::try_from(self.quiz_scores.len()).unwrap_or(u32::MAX);
        // Mean of values in 0..=100 stays in 0..=100.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mean = (f64::from(sum) / f64::from(count)).round() as u8;
        mean
    }

    // ─── Accessors ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn studied_words(&self) -> &[WordId] {
        &self.studied_words
    }

    #[must_use]
    pub fn has_studied(&self, id: &WordId) -> bool {
        self.studied_words.contains(id)
    }

    #[must_use]
    pub fn difficulty_of(&self, id: &WordId) -> Option<DifficultyRating> {
        self.word_difficulty.get(id).copied()
    }

    /// The last `n` studied word ids in study order, oldest first.
    #[must_use]
    pub fn recent_words(&self, n: usize) -> &[WordId] {
        let start = self.studied_words.len().saturating_sub(n);
        &self.studied_words[start..]
    }

    #[must_use]
    pub fn completed_lessons(&self) -> &BTreeSet<u32> {
        &self.completed_lessons
    }

    #[must_use]
    pub fn is_lesson_completed(&self, lesson: u32) -> bool {
        self.completed_lessons.contains(&lesson)
    }

    #[must_use]
    pub fn quiz_scores(&self) -> &BTreeMap<u32, u8> {
        &self.quiz_scores
    }

    #[must_use]
    pub fn quiz_score_for(&self, lesson: u32) -> Option<u8> {
        self.quiz_scores.get(&lesson).copied()
    }

    #[must_use]
    pub fn streak_days(&self) -> u32 {
        self.streak_days
    }

    #[must_use]
    pub fn last_study_date(&self) -> Option<NaiveDate> {
        self.last_study_date
    }

    #[must_use]
    pub fn total_words_studied(&self) -> u32 {
        self.total_words_studied
    }

    #[must_use]
    pub fn accuracy(&self) -> u8 {
        self.accuracy
    }

    #[must_use]
    pub fn quiz_history(&self) -> &[QuizRecord] {
        &self.quiz_history
    }

    #[must_use]
    pub fn studied_kanji(&self) -> &[KanjiId] {
        &self.studied_kanji
    }

    #[must_use]
    pub fn kanji_difficulty_of(&self, id: &KanjiId) -> Option<DifficultyRating> {
        self.kanji_difficulty.get(id).copied()
    }

    #[must_use]
    pub fn snapshot(&self) -> StudySnapshot {
        StudySnapshot {
            words_studied: self.total_words_studied,
            accuracy_percent: self.accuracy,
            streak_days: self.streak_days,
            lessons_completed: u32::try_from(self.completed_lessons.len()).unwrap_or(u32::MAX),
        }
    }
}
