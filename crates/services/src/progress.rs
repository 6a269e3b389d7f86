//! Progress tracking with write-through persistence.
//!
//! Every mutating operation writes the whole record back through the
//! [`ProgressStore`]. When the write fails the in-memory record is rolled
//! back, so memory and disk never drift apart.

use goi_core::model::{
    DifficultyRating, KanjiId, ProgressRecord, QuizRecord, QuizReport, StudySnapshot, WordId,
};
use goi_core::time::Clock;
use storage::ProgressStore;

use crate::error::TrackerError;

pub struct ProgressTracker {
    record: ProgressRecord,
    store: ProgressStore,
    clock: Clock,
}

impl ProgressTracker {
    /// Loads the saved record, or starts fresh when there is none.
    #[must_use]
    pub fn load(store: ProgressStore) -> Self {
        let record = store.load();
        Self {
            record,
            store,
            clock: Clock::Default,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Records a difficulty judgment for a word and persists.
    ///
    /// Returns true when the word was studied for the first time.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` when the write fails. The in-memory
    /// record is rolled back.
    pub fn record_difficulty(
        &mut self,
        id: WordId,
        rating: DifficultyRating,
    ) -> Result<bool, TrackerError> {
        let original = self.record.clone();
        let newly_studied = self.record.record_word(id, rating);
        self.persist(original)?;
        Ok(newly_studied)
    }

    /// Records a difficulty judgment for a kanji drill card and persists.
    ///
    /// Returns true when the kanji was studied for the first time.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` when the write fails. The in-memory
    /// record is rolled back.
    pub fn record_kanji_difficulty(
        &mut self,
        id: KanjiId,
        rating: DifficultyRating,
    ) -> Result<bool, TrackerError> {
        let original = self.record.clone();
        let newly_studied = self.record.record_kanji(id, rating);
        self.persist(original)?;
        Ok(newly_studied)
    }

    /// Bumps the study streak on the first study action of the day.
    ///
    /// Persists only when the streak actually advanced. Returns true when
    /// it did.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` when the write fails. The in-memory
    /// record is rolled back.
    pub fn record_study_session(&mut self) -> Result<bool, TrackerError> {
        let original = self.record.clone();
        if !self.record.touch_study_day(self.clock.today()) {
            return Ok(false);
        }
        self.persist(original)?;
        Ok(true)
    }

    /// Stores a finished quiz: the per-lesson percentage, the recomputed
    /// overall accuracy, and a history entry stamped with the clock time.
    /// One persisted write covers all three.
    ///
    /// Returns the stored percentage.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` when the write fails. The in-memory
    /// record is rolled back.
    pub fn record_quiz_report(
        &mut self,
        lesson: u32,
        report: &QuizReport,
    ) -> Result<u8, TrackerError> {
        let original = self.record.clone();
        let percentage = self
            .record
            .record_quiz_score(lesson, report.score, report.total);
        self.record
            .append_quiz_record(QuizRecord::from_report(report, self.clock.now()));
        self.persist(original)?;
        Ok(percentage)
    }

    /// Marks a lesson completed, persisting only the first time.
    ///
    /// Returns true when the lesson was newly completed.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Storage` when the write fails. The in-memory
    /// record is rolled back.
    pub fn mark_lesson_completed(&mut self, lesson: u32) -> Result<bool, TrackerError> {
        let original = self.record.clone();
        if !self.record.complete_lesson(lesson) {
            return Ok(false);
        }
        self.persist(original)?;
        Ok(true)
    }

    #[must_use]
    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    #[must_use]
    pub fn snapshot(&self) -> StudySnapshot {
        self.record.snapshot()
    }

    /// The last `n` studied word ids in study order.
    #[must_use]
    pub fn recent_words(&self, n: usize) -> &[WordId] {
        self.record.recent_words(n)
    }

    fn persist(&mut self, original: ProgressRecord) -> Result<(), TrackerError> {
        match self.store.save(&self.record) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.record = original;
                Err(err.into())
            }
        }
    }
}
