use std::sync::Arc;

use goi_core::model::{KanjiEntry, QuizSettings};
use goi_core::time::Clock;
use storage::{ProgressStore, StateStore, VocabCache};

use crate::error::{FlashcardError, QuizError};
use crate::feed::LessonFeed;
use crate::flashcards::{FlashcardSession, KanjiDrill};
use crate::library::{self, DEFAULT_LESSON_COUNT, VocabularyService};
use crate::progress::ProgressTracker;
use crate::quiz::{QuizBuilder, QuizSession};

/// Assembles the loaded library, kanji deck, and progress tracker behind
/// one state store and content feed.
pub struct AppServices {
    library: VocabularyService,
    kanji: Vec<KanjiEntry>,
    tracker: ProgressTracker,
    settings: QuizSettings,
}

impl AppServices {
    /// Loads every service. Content failures degrade (cache, sample lesson,
    /// empty kanji deck) rather than aborting startup.
    pub async fn load(store: Arc<dyn StateStore>, feed: &dyn LessonFeed, clock: Clock) -> Self {
        let cache = VocabCache::new(Arc::clone(&store));
        let library = VocabularyService::load(feed, &cache, DEFAULT_LESSON_COUNT).await;
        let kanji = library::load_kanji(feed).await;
        let tracker = ProgressTracker::load(ProgressStore::new(store)).with_clock(clock);
        Self {
            library,
            kanji,
            tracker,
            settings: QuizSettings::default(),
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn library(&self) -> &VocabularyService {
        &self.library
    }

    #[must_use]
    pub fn kanji(&self) -> &[KanjiEntry] {
        &self.kanji
    }

    #[must_use]
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut ProgressTracker {
        &mut self.tracker
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// Starts a quiz over one lesson, or over the whole library.
    ///
    /// Questions are drawn from the selected lesson; wrong options draw
    /// from the whole library either way. An unknown or empty lesson falls
    /// back to the whole library.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyPool` when no words are loaded at all.
    pub fn start_quiz(&self, lesson: Option<u32>) -> Result<QuizSession, QuizError> {
        let all_words = self.library.all_words();
        let question_pool = match lesson.and_then(|ordinal| self.library.lesson(ordinal)) {
            Some(scoped) if !scoped.is_empty() => scoped.words().to_vec(),
            _ => all_words.clone(),
        };

        let questions = QuizBuilder::new(self.settings).build_scoped(&question_pool, &all_words)?;
        QuizSession::start(questions, self.settings)
    }

    /// Starts a flashcard session over one lesson's words.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError::Empty` when the lesson is unknown or has no
    /// words.
    pub fn start_flashcards(&self, lesson: u32) -> Result<FlashcardSession, FlashcardError> {
        let cards = self
            .library
            .lesson(lesson)
            .map(|found| found.words().to_vec())
            .unwrap_or_default();
        FlashcardSession::start(cards)
    }

    /// Starts a drill over the kanji reference deck.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError::Empty` when no kanji loaded.
    pub fn start_kanji_drill(&self) -> Result<KanjiDrill, FlashcardError> {
        KanjiDrill::start(self.kanji.clone())
    }
}
