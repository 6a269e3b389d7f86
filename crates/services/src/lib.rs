#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod feed;
pub mod flashcards;
pub mod library;
pub mod progress;
pub mod quiz;

pub use goi_core::Clock;

pub use app_services::AppServices;
pub use error::{FeedError, FlashcardError, QuizError, TrackerError};
pub use feed::{DirFeed, HttpFeed, KANJI_FILE, LessonFeed, StaticFeed, lesson_file_name};
pub use flashcards::{CardCursor, FlashcardSession, KanjiDrill};
pub use library::{DEFAULT_LESSON_COUNT, VocabularyService, WordQuery, load_kanji};
pub use progress::ProgressTracker;
pub use quiz::{AnswerOutcome, QuizBuilder, QuizSession};
