mod ids;
mod kanji;
mod lesson;
mod progress;
mod quiz;
mod settings;
mod word;

pub use ids::{KanjiId, SessionId, WordId};
pub use kanji::{KanjiEntry, KanjiError};
pub use lesson::{Lesson, LessonError};
pub use progress::{
    DifficultyRating, ParseRatingError, ProgressRecord, QuizRecord, StudySnapshot,
};
pub use quiz::{Question, QuestionError, QuestionKind, QuizReport};
pub use settings::{
    DEFAULT_DURATION_SECONDS, DEFAULT_OPTION_COUNT, DEFAULT_QUESTION_COUNT, QuizSettings,
    QuizSettingsError,
};
pub use word::{KanjiMeaning, ParseWordLevelError, WordEntry, WordError, WordLevel};
