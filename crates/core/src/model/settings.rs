use thiserror::Error;

/// Questions per quiz unless the pool is smaller.
pub const DEFAULT_QUESTION_COUNT: usize = 10;
/// Countdown length for one quiz.
pub const DEFAULT_DURATION_SECONDS: u32 = 300;
/// Options per question including the correct answer.
pub const DEFAULT_OPTION_COUNT: usize = 4;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("question count must be at least 1")]
    ZeroQuestions,
    #[error("duration must be at least 1 second")]
    ZeroDuration,
    #[error("option count must be at least 2")]
    TooFewOptions,
}

/// Bounds for quiz generation: how many questions to sample, how long the
/// countdown runs, and how many options each question shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    question_count: usize,
    duration_seconds: u32,
    option_count: usize,
}

impl QuizSettings {
    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError` for a zero question count, zero duration,
    /// or fewer than two options.
    pub fn new(
        question_count: usize,
        duration_seconds: u32,
        option_count: usize,
    ) -> Result<Self, QuizSettingsError> {
        if question_count == 0 {
            return Err(QuizSettingsError::ZeroQuestions);
        }
        if duration_seconds == 0 {
            return Err(QuizSettingsError::ZeroDuration);
        }
        if option_count < 2 {
            return Err(QuizSettingsError::TooFewOptions);
        }
        Ok(Self {
            question_count,
            duration_seconds,
            option_count,
        })
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.option_count
    }

    /// Distractors per question: everything but the correct answer.
    #[must_use]
    pub fn distractor_count(&self) -> usize {
        self.option_count - 1
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            option_count: DEFAULT_OPTION_COUNT,
        }
    }
}
