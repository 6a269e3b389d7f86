use thiserror::Error;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// How a question asks about its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    /// Show the japanese text, ask for the meaning.
    MeaningFromJapanese,
    /// Show the meaning, ask for the japanese text.
    JapaneseFromMeaning,
    /// Show the japanese text, ask for the reading.
    Reading,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("prompt must not be empty")]
    EmptyPrompt,
    #[error("options must contain the correct answer exactly once")]
    CorrectAnswerMissing,
    #[error("options must be distinct")]
    DuplicateOption,
}

/// One multiple-choice question: a prompt, the correct answer, and the
/// display-ordered option texts.
///
/// Invariants: the correct answer appears among the options exactly once,
/// and all option texts are distinct. Fewer than the configured number of
/// options is legal (degenerate pools produce shorter sets).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    correct_answer: String,
    options: Vec<String>,
    kind: QuestionKind,
}

impl Question {
    /// Creates a question, checking the option-set invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is empty, the options miss the
    /// correct answer, or any option text repeats.
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        options: Vec<String>,
        kind: QuestionKind,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();

        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        for (index, option) in options.iter().enumerate() {
            if options[..index].contains(option) {
                return Err(QuestionError::DuplicateOption);
            }
        }
        if options.iter().filter(|o| **o == correct_answer).count() != 1 {
            return Err(QuestionError::CorrectAnswerMissing);
        }

        Ok(Self {
            prompt,
            correct_answer,
            options,
            kind,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    /// Exact string match against the correct answer.
    #[must_use]
    pub fn is_correct(&self, chosen: &str) -> bool {
        chosen == self.correct_answer
    }
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

/// Final outcome of one quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizReport {
    pub score: u32,
    pub total: u32,
    pub accuracy_percent: u8,
    pub elapsed_seconds: u32,
}

impl QuizReport {
    /// Integer percentage, rounded half up.
    ///
    /// A zero total yields 0 rather than dividing by zero; the engine's own
    /// quizzes always have at least one question.
    #[must_use]
    pub fn percent(score: u32, total: u32) -> u8 {
        if total == 0 {
            return 0;
        }
        // Bounded by 100 whenever score <= total, so the cast is safe.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = ((f64::from(score) / f64::from(total)) * 100.0).round() as u8;
        pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn question_requires_correct_answer_among_options() {
        let err = Question::new(
            "What does \"犬\" mean?",
            "chó",
            options(&["mèo", "cá", "chim"]),
            QuestionKind::MeaningFromJapanese,
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::CorrectAnswerMissing));
    }

    #[test]
    fn question_rejects_duplicate_options() {
        let err = Question::new(
            "What does \"犬\" mean?",
            "chó",
            options(&["chó", "mèo", "mèo"]),
            QuestionKind::MeaningFromJapanese,
        )
        .unwrap_err();
        assert!(matches!(err, QuestionError::DuplicateOption));
    }

    #[test]
    fn question_accepts_short_option_sets() {
        let question = Question::new(
            "What does \"犬\" mean?",
            "chó",
            options(&["chó", "mèo"]),
            QuestionKind::MeaningFromJapanese,
        )
        .unwrap();
        assert_eq!(question.options().len(), 2);
        assert!(question.is_correct("chó"));
        assert!(!question.is_correct("mèo"));
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(QuizReport::percent(7, 10), 70);
        assert_eq!(QuizReport::percent(1, 3), 33);
        assert_eq!(QuizReport::percent(2, 3), 67);
        assert_eq!(QuizReport::percent(0, 0), 0);
        assert_eq!(QuizReport::percent(5, 5), 100);
    }
}
