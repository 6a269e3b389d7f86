use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;

use goi_core::model::{Question, QuestionError, QuestionKind, QuizSettings, WordEntry};

use crate::error::QuizError;

/// Builds randomized multiple-choice questions from word pools.
pub struct QuizBuilder {
    settings: QuizSettings,
}

impl QuizBuilder {
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self { settings }
    }

    /// Builds a quiz over a single pool: questions and wrong options both
    /// come from it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyPool` when the pool is empty.
    pub fn build(&self, pool: &[WordEntry]) -> Result<Vec<Question>, QuizError> {
        self.build_scoped(pool, pool)
    }

    /// Builds a quiz asking about `question_pool`, drawing wrong options
    /// from `distractor_pool`.
    ///
    /// Picks up to `question_count` distinct words at random, fewer when the
    /// pool is smaller, and asks about each with a randomly chosen question
    /// kind. Wrong options never share japanese text with the asked word,
    /// and option texts are deduplicated, so a question may end up with
    /// fewer than `option_count` options.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyPool` when `question_pool` is empty.
    pub fn build_scoped(
        &self,
        question_pool: &[WordEntry],
        distractor_pool: &[WordEntry],
    ) -> Result<Vec<Question>, QuizError> {
        if question_pool.is_empty() {
            return Err(QuizError::EmptyPool);
        }

        let mut rng = rng();
        let mut picked: Vec<&WordEntry> = question_pool.iter().collect();
        picked.shuffle(&mut rng);
        picked.truncate(self.settings.question_count());

        let mut questions = Vec::with_capacity(picked.len());
        for word in picked {
            let kind = match rng.random_range(0..3) {
                0 => QuestionKind::MeaningFromJapanese,
                1 => QuestionKind::JapaneseFromMeaning,
                _ => QuestionKind::Reading,
            };
            questions.push(self.build_question(word, kind, distractor_pool, &mut rng)?);
        }
        Ok(questions)
    }

    fn build_question(
        &self,
        word: &WordEntry,
        kind: QuestionKind,
        distractor_pool: &[WordEntry],
        rng: &mut impl Rng,
    ) -> Result<Question, QuestionError> {
        let (prompt, correct_answer) = match kind {
            QuestionKind::MeaningFromJapanese => (
                format!("\"{}\" có nghĩa là:", word.japanese()),
                word.vietnamese().to_string(),
            ),
            QuestionKind::JapaneseFromMeaning => (
                format!("\"{}\" trong tiếng Nhật là:", word.vietnamese()),
                word.japanese().to_string(),
            ),
            QuestionKind::Reading => (
                format!("Cách đọc của \"{}\" là:", word.japanese()),
                word.reading().to_string(),
            ),
        };

        let mut candidates: Vec<&WordEntry> = distractor_pool
            .iter()
            .filter(|candidate| candidate.japanese() != word.japanese())
            .collect();
        candidates.shuffle(rng);

        let mut options = vec![correct_answer.clone()];
        for candidate in candidates {
            if options.len() >= self.settings.option_count() {
                break;
            }
            let text = match kind {
                QuestionKind::MeaningFromJapanese => candidate.vietnamese().to_string(),
                QuestionKind::JapaneseFromMeaning => candidate.japanese().to_string(),
                QuestionKind::Reading => candidate.reading().to_string(),
            };
            if !options.contains(&text) {
                options.push(text);
            }
        }
        options.shuffle(rng);

        Question::new(prompt, correct_answer, options, kind)
    }
}
