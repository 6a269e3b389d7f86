use goi_core::model::{Question, QuizReport, QuizSettings, SessionId};

use crate::error::QuizError;

/// Outcome of answering one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
}

/// One timed quiz run over a fixed question list.
///
/// The session owns no timer: the caller drives the countdown by calling
/// [`QuizSession::tick`] once per second and stops as soon as
/// [`QuizSession::is_finished`] turns true. Finishing is one-way, whether
/// by answering the last question or by running out of time.
pub struct QuizSession {
    id: SessionId,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    duration_seconds: u32,
    time_remaining: u32,
    finished: bool,
}

impl QuizSession {
    /// Starts a session over the given questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyPool` when there are no questions.
    pub fn start(questions: Vec<Question>, settings: QuizSettings) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyPool);
        }
        Ok(Self {
            id: SessionId::new(),
            questions,
            current_index: 0,
            score: 0,
            duration_seconds: settings.duration_seconds(),
            time_remaining: settings.duration_seconds(),
            finished: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The question awaiting an answer, or `None` once finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current_index)
    }

    /// 1-based position of the current question, clamped at the total.
    #[must_use]
    pub fn question_number(&self) -> usize {
        (self.current_index + 1).min(self.questions.len())
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Scores the chosen option and advances past the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Completed` once the session is finished, whether
    /// by the last answer or by the countdown reaching zero.
    pub fn answer(&mut self, chosen: &str) -> Result<AnswerOutcome, QuizError> {
        if self.finished {
            return Err(QuizError::Completed);
        }
        let Some(question) = self.questions.get(self.current_index) else {
            return Err(QuizError::Completed);
        };

        let correct = question.is_correct(chosen);
        if correct {
            self.score += 1;
        }
        let outcome = AnswerOutcome {
            correct,
            correct_answer: question.correct_answer().to_string(),
        };

        self.current_index += 1;
        if self.current_index >= self.questions.len() {
            self.finished = true;
        }
        Ok(outcome)
    }

    /// Advances the countdown by one second, finishing the session when it
    /// reaches zero. Ticking a finished session has no effect.
    pub fn tick(&mut self) {
        if self.finished {
            return;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.finished = true;
        }
    }

    /// Final report. The total counts every generated question, answered or
    /// not, so an expired timer scores the unanswered remainder as wrong.
    #[must_use]
    pub fn report(&self) -> QuizReport {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        QuizReport {
            score: self.score,
            total,
            accuracy_percent: QuizReport::percent(self.score, total),
            elapsed_seconds: self.duration_seconds - self.time_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goi_core::model::QuestionKind;
    use pretty_assertions::assert_eq;

    fn build_question(prompt: &str, correct: &str, wrong: &str) -> Question {
        Question::new(
            prompt,
            correct,
            vec![correct.to_string(), wrong.to_string()],
            QuestionKind::MeaningFromJapanese,
        )
        .expect("valid question")
    }

    fn build_session() -> QuizSession {
        let questions = vec![
            build_question("\"犬\" có nghĩa là:", "chó", "mèo"),
            build_question("\"猫\" có nghĩa là:", "mèo", "cá"),
        ];
        QuizSession::start(questions, QuizSettings::default()).expect("start session")
    }

    #[test]
    fn start_rejects_an_empty_question_list() {
        assert!(matches!(
            QuizSession::start(Vec::new(), QuizSettings::default()),
            Err(QuizError::EmptyPool)
        ));
    }

    #[test]
    fn answers_score_and_advance() {
        let mut session = build_session();
        assert_eq!(session.question_number(), 1);

        let first = session.answer("chó").expect("first answer");
        assert!(first.correct);
        assert_eq!(session.score(), 1);
        assert_eq!(session.question_number(), 2);

        let second = session.answer("cá").expect("second answer");
        assert!(!second.correct);
        assert_eq!(second.correct_answer, "mèo");

        assert!(session.is_finished());
        assert_eq!(session.current_question(), None);
        assert!(matches!(session.answer("chó"), Err(QuizError::Completed)));
    }

    #[test]
    fn report_counts_every_generated_question() {
        let mut session = build_session();
        session.answer("chó").expect("answer");
        session.answer("mèo").expect("answer");

        let report = session.report();
        assert_eq!(report.score, 2);
        assert_eq!(report.total, 2);
        assert_eq!(report.accuracy_percent, 100);
    }

    #[test]
    fn countdown_expiry_finishes_the_session() {
        let mut session = build_session();
        session.answer("chó").expect("answer");

        for _ in 0..QuizSettings::default().duration_seconds() {
            session.tick();
        }

        assert!(session.is_finished());
        assert_eq!(session.time_remaining(), 0);
        assert!(matches!(session.answer("mèo"), Err(QuizError::Completed)));

        // Unanswered questions still count against the total.
        let report = session.report();
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 2);
        assert_eq!(report.accuracy_percent, 50);
        assert_eq!(report.elapsed_seconds, QuizSettings::default().duration_seconds());
    }

    #[test]
    fn ticking_a_finished_session_changes_nothing() {
        let mut session = build_session();
        session.answer("chó").expect("answer");
        session.answer("mèo").expect("answer");

        let before = session.time_remaining();
        session.tick();
        assert_eq!(session.time_remaining(), before);
    }

    #[test]
    fn elapsed_time_reflects_ticks() {
        let mut session = build_session();
        for _ in 0..45 {
            session.tick();
        }
        session.answer("chó").expect("answer");
        session.answer("mèo").expect("answer");

        assert_eq!(session.report().elapsed_seconds, 45);
    }
}
