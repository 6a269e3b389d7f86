//! Quiz flows: generation, scoring, the countdown, and how reports land in
//! the progress record.

use std::sync::Arc;

use goi_core::model::{QuestionKind, QuizReport, WordEntry};
use goi_core::time::fixed_clock;
use services::{AppServices, ProgressTracker, QuizError, StaticFeed};
use storage::{MemoryStore, ProgressStore, StateStore};

fn build_word(japanese: &str, vietnamese: &str, romanji: &str) -> WordEntry {
    WordEntry::new(japanese, vietnamese)
        .expect("valid word")
        .with_romanji(romanji)
}

fn report_with(score: u32, total: u32) -> QuizReport {
    QuizReport {
        score,
        total,
        accuracy_percent: QuizReport::percent(score, total),
        elapsed_seconds: 90,
    }
}

#[tokio::test]
async fn perfect_lesson_quiz_lands_in_the_progress_record() {
    let feed = StaticFeed::new().with_lesson(
        1,
        vec![
            build_word("犬", "chó", "inu"),
            build_word("猫", "mèo", "neko"),
            build_word("魚", "cá", "sakana"),
            build_word("鳥", "chim", "tori"),
            build_word("山", "núi", "yama"),
        ],
    );
    let store = Arc::new(MemoryStore::new());
    let mut services = AppServices::load(store, &feed, fixed_clock()).await;

    let mut session = services.start_quiz(Some(1)).expect("start quiz");
    assert_eq!(session.total_questions(), 5);

    while !session.is_finished() {
        let correct = session
            .current_question()
            .expect("question available")
            .correct_answer()
            .to_string();
        let outcome = session.answer(&correct).expect("answer");
        assert!(outcome.correct);
    }

    let report = session.report();
    assert_eq!(report.score, 5);
    assert_eq!(report.total, 5);
    assert_eq!(report.accuracy_percent, 100);

    let percent = services
        .tracker_mut()
        .record_quiz_report(1, &report)
        .expect("record report");
    assert_eq!(percent, 100);

    let record = services.tracker().record();
    assert_eq!(record.quiz_score_for(1), Some(100));
    assert_eq!(record.quiz_history().len(), 1);
    assert_eq!(record.accuracy(), 100);
}

#[test]
fn quiz_scores_overwrite_per_lesson_and_average_across_lessons() {
    let store = Arc::new(MemoryStore::new());

    let mut tracker = ProgressTracker::load(ProgressStore::new(
        Arc::clone(&store) as Arc<dyn StateStore>
    ));
    assert_eq!(tracker.record().accuracy(), 0);

    let first = tracker
        .record_quiz_report(1, &report_with(7, 10))
        .expect("record");
    assert_eq!(first, 70);
    let second = tracker
        .record_quiz_report(2, &report_with(3, 10))
        .expect("record");
    assert_eq!(second, 30);
    assert_eq!(tracker.record().accuracy(), 50);

    // A retake replaces the lesson's score rather than adding a second one,
    // while the history keeps every attempt.
    let retake = tracker
        .record_quiz_report(1, &report_with(3, 10))
        .expect("record");
    assert_eq!(retake, 30);
    assert_eq!(tracker.record().accuracy(), 30);
    assert_eq!(tracker.record().quiz_history().len(), 3);

    let reloaded = ProgressTracker::load(ProgressStore::new(store));
    assert_eq!(reloaded.record().quiz_score_for(1), Some(30));
    assert_eq!(reloaded.record().quiz_score_for(2), Some(30));
    assert_eq!(reloaded.record().quiz_history().len(), 3);
}

#[tokio::test]
async fn expired_timer_scores_the_remainder_as_wrong() {
    let feed = StaticFeed::new().with_lesson(
        1,
        vec![
            build_word("犬", "chó", "inu"),
            build_word("猫", "mèo", "neko"),
            build_word("魚", "cá", "sakana"),
            build_word("鳥", "chim", "tori"),
        ],
    );
    let store = Arc::new(MemoryStore::new());
    let mut services = AppServices::load(store, &feed, fixed_clock()).await;
    let duration = services.settings().duration_seconds();

    let mut session = services.start_quiz(Some(1)).expect("start quiz");
    assert_eq!(session.total_questions(), 4);

    let correct = session
        .current_question()
        .expect("question available")
        .correct_answer()
        .to_string();
    session.answer(&correct).expect("answer");

    for _ in 0..duration {
        session.tick();
    }
    assert!(session.is_finished());
    assert!(matches!(session.answer("mèo"), Err(QuizError::Completed)));

    let report = session.report();
    assert_eq!(report.score, 1);
    assert_eq!(report.total, 4);
    assert_eq!(report.accuracy_percent, 25);
    assert_eq!(report.elapsed_seconds, duration);

    let percent = services
        .tracker_mut()
        .record_quiz_report(1, &report)
        .expect("record report");
    assert_eq!(percent, 25);
}

#[tokio::test]
async fn distractors_are_drawn_from_the_whole_library() {
    // Lesson 1 has a single word, so every wrong option has to come from
    // lesson 2.
    let feed = StaticFeed::new()
        .with_lesson(1, vec![build_word("犬", "chó", "inu")])
        .with_lesson(
            2,
            vec![
                build_word("猫", "mèo", "neko"),
                build_word("魚", "cá", "sakana"),
                build_word("鳥", "chim", "tori"),
            ],
        );
    let store = Arc::new(MemoryStore::new());
    let services = AppServices::load(store, &feed, fixed_clock()).await;

    let session = services.start_quiz(Some(1)).expect("start quiz");
    assert_eq!(session.total_questions(), 1);

    let question = session.current_question().expect("question available");
    assert_eq!(question.options().len(), 4);

    let (expected_prompt, expected_correct, others): (String, &str, [&str; 3]) =
        match question.kind() {
            QuestionKind::MeaningFromJapanese => {
                ("\"犬\" có nghĩa là:".to_string(), "chó", ["mèo", "cá", "chim"])
            }
            QuestionKind::JapaneseFromMeaning => (
                "\"chó\" trong tiếng Nhật là:".to_string(),
                "犬",
                ["猫", "魚", "鳥"],
            ),
            QuestionKind::Reading => (
                "Cách đọc của \"犬\" là:".to_string(),
                "inu",
                ["neko", "sakana", "tori"],
            ),
        };

    assert_eq!(question.prompt(), expected_prompt);
    assert_eq!(question.correct_answer(), expected_correct);
    for option in question.options() {
        if option != question.correct_answer() {
            assert!(
                others.contains(&option.as_str()),
                "unexpected distractor {option}"
            );
        }
    }
}
