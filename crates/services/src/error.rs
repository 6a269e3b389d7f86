//! Shared error types for the services crate.

use thiserror::Error;

use goi_core::model::QuestionError;
use storage::StorageError;

/// Errors emitted while fetching lesson or kanji content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedError {
    #[error("content feed request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Errors emitted by `ProgressTracker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by quiz generation and sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no words available for quiz")]
    EmptyPool,
    #[error("quiz already completed")]
    Completed,
    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Errors emitted by flashcard and kanji drill sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FlashcardError {
    #[error("no cards available for session")]
    Empty,
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}
