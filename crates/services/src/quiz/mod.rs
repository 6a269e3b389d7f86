mod builder;
mod session;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use builder::QuizBuilder;
pub use session::{AnswerOutcome, QuizSession};
