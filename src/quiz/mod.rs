//! Quiz engine
//!
//! Loading and normalizing authored question sets, and the state machine
//! that runs one attempt at a set.

pub mod adapter;
pub mod loader;
pub mod model;
pub mod run;
pub mod score;
pub mod settings;
pub mod shuffle;
pub mod text;

// Re-exports
pub use adapter::{Normalized, RawQuiz, RawRecord, normalize};
pub use model::{AnswerKey, Question, Selection};
pub use run::{Phase, QuizRun, RunError};
pub use score::{Feedback, Score};
pub use settings::{AnswerRule, QuizSettings, ScoringMode};
pub use shuffle::shuffle;
