mod model;
mod repository;
mod seed;

pub use model::{Difficulty, Question, QuestionSummary, TestCase, UnsavedQuestion};
pub use repository::{InMemoryQuestionRepository, QuestionRepository};
pub use seed::{sample_questions, seed_if_empty};
