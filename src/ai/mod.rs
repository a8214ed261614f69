mod gemini;
mod normalize;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::questions::TestCase;

pub use gemini::{GeminiClient, GenerateContentResponse};
pub use normalize::{normalize_question, strip_markdown_fences};

/// A question as produced by the generator, before it is stored.
/// Difficulty is kept verbatim from the request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestion {
    pub title: String,
    pub description: String,
    pub topic: String,
    pub difficulty: String,
    pub hints: Vec<String>,
    pub solution: String,
    pub test_cases: Vec<TestCase>,
}

/// Text generation used by the question routes.
///
/// Implementations report failures as `AppError::Generation`.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate_question(&self, topic: &str, difficulty: &str) -> Result<GeneratedQuestion>;

    async fn generate_hint(&self, description: &str, current_code: &str) -> Result<String>;

    async fn generate_solution(&self, description: &str) -> Result<String>;
}
