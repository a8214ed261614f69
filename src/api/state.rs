use std::sync::Arc;

use crate::ai::{GeminiClient, QuestionGenerator};
use crate::auth::{JwtValidator, TokenValidator};
use crate::config::Config;
use crate::error::Result;
use crate::execution::CodeRunner;
use crate::interview::InterviewHub;
use crate::performance::{InMemoryPerformanceRepository, PerformanceRepository};
use crate::questions::{InMemoryQuestionRepository, QuestionRepository};

/// Everything a request handler may reach
#[derive(Clone)]
pub struct AppState {
    pub hub: InterviewHub,
    pub questions: Arc<dyn QuestionRepository>,
    pub performance: Arc<dyn PerformanceRepository>,
    pub generator: Arc<dyn QuestionGenerator>,
    pub runner: CodeRunner,
    pub tokens: Arc<dyn TokenValidator>,
}

impl AppState {
    /// Wires the production collaborators. Must run inside a tokio runtime
    /// since it spawns the interview hub.
    pub fn from_config(config: &Config) -> Result<Self> {
        let generator = GeminiClient::new(config.gemini.clone())?;

        Ok(Self {
            hub: InterviewHub::spawn(config.interview.clone()),
            questions: Arc::new(InMemoryQuestionRepository::new()),
            performance: Arc::new(InMemoryPerformanceRepository::new()),
            generator: Arc::new(generator),
            runner: CodeRunner::new(&config.execution),
            tokens: Arc::new(JwtValidator::new(&config.auth.jwt_secret)),
        })
    }
}
