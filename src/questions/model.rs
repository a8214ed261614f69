use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::GeneratedQuestion;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AppError::validation(format!("Invalid difficulty: {}", other))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub expected_output: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub topic: String,
    pub hints: Vec<String>,
    pub solution: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub test_cases: Vec<TestCase>,
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Builds a storable question, enforcing the fields the store requires
    pub fn from_generated(generated: &GeneratedQuestion, now: DateTime<Utc>) -> Result<Self> {
        let difficulty: Difficulty = generated.difficulty.parse()?;

        for (field, value) in [
            ("title", &generated.title),
            ("description", &generated.description),
            ("topic", &generated.topic),
            ("solution", &generated.solution),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("Question {} is required", field)));
            }
        }

        Ok(Self {
            id: Uuid::new_v4().simple().to_string(),
            title: generated.title.trim().to_string(),
            description: generated.description.clone(),
            difficulty,
            topic: generated.topic.clone(),
            hints: generated.hints.clone(),
            solution: generated.solution.clone(),
            tags: Vec::new(),
            test_cases: generated.test_cases.clone(),
            created_at: now,
        })
    }

    pub fn summary(&self) -> QuestionSummary {
        QuestionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            difficulty: self.difficulty,
            topic: self.topic.clone(),
        }
    }
}

/// Generated question returned to the client without being stored
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsavedQuestion {
    pub id: String,
    #[serde(flatten)]
    pub question: GeneratedQuestion,
    pub created_at: DateTime<Utc>,
}

impl UnsavedQuestion {
    /// Temporary id is the current epoch time in milliseconds
    pub fn new(question: GeneratedQuestion, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis().to_string(),
            question,
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub topic: String,
}
