use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::normalize::normalize_question;
use super::{GeneratedQuestion, QuestionGenerator};
use crate::config::GeminiConfig;
use crate::error::{AppError, Result};

const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response from the `generateContent` API
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Question generator backed by the Gemini REST API
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set, generation requests will fail");
        }

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AppError::MissingConfiguration("GEMINI_API_KEY is missing in environment variables".to_string())
        })?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::internal(format!(
                "Gemini request failed with status {}: {}",
                status, error_text
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parsed
            .text()
            .ok_or_else(|| AppError::internal("Gemini returned no candidates"))
    }
}

#[async_trait]
impl QuestionGenerator for GeminiClient {
    async fn generate_question(&self, topic: &str, difficulty: &str) -> Result<GeneratedQuestion> {
        let raw = self
            .generate_text(&question_prompt(topic, difficulty))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, topic = %topic, "Gemini question generation failed");
                AppError::generation("question", e)
            })?;

        tracing::debug!(topic = %topic, difficulty = %difficulty, chars = raw.len(), "Gemini response received");
        Ok(normalize_question(&raw, topic, difficulty))
    }

    async fn generate_hint(&self, description: &str, current_code: &str) -> Result<String> {
        self.generate_text(&hint_prompt(description, current_code))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Gemini hint generation failed");
                AppError::generation("hint", e)
            })
    }

    async fn generate_solution(&self, description: &str) -> Result<String> {
        self.generate_text(&solution_prompt(description))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Gemini solution generation failed");
                AppError::generation("solution", e)
            })
    }
}

fn question_prompt(topic: &str, difficulty: &str) -> String {
    format!(
        r#"Generate a coding interview question for topic: {topic} with difficulty: {difficulty}.

Please format the response as JSON with the following structure:
{{
  "title": "Question title",
  "description": "Detailed problem description",
  "topic": "{topic}",
  "difficulty": "{difficulty}",
  "hints": ["hint1", "hint2", "hint3"],
  "solution": "Complete solution with explanation",
  "testCases": [
    {{"input": "sample input", "expectedOutput": "expected output"}}
  ]
}}

Make sure the JSON is valid and properly formatted."#
    )
}

fn hint_prompt(description: &str, current_code: &str) -> String {
    format!(
        "Given this coding problem: \"{}\"\nAnd the current user code: \"{}\"\n\n\
         Provide a helpful hint to guide the user towards the solution without giving away \
         the complete answer. Keep it concise and actionable.",
        description, current_code
    )
}

fn solution_prompt(description: &str) -> String {
    format!(
        "Provide a complete solution with explanation for this coding problem: \"{}\".\n\n\
         Include:\n\
         1. A working code solution\n\
         2. Step-by-step explanation\n\
         3. Time and space complexity analysis\n\
         4. Any edge cases to consider",
        description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello, "}, {"text": "world"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello, world"));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_endpoint_uses_model() {
        let client = GeminiClient::new(GeminiConfig {
            api_key: Some("k".to_string()),
            model: "gemini-1.5-pro".to_string(),
            api_url: "http://localhost:9999/v1beta/".to_string(),
        })
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_question_prompt_mentions_request() {
        let prompt = question_prompt("graphs", "Hard");
        assert!(prompt.contains("topic: graphs with difficulty: Hard"));
        assert!(prompt.contains("\"testCases\""));
    }

    #[tokio::test]
    async fn test_missing_key_fails_at_call_time() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        let err = client.generate_hint("desc", "").await.unwrap_err();
        match err {
            AppError::Generation { what, reason } => {
                assert_eq!(what, "hint");
                assert!(reason.contains("GEMINI_API_KEY"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
