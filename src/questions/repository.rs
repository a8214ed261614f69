use std::collections::HashMap;

use async_trait::async_trait;
use rand::seq::IteratorRandom;
use tokio::sync::RwLock;

use super::model::{Difficulty, Question};
use crate::error::Result;
use crate::pagination::Page;

/// Storage port for interview questions
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn insert(&self, question: Question) -> Result<Question>;
    async fn insert_many(&self, questions: Vec<Question>) -> Result<usize>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Question>>;
    async fn count(&self) -> Result<usize>;
    async fn random(&self) -> Result<Option<Question>>;
    /// Newest first; returns the page and the total number of matches
    async fn find_by_topic(
        &self,
        topic: &str,
        difficulty: Option<Difficulty>,
        page: Page,
    ) -> Result<(Vec<Question>, usize)>;
    /// Returns false when no question has this id
    async fn update_solution(&self, id: &str, solution: &str) -> Result<bool>;
}

/// Process-local question store
#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<HashMap<String, Question>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn insert(&self, question: Question) -> Result<Question> {
        let mut questions = self.questions.write().await;
        questions.insert(question.id.clone(), question.clone());
        tracing::debug!(question_id = %question.id, "Question stored");
        Ok(question)
    }

    async fn insert_many(&self, batch: Vec<Question>) -> Result<usize> {
        let mut questions = self.questions.write().await;
        let inserted = batch.len();
        for question in batch {
            questions.insert(question.id.clone(), question);
        }
        Ok(inserted)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.get(id).cloned())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.questions.read().await.len())
    }

    async fn random(&self) -> Result<Option<Question>> {
        let questions = self.questions.read().await;
        let mut rng = rand::thread_rng();
        Ok(questions.values().choose(&mut rng).cloned())
    }

    async fn find_by_topic(
        &self,
        topic: &str,
        difficulty: Option<Difficulty>,
        page: Page,
    ) -> Result<(Vec<Question>, usize)> {
        let questions = self.questions.read().await;
        let mut matches: Vec<Question> = questions
            .values()
            .filter(|q| q.topic == topic)
            .filter(|q| difficulty.map_or(true, |d| q.difficulty == d))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matches.len();
        Ok((page.apply(matches), total))
    }

    async fn update_solution(&self, id: &str, solution: &str) -> Result<bool> {
        let mut questions = self.questions.write().await;
        match questions.get_mut(id) {
            Some(question) => {
                question.solution = solution.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn question(id: &str, topic: &str, difficulty: Difficulty, minutes: i64) -> Question {
        Question {
            id: id.to_string(),
            title: format!("Question {}", id),
            description: "desc".to_string(),
            difficulty,
            topic: topic.to_string(),
            hints: vec![],
            solution: "sol".to_string(),
            tags: vec![],
            test_cases: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryQuestionRepository::new();
        repo.insert(question("q1", "Arrays", Difficulty::Easy, 0)).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        assert!(repo.find_by_id("q1").await.unwrap().is_some());
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_random_on_empty_store() {
        let repo = InMemoryQuestionRepository::new();
        assert!(repo.random().await.unwrap().is_none());

        repo.insert(question("q1", "Arrays", Difficulty::Easy, 0)).await.unwrap();
        assert_eq!(repo.random().await.unwrap().unwrap().id, "q1");
    }

    #[tokio::test]
    async fn test_find_by_topic_filters_and_sorts() {
        let repo = InMemoryQuestionRepository::new();
        repo.insert_many(vec![
            question("old", "Trees", Difficulty::Easy, 0),
            question("new", "Trees", Difficulty::Hard, 10),
            question("mid", "Trees", Difficulty::Easy, 5),
            question("other", "Graphs", Difficulty::Easy, 20),
        ])
        .await
        .unwrap();

        let (all, total) = repo.find_by_topic("Trees", None, Page::new(1, 10)).await.unwrap();
        assert_eq!(total, 3);
        let ids: Vec<&str> = all.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);

        let (easy, total) = repo
            .find_by_topic("Trees", Some(Difficulty::Easy), Page::new(2, 1))
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(easy[0].id, "old");
    }

    #[tokio::test]
    async fn test_update_solution() {
        let repo = InMemoryQuestionRepository::new();
        repo.insert(question("q1", "Arrays", Difficulty::Easy, 0)).await.unwrap();

        assert!(repo.update_solution("q1", "better").await.unwrap());
        assert!(!repo.update_solution("nope", "x").await.unwrap());
        assert_eq!(repo.find_by_id("q1").await.unwrap().unwrap().solution, "better");
    }
}
