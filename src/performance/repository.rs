use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::model::{Performance, PerformanceStats, PerformanceUpdate};
use crate::error::{AppError, Result};
use crate::pagination::Page;

/// Storage port for per-user progress, unique per (user, question)
#[async_trait]
pub trait PerformanceRepository: Send + Sync {
    async fn upsert(
        &self,
        user_id: &str,
        update: &PerformanceUpdate,
        now: DateTime<Utc>,
    ) -> Result<Performance>;
    async fn stats(&self, user_id: &str) -> Result<PerformanceStats>;
    /// Most recent attempt first; returns the page and the user's total
    async fn history(&self, user_id: &str, page: Page) -> Result<(Vec<Performance>, usize)>;
}

#[derive(Default)]
pub struct InMemoryPerformanceRepository {
    records: RwLock<HashMap<(String, String), Performance>>,
}

impl InMemoryPerformanceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PerformanceRepository for InMemoryPerformanceRepository {
    async fn upsert(
        &self,
        user_id: &str,
        update: &PerformanceUpdate,
        now: DateTime<Utc>,
    ) -> Result<Performance> {
        let question_id = update
            .question_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::validation("questionId is required"))?;

        let mut records = self.records.write().await;
        let key = (user_id.to_string(), question_id.to_string());

        let record = match records.get_mut(&key) {
            Some(existing) => {
                existing.record_attempt(update, now);
                existing.clone()
            }
            None => {
                let created = Performance::first_attempt(user_id, question_id, update, now);
                records.insert(key, created.clone());
                created
            }
        };

        tracing::debug!(
            user_id = %user_id,
            question_id = %question_id,
            attempts = record.attempts,
            "Performance updated"
        );
        Ok(record)
    }

    async fn stats(&self, user_id: &str) -> Result<PerformanceStats> {
        let records = self.records.read().await;
        Ok(PerformanceStats::tally(
            records.values().filter(|p| p.user_id == user_id),
        ))
    }

    async fn history(&self, user_id: &str, page: Page) -> Result<(Vec<Performance>, usize)> {
        let records = self.records.read().await;
        let mut mine: Vec<Performance> = records
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.last_attempted_at.cmp(&a.last_attempted_at));

        let total = mine.len();
        Ok((page.apply(mine), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::AttemptStatus;
    use chrono::Duration;

    fn update(question: &str, status: AttemptStatus, minutes: u64) -> PerformanceUpdate {
        PerformanceUpdate {
            question_id: Some(question.to_string()),
            status: Some(status),
            time_spent: Some(minutes),
            ..PerformanceUpdate::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_is_unique_per_user_and_question() {
        let repo = InMemoryPerformanceRepository::new();
        let now = Utc::now();

        repo.upsert("u1", &update("q1", AttemptStatus::Attempted, 10), now).await.unwrap();
        let second = repo.upsert("u1", &update("q1", AttemptStatus::Solved, 5), now).await.unwrap();
        repo.upsert("u2", &update("q1", AttemptStatus::Attempted, 3), now).await.unwrap();

        assert_eq!(second.attempts, 2);
        assert_eq!(second.time_spent, 15);
        let (_, total) = repo.history("u1", Page::new(1, 10)).await.unwrap();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_upsert_requires_question_id() {
        let repo = InMemoryPerformanceRepository::new();
        let err = repo
            .upsert("u1", &PerformanceUpdate::default(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_stats_per_user() {
        let repo = InMemoryPerformanceRepository::new();
        let now = Utc::now();
        repo.upsert("u1", &update("q1", AttemptStatus::Solved, 10), now).await.unwrap();
        repo.upsert("u1", &update("q2", AttemptStatus::Attempted, 4), now).await.unwrap();
        repo.upsert("u2", &update("q1", AttemptStatus::Solved, 99), now).await.unwrap();

        let stats = repo.stats("u1").await.unwrap();
        assert_eq!(stats.solved, 1);
        assert_eq!(stats.attempted, 1);
        assert_eq!(stats.unsolved, 0);
        assert_eq!(stats.total_time, 14);

        assert_eq!(repo.stats("nobody").await.unwrap(), PerformanceStats::default());
    }

    #[tokio::test]
    async fn test_history_newest_first_and_paginated() {
        let repo = InMemoryPerformanceRepository::new();
        let start = Utc::now();
        for (i, q) in ["q1", "q2", "q3"].iter().enumerate() {
            repo.upsert("u1", &update(q, AttemptStatus::Attempted, 1), start + Duration::minutes(i as i64))
                .await
                .unwrap();
        }

        let (first, total) = repo.history("u1", Page::new(1, 2)).await.unwrap();
        assert_eq!(total, 3);
        let ids: Vec<&str> = first.iter().map(|p| p.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q3", "q2"]);

        let (second, _) = repo.history("u1", Page::new(2, 2)).await.unwrap();
        assert_eq!(second[0].question_id, "q1");
    }
}
