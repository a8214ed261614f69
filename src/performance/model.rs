use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::questions::QuestionSummary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Solved,
    Attempted,
    #[default]
    Unsolved,
}

/// One user's progress on one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub id: String,
    pub user_id: String,
    pub question_id: String,
    pub status: AttemptStatus,
    /// Minutes, accumulated over attempts
    pub time_spent: u64,
    pub attempts: u32,
    pub last_attempted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of `POST /api/performance/update`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceUpdate {
    pub question_id: Option<String>,
    pub status: Option<AttemptStatus>,
    pub time_spent: Option<u64>,
    pub code: Option<String>,
    pub notes: Option<String>,
}

impl Performance {
    pub fn first_attempt(
        user_id: &str,
        question_id: &str,
        update: &PerformanceUpdate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            user_id: user_id.to_string(),
            question_id: question_id.to_string(),
            status: update.status.unwrap_or_default(),
            time_spent: update.time_spent.unwrap_or(0),
            attempts: 1,
            last_attempted_at: now,
            code: non_empty(&update.code),
            notes: non_empty(&update.notes),
        }
    }

    pub fn record_attempt(&mut self, update: &PerformanceUpdate, now: DateTime<Utc>) {
        if let Some(status) = update.status {
            self.status = status;
        }
        self.time_spent = self.time_spent.saturating_add(update.time_spent.unwrap_or(0));
        self.attempts = self.attempts.saturating_add(1);
        self.last_attempted_at = now;
        if let Some(code) = non_empty(&update.code) {
            self.code = Some(code);
        }
        if let Some(notes) = non_empty(&update.notes) {
            self.notes = Some(notes);
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub solved: usize,
    pub attempted: usize,
    pub unsolved: usize,
    pub total_time: u64,
}

impl PerformanceStats {
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a Performance>) -> Self {
        records.into_iter().fold(Self::default(), |mut stats, p| {
            match p.status {
                AttemptStatus::Solved => stats.solved += 1,
                AttemptStatus::Attempted => stats.attempted += 1,
                AttemptStatus::Unsolved => stats.unsolved += 1,
            }
            stats.total_time = stats.total_time.saturating_add(p.time_spent);
            stats
        })
    }
}

/// History row with the question reference expanded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub user_id: String,
    pub question_id: Option<QuestionSummary>,
    pub status: AttemptStatus,
    pub time_spent: u64,
    pub attempts: u32,
    pub last_attempted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HistoryEntry {
    pub fn new(performance: Performance, question: Option<QuestionSummary>) -> Self {
        Self {
            id: performance.id,
            user_id: performance.user_id,
            question_id: question,
            status: performance.status,
            time_spent: performance.time_spent,
            attempts: performance.attempts,
            last_attempted_at: performance.last_attempted_at,
            code: performance.code,
            notes: performance.notes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub history: Vec<HistoryEntry>,
    pub total: usize,
    pub page: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn update(status: Option<AttemptStatus>, minutes: Option<u64>) -> PerformanceUpdate {
        PerformanceUpdate {
            question_id: Some("q1".to_string()),
            status,
            time_spent: minutes,
            code: None,
            notes: None,
        }
    }

    #[test]
    fn test_first_attempt_defaults() {
        let p = Performance::first_attempt("u1", "q1", &update(None, None), Utc::now());
        assert_eq!(p.status, AttemptStatus::Unsolved);
        assert_eq!(p.attempts, 1);
        assert_eq!(p.time_spent, 0);
    }

    #[test]
    fn test_record_attempt_accumulates() {
        let start = Utc::now();
        let mut p = Performance::first_attempt("u1", "q1", &update(Some(AttemptStatus::Attempted), Some(10)), start);

        let mut second = update(Some(AttemptStatus::Solved), Some(5));
        second.code = Some("print(42)".to_string());
        second.notes = Some(String::new());
        p.record_attempt(&second, start + Duration::minutes(30));

        assert_eq!(p.status, AttemptStatus::Solved);
        assert_eq!(p.time_spent, 15);
        assert_eq!(p.attempts, 2);
        assert_eq!(p.code.as_deref(), Some("print(42)"));
        assert!(p.notes.is_none());
        assert_eq!(p.last_attempted_at, start + Duration::minutes(30));
    }

    #[test]
    fn test_record_attempt_keeps_status_when_absent() {
        let mut p = Performance::first_attempt("u1", "q1", &update(Some(AttemptStatus::Solved), None), Utc::now());
        p.record_attempt(&update(None, None), Utc::now());
        assert_eq!(p.status, AttemptStatus::Solved);
    }

    #[test]
    fn test_time_spent_saturates() {
        let now = Utc::now();
        let mut p = Performance::first_attempt("u1", "q1", &update(None, Some(u64::MAX - 1)), now);
        p.record_attempt(&update(None, Some(10)), now);
        assert_eq!(p.time_spent, u64::MAX);

        let other = Performance::first_attempt("u1", "q2", &update(None, Some(5)), now);
        assert_eq!(PerformanceStats::tally([&p, &other]).total_time, u64::MAX);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&AttemptStatus::Solved).unwrap(), "\"solved\"");
        let parsed: AttemptStatus = serde_json::from_str("\"attempted\"").unwrap();
        assert_eq!(parsed, AttemptStatus::Attempted);
        assert!(serde_json::from_str::<AttemptStatus>("\"done\"").is_err());
    }

    #[test]
    fn test_tally() {
        let now = Utc::now();
        let records = vec![
            Performance::first_attempt("u", "a", &update(Some(AttemptStatus::Solved), Some(10)), now),
            Performance::first_attempt("u", "b", &update(Some(AttemptStatus::Solved), Some(5)), now),
            Performance::first_attempt("u", "c", &update(Some(AttemptStatus::Attempted), Some(7)), now),
        ];
        let stats = PerformanceStats::tally(&records);
        assert_eq!(
            stats,
            PerformanceStats {
                solved: 2,
                attempted: 1,
                unsolved: 0,
                total_time: 22,
            }
        );
    }
}
