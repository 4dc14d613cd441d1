use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::attempt::AttemptRecord;
use crate::models::question::QuestionRecord;

use super::{AttemptStore, QuestionCatalog, QuestionFilter};

/// Fixture-backed attempt store for tests and local development without a
/// MongoDB instance. Histories keep the order they were seeded in, which
/// stands in for chronological order.
#[derive(Debug, Default)]
pub struct InMemoryAttemptStore {
    attempts: HashMap<String, Vec<AttemptRecord>>,
}

impl InMemoryAttemptStore {
    pub fn new(attempts: Vec<AttemptRecord>) -> Self {
        let mut by_user: HashMap<String, Vec<AttemptRecord>> = HashMap::new();
        for attempt in attempts {
            by_user
                .entry(attempt.user_id.clone())
                .or_default()
                .push(attempt);
        }
        Self { attempts: by_user }
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn fetch_attempts(&self, user_id: &str) -> Result<Vec<AttemptRecord>> {
        Ok(self.attempts.get(user_id).cloned().unwrap_or_default())
    }
}

/// Fixture-backed question catalog. Matches come back in seed order, which
/// satisfies the deterministic-order contract.
#[derive(Debug, Default)]
pub struct InMemoryQuestionCatalog {
    questions: Vec<QuestionRecord>,
}

impl InMemoryQuestionCatalog {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }
}

#[async_trait]
impl QuestionCatalog for InMemoryQuestionCatalog {
    async fn find_questions(
        &self,
        filter: &QuestionFilter,
        limit: usize,
    ) -> Result<Vec<QuestionRecord>> {
        let matches = self
            .questions
            .iter()
            .filter(|q| !filter.public_only || q.is_public)
            .filter(|q| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |category| q.category.as_deref() == Some(category))
            })
            .filter(|q| {
                filter
                    .difficulty
                    .map_or(true, |difficulty| q.difficulty == difficulty)
            })
            .take(limit)
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
