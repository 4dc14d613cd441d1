use anyhow::Result;
use async_trait::async_trait;

use crate::models::attempt::AttemptRecord;
use crate::models::question::QuestionRecord;
use crate::models::Difficulty;

pub mod memory;
pub mod mongo;

/// Catalog query filter. The recommendation flow always sets `public_only`;
/// category and difficulty narrow the search when present.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub public_only: bool,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// Read access to a user's answer history.
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Full history for the user in chronological (ascending) order. The
    /// recent-accuracy window in profile analysis depends on that order.
    async fn fetch_attempts(&self, user_id: &str) -> Result<Vec<AttemptRecord>>;
}

/// Read access to the question catalog.
///
/// Implementations must return rows in a deterministic order for identical
/// filters, otherwise backfill selection is not reproducible.
#[async_trait]
pub trait QuestionCatalog: Send + Sync {
    async fn find_questions(
        &self,
        filter: &QuestionFilter,
        limit: usize,
    ) -> Result<Vec<QuestionRecord>>;

    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> Result<()>;
}
