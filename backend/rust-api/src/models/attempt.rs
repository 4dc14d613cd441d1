use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Difficulty;

/// One historical answer, as supplied by the attempt store in chronological
/// (ascending) order. Read-only for the recommendation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub user_id: String,
    pub question_id: String,
    pub category: Option<String>,
    pub difficulty: Difficulty,
    pub correct: bool,
    pub answered_at: DateTime<Utc>,
}

/// Learning logs are written with a 0-100 score; the review flow counts
/// anything below 100 as wrong. Profile analysis only consumes the normalized
/// correctness flag, so the conversion happens once, at the store boundary.
pub fn correctness_from_score(score: i64) -> bool {
    score >= 100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_full_scores_count_as_correct() {
        assert!(correctness_from_score(100));
        assert!(correctness_from_score(120));
        assert!(!correctness_from_score(99));
        assert!(!correctness_from_score(0));
        assert!(!correctness_from_score(-1));
    }
}
