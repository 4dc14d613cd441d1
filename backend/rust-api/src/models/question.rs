use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Difficulty;

/// Catalog row for a listening question. Only public rows are ever surfaced to
/// other users; `play_count` and `avg_score` default to zero until the playback
/// stats pipeline fills them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub question_text: String,
    pub category: Option<String>,
    pub difficulty: Difficulty,
    pub is_public: bool,
    #[serde(default)]
    pub play_count: u32,
    #[serde(default)]
    pub avg_score: f64,
    pub created_at: DateTime<Utc>,
}
