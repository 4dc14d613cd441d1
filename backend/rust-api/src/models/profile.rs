use serde::{Deserialize, Serialize};

use super::{Difficulty, SkillLevel};

/// Derived learning profile, recomputed on every request and never persisted.
///
/// The strength, weakness and category vectors keep first-encountered-in-input
/// order: the selector walks them in that order and the six-item cap makes the
/// order observable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningProfile {
    pub level: SkillLevel,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub preferred_categories: Vec<String>,
    pub preferred_difficulty: Difficulty,
    pub total_attempts: usize,
}

impl Default for LearningProfile {
    /// Profile used for new users and whenever analysis has to bail out.
    fn default() -> Self {
        Self {
            level: SkillLevel::Beginner,
            strengths: Vec::new(),
            weaknesses: Vec::new(),
            preferred_categories: Vec::new(),
            preferred_difficulty: Difficulty::Easy,
            total_attempts: 0,
        }
    }
}
