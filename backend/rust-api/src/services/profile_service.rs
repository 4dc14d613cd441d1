use std::sync::Arc;

use crate::metrics::{PROFILE_ANALYSES_TOTAL, PROFILE_ANALYSIS_FALLBACKS_TOTAL};
use crate::models::attempt::AttemptRecord;
use crate::models::profile::LearningProfile;
use crate::models::{Difficulty, SkillLevel};
use crate::store::AttemptStore;

// A category needs at least this many answers before it can count as a
// strength or weakness.
const MIN_CATEGORY_ATTEMPTS: usize = 3;
const STRENGTH_ACCURACY: f64 = 0.7;
const WEAKNESS_ACCURACY: f64 = 0.5;
// Window for the recent-accuracy difficulty rule.
const RECENT_WINDOW: usize = 10;

pub struct ProfileService {
    attempts: Arc<dyn AttemptStore>,
}

impl ProfileService {
    pub fn new(attempts: Arc<dyn AttemptStore>) -> Self {
        Self { attempts }
    }

    /// Derive the learning profile from the user's full attempt history.
    ///
    /// Never fails: when the attempt store is unreachable or the history is
    /// unreadable, the default beginner profile is substituted so the
    /// recommendation flow stays up.
    pub async fn analyze_user_profile(&self, user_id: &str) -> LearningProfile {
        let attempts = match self.attempts.fetch_attempts(user_id).await {
            Ok(attempts) => attempts,
            Err(e) => {
                tracing::warn!(
                    "Failed to load attempts for user {}, using default profile: {}",
                    user_id,
                    e
                );
                PROFILE_ANALYSIS_FALLBACKS_TOTAL.inc();
                return LearningProfile::default();
            }
        };

        let profile = analyze(&attempts);

        PROFILE_ANALYSES_TOTAL
            .with_label_values(&[profile.level.as_str()])
            .inc();
        tracing::info!(
            "Analyzed profile for user {}: level={}, strengths={}, weaknesses={}, preferred={}",
            user_id,
            profile.level.as_str(),
            profile.strengths.len(),
            profile.weaknesses.len(),
            profile.preferred_difficulty.as_str()
        );

        profile
    }
}

// Per-category tallies in first-seen order. A Vec with a linear scan keeps
// category iteration order identical to input order; the selector's pass
// order depends on it.
#[derive(Debug)]
struct CategoryStats {
    category: String,
    total: usize,
    correct: usize,
}

impl CategoryStats {
    fn accuracy(&self) -> f64 {
        self.correct as f64 / self.total as f64
    }
}

/// Analyze a full attempt history into a learning profile. Total function;
/// an empty history yields the default profile.
pub fn analyze(attempts: &[AttemptRecord]) -> LearningProfile {
    if attempts.is_empty() {
        return LearningProfile::default();
    }

    let mut stats: Vec<CategoryStats> = Vec::new();
    for attempt in attempts {
        // Uncategorized attempts still count toward the global totals below.
        let Some(category) = &attempt.category else {
            continue;
        };
        match stats.iter_mut().find(|s| s.category == *category) {
            Some(entry) => {
                entry.total += 1;
                if attempt.correct {
                    entry.correct += 1;
                }
            }
            None => stats.push(CategoryStats {
                category: category.clone(),
                total: 1,
                correct: usize::from(attempt.correct),
            }),
        }
    }

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    for entry in &stats {
        if entry.total < MIN_CATEGORY_ATTEMPTS {
            continue;
        }
        if entry.accuracy() >= STRENGTH_ACCURACY {
            strengths.push(entry.category.clone());
        } else if entry.accuracy() < WEAKNESS_ACCURACY {
            weaknesses.push(entry.category.clone());
        }
    }

    let total = attempts.len();
    LearningProfile {
        level: SkillLevel::from_attempt_count(total),
        strengths,
        weaknesses,
        preferred_categories: stats.into_iter().map(|s| s.category).collect(),
        preferred_difficulty: preferred_difficulty(attempts),
        total_attempts: total,
    }
}

fn preferred_difficulty(attempts: &[AttemptRecord]) -> Difficulty {
    let total = attempts.len();
    if total < 5 {
        return Difficulty::Easy;
    }
    if total < 15 {
        return Difficulty::Medium;
    }

    // Attempts arrive in chronological order, so the tail is the recent window.
    let recent = &attempts[total - RECENT_WINDOW..];
    let correct = recent.iter().filter(|a| a.correct).count();
    let accuracy = correct as f64 / recent.len() as f64;

    if accuracy >= 0.8 {
        Difficulty::Hard
    } else if accuracy >= 0.6 {
        Difficulty::Medium
    } else {
        Difficulty::Easy
    }
}
