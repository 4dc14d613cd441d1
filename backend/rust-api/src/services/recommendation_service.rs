use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::metrics::RECOMMENDATIONS_SERVED_TOTAL;
use crate::models::profile::LearningProfile;
use crate::models::question::QuestionRecord;
use crate::models::recommendation::{Recommendation, RecommendationReason};
use crate::models::Difficulty;
use crate::store::{QuestionCatalog, QuestionFilter};

/// Upper bound on the recommendation list.
const MAX_RECOMMENDATIONS: usize = 6;
// Per-pass fetch limits.
const WEAKNESS_FETCH_LIMIT: usize = 2;
const STRENGTH_FETCH_LIMIT: usize = 1;
const EXPLORATION_FETCH_LIMIT: usize = 1;
// Categories offered when the user has not explored them yet, in fixed order.
const EXPLORATION_CATEGORIES: [&str; 4] = ["conversation", "news", "story", "academic"];
const MAX_EXPLORATION_CATEGORIES: usize = 2;

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("question catalog query failed: {0}")]
    Catalog(#[from] anyhow::Error),
}

pub struct RecommendationService {
    catalog: Arc<dyn QuestionCatalog>,
}

impl RecommendationService {
    pub fn new(catalog: Arc<dyn QuestionCatalog>) -> Self {
        Self { catalog }
    }

    /// Select up to six public questions for the profile, highest-priority
    /// passes first: weakness improvement, skill advancement, exploration,
    /// then generic backfill. Any catalog failure aborts the whole call; a
    /// partially built list is never returned.
    pub async fn get_recommended_questions(
        &self,
        profile: &LearningProfile,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        let mut recommendations: Vec<Recommendation> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        // Weak categories first, at the difficulty the user is comfortable with.
        for category in &profile.weaknesses {
            let questions = self
                .catalog
                .find_questions(
                    &QuestionFilter {
                        public_only: true,
                        category: Some(category.clone()),
                        difficulty: Some(profile.preferred_difficulty),
                    },
                    WEAKNESS_FETCH_LIMIT,
                )
                .await?;
            for question in questions {
                push_unique(
                    &mut recommendations,
                    &mut seen,
                    question,
                    profile,
                    RecommendationReason::WeaknessImprovement,
                );
            }
        }

        // Strong categories get one question a step harder.
        for category in &profile.strengths {
            let questions = self
                .catalog
                .find_questions(
                    &QuestionFilter {
                        public_only: true,
                        category: Some(category.clone()),
                        difficulty: Some(profile.preferred_difficulty.next()),
                    },
                    STRENGTH_FETCH_LIMIT,
                )
                .await?;
            for question in questions {
                push_unique(
                    &mut recommendations,
                    &mut seen,
                    question,
                    profile,
                    RecommendationReason::SkillAdvancement,
                );
            }
        }

        // Up to two categories the user has never touched, starting easy.
        let unexplored = EXPLORATION_CATEGORIES
            .iter()
            .filter(|category| {
                !profile
                    .preferred_categories
                    .iter()
                    .any(|explored| explored == *category)
            })
            .take(MAX_EXPLORATION_CATEGORIES);
        for category in unexplored {
            let questions = self
                .catalog
                .find_questions(
                    &QuestionFilter {
                        public_only: true,
                        category: Some((*category).to_string()),
                        difficulty: Some(Difficulty::Easy),
                    },
                    EXPLORATION_FETCH_LIMIT,
                )
                .await?;
            for question in questions {
                push_unique(
                    &mut recommendations,
                    &mut seen,
                    question,
                    profile,
                    RecommendationReason::Exploration,
                );
            }
        }

        // Backfill with anything public at the preferred difficulty. The limit
        // covers the worst case where every accumulated entry shows up again
        // in the query result.
        if recommendations.len() < MAX_RECOMMENDATIONS {
            let limit = MAX_RECOMMENDATIONS + recommendations.len();
            let questions = self
                .catalog
                .find_questions(
                    &QuestionFilter {
                        public_only: true,
                        category: None,
                        difficulty: Some(profile.preferred_difficulty),
                    },
                    limit,
                )
                .await?;
            for question in questions {
                if recommendations.len() >= MAX_RECOMMENDATIONS {
                    break;
                }
                push_unique(
                    &mut recommendations,
                    &mut seen,
                    question,
                    profile,
                    RecommendationReason::General,
                );
            }
        }

        recommendations.truncate(MAX_RECOMMENDATIONS);

        for recommendation in &recommendations {
            RECOMMENDATIONS_SERVED_TOTAL
                .with_label_values(&[recommendation.reason.as_str()])
                .inc();
        }
        tracing::info!("Selected {} recommendations", recommendations.len());

        Ok(recommendations)
    }
}

fn push_unique(
    recommendations: &mut Vec<Recommendation>,
    seen: &mut HashSet<String>,
    question: QuestionRecord,
    profile: &LearningProfile,
    reason: RecommendationReason,
) {
    if !seen.insert(question.id.clone()) {
        return;
    }
    recommendations.push(build_recommendation(question, profile, reason));
}

fn build_recommendation(
    question: QuestionRecord,
    profile: &LearningProfile,
    reason: RecommendationReason,
) -> Recommendation {
    let score = calculate_recommendation_score(&question, profile, reason);
    let recommendation_reason = reason.message(question.category.as_deref());

    Recommendation {
        question_id: question.id,
        question_text: question.question_text,
        difficulty: question.difficulty,
        category: question.category,
        play_count: question.play_count,
        avg_score: question.avg_score,
        reason,
        recommendation_score: score,
        recommendation_reason,
        confidence: confidence_for(score),
    }
}

/// Score a candidate on the 0-100 scale: a base of 50 plus bonuses for the
/// reason, difficulty fit and category fit.
fn calculate_recommendation_score(
    question: &QuestionRecord,
    profile: &LearningProfile,
    reason: RecommendationReason,
) -> i32 {
    let mut score = 50 + reason.score_bonus();

    if question.difficulty == profile.preferred_difficulty {
        score += 15;
    } else if question.difficulty == profile.preferred_difficulty.next() {
        score += 10;
    }

    score += match question.category.as_deref() {
        Some(category) if profile.weaknesses.iter().any(|c| c == category) => 20,
        Some(category) if profile.strengths.iter().any(|c| c == category) => 15,
        Some(category)
            if !profile
                .preferred_categories
                .iter()
                .any(|c| c == category) =>
        {
            10
        }
        Some(_) => 0,
        // Questions without a category count as unexplored.
        None => 10,
    };

    score.clamp(0, 100)
}

// Monotonic in the score, bounded to [0.5, 0.9].
fn confidence_for(score: i32) -> f64 {
    (0.5 + f64::from(score) / 100.0 * 0.4).min(0.9)
}
