use serde::{Deserialize, Serialize};

use super::Difficulty;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    WeaknessImprovement,
    SkillAdvancement,
    Exploration,
    General,
}

impl RecommendationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationReason::WeaknessImprovement => "weakness_improvement",
            RecommendationReason::SkillAdvancement => "skill_advancement",
            RecommendationReason::Exploration => "exploration",
            RecommendationReason::General => "general",
        }
    }

    /// Bonus applied on top of the base recommendation score.
    pub fn score_bonus(&self) -> i32 {
        match self {
            RecommendationReason::WeaknessImprovement => 30,
            RecommendationReason::SkillAdvancement => 25,
            RecommendationReason::Exploration => 20,
            RecommendationReason::General => 10,
        }
    }

    /// Localized reason shown to the user. The targeted reasons interpolate
    /// the category label; the general one is a fixed message.
    pub fn message(&self, category: Option<&str>) -> String {
        match self {
            RecommendationReason::WeaknessImprovement => {
                format!("{}分野の強化", category_label(category))
            }
            RecommendationReason::SkillAdvancement => {
                format!("{}分野のレベルアップ", category_label(category))
            }
            RecommendationReason::Exploration => {
                format!("{}分野の新規挑戦", category_label(category))
            }
            RecommendationReason::General => "学習進捗に最適".to_string(),
        }
    }
}

/// Display label for the fixed category universe; categories outside it fall
/// back to the raw value.
pub fn category_label(category: Option<&str>) -> &str {
    match category {
        Some("conversation") => "会話",
        Some("news") => "ニュース",
        Some("story") => "物語",
        Some("academic") => "学術",
        Some(other) => other,
        None => "その他",
    }
}

/// One recommended question with the explanatory metadata the client renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub question_id: String,
    pub question_text: String,
    pub difficulty: Difficulty,
    pub category: Option<String>,
    pub play_count: u32,
    pub avg_score: f64,
    pub reason: RecommendationReason,
    pub recommendation_score: i32,
    pub recommendation_reason: String,
    pub confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_messages_interpolate_the_category_label() {
        assert_eq!(
            RecommendationReason::WeaknessImprovement.message(Some("news")),
            "ニュース分野の強化"
        );
        assert_eq!(
            RecommendationReason::SkillAdvancement.message(Some("conversation")),
            "会話分野のレベルアップ"
        );
        assert_eq!(
            RecommendationReason::Exploration.message(Some("story")),
            "物語分野の新規挑戦"
        );
        assert_eq!(
            RecommendationReason::General.message(None),
            "学習進捗に最適"
        );
    }

    #[test]
    fn unknown_categories_use_the_raw_value() {
        assert_eq!(category_label(Some("poetry")), "poetry");
    }

    #[test]
    fn reason_codes_serialize_snake_case() {
        let json = serde_json::to_string(&RecommendationReason::WeaknessImprovement).unwrap();
        assert_eq!(json, "\"weakness_improvement\"");
    }
}
