use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Upstream content carries a 1-5 difficulty level; the API speaks
    /// easy/medium/hard.
    pub fn from_level(level: i32) -> Self {
        if level <= 2 {
            Difficulty::Easy
        } else if level <= 3 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }

    /// Next step on the easy -> medium -> hard ladder; hard stays hard.
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }

    pub fn from_attempt_count(total: usize) -> Self {
        if total < 10 {
            SkillLevel::Beginner
        } else if total < 30 {
            SkillLevel::Intermediate
        } else {
            SkillLevel::Advanced
        }
    }
}

pub mod attempt;
pub mod profile;
pub mod question;
pub mod recommendation;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_from_level_maps_the_five_level_scale() {
        assert_eq!(Difficulty::from_level(1), Difficulty::Easy);
        assert_eq!(Difficulty::from_level(2), Difficulty::Easy);
        assert_eq!(Difficulty::from_level(3), Difficulty::Medium);
        assert_eq!(Difficulty::from_level(4), Difficulty::Hard);
        assert_eq!(Difficulty::from_level(5), Difficulty::Hard);
    }

    #[test]
    fn difficulty_next_saturates_at_hard() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Medium.next(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Hard);
    }

    #[test]
    fn skill_level_thresholds() {
        assert_eq!(SkillLevel::from_attempt_count(0), SkillLevel::Beginner);
        assert_eq!(SkillLevel::from_attempt_count(9), SkillLevel::Beginner);
        assert_eq!(SkillLevel::from_attempt_count(10), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::from_attempt_count(29), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::from_attempt_count(30), SkillLevel::Advanced);
    }
}
