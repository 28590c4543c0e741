//! Goal resolution
//!
//! Maps a stated fitness objective to daily calorie/macro targets and to a
//! fixed set of goal-specific recommendations. Both lookups are pure and
//! total: labels are matched case-insensitively against a small fixed table,
//! and anything unrecognized falls back to the defaults.

use crate::types::{GoalProfile, GoalRecommendation};

/// Default daily targets for users with no recognized fitness goal
pub const DEFAULT_GOAL_PROFILE: GoalProfile = GoalProfile {
    calories: 2000,
    protein: 150,
    carbs: 250,
    fats: 65,
};

impl Default for GoalProfile {
    fn default() -> Self {
        DEFAULT_GOAL_PROFILE
    }
}

/// Resolver from fitness-goal labels to target profiles.
pub struct GoalResolver;

impl GoalResolver {
    /// Resolve a fitness-goal label to a target profile.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Unrecognized or empty labels return [`DEFAULT_GOAL_PROFILE`].
    pub fn resolve(label: &str) -> GoalProfile {
        match label.trim().to_lowercase().as_str() {
            "weight loss" => GoalProfile {
                calories: 1500,
                protein: 120,
                ..DEFAULT_GOAL_PROFILE
            },
            "muscle gain" => GoalProfile {
                calories: 2500,
                protein: 200,
                ..DEFAULT_GOAL_PROFILE
            },
            _ => DEFAULT_GOAL_PROFILE,
        }
    }

    /// Fixed recommendations for a fitness-goal label.
    ///
    /// Same matching rules as [`GoalResolver::resolve`]; always returns at
    /// least one recommendation.
    pub fn recommendations(label: &str) -> Vec<GoalRecommendation> {
        match label.trim().to_lowercase().as_str() {
            "weight loss" => vec![
                GoalRecommendation {
                    category: "Calorie Management".to_string(),
                    advice: "Create a moderate calorie deficit of 300-500 calories per day"
                        .to_string(),
                    target: "Aim for 1200-1500 calories daily (adjust based on activity level)"
                        .to_string(),
                },
                GoalRecommendation {
                    category: "Protein".to_string(),
                    advice: "Increase protein to maintain muscle mass during weight loss"
                        .to_string(),
                    target: "Aim for 1.2-1.6g protein per kg body weight".to_string(),
                },
            ],
            "muscle gain" => vec![
                GoalRecommendation {
                    category: "Calorie Surplus".to_string(),
                    advice: "Maintain a slight calorie surplus of 200-500 calories per day"
                        .to_string(),
                    target: "Focus on nutrient-dense, high-calorie foods".to_string(),
                },
                GoalRecommendation {
                    category: "Protein".to_string(),
                    advice: "Higher protein intake supports muscle protein synthesis".to_string(),
                    target: "Aim for 1.6-2.2g protein per kg body weight".to_string(),
                },
            ],
            _ => vec![GoalRecommendation {
                category: "Balanced Nutrition".to_string(),
                advice: "Focus on a well-rounded diet with all macronutrients".to_string(),
                target: "Aim for 45-65% carbs, 20-35% fats, 10-35% protein".to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolve_is_case_insensitive() {
        let expected = GoalProfile {
            calories: 1500,
            protein: 120,
            carbs: 250,
            fats: 65,
        };
        assert_eq!(GoalResolver::resolve("Weight Loss"), expected);
        assert_eq!(GoalResolver::resolve("weight loss"), expected);
        assert_eq!(GoalResolver::resolve("  WEIGHT LOSS  "), expected);
    }

    #[test]
    fn resolve_muscle_gain_preset() {
        let profile = GoalResolver::resolve("Muscle Gain");
        assert_eq!(profile.calories, 2500);
        assert_eq!(profile.protein, 200);
        assert_eq!(profile.carbs, DEFAULT_GOAL_PROFILE.carbs);
        assert_eq!(profile.fats, DEFAULT_GOAL_PROFILE.fats);
    }

    #[test]
    fn unrecognized_labels_fall_back_to_defaults() {
        assert_eq!(GoalResolver::resolve(""), DEFAULT_GOAL_PROFILE);
        assert_eq!(GoalResolver::resolve("maintenance"), DEFAULT_GOAL_PROFILE);
        assert_eq!(GoalResolver::resolve("general health"), DEFAULT_GOAL_PROFILE);
    }

    #[test]
    fn recommendations_are_case_insensitive_and_total() {
        assert_eq!(
            GoalResolver::recommendations("MUSCLE gain"),
            GoalResolver::recommendations("muscle gain")
        );
        assert_eq!(GoalResolver::recommendations("muscle gain").len(), 2);
        assert_eq!(GoalResolver::recommendations("weight loss").len(), 2);

        let fallback = GoalResolver::recommendations("anything else");
        assert_eq!(fallback.len(), 1);
        assert_eq!(fallback[0].category, "Balanced Nutrition");
    }
}
