//! Local insight generation
//!
//! Deterministic threshold rules that produce qualitative insights from a
//! daily summary, used directly and as the fallback when the remote
//! completion service fails. Rules fire in a fixed order, each appending at
//! most one insight; a balanced-nutrition recommendation is always appended
//! last.

use crate::types::{AnalysisSummary, DailySummary, Insight, InsightKind, NutritionAnalysis, WeeklyTrend};

/// Thresholds driving the local rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightThresholds {
    /// Daily calories below this trigger a deficiency insight
    pub low_calories: u32,
    /// Daily calories above this trigger an excess insight
    pub high_calories: u32,
    /// Daily protein (g) below this triggers a deficiency insight
    pub low_protein: u32,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            low_calories: 1200,
            high_calories: 2500,
            low_protein: 50,
        }
    }
}

/// Rule-based insight engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalInsightEngine {
    thresholds: InsightThresholds,
}

impl LocalInsightEngine {
    /// Create an engine with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom thresholds.
    pub fn with_thresholds(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    /// Generate insights for a daily summary.
    ///
    /// Rule order is fixed: calorie deficiency, else calorie excess (the two
    /// ranges cannot both hold, the else-if mirrors the original behavior),
    /// then protein deficiency, then the unconditional balanced-nutrition
    /// recommendation. Deterministic single pass.
    pub fn generate(&self, summary: &DailySummary) -> Vec<Insight> {
        let mut insights = Vec::new();

        if summary.total_calories < self.thresholds.low_calories {
            insights.push(Insight {
                kind: InsightKind::Deficiency,
                title: "Low Calorie Intake".to_string(),
                message: "Your daily calorie intake appears to be below recommended levels."
                    .to_string(),
                actionable_advice: "Consider adding healthy, calorie-dense foods like nuts, \
                                    avocados, or whole grains to your meals."
                    .to_string(),
            });
        } else if summary.total_calories > self.thresholds.high_calories {
            insights.push(Insight {
                kind: InsightKind::Excess,
                title: "High Calorie Intake".to_string(),
                message: "Your daily calorie intake is higher than typical recommendations."
                    .to_string(),
                actionable_advice:
                    "Focus on portion control and choose nutrient-dense, lower-calorie foods."
                        .to_string(),
            });
        }

        if summary.total_protein < self.thresholds.low_protein {
            insights.push(Insight {
                kind: InsightKind::Deficiency,
                title: "Low Protein Intake".to_string(),
                message: "Your protein intake could be increased for better muscle maintenance \
                          and satiety."
                    .to_string(),
                actionable_advice: "Include lean proteins like chicken, fish, beans, or Greek \
                                    yogurt in each meal."
                    .to_string(),
            });
        }

        insights.push(Insight {
            kind: InsightKind::Recommendation,
            title: "Balanced Nutrition".to_string(),
            message: "Maintaining a balanced diet with variety is key to optimal health."
                .to_string(),
            actionable_advice: "Try to include a variety of colorful fruits and vegetables, \
                                whole grains, and lean proteins in your daily meals."
                .to_string(),
        });

        insights
    }

    /// Full fallback analysis: rule-derived insights plus a summary block
    /// mixing today's calorie total with the weekly macro averages.
    pub fn fallback_analysis(
        &self,
        summary: &DailySummary,
        trend: &WeeklyTrend,
    ) -> NutritionAnalysis {
        NutritionAnalysis {
            insights: self.generate(summary),
            summary: AnalysisSummary {
                total_calories: summary.total_calories,
                avg_protein: trend.avg_protein,
                avg_carbs: trend.avg_carbs,
                avg_fats: trend.avg_fats,
                trends: vec![
                    "Consistent meal logging".to_string(),
                    "Room for more variety".to_string(),
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(calories: u32, protein: u32) -> DailySummary {
        DailySummary {
            total_calories: calories,
            total_protein: protein,
            total_carbs: 100,
            total_fats: 40,
            meal_count: 3,
        }
    }

    #[test]
    fn low_calories_and_low_protein_fire_together() {
        let insights = LocalInsightEngine::new().generate(&summary(1000, 30));

        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0].kind, InsightKind::Deficiency);
        assert_eq!(insights[0].title, "Low Calorie Intake");
        assert_eq!(insights[1].kind, InsightKind::Deficiency);
        assert_eq!(insights[1].title, "Low Protein Intake");
        assert_eq!(insights[2].kind, InsightKind::Recommendation);
        assert_eq!(insights[2].title, "Balanced Nutrition");
    }

    #[test]
    fn in_range_summary_yields_only_the_recommendation() {
        let insights = LocalInsightEngine::new().generate(&summary(2200, 80));

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Recommendation);
        assert_eq!(insights[0].title, "Balanced Nutrition");
    }

    #[test]
    fn high_calories_yield_excess() {
        let insights = LocalInsightEngine::new().generate(&summary(2800, 120));

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].kind, InsightKind::Excess);
        assert_eq!(insights[0].title, "High Calorie Intake");
    }

    #[test]
    fn thresholds_are_exclusive_bounds() {
        let engine = LocalInsightEngine::new();
        // Exactly at a threshold fires nothing
        assert_eq!(engine.generate(&summary(1200, 50)).len(), 1);
        assert_eq!(engine.generate(&summary(2500, 50)).len(), 1);
        // One past the threshold fires
        assert_eq!(engine.generate(&summary(1199, 50)).len(), 2);
        assert_eq!(engine.generate(&summary(2501, 50)).len(), 2);
        assert_eq!(engine.generate(&summary(1500, 49)).len(), 2);
    }

    #[test]
    fn generated_insights_have_no_empty_fields() {
        for insight in LocalInsightEngine::new().generate(&summary(1000, 30)) {
            assert!(!insight.title.is_empty());
            assert!(!insight.message.is_empty());
            assert!(!insight.actionable_advice.is_empty());
        }
    }

    #[test]
    fn fallback_analysis_mixes_daily_total_with_weekly_averages() {
        let trend = WeeklyTrend {
            avg_calories: 1900,
            avg_protein: 95,
            avg_carbs: 210,
            avg_fats: 58,
            daily: Vec::new(),
        };
        let analysis = LocalInsightEngine::new().fallback_analysis(&summary(2200, 80), &trend);

        assert_eq!(analysis.summary.total_calories, 2200);
        assert_eq!(analysis.summary.avg_protein, 95);
        assert_eq!(analysis.summary.avg_carbs, 210);
        assert_eq!(analysis.summary.avg_fats, 58);
        assert_eq!(analysis.summary.trends.len(), 2);
        assert_eq!(analysis.insights.len(), 1);
    }

    #[test]
    fn custom_thresholds_are_honored() {
        let engine = LocalInsightEngine::with_thresholds(InsightThresholds {
            low_calories: 1800,
            high_calories: 3200,
            low_protein: 100,
        });
        let insights = engine.generate(&summary(1700, 90));
        assert_eq!(insights.len(), 3);
    }
}
