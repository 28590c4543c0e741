//! Core types for the NutriGenius nutrition engine
//!
//! This module defines the data that flows through the aggregation pipeline:
//! food-log entries, derived daily/weekly aggregates, goal profiles, progress
//! reports, and insights.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Calorie and macronutrient content of a single logged meal.
///
/// All fields are non-negative integers; calories in kcal, macros in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: u32,
    /// Protein (g)
    pub protein: u32,
    /// Carbohydrates (g)
    pub carbs: u32,
    /// Fats (g)
    pub fats: u32,
}

impl NutritionFacts {
    pub fn new(calories: u32, protein: u32, carbs: u32, fats: u32) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fats,
        }
    }
}

/// One recorded meal or snack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    /// Unique identifier, assigned at creation (locally or by the store)
    pub id: Uuid,
    /// Meal label as entered by the user
    pub meal_name: String,
    /// When the meal was consumed (UTC)
    pub timestamp: DateTime<Utc>,
    /// Free-text serving description
    pub quantity: String,
    /// Calorie and macro content
    pub nutrition: NutritionFacts,
}

/// Serving description used when the input leaves it blank
pub const DEFAULT_QUANTITY: &str = "1 serving";

/// Input shape for a not-yet-created food log.
///
/// Every field except `meal_name` is optional; conversion to a
/// [`FoodLogEntry`] is total and fills in defaults (missing macros become 0,
/// missing timestamp becomes the supplied creation time, blank quantity
/// becomes [`DEFAULT_QUANTITY`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodLogDraft {
    pub meal_name: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub protein: Option<u32>,
    #[serde(default)]
    pub carbs: Option<u32>,
    #[serde(default)]
    pub fats: Option<u32>,
}

impl FoodLogDraft {
    /// Convert the draft into a full entry, assigning a fresh id.
    ///
    /// `now` is the creation time injected by the caller; it is used only
    /// when the draft carries no timestamp of its own.
    pub fn into_entry(self, now: DateTime<Utc>) -> FoodLogEntry {
        let quantity = match self.quantity {
            Some(q) if !q.trim().is_empty() => q,
            _ => DEFAULT_QUANTITY.to_string(),
        };

        FoodLogEntry {
            id: Uuid::new_v4(),
            meal_name: self.meal_name,
            timestamp: self.timestamp.unwrap_or(now),
            quantity,
            nutrition: NutritionFacts {
                calories: self.calories.unwrap_or(0),
                protein: self.protein.unwrap_or(0),
                carbs: self.carbs.unwrap_or(0),
                fats: self.fats.unwrap_or(0),
            },
        }
    }
}

/// Same-day aggregate of a user's food-log entries.
///
/// Derived, never stored. Summing zero entries yields all-zero fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub total_calories: u32,
    pub total_protein: u32,
    pub total_carbs: u32,
    pub total_fats: u32,
    /// Number of entries contributing to the totals
    pub meal_count: u32,
}

/// Per-day totals inside a weekly trend window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotals {
    /// Calendar date (in the aggregator's zone)
    pub date: NaiveDate,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
    pub meal_count: u32,
}

/// 7-day sliding-window aggregate, grouped by calendar day.
///
/// Averages are arithmetic means of per-day totals across days that have at
/// least one entry, rounded to the nearest integer. An empty window yields
/// all-zero averages and an empty breakdown, never a division error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyTrend {
    pub avg_calories: u32,
    pub avg_protein: u32,
    pub avg_carbs: u32,
    pub avg_fats: u32,
    /// Per-day breakdown, ascending by date
    pub daily: Vec<DayTotals>,
}

/// Target daily calorie/macro values derived from a stated fitness objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalProfile {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

/// Progress toward one goal metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricProgress {
    pub current: u32,
    pub goal: u32,
    /// `round(current / goal * 100)`; defined as 0 when `goal` is 0
    pub percentage: u32,
}

/// Percentage-of-goal achieved per metric for a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub calories: MetricProgress,
    pub protein: MetricProgress,
    pub carbs: MetricProgress,
    pub fats: MetricProgress,
}

/// Category of a nutrition insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Deficiency,
    Excess,
    Recommendation,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Deficiency => "deficiency",
            InsightKind::Excess => "excess",
            InsightKind::Recommendation => "recommendation",
        }
    }
}

/// A short qualitative observation or recommendation about nutrition
/// patterns, either AI-generated or locally rule-derived.
///
/// Serializes in the camelCase wire form documented for the completion
/// service (`type`, `title`, `message`, `actionableAdvice`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
    pub actionable_advice: String,
}

/// Summary block attached to a nutrition analysis.
///
/// Mixes today's calorie total with the weekly macro averages, matching the
/// schema the completion service is asked to produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_calories: u32,
    pub avg_protein: u32,
    pub avg_carbs: u32,
    pub avg_fats: u32,
    #[serde(default)]
    pub trends: Vec<String>,
}

/// A complete nutrition analysis: insights plus a summary block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionAnalysis {
    pub insights: Vec<Insight>,
    #[serde(default)]
    pub summary: AnalysisSummary,
}

/// A goal-specific recommendation with a concrete target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecommendation {
    pub category: String,
    pub advice: String,
    pub target: String,
}
