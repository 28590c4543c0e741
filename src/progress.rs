//! Goal progress
//!
//! Combines a daily summary with a goal profile into percentage-of-goal
//! progress per metric. Pure and total; a zero-valued goal yields a
//! percentage of 0 by policy rather than a division error.

use crate::types::{DailySummary, GoalProfile, MetricProgress, ProgressReport};

/// Calculator for percentage-of-goal progress.
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// Progress toward each goal metric for the given summary.
    pub fn progress(summary: &DailySummary, goal: &GoalProfile) -> ProgressReport {
        ProgressReport {
            calories: metric_progress(summary.total_calories, goal.calories),
            protein: metric_progress(summary.total_protein, goal.protein),
            carbs: metric_progress(summary.total_carbs, goal.carbs),
            fats: metric_progress(summary.total_fats, goal.fats),
        }
    }
}

/// Percentage of goal achieved, rounded to the nearest integer.
///
/// "Percent of zero" is undefined, so a zero goal is reported as 0%
/// regardless of the current value.
fn metric_progress(current: u32, goal: u32) -> MetricProgress {
    let percentage = if goal == 0 {
        0
    } else {
        (f64::from(current) / f64::from(goal) * 100.0).round() as u32
    };
    MetricProgress {
        current,
        goal,
        percentage,
    }
}
