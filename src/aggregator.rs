//! Nutrition aggregation
//!
//! This module computes daily summaries and 7-day sliding-window trends over
//! a snapshot of food-log entries. Both computations are pure folds: total,
//! deterministic, order-insensitive, and free of I/O or wall-clock reads.
//! The reference date/instant is always injected by the caller; "calendar
//! day" is defined by the offset the aggregator is constructed with.

use crate::types::{DailySummary, DayTotals, FoodLogEntry, WeeklyTrend};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Utc};
use std::collections::BTreeMap;

/// Length of the trend window in days
pub const TREND_WINDOW_DAYS: i64 = 7;

/// Aggregator for daily summaries and weekly trends.
#[derive(Debug, Clone, Copy)]
pub struct NutritionAggregator {
    tz: FixedOffset,
}

impl Default for NutritionAggregator {
    fn default() -> Self {
        Self::new(Utc.fix())
    }
}

impl NutritionAggregator {
    /// Create an aggregator whose calendar days follow the given offset.
    pub fn new(tz: FixedOffset) -> Self {
        Self { tz }
    }

    /// The offset that defines this aggregator's calendar day.
    pub fn tz(&self) -> FixedOffset {
        self.tz
    }

    /// Calendar date of an instant in this aggregator's zone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    /// Sum all entries whose timestamp falls on `on` (calendar-date
    /// equality, not a rolling 24h window).
    ///
    /// Zero matching entries yield an all-zero summary.
    pub fn daily_summary(&self, entries: &[FoodLogEntry], on: NaiveDate) -> DailySummary {
        let mut summary = DailySummary::default();

        for entry in entries {
            if self.local_date(entry.timestamp) != on {
                continue;
            }
            summary.total_calories = summary.total_calories.saturating_add(entry.nutrition.calories);
            summary.total_protein = summary.total_protein.saturating_add(entry.nutrition.protein);
            summary.total_carbs = summary.total_carbs.saturating_add(entry.nutrition.carbs);
            summary.total_fats = summary.total_fats.saturating_add(entry.nutrition.fats);
            summary.meal_count += 1;
        }

        summary
    }

    /// Aggregate the sliding window `[ending_at - 7 days, ending_at]` into
    /// per-day totals and per-metric averages.
    ///
    /// The lower bound is inclusive; entries after `ending_at` are not part
    /// of a trend ending at that instant. Averages are means over days that
    /// have at least one entry; an empty window yields zero averages and an
    /// empty breakdown.
    pub fn weekly_trend(&self, entries: &[FoodLogEntry], ending_at: DateTime<Utc>) -> WeeklyTrend {
        let window_start = ending_at - Duration::days(TREND_WINDOW_DAYS);

        let mut days: BTreeMap<NaiveDate, DayTotals> = BTreeMap::new();
        for entry in entries {
            if entry.timestamp < window_start || entry.timestamp > ending_at {
                continue;
            }
            let date = self.local_date(entry.timestamp);
            let totals = days.entry(date).or_insert(DayTotals {
                date,
                calories: 0,
                protein: 0,
                carbs: 0,
                fats: 0,
                meal_count: 0,
            });
            totals.calories = totals.calories.saturating_add(entry.nutrition.calories);
            totals.protein = totals.protein.saturating_add(entry.nutrition.protein);
            totals.carbs = totals.carbs.saturating_add(entry.nutrition.carbs);
            totals.fats = totals.fats.saturating_add(entry.nutrition.fats);
            totals.meal_count += 1;
        }

        if days.is_empty() {
            return WeeklyTrend::default();
        }

        let daily: Vec<DayTotals> = days.into_values().collect();
        WeeklyTrend {
            avg_calories: mean(daily.iter().map(|d| d.calories)),
            avg_protein: mean(daily.iter().map(|d| d.protein)),
            avg_carbs: mean(daily.iter().map(|d| d.carbs)),
            avg_fats: mean(daily.iter().map(|d| d.fats)),
            daily,
        }
    }
}

/// Rounded arithmetic mean of per-day totals. Empty input yields 0.
fn mean(values: impl Iterator<Item = u32>) -> u32 {
    let (sum, count) = values.fold((0u64, 0u64), |(s, c), v| (s + u64::from(v), c + 1));
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NutritionFacts;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn entry(ts: DateTime<Utc>, calories: u32, protein: u32, carbs: u32, fats: u32) -> FoodLogEntry {
        FoodLogEntry {
            id: Uuid::new_v4(),
            meal_name: "meal".to_string(),
            timestamp: ts,
            quantity: "1 serving".to_string(),
            nutrition: NutritionFacts::new(calories, protein, carbs, fats),
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    #[test]
    fn daily_summary_sums_matching_entries_only() {
        let entries = vec![
            entry(at(2024, 3, 10, 8), 320, 12, 54, 6),
            entry(at(2024, 3, 10, 13), 485, 38, 41, 18),
            entry(at(2024, 3, 10, 19), 420, 35, 30, 15),
            entry(at(2024, 3, 9, 19), 500, 20, 60, 20),
        ];

        let agg = NutritionAggregator::default();
        let summary = agg.daily_summary(&entries, date(2024, 3, 10));

        assert_eq!(summary.total_calories, 1225);
        assert_eq!(summary.total_protein, 85);
        assert_eq!(summary.total_carbs, 125);
        assert_eq!(summary.total_fats, 39);
        assert_eq!(summary.meal_count, 3);
    }

    #[test]
    fn daily_summary_of_nothing_is_all_zero() {
        let agg = NutritionAggregator::default();
        let summary = agg.daily_summary(&[], date(2024, 3, 10));
        assert_eq!(summary, DailySummary::default());
    }

    #[test]
    fn daily_summary_is_order_insensitive() {
        let mut entries = vec![
            entry(at(2024, 3, 10, 8), 320, 12, 54, 6),
            entry(at(2024, 3, 10, 13), 485, 38, 41, 18),
            entry(at(2024, 3, 10, 19), 420, 35, 30, 15),
        ];
        let agg = NutritionAggregator::default();
        let forward = agg.daily_summary(&entries, date(2024, 3, 10));
        entries.reverse();
        let backward = agg.daily_summary(&entries, date(2024, 3, 10));
        assert_eq!(forward, backward);
    }

    #[test]
    fn daily_summary_respects_offset_day_boundary() {
        // 23:30 UTC on the 9th is already the 10th at UTC+5
        let entries = vec![entry(at(2024, 3, 9, 23), 400, 10, 10, 10)];
        let plus_five = NutritionAggregator::new(FixedOffset::east_opt(5 * 3600).unwrap());

        assert_eq!(plus_five.daily_summary(&entries, date(2024, 3, 10)).meal_count, 1);
        assert_eq!(plus_five.daily_summary(&entries, date(2024, 3, 9)).meal_count, 0);
    }

    #[test]
    fn weekly_trend_groups_by_day_and_averages_present_days() {
        let now = at(2024, 3, 10, 20);
        let entries = vec![
            entry(at(2024, 3, 10, 8), 300, 20, 30, 10),
            entry(at(2024, 3, 10, 13), 500, 30, 50, 20),
            entry(at(2024, 3, 8, 12), 600, 45, 70, 25),
        ];

        let trend = NutritionAggregator::default().weekly_trend(&entries, now);

        // Two days present: (800, 600) calories -> mean 700
        assert_eq!(trend.daily.len(), 2);
        assert_eq!(trend.avg_calories, 700);
        assert_eq!(trend.avg_protein, 48); // (50 + 45) / 2 = 47.5 -> 48
        assert_eq!(trend.avg_carbs, 75);
        assert_eq!(trend.avg_fats, 28); // (30 + 25) / 2 = 27.5 -> 28

        // Breakdown is ascending by date
        assert_eq!(trend.daily[0].date, date(2024, 3, 8));
        assert_eq!(trend.daily[1].date, date(2024, 3, 10));
        assert_eq!(trend.daily[1].meal_count, 2);
    }

    #[test]
    fn weekly_trend_of_empty_window_is_defined() {
        let trend = NutritionAggregator::default().weekly_trend(&[], at(2024, 3, 10, 20));
        assert_eq!(trend, WeeklyTrend::default());
        assert_eq!(trend.avg_calories, 0);
        assert!(trend.daily.is_empty());
    }

    #[test]
    fn weekly_trend_window_bounds() {
        let now = at(2024, 3, 10, 20);
        let entries = vec![
            // Exactly 7 days old: included (inclusive lower bound)
            entry(at(2024, 3, 3, 20), 100, 1, 1, 1),
            // Just older than 7 days: excluded
            entry(at(2024, 3, 3, 19), 900, 9, 9, 9),
            // After the reference instant: excluded
            entry(at(2024, 3, 10, 21), 700, 7, 7, 7),
        ];

        let trend = NutritionAggregator::default().weekly_trend(&entries, now);
        assert_eq!(trend.daily.len(), 1);
        assert_eq!(trend.daily[0].calories, 100);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let now = at(2024, 3, 10, 20);
        let entries = vec![
            entry(at(2024, 3, 10, 8), 320, 12, 54, 6),
            entry(at(2024, 3, 7, 12), 610, 42, 55, 22),
        ];
        let agg = NutritionAggregator::default();

        assert_eq!(
            agg.daily_summary(&entries, date(2024, 3, 10)),
            agg.daily_summary(&entries, date(2024, 3, 10))
        );
        assert_eq!(agg.weekly_trend(&entries, now), agg.weekly_trend(&entries, now));
    }
}
