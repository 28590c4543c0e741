//! NutriGenius Core - deterministic nutrition engine for food-log data
//!
//! The engine turns a snapshot of timestamped food-log entries into daily
//! summaries, 7-day trends, goal progress, and qualitative insights:
//! entries → aggregation → {daily summary, weekly trend} → progress
//! (against a resolved goal profile) and → insights (remote completion
//! service with a deterministic local fallback).
//!
//! ## Modules
//!
//! - **aggregator**: pure daily/weekly aggregation with injected reference time
//! - **goals** / **progress**: goal profiles and percentage-of-goal reports
//! - **insights** / **advisor** / **prompts**: local rule engine and the
//!   remote-with-fallback analysis path
//! - **schema** / **store**: versioned wire records and the async store boundary
//! - **service**: application-facing orchestration over the injected collaborators

pub mod advisor;
pub mod aggregator;
pub mod error;
pub mod goals;
pub mod insights;
pub mod progress;
pub mod prompts;
pub mod schema;
pub mod service;
pub mod store;
pub mod types;

pub use advisor::{AnalysisOutcome, AnalysisSource, NutritionAdvisor, TextCompletion};
pub use aggregator::NutritionAggregator;
pub use error::NutritionError;
pub use goals::{GoalResolver, DEFAULT_GOAL_PROFILE};
pub use insights::{InsightThresholds, LocalInsightEngine};
pub use progress::ProgressCalculator;
pub use service::{NutritionOverview, NutritionService};
pub use store::{FoodLogStore, MemoryStore};

// Schema exports
pub use schema::{FoodLogRecord, StoredInsight, SCHEMA_VERSION};

pub use types::{
    AnalysisSummary, DailySummary, DayTotals, FoodLogDraft, FoodLogEntry, GoalProfile,
    GoalRecommendation, Insight, InsightKind, MetricProgress, NutritionAnalysis, NutritionFacts,
    ProgressReport, WeeklyTrend,
};

/// Library version string
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name reported by tooling
pub const ENGINE_NAME: &str = "nutrigenius-core";
