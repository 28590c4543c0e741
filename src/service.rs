//! Service orchestration
//!
//! Ties the injected collaborators together for the surrounding application:
//! food-log CRUD against the store, one-call nutrition overviews, and
//! remote-with-fallback analysis. The collaborators are constructed once at
//! process start and passed in; nothing here reads ambient globals, and the
//! wall clock enters only through the `now` arguments at these outermost
//! call sites.

use crate::advisor::{AnalysisOutcome, AnalysisSource, NutritionAdvisor, TextCompletion};
use crate::aggregator::NutritionAggregator;
use crate::error::NutritionError;
use crate::goals::GoalResolver;
use crate::progress::ProgressCalculator;
use crate::store::{FoodLogStore, DEFAULT_INSIGHT_LIMIT};
use crate::types::{
    DailySummary, FoodLogDraft, FoodLogEntry, GoalProfile, GoalRecommendation, Insight,
    ProgressReport, WeeklyTrend,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Everything the dashboard needs for one user, computed from a single
/// snapshot of their food logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionOverview {
    pub summary: DailySummary,
    pub trend: WeeklyTrend,
    pub goal: GoalProfile,
    pub progress: ProgressReport,
    pub recommendations: Vec<GoalRecommendation>,
}

/// Application-facing nutrition service.
pub struct NutritionService {
    store: Arc<dyn FoodLogStore>,
    advisor: NutritionAdvisor,
    aggregator: NutritionAggregator,
}

impl NutritionService {
    /// Create a service around the injected collaborators, aggregating in
    /// UTC calendar days.
    pub fn new(store: Arc<dyn FoodLogStore>, completion: Arc<dyn TextCompletion>) -> Self {
        Self::with_aggregator(store, completion, NutritionAggregator::default())
    }

    /// Create a service with a specific aggregation zone.
    pub fn with_aggregator(
        store: Arc<dyn FoodLogStore>,
        completion: Arc<dyn TextCompletion>,
        aggregator: NutritionAggregator,
    ) -> Self {
        Self {
            store,
            advisor: NutritionAdvisor::new(completion),
            aggregator,
        }
    }

    /// The aggregator this service computes with.
    pub fn aggregator(&self) -> &NutritionAggregator {
        &self.aggregator
    }

    /// Coerce a draft into an entry created at `now` and persist it.
    pub async fn add_food_log(
        &self,
        user_id: &str,
        draft: FoodLogDraft,
        now: DateTime<Utc>,
    ) -> Result<FoodLogEntry, NutritionError> {
        let entry = draft.into_entry(now);
        info!(user_id, meal = %entry.meal_name, "adding food log");
        self.store.save_food_log(user_id, entry).await
    }

    /// A user's food logs, newest first.
    pub async fn food_logs(&self, user_id: &str) -> Result<Vec<FoodLogEntry>, NutritionError> {
        self.store.food_logs(user_id).await
    }

    /// Delete a food log, if the store supports deletion.
    pub async fn delete_food_log(&self, user_id: &str, id: Uuid) -> Result<(), NutritionError> {
        self.store.delete_food_log(user_id, id).await
    }

    /// A user's most recent persisted insights.
    pub async fn saved_insights(&self, user_id: &str) -> Result<Vec<Insight>, NutritionError> {
        self.store.insights(user_id, DEFAULT_INSIGHT_LIMIT).await
    }

    /// Load the user's snapshot and compute the full overview for the day
    /// containing `now`.
    pub async fn overview(
        &self,
        user_id: &str,
        goal_label: &str,
        now: DateTime<Utc>,
    ) -> Result<NutritionOverview, NutritionError> {
        let logs = self.store.food_logs(user_id).await?;
        Ok(self.overview_from(&logs, goal_label, now))
    }

    /// Compute the full overview from an in-memory snapshot. Pure.
    pub fn overview_from(
        &self,
        entries: &[FoodLogEntry],
        goal_label: &str,
        now: DateTime<Utc>,
    ) -> NutritionOverview {
        let summary = self
            .aggregator
            .daily_summary(entries, self.aggregator.local_date(now));
        let trend = self.aggregator.weekly_trend(entries, now);
        let goal = GoalResolver::resolve(goal_label);

        NutritionOverview {
            summary,
            trend,
            goal,
            progress: ProgressCalculator::progress(&summary, &goal),
            recommendations: GoalResolver::recommendations(goal_label),
        }
    }

    /// Analyze the user's snapshot, preferring the remote completion service
    /// and falling back to the local rules.
    ///
    /// Remote-produced insights are written back to the store best-effort; a
    /// write-back failure is logged and the analysis still returned, so the
    /// only hard failure here is being unable to load the snapshot at all.
    pub async fn analyze(
        &self,
        user_id: &str,
        goal_label: &str,
        now: DateTime<Utc>,
    ) -> Result<AnalysisOutcome, NutritionError> {
        let logs = self.store.food_logs(user_id).await?;
        let summary = self
            .aggregator
            .daily_summary(&logs, self.aggregator.local_date(now));
        let trend = self.aggregator.weekly_trend(&logs, now);

        let outcome = self.advisor.analyze(&logs, goal_label, &summary, &trend).await;

        if outcome.source == AnalysisSource::Remote {
            if let Err(err) = self
                .store
                .save_insights(user_id, &outcome.analysis.insights, now)
                .await
            {
                warn!(user_id, error = %err, "failed to persist remote insights");
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::AnalysisSource;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    struct FixedCompletion(String);

    #[async_trait]
    impl TextCompletion for FixedCompletion {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, NutritionError> {
            Ok(self.0.clone())
        }
    }

    struct FailingCompletion;

    #[async_trait]
    impl TextCompletion for FailingCompletion {
        async fn complete(&self, _prompt: &str, _system: &str) -> Result<String, NutritionError> {
            Err(NutritionError::RateLimited("quota exceeded".to_string()))
        }
    }

    fn remote_response() -> String {
        r#"{
            "insights": [{
                "type": "deficiency",
                "title": "Low Fiber Intake",
                "message": "Few whole grains or vegetables logged this week.",
                "actionableAdvice": "Add a serving of vegetables to lunch and dinner."
            }],
            "summary": {"totalCalories": 1500, "avgProtein": 80, "avgCarbs": 190, "avgFats": 55}
        }"#
        .to_string()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 20, 0, 0).unwrap()
    }

    fn draft(name: &str, calories: u32, protein: u32, hours_ago: i64) -> FoodLogDraft {
        FoodLogDraft {
            meal_name: name.to_string(),
            timestamp: Some(now() - chrono::Duration::hours(hours_ago)),
            calories: Some(calories),
            protein: Some(protein),
            ..Default::default()
        }
    }

    async fn seeded_service(completion: Arc<dyn TextCompletion>) -> NutritionService {
        let service = NutritionService::new(Arc::new(MemoryStore::new()), completion);
        for d in [
            draft("breakfast", 320, 12, 12),
            draft("lunch", 485, 38, 7),
            draft("dinner", 420, 35, 1),
            draft("yesterday dinner", 500, 20, 26),
        ] {
            service.add_food_log("u1", d, now()).await.unwrap();
        }
        service
    }

    #[tokio::test]
    async fn overview_combines_summary_goal_and_progress() {
        let service = seeded_service(Arc::new(FailingCompletion)).await;
        let overview = service.overview("u1", "weight loss", now()).await.unwrap();

        assert_eq!(overview.summary.total_calories, 1225);
        assert_eq!(overview.summary.meal_count, 3);
        assert_eq!(overview.goal.calories, 1500);
        assert_eq!(overview.progress.calories.percentage, 82); // 1225/1500
        assert_eq!(overview.trend.daily.len(), 2);
        assert_eq!(overview.recommendations.len(), 2);
    }

    #[tokio::test]
    async fn analyze_persists_remote_insights() {
        let service = seeded_service(Arc::new(FixedCompletion(remote_response()))).await;
        let outcome = service.analyze("u1", "general health", now()).await.unwrap();

        assert_eq!(outcome.source, AnalysisSource::Remote);
        let saved = service.saved_insights("u1").await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "Low Fiber Intake");
    }

    #[tokio::test]
    async fn analyze_falls_back_without_persisting() {
        let service = seeded_service(Arc::new(FailingCompletion)).await;
        let outcome = service.analyze("u1", "general health", now()).await.unwrap();

        assert_eq!(outcome.source, AnalysisSource::LocalFallback);
        // 1225 kcal and 85 g protein are in range: only the balanced recommendation
        assert_eq!(outcome.analysis.insights.len(), 1);
        assert_eq!(outcome.analysis.summary.total_calories, 1225);
        assert!(service.saved_insights("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_food_log_returns_stored_entry() {
        let service = NutritionService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(FailingCompletion),
        );
        let entry = service
            .add_food_log("u1", FoodLogDraft { meal_name: "Apple".to_string(), ..Default::default() }, now())
            .await
            .unwrap();

        assert_eq!(entry.timestamp, now());
        assert_eq!(service.food_logs("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_typed_error() {
        struct DownStore;

        #[async_trait]
        impl FoodLogStore for DownStore {
            async fn food_logs(&self, _: &str) -> Result<Vec<FoodLogEntry>, NutritionError> {
                Err(NutritionError::StoreUnavailable("connection refused".to_string()))
            }
            async fn save_food_log(
                &self,
                _: &str,
                _: FoodLogEntry,
            ) -> Result<FoodLogEntry, NutritionError> {
                Err(NutritionError::StoreUnavailable("connection refused".to_string()))
            }
            async fn save_insights(
                &self,
                _: &str,
                _: &[Insight],
                _: DateTime<Utc>,
            ) -> Result<(), NutritionError> {
                Err(NutritionError::StoreUnavailable("connection refused".to_string()))
            }
            async fn insights(&self, _: &str, _: usize) -> Result<Vec<Insight>, NutritionError> {
                Err(NutritionError::StoreUnavailable("connection refused".to_string()))
            }
        }

        let service = NutritionService::new(Arc::new(DownStore), Arc::new(FailingCompletion));
        let result = service.overview("u1", "general health", now()).await;
        assert!(matches!(result, Err(NutritionError::StoreUnavailable(_))));

        // Computation on an in-memory snapshot still works while the store is down
        let overview = service.overview_from(&[], "general health", now());
        assert_eq!(overview.summary, DailySummary::default());
    }
}
