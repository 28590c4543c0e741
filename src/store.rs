//! Food-log store boundary
//!
//! The store is an external collaborator reached through a narrow async
//! interface. A failure here is recoverable: callers surface it as a typed
//! error and keep operating on whatever snapshot is already in memory.
//! [`MemoryStore`] is the in-process implementation used by tests and by
//! sessions that have no backend.

use crate::error::NutritionError;
use crate::schema::StoredInsight;
use crate::types::{FoodLogEntry, Insight};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::debug;
use uuid::Uuid;

/// Default maximum number of food logs returned per retrieval
pub const DEFAULT_LOG_LIMIT: usize = 100;

/// Default maximum number of insights returned per retrieval
pub const DEFAULT_INSIGHT_LIMIT: usize = 20;

/// Persistent store for food logs and insights, keyed per user.
#[async_trait]
pub trait FoodLogStore: Send + Sync {
    /// Retrieve a user's food logs, newest first.
    async fn food_logs(&self, user_id: &str) -> Result<Vec<FoodLogEntry>, NutritionError>;

    /// Persist a food log and return the stored entry (the store may assign
    /// its own id).
    async fn save_food_log(
        &self,
        user_id: &str,
        entry: FoodLogEntry,
    ) -> Result<FoodLogEntry, NutritionError>;

    /// Persist a batch of insights recorded at the given instant.
    async fn save_insights(
        &self,
        user_id: &str,
        insights: &[Insight],
        recorded_at: DateTime<Utc>,
    ) -> Result<(), NutritionError>;

    /// Retrieve a user's most recent insights, newest first.
    async fn insights(&self, user_id: &str, limit: usize) -> Result<Vec<Insight>, NutritionError>;

    /// Delete a food log. Optional: the default implementation reports the
    /// operation as unsupported, matching backends that never exposed it.
    async fn delete_food_log(&self, user_id: &str, id: Uuid) -> Result<(), NutritionError> {
        let _ = (user_id, id);
        Err(NutritionError::Unsupported(
            "delete_food_log".to_string(),
        ))
    }
}

#[derive(Default)]
struct MemoryInner {
    logs: HashMap<String, Vec<FoodLogEntry>>,
    insights: HashMap<String, Vec<StoredInsight>>,
}

/// In-process store backed by a mutex-guarded map.
///
/// The lock is never held across an await point.
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
    log_limit: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store with the default retrieval limit.
    pub fn new() -> Self {
        Self::with_log_limit(DEFAULT_LOG_LIMIT)
    }

    /// Create an empty store returning at most `log_limit` logs per read.
    pub fn with_log_limit(log_limit: usize) -> Self {
        Self {
            inner: Mutex::new(MemoryInner::default()),
            log_limit,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl FoodLogStore for MemoryStore {
    async fn food_logs(&self, user_id: &str) -> Result<Vec<FoodLogEntry>, NutritionError> {
        let inner = self.lock();
        let mut logs = inner.logs.get(user_id).cloned().unwrap_or_default();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        logs.truncate(self.log_limit);
        Ok(logs)
    }

    async fn save_food_log(
        &self,
        user_id: &str,
        entry: FoodLogEntry,
    ) -> Result<FoodLogEntry, NutritionError> {
        debug!(user_id, meal = %entry.meal_name, "storing food log");
        let mut inner = self.lock();
        inner
            .logs
            .entry(user_id.to_string())
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }

    async fn save_insights(
        &self,
        user_id: &str,
        insights: &[Insight],
        recorded_at: DateTime<Utc>,
    ) -> Result<(), NutritionError> {
        debug!(user_id, count = insights.len(), "storing insights");
        let mut inner = self.lock();
        let rows = inner.insights.entry(user_id.to_string()).or_default();
        for insight in insights {
            rows.push(StoredInsight::from_insight(insight, recorded_at));
        }
        Ok(())
    }

    async fn insights(&self, user_id: &str, limit: usize) -> Result<Vec<Insight>, NutritionError> {
        let inner = self.lock();
        let mut rows = inner.insights.get(user_id).cloned().unwrap_or_default();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit);
        Ok(rows.into_iter().map(StoredInsight::into_insight).collect())
    }

    async fn delete_food_log(&self, user_id: &str, id: Uuid) -> Result<(), NutritionError> {
        let mut inner = self.lock();
        let logs = inner
            .logs
            .get_mut(user_id)
            .ok_or_else(|| NutritionError::NotFound(format!("no logs for user {user_id}")))?;
        let before = logs.len();
        logs.retain(|log| log.id != id);
        if logs.len() == before {
            return Err(NutritionError::NotFound(format!("food log {id}")));
        }
        Ok(())
    }
}
