//! Stored form of nutrition insights

use crate::types::{Insight, InsightKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire/storage form of an insight, as rows in the insights table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredInsight {
    pub insight_type: InsightKind,
    pub title: String,
    pub message: String,
    pub actionable_advice: String,
    /// Calendar date the insight refers to (YYYY-MM-DD)
    pub date: String,
    pub created_at: DateTime<Utc>,
}

impl StoredInsight {
    /// Storage form of an insight recorded at `recorded_at`.
    pub fn from_insight(insight: &Insight, recorded_at: DateTime<Utc>) -> Self {
        Self {
            insight_type: insight.kind,
            title: insight.title.clone(),
            message: insight.message.clone(),
            actionable_advice: insight.actionable_advice.clone(),
            date: recorded_at.date_naive().to_string(),
            created_at: recorded_at,
        }
    }

    /// In-memory insight form, dropping the storage metadata.
    pub fn into_insight(self) -> Insight {
        Insight {
            kind: self.insight_type,
            title: self.title,
            message: self.message,
            actionable_advice: self.actionable_advice,
        }
    }
}
