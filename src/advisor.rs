//! Remote nutrition analysis with local fallback
//!
//! The advisor delegates analysis to an external text-completion service and
//! treats every remote failure (transport error, timeout, rate limit,
//! malformed or empty output) as ordinary: it is caught and answered with
//! the deterministic local rule engine. The fallback is an explicit branch
//! carried in the outcome, not incidental exception handling, so callers and
//! tests can observe which path produced the analysis.

use crate::error::NutritionError;
use crate::insights::LocalInsightEngine;
use crate::prompts::{analyze_nutrition_prompt, NUTRITIONIST_SYSTEM_PROMPT};
use crate::types::{DailySummary, FoodLogEntry, NutritionAnalysis, WeeklyTrend};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// External text-generation collaborator.
///
/// Implementations may time out, be rate limited, or return text that does
/// not parse as the documented schema; all of these are expected failure
/// modes surfaced as [`NutritionError`].
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Request a completion for `prompt` under the given system role text.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, NutritionError>;
}

/// Which path produced an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// The completion service returned a well-formed analysis
    Remote,
    /// The remote call failed and the local rule engine answered
    LocalFallback,
}

/// An analysis together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub analysis: NutritionAnalysis,
    pub source: AnalysisSource,
}

/// Nutrition advisor: remote analysis with deterministic local fallback.
pub struct NutritionAdvisor {
    completion: Arc<dyn TextCompletion>,
    engine: LocalInsightEngine,
}

impl NutritionAdvisor {
    /// Create an advisor around a completion collaborator, using the default
    /// local rule engine as fallback.
    pub fn new(completion: Arc<dyn TextCompletion>) -> Self {
        Self {
            completion,
            engine: LocalInsightEngine::new(),
        }
    }

    /// Create an advisor with a custom local engine.
    pub fn with_engine(completion: Arc<dyn TextCompletion>, engine: LocalInsightEngine) -> Self {
        Self { completion, engine }
    }

    /// The local engine used on the fallback path.
    pub fn engine(&self) -> &LocalInsightEngine {
        &self.engine
    }

    /// Analyze a snapshot of food logs.
    ///
    /// Never fails: a remote failure of any kind falls back to the local
    /// rule engine, computed from the summary and trend the caller already
    /// derived from the same snapshot.
    pub async fn analyze(
        &self,
        entries: &[FoodLogEntry],
        goal_label: &str,
        summary: &DailySummary,
        trend: &WeeklyTrend,
    ) -> AnalysisOutcome {
        match self.analyze_remote(entries, goal_label).await {
            Ok(analysis) => {
                debug!(insights = analysis.insights.len(), "remote nutrition analysis succeeded");
                AnalysisOutcome {
                    analysis,
                    source: AnalysisSource::Remote,
                }
            }
            Err(err) => {
                warn!(error = %err, "remote nutrition analysis failed, using local rules");
                AnalysisOutcome {
                    analysis: self.engine.fallback_analysis(summary, trend),
                    source: AnalysisSource::LocalFallback,
                }
            }
        }
    }

    async fn analyze_remote(
        &self,
        entries: &[FoodLogEntry],
        goal_label: &str,
    ) -> Result<NutritionAnalysis, NutritionError> {
        let prompt = analyze_nutrition_prompt(entries, goal_label);
        let text = self
            .completion
            .complete(&prompt, NUTRITIONIST_SYSTEM_PROMPT)
            .await?;
        parse_analysis(&text)
    }
}

/// Parse completion output as a [`NutritionAnalysis`].
///
/// Parseable JSON with no insights, or with insights carrying empty text
/// fields, counts as malformed: the contract requires at least one complete
/// insight.
pub fn parse_analysis(text: &str) -> Result<NutritionAnalysis, NutritionError> {
    let analysis: NutritionAnalysis = serde_json::from_str(text.trim())
        .map_err(|e| NutritionError::MalformedAnalysis(e.to_string()))?;

    if analysis.insights.is_empty() {
        return Err(NutritionError::MalformedAnalysis(
            "analysis contains no insights".to_string(),
        ));
    }
    for insight in &analysis.insights {
        if insight.title.trim().is_empty()
            || insight.message.trim().is_empty()
            || insight.actionable_advice.trim().is_empty()
        {
            return Err(NutritionError::MalformedAnalysis(
                "insight has empty text fields".to_string(),
            ));
        }
    }

    Ok(analysis)
}
