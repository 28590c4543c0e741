//! Error types for NutriGenius Core

use thiserror::Error;

/// Errors that can occur at the collaborator boundaries.
///
/// Aggregation, goal resolution, progress, and local insight generation are
/// total functions and never produce these; only store- and completion-facing
/// calls do.
#[derive(Debug, Error)]
pub enum NutritionError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("Completion request failed: {0}")]
    CompletionFailed(String),

    #[error("Completion request timed out: {0}")]
    Timeout(String),

    #[error("Completion rate limited: {0}")]
    RateLimited(String),

    #[error("Malformed analysis response: {0}")]
    MalformedAnalysis(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid food log record: {0}")]
    InvalidRecord(String),
}
