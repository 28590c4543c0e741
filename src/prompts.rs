//! Prompt construction for the completion service
//!
//! The nutrition-analysis prompt serializes the caller's entry snapshot and
//! states the exact JSON schema the response must follow. The completion
//! service is free to return anything; parsing and fallback live in
//! [`crate::advisor`].

use crate::types::FoodLogEntry;

/// System role text for nutrition analysis requests
pub const NUTRITIONIST_SYSTEM_PROMPT: &str = "You are a certified nutritionist and health \
     expert. Always respond with valid JSON and provide actionable advice.";

/// Build the nutrition-analysis prompt for a snapshot of food logs and the
/// user's stated goal.
pub fn analyze_nutrition_prompt(entries: &[FoodLogEntry], goal_label: &str) -> String {
    let logs_json =
        serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"Analyze the following food logs and provide personalized nutritional insights:
Food logs: {logs_json}
User goals: {goal_label}

Please provide a JSON response with:
{{
  "insights": [
    {{
      "type": "deficiency|excess|recommendation",
      "title": "Insight title",
      "message": "Detailed explanation",
      "actionableAdvice": "Specific recommendation"
    }}
  ],
  "summary": {{
    "totalCalories": 0,
    "avgProtein": 0,
    "avgCarbs": 0,
    "avgFats": 0,
    "trends": ["trend1", "trend2"]
  }}
}}"#
    )
}
