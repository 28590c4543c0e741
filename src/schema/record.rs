//! nutrition.food_log.v1 record schema

use crate::error::NutritionError;
use crate::types::{FoodLogEntry, NutritionFacts, DEFAULT_QUANTITY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Current food-log schema version
pub const SCHEMA_VERSION: &str = "nutrition.food_log.v1";

fn default_schema() -> String {
    SCHEMA_VERSION.to_string()
}

/// Wire form of a food-log record.
///
/// Unknown extra keys are ignored; missing optional fields take defaults at
/// conversion time. Only the macro block is coercive — see
/// [`NutritionInfoWire`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogRecord {
    /// Schema tag; absent means current version
    #[serde(default = "default_schema")]
    pub schema: String,
    /// Row id, if the record has been persisted before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub meal_name: String,
    /// RFC 3339 timestamp; absent or unparseable falls back to the
    /// conversion-time default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default)]
    pub nutritional_info: NutritionInfoWire,
}

/// Macro block of the wire record, with lossy-but-total numeric coercion.
///
/// Each field accepts a number, a numeric string (leading integer, as the
/// original web client's `parseInt` did), null, or nothing at all; whatever
/// cannot be read as a non-negative integer becomes 0.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NutritionInfoWire {
    #[serde(default, deserialize_with = "coerce_u32")]
    pub calories: u32,
    #[serde(default, deserialize_with = "coerce_u32")]
    pub protein: u32,
    #[serde(default, deserialize_with = "coerce_u32")]
    pub carbs: u32,
    #[serde(default, deserialize_with = "coerce_u32")]
    pub fats: u32,
}

impl From<NutritionFacts> for NutritionInfoWire {
    fn from(facts: NutritionFacts) -> Self {
        Self {
            calories: facts.calories,
            protein: facts.protein,
            carbs: facts.carbs,
            fats: facts.fats,
        }
    }
}

impl FoodLogRecord {
    /// Wire form of an existing entry.
    pub fn from_entry(entry: &FoodLogEntry) -> Self {
        Self {
            schema: SCHEMA_VERSION.to_string(),
            id: Some(entry.id),
            meal_name: entry.meal_name.clone(),
            timestamp: Some(entry.timestamp.to_rfc3339()),
            quantity: Some(entry.quantity.clone()),
            nutritional_info: entry.nutrition.into(),
        }
    }

    /// Convert a wire record into an in-memory entry.
    ///
    /// Rejects records with an unrecognized schema tag or an empty meal
    /// name. A missing or unparseable timestamp falls back to
    /// `default_timestamp`; missing id gets a fresh one. Macro coercion has
    /// already happened during deserialization and cannot fail.
    pub fn into_entry(self, default_timestamp: DateTime<Utc>) -> Result<FoodLogEntry, NutritionError> {
        if self.schema != SCHEMA_VERSION {
            return Err(NutritionError::InvalidRecord(format!(
                "unsupported schema '{}', expected '{SCHEMA_VERSION}'",
                self.schema
            )));
        }
        if self.meal_name.trim().is_empty() {
            return Err(NutritionError::InvalidRecord(
                "meal_name must be non-empty".to_string(),
            ));
        }

        let timestamp = self
            .timestamp
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(default_timestamp);

        let quantity = match self.quantity {
            Some(q) if !q.trim().is_empty() => q,
            _ => DEFAULT_QUANTITY.to_string(),
        };

        Ok(FoodLogEntry {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            meal_name: self.meal_name,
            timestamp,
            quantity,
            nutrition: NutritionFacts {
                calories: self.nutritional_info.calories,
                protein: self.nutritional_info.protein,
                carbs: self.nutritional_info.carbs,
                fats: self.nutritional_info.fats,
            },
        })
    }
}

/// Deserialize any JSON value into a non-negative integer, coercing invalid
/// input to 0.
fn coerce_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_value(&value))
}

fn coerce_value(value: &serde_json::Value) -> u32 {
    match value {
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u.min(u64::from(u32::MAX)) as u32
            } else if let Some(f) = n.as_f64() {
                if f.is_finite() && f > 0.0 {
                    f.trunc().min(f64::from(u32::MAX)) as u32
                } else {
                    0
                }
            } else {
                0
            }
        }
        serde_json::Value::String(s) => leading_integer(s),
        _ => 0,
    }
}

/// Parse the leading unsigned integer of a string, `parseInt`-style.
fn leading_integer(s: &str) -> u32 {
    let trimmed = s.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
