use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_timestamp},
    food_analysis::entities::MealFood,
    ledger::entities::MealRating,
    storage::entities::ImageReference,
};

pub const NEAR_LIMIT_MESSAGE: &str = "⚠️ 今日用糖已接近上限，建议接下来的饮食要清淡。";

/// Positive daily sugar limit in grams.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "f64", into = "f64")]
pub struct DailyLimit(f64);

impl DailyLimit {
    pub const DEFAULT_GRAMS: f64 = 50.0;

    pub fn new(grams: f64) -> Result<Self, CoreError> {
        if !grams.is_finite() || grams <= 0.0 {
            return Err(CoreError::InvalidLimit(format!(
                "daily limit must be a positive number of grams, got {grams}"
            )));
        }
        Ok(Self(grams))
    }

    pub fn grams(&self) -> f64 {
        self.0
    }
}

impl Default for DailyLimit {
    fn default() -> Self {
        Self(Self::DEFAULT_GRAMS)
    }
}

impl TryFrom<f64> for DailyLimit {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DailyLimit> for f64 {
    fn from(limit: DailyLimit) -> Self {
        limit.0
    }
}

/// A meal-mode analysis that passed validation. Totals are finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct MealResult {
    foods: Vec<MealFood>,
    total_sugar: f64,
    total_carbs: f64,
}

impl MealResult {
    /// An empty `foods` list is a valid meal.
    pub fn new(foods: Vec<MealFood>, total_sugar: f64, total_carbs: f64) -> Result<Self, CoreError> {
        for (field, value) in [("totalSugar", total_sugar), ("totalCarbs", total_carbs)] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidMealResult(format!(
                    "{field} must be a finite non-negative number, got {value}"
                )));
            }
        }

        Ok(Self {
            foods,
            total_sugar,
            total_carbs,
        })
    }

    pub fn foods(&self) -> &[MealFood] {
        &self.foods
    }

    pub fn total_sugar(&self) -> f64 {
        self.total_sugar
    }

    pub fn total_carbs(&self) -> f64 {
        self.total_carbs
    }

    pub fn into_foods(self) -> Vec<MealFood> {
        self.foods
    }
}

/// Identity and capture instant of a meal, generated before the ledger update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealStamp {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
}

impl MealStamp {
    pub fn now() -> Self {
        let (now, timestamp) = generate_timestamp();
        Self {
            id: Uuid::new_v7(timestamp),
            timestamp: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub stamp: MealStamp,
    pub image: ImageReference,
    pub result: MealResult,
}

/// Meal rating bands. A total equal to a threshold falls in the lower band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingThresholds {
    pub good_above: f64,
    pub attention_above: f64,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            good_above: 10.0,
            attention_above: 20.0,
        }
    }
}

impl RatingThresholds {
    pub fn rate(&self, total_sugar: f64) -> MealRating {
        if total_sugar > self.attention_above {
            MealRating::NeedsAttention
        } else if total_sugar > self.good_above {
            MealRating::Good
        } else {
            MealRating::Excellent
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningLevel {
    None,
    High,
    Critical,
}

/// Warning bands over the progress percentage. Equal values fall in the lower band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarningThresholds {
    pub high_above: f64,
    pub critical_above: f64,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            high_above: 80.0,
            critical_above: 90.0,
        }
    }
}

impl WarningThresholds {
    pub fn level(&self, percentage: f64) -> WarningLevel {
        if percentage > self.critical_above {
            WarningLevel::Critical
        } else if percentage > self.high_above {
            WarningLevel::High
        } else {
            WarningLevel::None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Progress {
    /// Share of the daily limit consumed, clamped to `[0, 100]`.
    pub percentage: f64,
    pub warning_level: WarningLevel,
    pub remaining: f64,
    pub warning_message: Option<String>,
}
