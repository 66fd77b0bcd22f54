use std::fmt;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    food_analysis::entities::FoodAnalysis,
    ledger::value_objects::{DailyLimit, NewMeal},
    storage::entities::ImageReference,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MealRating {
    Excellent,
    Good,
    NeedsAttention,
}

impl MealRating {
    pub fn label(&self) -> &'static str {
        match self {
            MealRating::Excellent => "优",
            MealRating::Good => "良",
            MealRating::NeedsAttention => "需注意",
        }
    }
}

impl fmt::Display for MealRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One photographed eating event. Never changed once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub image: ImageReference,
    pub foods: Vec<FoodAnalysis>,
    /// Aggregate reported by the analysis service, not a sum over `foods`.
    pub total_sugar: f64,
    pub total_carbs: f64,
    pub rating: MealRating,
}

impl MealRecord {
    pub fn new(meal: NewMeal, rating: MealRating) -> Self {
        let NewMeal {
            stamp,
            image,
            result,
        } = meal;
        let total_sugar = result.total_sugar();
        let total_carbs = result.total_carbs();

        Self {
            id: stamp.id,
            timestamp: stamp.timestamp,
            image,
            foods: result.into_foods().into_iter().map(FoodAnalysis::from).collect(),
            total_sugar,
            total_carbs,
            rating,
        }
    }

    /// Title used in the history list.
    pub fn title(&self) -> String {
        if self.foods.is_empty() {
            "正餐记录".to_string()
        } else {
            self.foods
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// The day's ledger: running sugar total and the meals behind it, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub total_sugar: f64,
    pub limit: DailyLimit,
    pub meals: Vec<MealRecord>,
}

impl DailyStats {
    pub fn new(date: NaiveDate, limit: DailyLimit) -> Self {
        Self {
            date,
            total_sugar: 0.0,
            limit,
            meals: Vec::new(),
        }
    }

    pub fn today(limit: DailyLimit) -> Self {
        Self::new(Local::now().date_naive(), limit)
    }

    pub fn recomputed_total(&self) -> f64 {
        self.meals.iter().map(|m| m.total_sugar).sum()
    }

    /// Whether the running total still matches the meals it was built from.
    pub fn is_consistent(&self) -> bool {
        let recomputed = self.recomputed_total();
        self.total_sugar.is_finite()
            && recomputed.is_finite()
            && (self.total_sugar - recomputed).abs() <= 1e-9 * self.total_sugar.abs().max(1.0)
    }

    pub fn find_meal(&self, id: Uuid) -> Option<&MealRecord> {
        self.meals.iter().find(|m| m.id == id)
    }
}
