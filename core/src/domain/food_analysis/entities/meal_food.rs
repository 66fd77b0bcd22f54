use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::food_analysis::entities::{FoodAnalysis, GiRating};

/// Portion label used for foods recognised on a whole plate.
pub const MEAL_PORTION_LABEL: &str = "一顿";

/// A food recognised in meal mode. The meal response only carries these three fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MealFood {
    pub name: String,
    pub sugar_per_100g: f64,
    pub gi_rating: GiRating,
}

impl From<MealFood> for FoodAnalysis {
    fn from(food: MealFood) -> Self {
        Self {
            name: food.name,
            gi_value: 0.0,
            gi_rating: food.gi_rating,
            sugar_per_100g: food.sugar_per_100g,
            carbs_per_100g: 0.0,
            advice: String::new(),
            portion_size: MEAL_PORTION_LABEL.to_string(),
        }
    }
}
