use serde::Deserialize;

/// Single food answer as the model writes it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleFoodPayload {
    pub name: String,
    pub gi_value: f64,
    pub gi_rating: String,
    pub sugar_per_100g: f64,
    pub carbs_per_100g: f64,
    pub advice: String,
    pub portion_size: String,
}

/// Whole meal answer as the model writes it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPayload {
    pub foods: Vec<MealFoodPayload>,
    pub total_sugar: f64,
    pub total_carbs: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealFoodPayload {
    pub name: String,
    pub sugar_per_100g: f64,
    pub gi_rating: String,
}
