use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sugarwise_core::domain::{
    ledger::entities::{MealRating, MealRecord},
    storage::entities::ImageReference,
};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

/// One row of the history list.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MealListItem {
    pub id: Uuid,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    pub image: ImageReference,
    pub total_sugar: f64,
    pub rating: MealRating,
    pub rating_label: String,
}

impl From<&MealRecord> for MealListItem {
    fn from(meal: &MealRecord) -> Self {
        Self {
            id: meal.id,
            title: meal.title(),
            timestamp: meal.timestamp,
            image: meal.image.clone(),
            total_sugar: meal.total_sugar,
            rating: meal.rating,
            rating_label: meal.rating.label().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetMealsResponse {
    pub data: Vec<MealListItem>,
}

#[utoipa::path(
    get,
    path = "/meals",
    tag = "ledger",
    summary = "List today's meals",
    description = "Lists the meals recorded today, newest first.",
    responses(
        (status = 200, body = GetMealsResponse)
    ),
)]
pub async fn get_meals(
    State(state): State<AppState>,
) -> Result<Response<GetMealsResponse>, ApiError> {
    let stats = state.service.daily_stats().map_err(ApiError::from)?;

    Ok(Response::OK(GetMealsResponse {
        data: stats.meals.iter().map(MealListItem::from).collect(),
    }))
}
