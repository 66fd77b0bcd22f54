use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use sugarwise_core::domain::ledger::entities::MealRecord;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetMealResponse {
    pub data: MealRecord,
}

#[utoipa::path(
    get,
    path = "/meals/{meal_id}",
    tag = "ledger",
    summary = "Get meal",
    description = "Returns one recorded meal with its foods.",
    responses(
        (status = 200, body = GetMealResponse),
        (status = 404, description = "Meal not found")
    ),
    params(
        ("meal_id" = Uuid, Path, description = "Meal ID"),
    ),
)]
pub async fn get_meal(
    Path(meal_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Response<GetMealResponse>, ApiError> {
    let meal = state.service.get_meal(meal_id).map_err(ApiError::from)?;

    Ok(Response::OK(GetMealResponse { data: meal }))
}
