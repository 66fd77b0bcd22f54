use axum::extract::State;
use serde::{Deserialize, Serialize};
use sugarwise_core::domain::ledger::{entities::DailyStats, value_objects::Progress};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetLedgerResponse {
    pub data: DailyStats,
    pub progress: Progress,
}

#[utoipa::path(
    get,
    path = "",
    tag = "ledger",
    summary = "Get today's ledger",
    description = "Returns today's running sugar total, the limit, recorded meals and the progress toward the limit.",
    responses(
        (status = 200, body = GetLedgerResponse)
    ),
)]
pub async fn get_ledger(
    State(state): State<AppState>,
) -> Result<Response<GetLedgerResponse>, ApiError> {
    let stats = state.service.daily_stats().map_err(ApiError::from)?;
    let progress = state.service.progress().map_err(ApiError::from)?;

    Ok(Response::OK(GetLedgerResponse {
        data: stats,
        progress,
    }))
}
