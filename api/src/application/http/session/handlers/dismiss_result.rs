use axum::extract::State;
use serde::{Deserialize, Serialize};
use sugarwise_core::domain::session::entities::SessionState;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DismissResultResponse {
    pub data: SessionState,
}

#[utoipa::path(
    delete,
    path = "/result",
    tag = "session",
    summary = "Dismiss result",
    description = "Closes the single-food result and returns to the previous screen.",
    responses(
        (status = 200, body = DismissResultResponse)
    ),
)]
pub async fn dismiss_result(
    State(state): State<AppState>,
) -> Result<Response<DismissResultResponse>, ApiError> {
    let session = state.service.dismiss_result()?;

    Ok(Response::OK(DismissResultResponse { data: session }))
}
