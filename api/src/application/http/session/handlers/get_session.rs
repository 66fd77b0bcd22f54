use axum::extract::State;
use serde::{Deserialize, Serialize};
use sugarwise_core::domain::{
    ledger::value_objects::Progress,
    session::entities::{HEALTH_TIP, SessionState},
};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetSessionResponse {
    pub data: SessionState,
    pub progress: Progress,
    pub tip: String,
}

#[utoipa::path(
    get,
    path = "",
    tag = "session",
    summary = "Get session",
    description = "Returns the session phase, active view, last single-food result and today's ledger with its progress.",
    responses(
        (status = 200, body = GetSessionResponse)
    ),
)]
pub async fn get_session(
    State(state): State<AppState>,
) -> Result<Response<GetSessionResponse>, ApiError> {
    let session = state.service.session_state()?;
    let progress = state.service.progress()?;

    Ok(Response::OK(GetSessionResponse {
        data: session,
        progress,
        tip: HEALTH_TIP.to_string(),
    }))
}
