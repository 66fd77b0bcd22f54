use axum::extract::State;
use serde::{Deserialize, Serialize};
use sugarwise_core::domain::session::entities::SessionState;
use utoipa::ToSchema;

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    session::validators::SwitchViewValidator,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SwitchViewResponse {
    pub data: SessionState,
}

#[utoipa::path(
    put,
    path = "/view",
    tag = "session",
    summary = "Switch view",
    description = "Switches between the home screen and the meal history.",
    responses(
        (status = 200, body = SwitchViewResponse)
    ),
    request_body = SwitchViewValidator
)]
pub async fn switch_view(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<SwitchViewValidator>,
) -> Result<Response<SwitchViewResponse>, ApiError> {
    let session = state.service.switch_view(payload.view)?;

    Ok(Response::OK(SwitchViewResponse { data: session }))
}
