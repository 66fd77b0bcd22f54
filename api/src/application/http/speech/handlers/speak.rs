use axum::extract::State;
use serde::{Deserialize, Serialize};
use sugarwise_core::domain::speech::entities::SpeechOutput;
use utoipa::ToSchema;

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    speech::validators::SpeakValidator,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SpeakResponse {
    pub data: SpeechOutput,
}

#[utoipa::path(
    post,
    path = "",
    tag = "speech",
    summary = "Read text aloud",
    description = "Synthesizes the text as WAV audio. When synthesis is unavailable the text is returned for the device's own speech engine.",
    responses(
        (status = 200, body = SpeakResponse)
    ),
    request_body = SpeakValidator
)]
pub async fn speak(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<SpeakValidator>,
) -> Result<Response<SpeakResponse>, ApiError> {
    let output = state
        .service
        .speak(payload.text)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SpeakResponse { data: output }))
}
