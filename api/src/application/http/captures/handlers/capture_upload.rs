use axum::extract::{Multipart, Path, State};
use serde::{Deserialize, Serialize};
use sugarwise_core::domain::{
    capture::entities::{CaptureMode, CapturedImage},
    session::entities::CaptureOutcome,
};
use utoipa::ToSchema;

use crate::application::http::{
    captures::validators::CaptureUploadForm,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CaptureResponse {
    pub data: CaptureOutcome,
}

pub fn parse_mode(mode: &str) -> Result<CaptureMode, ApiError> {
    mode.parse::<CaptureMode>()
        .map_err(|_| ApiError::BadRequest(format!("Unknown capture mode: {mode}")))
}

#[utoipa::path(
    post,
    path = "/{mode}",
    tag = "captures",
    summary = "Submit a photo",
    description = "Analyzes an uploaded photo. `single-food` returns GI advice; `meal` also records the meal in today's ledger.",
    responses(
        (status = 200, body = CaptureResponse),
        (status = 400, description = "Missing or unreadable image"),
        (status = 409, description = "Another analysis is in progress"),
        (status = 502, description = "Analysis failed")
    ),
    params(
        ("mode" = String, Path, description = "single-food or meal"),
    ),
    request_body(content = CaptureUploadForm, content_type = "multipart/form-data")
)]
pub async fn capture_upload(
    Path(mode): Path<String>,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<CaptureResponse>, ApiError> {
    let mode = parse_mode(&mode)?;
    let mut image: Option<CapturedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        image = Some(CapturedImage::from_bytes(data, content_type.as_deref())?);
    }

    let image = image.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let outcome = state
        .service
        .submit_capture(mode, image)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(CaptureResponse { data: outcome }))
}
