use axum::extract::{Path, State};
use sugarwise_core::domain::capture::entities::CapturedImage;

use crate::application::http::{
    captures::{
        handlers::capture_upload::{CaptureResponse, parse_mode},
        validators::CaptureBase64Validator,
    },
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/{mode}/base64",
    tag = "captures",
    summary = "Submit a base64 photo",
    description = "Same as the multipart upload, for clients that hold the photo as base64 or a data URI.",
    responses(
        (status = 200, body = CaptureResponse),
        (status = 400, description = "Missing or undecodable image"),
        (status = 409, description = "Another analysis is in progress"),
        (status = 502, description = "Analysis failed")
    ),
    params(
        ("mode" = String, Path, description = "single-food or meal"),
    ),
    request_body = CaptureBase64Validator
)]
pub async fn capture_base64(
    Path(mode): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CaptureBase64Validator>,
) -> Result<Response<CaptureResponse>, ApiError> {
    let mode = parse_mode(&mode)?;
    let image = CapturedImage::from_base64(&payload.image_base64)?;

    let outcome = state
        .service
        .submit_capture(mode, image)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(CaptureResponse { data: outcome }))
}
