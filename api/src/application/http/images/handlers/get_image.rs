use axum::{
    extract::{Path, State},
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

#[utoipa::path(
    get,
    path = "/{image_id}",
    tag = "images",
    summary = "Get captured image",
    description = "Returns the photo stored for a recorded meal.",
    responses(
        (status = 200, description = "Image bytes", content_type = "image/*"),
        (status = 404, description = "Image not found")
    ),
    params(
        ("image_id" = Uuid, Path, description = "Image ID"),
    ),
)]
pub async fn get_image(
    Path(image_id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let image = state
        .service
        .get_image(image_id)
        .await
        .map_err(ApiError::from)?;

    Ok((
        [
            (CONTENT_TYPE, image.mime_type),
            (CACHE_CONTROL, "private, max-age=86400, immutable".to_string()),
        ],
        image.payload,
    ))
}
