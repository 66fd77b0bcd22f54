use axum::{Router, extract::DefaultBodyLimit, routing::post};
use sugarwise_core::domain::capture::entities::MAX_IMAGE_SIZE;
use utoipa::OpenApi;

use super::handlers::{
    capture_base64::{__path_capture_base64, capture_base64},
    capture_upload::{__path_capture_upload, capture_upload},
};
use crate::application::http::server::app_state::AppState;

/// Room for a full-size image once base64 or multipart framing is added.
const MAX_CAPTURE_BODY: usize = MAX_IMAGE_SIZE / 3 * 4 + 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(capture_upload, capture_base64))]
pub struct CaptureApiDoc;

pub fn capture_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/captures/{{mode}}", state.args.server.root_path),
            post(capture_upload),
        )
        .route(
            &format!("{}/captures/{{mode}}/base64", state.args.server.root_path),
            post(capture_base64),
        )
        .layer(DefaultBodyLimit::max(MAX_CAPTURE_BODY))
}
