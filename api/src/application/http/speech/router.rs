use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::speak::{__path_speak, speak};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(speak))]
pub struct SpeechApiDoc;

pub fn speech_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/speech", state.args.server.root_path),
        post(speak),
    )
}
