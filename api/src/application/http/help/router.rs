use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::get_help::{__path_get_help, get_help};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_help))]
pub struct HelpApiDoc;

pub fn help_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/help", state.args.server.root_path),
        get(get_help),
    )
}
