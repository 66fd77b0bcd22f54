use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::get_image::{__path_get_image, get_image};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_image))]
pub struct ImageApiDoc;

pub fn image_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/images/{{image_id}}", state.args.server.root_path),
        get(get_image),
    )
}
