use axum::{
    Router,
    routing::{delete, get, put},
};
use utoipa::OpenApi;

use super::handlers::{
    dismiss_result::{__path_dismiss_result, dismiss_result},
    get_session::{__path_get_session, get_session},
    switch_view::{__path_switch_view, switch_view},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_session, switch_view, dismiss_result))]
pub struct SessionApiDoc;

pub fn session_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/session", state.args.server.root_path),
            get(get_session),
        )
        .route(
            &format!("{}/session/view", state.args.server.root_path),
            put(switch_view),
        )
        .route(
            &format!("{}/session/result", state.args.server.root_path),
            delete(dismiss_result),
        )
}
