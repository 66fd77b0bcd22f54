use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    get_ledger::{__path_get_ledger, get_ledger},
    get_meal::{__path_get_meal, get_meal},
    get_meals::{__path_get_meals, get_meals},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_ledger, get_meals, get_meal))]
pub struct LedgerApiDoc;

pub fn ledger_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/ledger", state.args.server.root_path),
            get(get_ledger),
        )
        .route(
            &format!("{}/ledger/meals", state.args.server.root_path),
            get(get_meals),
        )
        .route(
            &format!("{}/ledger/meals/{{meal_id}}", state.args.server.root_path),
            get(get_meal),
        )
}
