use serde::{Deserialize, Serialize};
use sugarwise_core::domain::session::entities::{HEALTH_TIP, HELP_TEXT};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::response::Response;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetHelpResponse {
    pub help_text: String,
    pub health_tip: String,
}

#[utoipa::path(
    get,
    path = "",
    tag = "help",
    summary = "Usage help",
    description = "Returns the usage help text and the home-screen health tip.",
    responses(
        (status = 200, body = GetHelpResponse)
    ),
)]
pub async fn get_help() -> Response<GetHelpResponse> {
    Response::OK(GetHelpResponse {
        help_text: HELP_TEXT.to_string(),
        health_tip: HEALTH_TIP.to_string(),
    })
}
