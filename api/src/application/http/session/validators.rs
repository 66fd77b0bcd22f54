use serde::{Deserialize, Serialize};
use sugarwise_core::domain::session::entities::ActiveView;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SwitchViewValidator {
    pub view: ActiveView,
}
