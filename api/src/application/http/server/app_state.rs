use std::sync::Arc;

use sugarwise_core::application::SugarwiseService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: SugarwiseService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: SugarwiseService) -> Self {
        Self { args, service }
    }
}
