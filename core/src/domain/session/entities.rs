use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    capture::entities::CaptureMode,
    food_analysis::entities::{FoodAnalysis, GiCheck},
    ledger::{entities::DailyStats, entities::MealRecord, value_objects::Progress},
};

pub const HELP_TEXT: &str = "我是您的控糖管家。您可以点击主页的蓝色按钮识别单种食物，或者点击绿色按钮拍摄整顿饭来统计全天的糖分。如果您看不清字，可以点击读给我听。";
pub const HEALTH_TIP: &str = "先吃菜，再吃肉，最后吃主食，这样可以有效减缓血糖上升速度哦！";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    AwaitingAnalysis {
        mode: CaptureMode,
        started_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Home,
    History,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionState {
    pub stats: DailyStats,
    pub phase: SessionPhase,
    pub active_view: ActiveView,
    /// Last single-food analysis, shown until dismissed.
    pub current_result: Option<FoodAnalysis>,
}

impl SessionState {
    pub fn new(stats: DailyStats) -> Self {
        Self {
            stats,
            phase: SessionPhase::Idle,
            active_view: ActiveView::Home,
            current_result: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SessionPhase::AwaitingAnalysis { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CaptureOutcome {
    MealRecorded {
        meal: MealRecord,
        stats: DailyStats,
        progress: Progress,
        message: String,
    },
    FoodAnalyzed {
        food: FoodAnalysis,
        gi_check: GiCheck,
    },
}

pub fn meal_recorded_message(total_sugar: f64) -> String {
    format!("这餐饭共含有糖分约 {total_sugar}g，已加入今日统计。")
}
