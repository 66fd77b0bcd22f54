use std::future::Future;

use crate::domain::{
    capture::entities::CapturedImage,
    common::entities::app_errors::CoreError,
    food_analysis::entities::FoodAnalysis,
    ledger::value_objects::MealResult,
    speech::entities::GeneratedAudio,
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Ask the vision model about an image and get its JSON answer as text
    fn generate_with_image(
        &self,
        prompt: String,
        image: CapturedImage,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Read a text aloud with the speech model
    fn generate_speech(
        &self,
        prompt: String,
    ) -> impl Future<Output = Result<GeneratedAudio, CoreError>> + Send;
}

/// Remote food recognition, one call per capture
#[cfg_attr(test, mockall::automock)]
pub trait AnalysisClient: Send + Sync {
    fn analyze_single_food(
        &self,
        image: CapturedImage,
    ) -> impl Future<Output = Result<FoodAnalysis, CoreError>> + Send;

    fn analyze_meal(
        &self,
        image: CapturedImage,
    ) -> impl Future<Output = Result<MealResult, CoreError>> + Send;
}
