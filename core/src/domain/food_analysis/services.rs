use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::domain::{
    capture::entities::CapturedImage,
    common::entities::app_errors::CoreError,
    food_analysis::{
        entities::{
            FoodAnalysis, GiCheck, GiRating, MealFood, food_analysis::ensure_non_negative,
        },
        ports::{AnalysisClient, LLMClient},
        prompts::{MEAL_PROMPT, SINGLE_FOOD_PROMPT},
        schema::{get_meal_schema, get_single_food_schema},
        value_objects::{MealFoodPayload, MealPayload, SingleFoodPayload},
    },
    ledger::value_objects::MealResult,
};

/// Analysis client that asks a multimodal LLM and validates what comes back.
#[derive(Debug, Clone)]
pub struct LlmFoodAnalyzer<L> {
    llm_client: L,
}

impl<L> LlmFoodAnalyzer<L>
where
    L: LLMClient,
{
    pub fn new(llm_client: L) -> Self {
        Self { llm_client }
    }

    async fn ask<T: DeserializeOwned>(
        &self,
        prompt: &str,
        image: CapturedImage,
        response_schema: serde_json::Value,
    ) -> Result<T, CoreError> {
        let raw_response = self
            .llm_client
            .generate_with_image(prompt.to_string(), image, response_schema)
            .await
            .map_err(into_analysis_error)?;

        parse_model_json(&raw_response)
    }
}

impl<L> AnalysisClient for LlmFoodAnalyzer<L>
where
    L: LLMClient,
{
    #[instrument(skip(self, image), fields(mime_type = %image.mime_type, bytes = image.payload.len()))]
    async fn analyze_single_food(&self, image: CapturedImage) -> Result<FoodAnalysis, CoreError> {
        let payload: SingleFoodPayload = self
            .ask(SINGLE_FOOD_PROMPT, image, get_single_food_schema())
            .await?;

        let food = FoodAnalysis {
            gi_rating: payload.gi_rating.parse::<GiRating>()?,
            name: payload.name.trim().to_string(),
            gi_value: payload.gi_value,
            sugar_per_100g: payload.sugar_per_100g,
            carbs_per_100g: payload.carbs_per_100g,
            advice: payload.advice,
            portion_size: payload.portion_size,
        };
        food.validate()?;

        if let GiCheck::Mismatch { reported, expected } = food.gi_check() {
            tracing::warn!(
                food = %food.name,
                gi_value = food.gi_value,
                reported = %reported,
                expected = %expected,
                "GI rating disagrees with GI value"
            );
        }

        tracing::info!(food = %food.name, gi_rating = %food.gi_rating, "Single food analyzed");

        Ok(food)
    }

    #[instrument(skip(self, image), fields(mime_type = %image.mime_type, bytes = image.payload.len()))]
    async fn analyze_meal(&self, image: CapturedImage) -> Result<MealResult, CoreError> {
        let payload: MealPayload = self.ask(MEAL_PROMPT, image, get_meal_schema()).await?;

        let foods = payload
            .foods
            .into_iter()
            .map(meal_food_from_payload)
            .collect::<Result<Vec<_>, _>>()?;

        let result = MealResult::new(foods, payload.total_sugar, payload.total_carbs)
            .map_err(into_analysis_error)?;

        tracing::info!(
            foods = result.foods().len(),
            total_sugar = result.total_sugar(),
            total_carbs = result.total_carbs(),
            "Meal analyzed"
        );

        Ok(result)
    }
}

fn meal_food_from_payload(payload: MealFoodPayload) -> Result<MealFood, CoreError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(CoreError::AnalysisFailed(
            "meal food name is empty".to_string(),
        ));
    }
    ensure_non_negative("sugarPer100g", payload.sugar_per_100g)?;

    Ok(MealFood {
        name,
        sugar_per_100g: payload.sugar_per_100g,
        gi_rating: payload.gi_rating.parse()?,
    })
}

fn into_analysis_error(error: CoreError) -> CoreError {
    match error {
        CoreError::AnalysisFailed(message) => CoreError::AnalysisFailed(message),
        other => CoreError::AnalysisFailed(other.to_string()),
    }
}

/// Parses the model's JSON answer, tolerating a surrounding markdown code fence.
pub fn parse_model_json<T: DeserializeOwned>(raw_response: &str) -> Result<T, CoreError> {
    let trimmed = raw_response.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).map_err(|e| {
        tracing::error!("Failed to parse LLM response: {}", e);
        CoreError::AnalysisFailed(format!("Failed to parse LLM response: {}", e))
    })
}
