use std::sync::Arc;

use uuid::Uuid;

use crate::{
    domain::{
        capture::entities::{CaptureMode, CapturedImage},
        common::{SugarwiseConfig, entities::app_errors::CoreError},
        food_analysis::services::LlmFoodAnalyzer,
        ledger::{
            entities::{DailyStats, MealRecord},
            services::LedgerPolicy,
            value_objects::Progress,
        },
        session::{
            entities::{ActiveView, CaptureOutcome, SessionState},
            services::SessionService,
        },
        speech::{
            entities::SpeechOutput,
            ports::SpeechSynthesizer,
            services::{FallbackSpeech, LlmSpeechSynthesizer},
        },
        storage::entities::StoredImage,
    },
    infrastructure::{
        llm::gemini_client::GeminiLLMClient, object_storage::in_memory::InMemoryImageStore,
        speech::client_side::ClientSideSpeech,
    },
};

pub type DefaultAnalysisClient = LlmFoodAnalyzer<GeminiLLMClient>;
pub type DefaultSessionService = SessionService<DefaultAnalysisClient, InMemoryImageStore>;
pub type DefaultSpeechSynthesizer =
    FallbackSpeech<LlmSpeechSynthesizer<GeminiLLMClient>, ClientSideSpeech>;

/// Everything the presentation layer talks to, wired with the production adapters.
#[derive(Clone)]
pub struct SugarwiseService {
    session: Arc<DefaultSessionService>,
    speech: Arc<DefaultSpeechSynthesizer>,
}

pub fn create_service(config: SugarwiseConfig) -> Result<SugarwiseService, CoreError> {
    let policy = LedgerPolicy::try_from(&config.ledger)?;
    let llm_client = GeminiLLMClient::new(&config.llm)?;

    tracing::info!(
        model = %config.llm.gemini_model,
        tts_model = %config.llm.gemini_tts_model,
        daily_limit = policy.daily_limit.grams(),
        "Sugarwise service initialised"
    );

    Ok(SugarwiseService {
        session: Arc::new(
            SessionService::new(
                LlmFoodAnalyzer::new(llm_client.clone()),
                InMemoryImageStore::new(),
                policy,
            )
            .with_images_path(config.images_path),
        ),
        speech: Arc::new(FallbackSpeech::new(
            LlmSpeechSynthesizer::new(llm_client),
            ClientSideSpeech,
        )),
    })
}

impl SugarwiseService {
    pub async fn submit_capture(
        &self,
        mode: CaptureMode,
        image: CapturedImage,
    ) -> Result<CaptureOutcome, CoreError> {
        self.session.submit_capture(mode, image).await
    }

    pub fn session_state(&self) -> Result<SessionState, CoreError> {
        self.session.snapshot()
    }

    pub fn switch_view(&self, view: ActiveView) -> Result<SessionState, CoreError> {
        self.session.switch_view(view)
    }

    pub fn dismiss_result(&self) -> Result<SessionState, CoreError> {
        self.session.dismiss_result()
    }

    pub fn daily_stats(&self) -> Result<DailyStats, CoreError> {
        self.session.stats()
    }

    pub fn progress(&self) -> Result<Progress, CoreError> {
        self.session.progress()
    }

    pub fn get_meal(&self, meal_id: Uuid) -> Result<MealRecord, CoreError> {
        self.session
            .stats()?
            .find_meal(meal_id)
            .cloned()
            .ok_or(CoreError::NotFound)
    }

    pub async fn get_image(&self, image_id: Uuid) -> Result<StoredImage, CoreError> {
        self.session.get_image(image_id).await
    }

    pub async fn speak(&self, text: String) -> Result<SpeechOutput, CoreError> {
        self.speech.synthesize(text).await
    }
}
