use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    capture::entities::{CaptureMode, CapturedImage},
    common::entities::app_errors::CoreError,
    food_analysis::ports::AnalysisClient,
    ledger::{
        entities::DailyStats,
        services::LedgerPolicy,
        value_objects::{MealStamp, NewMeal, Progress},
    },
    session::entities::{
        ActiveView, CaptureOutcome, SessionPhase, SessionState, meal_recorded_message,
    },
    storage::{
        entities::{DEFAULT_IMAGES_PATH, StoredImage},
        ports::ImageStore,
    },
};

/// Owns the session state and runs one capture-and-analyze flow at a time.
pub struct SessionService<A, S> {
    analysis_client: A,
    image_store: S,
    policy: LedgerPolicy,
    images_path: String,
    state: Mutex<SessionState>,
}

/// Puts the session back to `Idle` when the analysis ends, whatever the outcome.
struct AnalysisGuard<'a> {
    state: &'a Mutex<SessionState>,
}

impl Drop for AnalysisGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.phase = SessionPhase::Idle;
    }
}

impl<A, S> SessionService<A, S>
where
    A: AnalysisClient,
    S: ImageStore,
{
    pub fn new(analysis_client: A, image_store: S, policy: LedgerPolicy) -> Self {
        Self {
            analysis_client,
            image_store,
            policy,
            images_path: DEFAULT_IMAGES_PATH.to_string(),
            state: Mutex::new(SessionState::new(DailyStats::today(policy.daily_limit))),
        }
    }

    /// Starts from an existing ledger instead of an empty day.
    pub fn with_stats(
        analysis_client: A,
        image_store: S,
        policy: LedgerPolicy,
        stats: DailyStats,
    ) -> Self {
        Self {
            analysis_client,
            image_store,
            policy,
            images_path: DEFAULT_IMAGES_PATH.to_string(),
            state: Mutex::new(SessionState::new(stats)),
        }
    }

    /// Serves meal images under `images_path` instead of `/images`.
    pub fn with_images_path(mut self, images_path: impl Into<String>) -> Self {
        self.images_path = images_path.into();
        self
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, SessionState>, CoreError> {
        self.state.lock().map_err(|_| {
            tracing::error!("Session state lock poisoned");
            CoreError::InternalServerError
        })
    }

    fn begin_analysis(&self, mode: CaptureMode) -> Result<AnalysisGuard<'_>, CoreError> {
        let mut state = self.lock_state()?;
        if state.is_busy() {
            return Err(CoreError::AnalysisInProgress);
        }
        state.phase = SessionPhase::AwaitingAnalysis {
            mode,
            started_at: chrono::Utc::now(),
        };

        Ok(AnalysisGuard { state: &self.state })
    }

    #[instrument(skip(self, image), fields(mode = mode.as_str(), bytes = image.payload.len()))]
    pub async fn submit_capture(
        &self,
        mode: CaptureMode,
        image: CapturedImage,
    ) -> Result<CaptureOutcome, CoreError> {
        let _guard = self.begin_analysis(mode)?;

        match mode {
            CaptureMode::SingleFood => self.analyze_food(image).await,
            CaptureMode::Meal => self.record_meal(image).await,
        }
    }

    async fn analyze_food(&self, image: CapturedImage) -> Result<CaptureOutcome, CoreError> {
        let food = self.analysis_client.analyze_single_food(image).await?;
        let gi_check = food.gi_check();

        self.lock_state()?.current_result = Some(food.clone());

        Ok(CaptureOutcome::FoodAnalyzed { food, gi_check })
    }

    async fn record_meal(&self, image: CapturedImage) -> Result<CaptureOutcome, CoreError> {
        let result = self.analysis_client.analyze_meal(image.clone()).await?;

        let stored = self
            .image_store
            .put_image(StoredImage::new(image.mime_type, image.payload))
            .await?;

        let meal = NewMeal {
            stamp: MealStamp::now(),
            image: stored.reference(&self.images_path),
            result,
        };

        let stats = {
            let mut state = self.lock_state()?;
            let next = self.policy.apply_meal_result(&state.stats, meal)?;
            state.stats = next.clone();
            next
        };

        let record = stats
            .meals
            .first()
            .cloned()
            .ok_or(CoreError::InternalServerError)?;
        let progress = self.policy.compute_progress(&stats);

        tracing::info!(
            meal_id = %record.id,
            total_sugar = record.total_sugar,
            day_total = stats.total_sugar,
            rating = %record.rating,
            "Meal recorded"
        );

        Ok(CaptureOutcome::MealRecorded {
            message: meal_recorded_message(record.total_sugar),
            meal: record,
            stats,
            progress,
        })
    }

    pub fn snapshot(&self) -> Result<SessionState, CoreError> {
        Ok(self.lock_state()?.clone())
    }

    pub fn stats(&self) -> Result<DailyStats, CoreError> {
        Ok(self.lock_state()?.stats.clone())
    }

    pub fn progress(&self) -> Result<Progress, CoreError> {
        let state = self.lock_state()?;
        Ok(self.policy.compute_progress(&state.stats))
    }

    pub fn switch_view(&self, view: ActiveView) -> Result<SessionState, CoreError> {
        let mut state = self.lock_state()?;
        state.active_view = view;
        Ok(state.clone())
    }

    pub fn dismiss_result(&self) -> Result<SessionState, CoreError> {
        let mut state = self.lock_state()?;
        state.current_result = None;
        Ok(state.clone())
    }

    pub async fn get_image(&self, id: Uuid) -> Result<StoredImage, CoreError> {
        self.image_store.get_image(id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;
    use chrono::NaiveDate;
    use tokio::sync::Notify;

    use super::*;
    use crate::domain::{
        food_analysis::{
            entities::{FoodAnalysis, GiCheck, GiRating, MealFood},
            ports::MockAnalysisClient,
        },
        ledger::{
            entities::MealRating,
            value_objects::{MealResult, WarningLevel},
        },
        storage::{entities::ImageReference, ports::MockImageStore},
    };

    fn jpeg() -> CapturedImage {
        CapturedImage::from_bytes(Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0]), None).unwrap()
    }

    fn echo_store() -> MockImageStore {
        let mut store = MockImageStore::new();
        store
            .expect_put_image()
            .returning(|image| Box::pin(async move { Ok(image) }));
        store
    }

    fn service(
        analysis: MockAnalysisClient,
        store: MockImageStore,
    ) -> SessionService<MockAnalysisClient, MockImageStore> {
        let policy = LedgerPolicy::default();
        let stats = policy.open_day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        SessionService::with_stats(analysis, store, policy, stats)
    }

    fn oatmeal() -> FoodAnalysis {
        FoodAnalysis {
            name: "燕麦粥".to_string(),
            gi_value: 55.0,
            gi_rating: GiRating::Medium,
            sugar_per_100g: 1.2,
            carbs_per_100g: 12.5,
            advice: "可以适量食用".to_string(),
            portion_size: "一小碗".to_string(),
        }
    }

    fn meal_of(total_sugar: f64) -> MealResult {
        MealResult::new(
            vec![MealFood {
                name: "米饭".to_string(),
                sugar_per_100g: 2.0,
                gi_rating: GiRating::Medium,
            }],
            total_sugar,
            30.0,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_meal_capture_updates_ledger() {
        let mut analysis = MockAnalysisClient::new();
        analysis
            .expect_analyze_meal()
            .times(1)
            .returning(|_| Box::pin(async { Ok(meal_of(15.0)) }));
        let service = service(analysis, echo_store());

        let outcome = service.submit_capture(CaptureMode::Meal, jpeg()).await.unwrap();

        let CaptureOutcome::MealRecorded {
            meal,
            stats,
            progress,
            message,
        } = outcome
        else {
            panic!("expected a recorded meal");
        };
        assert_eq!(meal.rating, MealRating::Good);
        assert!(meal.image.as_str().starts_with("/images/"));
        assert_eq!(stats.total_sugar, 15.0);
        assert_eq!(progress.percentage, 30.0);
        assert_eq!(progress.warning_level, WarningLevel::None);
        assert_eq!(message, "这餐饭共含有糖分约 15g，已加入今日统计。");

        let state = service.snapshot().unwrap();
        assert_eq!(state.stats, stats);
        assert_eq!(state.phase, SessionPhase::Idle);
        assert!(state.current_result.is_none());
    }

    #[tokio::test]
    async fn test_single_food_does_not_touch_ledger() {
        let mut analysis = MockAnalysisClient::new();
        analysis
            .expect_analyze_single_food()
            .times(1)
            .returning(|_| Box::pin(async { Ok(oatmeal()) }));
        let mut store = MockImageStore::new();
        store.expect_put_image().times(0);
        let service = service(analysis, store);
        let before = service.stats().unwrap();

        let outcome = service
            .submit_capture(CaptureMode::SingleFood, jpeg())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            CaptureOutcome::FoodAnalyzed {
                food: oatmeal(),
                gi_check: GiCheck::Consistent,
            }
        );
        let state = service.snapshot().unwrap();
        assert_eq!(state.stats, before);
        assert_eq!(state.current_result, Some(oatmeal()));

        let state = service.dismiss_result().unwrap();
        assert!(state.current_result.is_none());
    }

    #[tokio::test]
    async fn test_failed_analysis_leaves_ledger_unchanged() {
        let policy = LedgerPolicy::default();
        let day = policy.open_day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let before = policy
            .apply_meal_result(
                &day,
                NewMeal {
                    stamp: MealStamp::now(),
                    image: ImageReference::for_image(DEFAULT_IMAGES_PATH, Uuid::new_v4()),
                    result: meal_of(12.0),
                },
            )
            .unwrap();
        let mut analysis = MockAnalysisClient::new();
        analysis.expect_analyze_meal().times(1).returning(|_| {
            Box::pin(async { Err(CoreError::AnalysisFailed("network".to_string())) })
        });
        let mut store = MockImageStore::new();
        store.expect_put_image().times(0);
        let service = SessionService::with_stats(analysis, store, policy, before.clone());

        let result = service.submit_capture(CaptureMode::Meal, jpeg()).await;

        assert!(matches!(result, Err(CoreError::AnalysisFailed(_))));
        assert_eq!(service.stats().unwrap(), before);
        assert_eq!(service.snapshot().unwrap().phase, SessionPhase::Idle);
    }

    #[tokio::test]
    async fn test_failed_image_store_leaves_ledger_unchanged() {
        let mut analysis = MockAnalysisClient::new();
        analysis
            .expect_analyze_meal()
            .returning(|_| Box::pin(async { Ok(meal_of(12.0)) }));
        let mut store = MockImageStore::new();
        store
            .expect_put_image()
            .returning(|_| Box::pin(async { Err(CoreError::InternalServerError) }));
        let service = service(analysis, store);

        let result = service.submit_capture(CaptureMode::Meal, jpeg()).await;

        assert!(result.is_err());
        assert_eq!(service.stats().unwrap().total_sugar, 0.0);
        assert!(service.stats().unwrap().meals.is_empty());
    }

    #[tokio::test]
    async fn test_second_capture_rejected_while_busy() {
        let release = Arc::new(Notify::new());
        let entered = Arc::new(Notify::new());

        let mut analysis = MockAnalysisClient::new();
        let (release_c, entered_c) = (release.clone(), entered.clone());
        analysis.expect_analyze_meal().times(1).returning(move |_| {
            let release = release_c.clone();
            let entered = entered_c.clone();
            Box::pin(async move {
                entered.notify_one();
                release.notified().await;
                Ok(meal_of(8.0))
            })
        });
        let service = Arc::new(service(analysis, echo_store()));

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.submit_capture(CaptureMode::Meal, jpeg()).await }
        });
        entered.notified().await;

        assert!(matches!(
            service.snapshot().unwrap().phase,
            SessionPhase::AwaitingAnalysis {
                mode: CaptureMode::Meal,
                ..
            }
        ));
        let second = service.submit_capture(CaptureMode::SingleFood, jpeg()).await;
        assert_eq!(second, Err(CoreError::AnalysisInProgress));

        release.notify_one();
        let first = first.await.unwrap().unwrap();

        assert!(matches!(first, CaptureOutcome::MealRecorded { .. }));
        let state = service.snapshot().unwrap();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.stats.meals.len(), 1);
        assert_eq!(state.stats.total_sugar, 8.0);
    }

    #[tokio::test]
    async fn test_overflowing_meal_is_rejected_and_session_survives() {
        let mut analysis = MockAnalysisClient::new();
        analysis
            .expect_analyze_meal()
            .times(2)
            .returning(|_| Box::pin(async { Ok(MealResult::new(vec![], 1e308, 0.0).unwrap()) }));
        let service = service(analysis, echo_store());

        let first = service.submit_capture(CaptureMode::Meal, jpeg()).await;
        assert!(first.is_ok());

        let second = service.submit_capture(CaptureMode::Meal, jpeg()).await;
        assert!(matches!(second, Err(CoreError::InvalidMealResult(_))));

        let state = service.snapshot().unwrap();
        assert_eq!(state.phase, SessionPhase::Idle);
        assert_eq!(state.stats.total_sugar, 1e308);
        assert_eq!(state.stats.meals.len(), 1);
        assert!(service.progress().is_ok());
    }

    #[tokio::test]
    async fn test_meal_image_uses_configured_path() {
        let mut analysis = MockAnalysisClient::new();
        analysis
            .expect_analyze_meal()
            .returning(|_| Box::pin(async { Ok(meal_of(5.0)) }));
        let service = service(analysis, echo_store()).with_images_path("/sugarwise/images");

        let outcome = service.submit_capture(CaptureMode::Meal, jpeg()).await.unwrap();

        let CaptureOutcome::MealRecorded { meal, .. } = outcome else {
            panic!("expected a recorded meal");
        };
        assert!(meal.image.as_str().starts_with("/sugarwise/images/"));
    }

    #[tokio::test]
    async fn test_switch_view() {
        let service = service(MockAnalysisClient::new(), MockImageStore::new());
        assert_eq!(service.snapshot().unwrap().active_view, ActiveView::Home);

        let state = service.switch_view(ActiveView::History).unwrap();

        assert_eq!(state.active_view, ActiveView::History);
        assert_eq!(service.snapshot().unwrap().active_view, ActiveView::History);
    }
}
