use chrono::NaiveDate;

use crate::domain::{
    common::{LedgerConfig, entities::app_errors::CoreError},
    ledger::{
        entities::{DailyStats, MealRating, MealRecord},
        value_objects::{
            DailyLimit, NEAR_LIMIT_MESSAGE, NewMeal, Progress, RatingThresholds, WarningLevel,
            WarningThresholds,
        },
    },
};

/// Rules of the daily ledger: the configured limit and the rating and warning bands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LedgerPolicy {
    pub daily_limit: DailyLimit,
    pub rating: RatingThresholds,
    pub warning: WarningThresholds,
}

impl TryFrom<&LedgerConfig> for LedgerPolicy {
    type Error = CoreError;

    fn try_from(config: &LedgerConfig) -> Result<Self, Self::Error> {
        let daily_limit = DailyLimit::new(config.daily_limit)?;

        let rating = RatingThresholds {
            good_above: config.rating_good_above,
            attention_above: config.rating_attention_above,
        };
        ensure_ordered_bands("rating", rating.good_above, rating.attention_above)?;

        let warning = WarningThresholds {
            high_above: config.warning_high_above,
            critical_above: config.warning_critical_above,
        };
        ensure_ordered_bands("warning", warning.high_above, warning.critical_above)?;

        Ok(Self {
            daily_limit,
            rating,
            warning,
        })
    }
}

fn ensure_ordered_bands(name: &str, lower: f64, upper: f64) -> Result<(), CoreError> {
    if !lower.is_finite() || !upper.is_finite() || lower < 0.0 || lower > upper {
        return Err(CoreError::InvalidConfig(format!(
            "{name} thresholds must satisfy 0 <= {lower} <= {upper}"
        )));
    }
    Ok(())
}

impl LedgerPolicy {
    /// Empty ledger for the given day, using the configured limit.
    pub fn open_day(&self, date: NaiveDate) -> DailyStats {
        DailyStats::new(date, self.daily_limit)
    }

    pub fn rate_meal(&self, total_sugar: f64) -> MealRating {
        self.rating.rate(total_sugar)
    }

    /// Records a meal and returns the next ledger state. `current` is left untouched.
    ///
    /// Fails with `InvalidMealResult` when the day's total would stop being a finite number.
    pub fn apply_meal_result(
        &self,
        current: &DailyStats,
        meal: NewMeal,
    ) -> Result<DailyStats, CoreError> {
        let total_sugar = current.total_sugar + meal.result.total_sugar();
        if !total_sugar.is_finite() {
            return Err(CoreError::InvalidMealResult(format!(
                "daily total overflows: {} + {}",
                current.total_sugar,
                meal.result.total_sugar()
            )));
        }

        let rating = self.rate_meal(meal.result.total_sugar());
        let record = MealRecord::new(meal, rating);

        let mut meals = Vec::with_capacity(current.meals.len() + 1);
        meals.push(record);
        meals.extend(current.meals.iter().cloned());

        let next = DailyStats {
            date: current.date,
            total_sugar,
            limit: current.limit,
            meals,
        };
        if !next.is_consistent() {
            tracing::error!(
                total_sugar = next.total_sugar,
                recomputed = next.recomputed_total(),
                "Ledger total drifted from meal sum"
            );
            return Err(CoreError::InternalServerError);
        }

        Ok(next)
    }

    pub fn compute_progress(&self, stats: &DailyStats) -> Progress {
        let limit = stats.limit.grams();
        let percentage = (stats.total_sugar * 100.0 / limit).clamp(0.0, 100.0);
        let warning_level = self.warning.level(percentage);

        Progress {
            percentage,
            warning_level,
            remaining: (limit - stats.total_sugar).max(0.0),
            warning_message: (warning_level == WarningLevel::Critical)
                .then(|| NEAR_LIMIT_MESSAGE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        food_analysis::entities::{GiRating, MealFood},
        ledger::value_objects::{MealResult, MealStamp},
        storage::entities::ImageReference,
    };

    fn start_of_day() -> DailyStats {
        LedgerPolicy::default().open_day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    fn new_meal(total_sugar: f64, total_carbs: f64, foods: Vec<MealFood>) -> NewMeal {
        NewMeal {
            stamp: MealStamp {
                id: Uuid::new_v4(),
                timestamp: Utc::now(),
            },
            image: ImageReference::new(format!("/images/{}", Uuid::new_v4())),
            result: MealResult::new(foods, total_sugar, total_carbs).unwrap(),
        }
    }

    fn rice() -> MealFood {
        MealFood {
            name: "米饭".to_string(),
            sugar_per_100g: 2.0,
            gi_rating: GiRating::Medium,
        }
    }

    #[test]
    fn test_accumulates_total_sugar() {
        let policy = LedgerPolicy::default();
        let mut stats = start_of_day();

        for sugar in [3.5, 0.0, 12.25, 40.0] {
            let before = stats.total_sugar;
            stats = policy
                .apply_meal_result(&stats, new_meal(sugar, 10.0, vec![]))
                .unwrap();
            assert_eq!(stats.total_sugar, before + sugar);
            assert!(stats.is_consistent());
        }
        assert_eq!(stats.total_sugar, stats.recomputed_total());
    }

    #[test]
    fn test_prepends_newest_meal() {
        let policy = LedgerPolicy::default();
        let first = policy
            .apply_meal_result(&start_of_day(), new_meal(5.0, 10.0, vec![]))
            .unwrap();
        let meal = new_meal(8.0, 20.0, vec![rice()]);
        let expected_id = meal.stamp.id;

        let second = policy.apply_meal_result(&first, meal).unwrap();

        assert_eq!(second.meals.len(), first.meals.len() + 1);
        assert_eq!(second.meals[0].id, expected_id);
        assert_eq!(second.meals[1], first.meals[0]);
    }

    #[test]
    fn test_does_not_mutate_current_state() {
        let policy = LedgerPolicy::default();
        let current = start_of_day();
        let snapshot = current.clone();

        let next = policy
            .apply_meal_result(&current, new_meal(25.0, 40.0, vec![]))
            .unwrap();

        assert_eq!(current, snapshot);
        assert_eq!(next.date, current.date);
        assert_eq!(next.limit, current.limit);
    }

    #[test]
    fn test_rating_boundaries() {
        let policy = LedgerPolicy::default();
        assert_eq!(policy.rate_meal(0.0), MealRating::Excellent);
        assert_eq!(policy.rate_meal(10.0), MealRating::Excellent);
        assert_eq!(policy.rate_meal(10.01), MealRating::Good);
        assert_eq!(policy.rate_meal(20.0), MealRating::Good);
        assert_eq!(policy.rate_meal(20.01), MealRating::NeedsAttention);
    }

    #[test]
    fn test_warning_boundaries() {
        let warning = WarningThresholds::default();
        assert_eq!(warning.level(80.0), WarningLevel::None);
        assert_eq!(warning.level(80.01), WarningLevel::High);
        assert_eq!(warning.level(90.0), WarningLevel::High);
        assert_eq!(warning.level(90.01), WarningLevel::Critical);
    }

    #[test]
    fn test_progress_is_monotonic_and_clamped() {
        let policy = LedgerPolicy::default();
        let mut stats = start_of_day();
        let mut previous = policy.compute_progress(&stats).percentage;
        assert_eq!(previous, 0.0);

        for step in 1..=240 {
            stats.total_sugar = step as f64 * 0.5;
            let progress = policy.compute_progress(&stats);
            assert!(progress.percentage >= previous);
            assert_eq!(progress, policy.compute_progress(&stats));
            if stats.total_sugar >= stats.limit.grams() {
                assert_eq!(progress.percentage, 100.0);
                assert_eq!(progress.remaining, 0.0);
            }
            previous = progress.percentage;
        }
    }

    #[test]
    fn test_critical_progress_carries_warning_message() {
        let policy = LedgerPolicy::default();
        let stats = policy
            .apply_meal_result(&start_of_day(), new_meal(48.0, 60.0, vec![]))
            .unwrap();

        let progress = policy.compute_progress(&stats);

        assert_eq!(progress.warning_level, WarningLevel::Critical);
        assert_eq!(progress.warning_message.as_deref(), Some(NEAR_LIMIT_MESSAGE));
    }

    #[test]
    fn test_first_and_second_meal_scenario() {
        let policy = LedgerPolicy::default();
        let stats = start_of_day();
        assert_eq!(stats.total_sugar, 0.0);
        assert_eq!(stats.limit.grams(), 50.0);

        let stats = policy
            .apply_meal_result(&stats, new_meal(15.0, 30.0, vec![rice()]))
            .unwrap();
        assert_eq!(stats.total_sugar, 15.0);
        assert_eq!(stats.meals.len(), 1);
        assert_eq!(stats.meals[0].rating, MealRating::Good);
        assert_eq!(stats.meals[0].foods[0].name, "米饭");
        assert_eq!(stats.meals[0].foods[0].gi_rating, GiRating::Medium);
        let progress = policy.compute_progress(&stats);
        assert_eq!(progress.percentage, 30.0);
        assert_eq!(progress.warning_level, WarningLevel::None);

        let second = new_meal(30.0, 45.0, vec![]);
        let second_id = second.stamp.id;
        let stats = policy.apply_meal_result(&stats, second).unwrap();
        assert_eq!(stats.total_sugar, 45.0);
        assert_eq!(stats.meals.len(), 2);
        assert_eq!(stats.meals[0].id, second_id);
        assert_eq!(stats.meals[0].rating, MealRating::NeedsAttention);
        let progress = policy.compute_progress(&stats);
        assert_eq!(progress.percentage, 90.0);
        assert_eq!(progress.warning_level, WarningLevel::High);
        assert_eq!(progress.warning_message, None);
    }

    #[test]
    fn test_meal_without_foods_is_accumulated() {
        let policy = LedgerPolicy::default();

        let stats = policy
            .apply_meal_result(&start_of_day(), new_meal(6.0, 12.0, vec![]))
            .unwrap();

        assert_eq!(stats.total_sugar, 6.0);
        assert!(stats.meals[0].foods.is_empty());
        assert_eq!(stats.meals[0].title(), "正餐记录");
        assert_eq!(stats.meals[0].rating, MealRating::Excellent);
    }

    #[test]
    fn test_meal_foods_get_default_detail_fields() {
        let policy = LedgerPolicy::default();

        let stats = policy
            .apply_meal_result(&start_of_day(), new_meal(15.0, 30.0, vec![rice()]))
            .unwrap();
        let food = &stats.meals[0].foods[0];

        assert_eq!(food.gi_value, 0.0);
        assert_eq!(food.carbs_per_100g, 0.0);
        assert!(food.advice.is_empty());
        assert_eq!(food.portion_size, "一顿");
    }

    #[test]
    fn test_meal_result_rejects_malformed_totals() {
        assert!(matches!(
            MealResult::new(vec![], -1.0, 0.0),
            Err(CoreError::InvalidMealResult(_))
        ));
        assert!(MealResult::new(vec![], f64::INFINITY, 0.0).is_err());
        assert!(MealResult::new(vec![], 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let policy = LedgerPolicy::default();
        let stats = policy
            .apply_meal_result(&start_of_day(), new_meal(1e308, 0.0, vec![]))
            .unwrap();

        let result = policy.apply_meal_result(&stats, new_meal(1e308, 0.0, vec![]));

        assert!(matches!(result, Err(CoreError::InvalidMealResult(_))));
        assert_eq!(stats.total_sugar, 1e308);
        assert_eq!(stats.meals.len(), 1);
    }

    #[test]
    fn test_non_finite_total_is_inconsistent() {
        let mut stats = start_of_day();
        stats.total_sugar = f64::INFINITY;
        assert!(!stats.is_consistent());

        stats.total_sugar = f64::NAN;
        assert!(!stats.is_consistent());
    }

    #[test]
    fn test_daily_limit_must_be_positive() {
        assert!(matches!(DailyLimit::new(0.0), Err(CoreError::InvalidLimit(_))));
        assert!(DailyLimit::new(-5.0).is_err());
        assert!(DailyLimit::new(f64::NAN).is_err());
        assert_eq!(DailyLimit::new(25.0).unwrap().grams(), 25.0);
    }

    #[test]
    fn test_policy_from_config() {
        let config = LedgerConfig {
            daily_limit: 30.0,
            rating_good_above: 5.0,
            rating_attention_above: 15.0,
            ..LedgerConfig::default()
        };

        let policy = LedgerPolicy::try_from(&config).unwrap();

        assert_eq!(policy.daily_limit.grams(), 30.0);
        assert_eq!(policy.rate_meal(5.01), MealRating::Good);
        assert_eq!(policy.rate_meal(15.01), MealRating::NeedsAttention);
    }

    #[test]
    fn test_policy_rejects_inverted_thresholds() {
        let config = LedgerConfig {
            warning_high_above: 95.0,
            warning_critical_above: 90.0,
            ..LedgerConfig::default()
        };

        assert!(matches!(
            LedgerPolicy::try_from(&config),
            Err(CoreError::InvalidConfig(_))
        ));
    }
}
