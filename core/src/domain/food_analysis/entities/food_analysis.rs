use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError, food_analysis::entities::GiRating,
};

/// Detailed analysis of one identified food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodAnalysis {
    pub name: String,
    pub gi_value: f64,
    pub gi_rating: GiRating,
    pub sugar_per_100g: f64,
    pub carbs_per_100g: f64,
    pub advice: String,
    pub portion_size: String,
}

/// Outcome of comparing a reported GI rating with the numeric GI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GiCheck {
    Consistent,
    Mismatch {
        reported: GiRating,
        expected: GiRating,
    },
}

impl FoodAnalysis {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::AnalysisFailed(
                "food name is empty".to_string(),
            ));
        }

        ensure_non_negative("giValue", self.gi_value)?;
        ensure_non_negative("sugarPer100g", self.sugar_per_100g)?;
        ensure_non_negative("carbsPer100g", self.carbs_per_100g)?;

        Ok(())
    }

    /// The reported rating is kept as is; a disagreement is only reported.
    pub fn gi_check(&self) -> GiCheck {
        let expected = GiRating::from_gi_value(self.gi_value);
        if expected == self.gi_rating {
            GiCheck::Consistent
        } else {
            GiCheck::Mismatch {
                reported: self.gi_rating,
                expected,
            }
        }
    }
}

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::AnalysisFailed(format!(
            "{field} must be a finite non-negative number, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(gi_value: f64, gi_rating: GiRating) -> FoodAnalysis {
        FoodAnalysis {
            name: "燕麦".to_string(),
            gi_value,
            gi_rating,
            sugar_per_100g: 1.0,
            carbs_per_100g: 60.0,
            advice: "适量食用".to_string(),
            portion_size: "半碗".to_string(),
        }
    }

    #[test]
    fn test_gi_check_consistent() {
        assert_eq!(food(40.0, GiRating::Low).gi_check(), GiCheck::Consistent);
        assert_eq!(food(83.0, GiRating::High).gi_check(), GiCheck::Consistent);
    }

    #[test]
    fn test_gi_check_reports_mismatch_without_rewriting() {
        let food = food(83.0, GiRating::Low);
        assert_eq!(
            food.gi_check(),
            GiCheck::Mismatch {
                reported: GiRating::Low,
                expected: GiRating::High,
            }
        );
        assert_eq!(food.gi_rating, GiRating::Low);
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        assert!(food(f64::NAN, GiRating::Low).validate().is_err());
        assert!(food(-1.0, GiRating::Low).validate().is_err());

        let mut unnamed = food(40.0, GiRating::Low);
        unnamed.name = "  ".to_string();
        assert!(unnamed.validate().is_err());
    }
}
