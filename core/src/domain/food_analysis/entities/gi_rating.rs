use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// GI values below this are rated low.
pub const GI_MEDIUM_FROM: f64 = 55.0;
/// GI values from this on are rated high.
pub const GI_HIGH_FROM: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum GiRating {
    Low,
    Medium,
    High,
}

impl GiRating {
    /// Localized label, as shown to the user and as returned by the model.
    pub fn label(&self) -> &'static str {
        match self {
            GiRating::Low => "低GI",
            GiRating::Medium => "中GI",
            GiRating::High => "高GI",
        }
    }

    /// Canonical rating for a numeric glycemic index.
    pub fn from_gi_value(gi_value: f64) -> Self {
        if gi_value >= GI_HIGH_FROM {
            GiRating::High
        } else if gi_value >= GI_MEDIUM_FROM {
            GiRating::Medium
        } else {
            GiRating::Low
        }
    }
}

impl fmt::Display for GiRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GiRating {
    type Err = CoreError;

    /// Accepts the localized labels, their bare level character, or the English names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();

        match value.to_ascii_uppercase().as_str() {
            "LOW" | "低GI" | "低" => Ok(GiRating::Low),
            "MEDIUM" | "中GI" | "中" => Ok(GiRating::Medium),
            "HIGH" | "高GI" | "高" => Ok(GiRating::High),
            _ => Err(CoreError::AnalysisFailed(format!(
                "unrecognized GI rating: {value:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_localized_labels() {
        assert_eq!("低GI".parse::<GiRating>(), Ok(GiRating::Low));
        assert_eq!("中GI".parse::<GiRating>(), Ok(GiRating::Medium));
        assert_eq!(" 高GI ".parse::<GiRating>(), Ok(GiRating::High));
        assert_eq!("中gi".parse::<GiRating>(), Ok(GiRating::Medium));
        assert_eq!("低".parse::<GiRating>(), Ok(GiRating::Low));
    }

    #[test]
    fn test_parse_english_labels() {
        assert_eq!("low".parse::<GiRating>(), Ok(GiRating::Low));
        assert_eq!("MEDIUM".parse::<GiRating>(), Ok(GiRating::Medium));
        assert_eq!("High".parse::<GiRating>(), Ok(GiRating::High));
    }

    #[test]
    fn test_parse_unknown_label_fails() {
        assert!(matches!(
            "GI?".parse::<GiRating>(),
            Err(CoreError::AnalysisFailed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_mixed_labels() {
        for label in ["中高GI", "中低GI", "偏高GI", "低GI食物", "高血糖"] {
            assert!(label.parse::<GiRating>().is_err(), "{label}");
        }
    }

    #[test]
    fn test_canonical_mapping_boundaries() {
        assert_eq!(GiRating::from_gi_value(54.9), GiRating::Low);
        assert_eq!(GiRating::from_gi_value(55.0), GiRating::Medium);
        assert_eq!(GiRating::from_gi_value(69.9), GiRating::Medium);
        assert_eq!(GiRating::from_gi_value(70.0), GiRating::High);
    }
}
