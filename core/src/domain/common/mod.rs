use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp};

pub mod entities;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_GEMINI_VOICE: &str = "Kore";

#[derive(Clone, Debug)]
pub struct SugarwiseConfig {
    pub llm: LLMConfig,
    pub ledger: LedgerConfig,
    /// URL path under which stored captures are served, e.g. `/images`.
    pub images_path: String,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_tts_model: String,
    pub gemini_voice: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl LLMConfig {
    pub fn new(gemini_api_key: String) -> Self {
        Self {
            gemini_api_key,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_tts_model: DEFAULT_GEMINI_TTS_MODEL.to_string(),
            gemini_voice: DEFAULT_GEMINI_VOICE.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Thresholds and limit of the daily ledger, in grams of sugar and percent.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerConfig {
    pub daily_limit: f64,
    pub rating_good_above: f64,
    pub rating_attention_above: f64,
    pub warning_high_above: f64,
    pub warning_critical_above: f64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            daily_limit: 50.0,
            rating_good_above: 10.0,
            rating_attention_above: 20.0,
            warning_high_above: 80.0,
            warning_critical_above: 90.0,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}
