use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use sugarwise_core::domain::common::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_TTS_MODEL, DEFAULT_GEMINI_VOICE,
    LLMConfig, LedgerConfig, SugarwiseConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "sugarwise", version, about = "Food GI advisor and daily sugar ledger")]
pub struct Args {
    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub ledger: LedgerArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY")]
    pub api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub model: String,

    #[arg(long = "gemini-tts-model", env = "GEMINI_TTS_MODEL", default_value = DEFAULT_GEMINI_TTS_MODEL)]
    pub tts_model: String,

    #[arg(long = "gemini-voice", env = "GEMINI_VOICE", default_value = DEFAULT_GEMINI_VOICE)]
    pub voice: String,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub base_url: String,

    /// Seconds before a model request is abandoned
    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LedgerArgs {
    /// Daily sugar limit in grams
    #[arg(long = "daily-sugar-limit", env = "DAILY_SUGAR_LIMIT", default_value_t = 50.0)]
    pub daily_limit: f64,

    #[arg(long = "rating-good-above", env = "RATING_GOOD_ABOVE", default_value_t = 10.0)]
    pub rating_good_above: f64,

    #[arg(long = "rating-attention-above", env = "RATING_ATTENTION_ABOVE", default_value_t = 20.0)]
    pub rating_attention_above: f64,

    #[arg(long = "warning-high-above", env = "WARNING_HIGH_ABOVE", default_value_t = 80.0)]
    pub warning_high_above: f64,

    #[arg(long = "warning-critical-above", env = "WARNING_CRITICAL_ABOVE", default_value_t = 90.0)]
    pub warning_critical_above: f64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,

    #[arg(
        long = "log-filter",
        env = "RUST_LOG",
        default_value = "sugarwise_api=info,sugarwise_core=info,tower_http=info"
    )]
    pub filter: String,
}

impl From<Args> for SugarwiseConfig {
    fn from(args: Args) -> Self {
        SugarwiseConfig {
            images_path: format!("{}/images", args.server.root_path),
            llm: LLMConfig {
                gemini_api_key: args.llm.api_key,
                gemini_model: args.llm.model,
                gemini_tts_model: args.llm.tts_model,
                gemini_voice: args.llm.voice,
                base_url: args.llm.base_url,
                request_timeout: Duration::from_secs(args.llm.timeout_secs),
            },
            ledger: LedgerConfig {
                daily_limit: args.ledger.daily_limit,
                rating_good_above: args.ledger.rating_good_above,
                rating_attention_above: args.ledger.rating_attention_above,
                warning_high_above: args.ledger.warning_high_above,
                warning_critical_above: args.ledger.warning_critical_above,
            },
        }
    }
}
