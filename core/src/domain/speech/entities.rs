use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PCM_SAMPLE_RATE: u32 = 24_000;
/// Highest sample rate accepted from a mime type; anything outside `1..=MAX` uses the default.
pub const MAX_PCM_SAMPLE_RATE: u32 = 384_000;

/// Raw audio as returned by the speech model.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAudio {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl GeneratedAudio {
    /// Sample rate from a mime type such as `audio/L16;codec=pcm;rate=24000`.
    pub fn sample_rate(&self) -> u32 {
        self.mime_type
            .split(';')
            .filter_map(|param| param.trim().strip_prefix("rate="))
            .find_map(|rate| rate.trim().parse::<u32>().ok())
            .filter(|rate| (1..=MAX_PCM_SAMPLE_RATE).contains(rate))
            .unwrap_or(DEFAULT_PCM_SAMPLE_RATE)
    }

    pub fn is_wav(&self) -> bool {
        self.mime_type.starts_with("audio/wav") || self.mime_type.starts_with("audio/x-wav")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeechOutput {
    /// Playable audio, base64 encoded.
    Audio { mime_type: String, data: String },
    /// To be spoken by the device's own synthesizer.
    ClientSide { text: String, lang: String, rate: f32 },
}
