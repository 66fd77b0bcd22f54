use crate::domain::{
    common::entities::app_errors::CoreError,
    speech::{entities::SpeechOutput, ports::SpeechSynthesizer},
};

pub const CLIENT_SPEECH_LANG: &str = "zh-CN";
pub const CLIENT_SPEECH_RATE: f32 = 0.8;

/// Hands the text back for the device's built-in synthesizer, slowed down.
#[derive(Debug, Clone, Default)]
pub struct ClientSideSpeech;

impl SpeechSynthesizer for ClientSideSpeech {
    async fn synthesize(&self, text: String) -> Result<SpeechOutput, CoreError> {
        Ok(SpeechOutput::ClientSide {
            text,
            lang: CLIENT_SPEECH_LANG.to_string(),
            rate: CLIENT_SPEECH_RATE,
        })
    }
}
