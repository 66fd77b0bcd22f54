use base64::{Engine as _, engine::general_purpose};
use tracing::instrument;

use crate::domain::{
    common::entities::app_errors::CoreError,
    food_analysis::{ports::LLMClient, prompts::speech_prompt},
    speech::{
        entities::{GeneratedAudio, SpeechOutput},
        ports::SpeechSynthesizer,
    },
};

/// Speech through the LLM's text-to-speech model, delivered as WAV.
#[derive(Debug, Clone)]
pub struct LlmSpeechSynthesizer<L> {
    llm_client: L,
}

impl<L> LlmSpeechSynthesizer<L>
where
    L: LLMClient,
{
    pub fn new(llm_client: L) -> Self {
        Self { llm_client }
    }
}

impl<L> SpeechSynthesizer for LlmSpeechSynthesizer<L>
where
    L: LLMClient,
{
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn synthesize(&self, text: String) -> Result<SpeechOutput, CoreError> {
        let audio = self
            .llm_client
            .generate_speech(speech_prompt(&text))
            .await
            .map_err(|e| CoreError::SynthesisFailed(e.to_string()))?;

        if audio.data.is_empty() {
            return Err(CoreError::SynthesisFailed(
                "speech model returned no audio".to_string(),
            ));
        }

        let wav = if audio.is_wav() {
            audio.data
        } else {
            encode_wav(&audio)
        };

        Ok(SpeechOutput::Audio {
            mime_type: "audio/wav".to_string(),
            data: general_purpose::STANDARD.encode(wav),
        })
    }
}

/// Wraps 16-bit little-endian mono PCM in a WAV container.
pub fn encode_wav(audio: &GeneratedAudio) -> Vec<u8> {
    const CHANNELS: u16 = 1;
    const BITS_PER_SAMPLE: u16 = 16;

    let sample_rate = audio.sample_rate();
    // A trailing odd byte is not a whole sample.
    let pcm = &audio.data[..audio.data.len() & !1];
    let data_len = pcm.len() as u32;
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate.saturating_mul(u32::from(block_align));

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}

/// Tries the preferred synthesizer and falls back to the second one on failure.
#[derive(Debug, Clone)]
pub struct FallbackSpeech<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackSpeech<P, F>
where
    P: SpeechSynthesizer,
    F: SpeechSynthesizer,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> SpeechSynthesizer for FallbackSpeech<P, F>
where
    P: SpeechSynthesizer,
    F: SpeechSynthesizer,
{
    async fn synthesize(&self, text: String) -> Result<SpeechOutput, CoreError> {
        match self.primary.synthesize(text.clone()).await {
            Ok(output) => Ok(output),
            Err(e) => {
                tracing::warn!(error = %e, "Preferred speech synthesis failed, using fallback");
                self.fallback.synthesize(text).await
            }
        }
    }
}
