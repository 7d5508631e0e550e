//! VITS speech synthesis backend.
//!
//! Piper VITS models carry a single speaker per language. The requested voice
//! and speed are accepted for interface compatibility but not applied: every
//! chunk is rendered with speaker 0 at the model's natural rate.

use sherpa_rs::OnnxConfig;
use sherpa_rs::tts::{VitsTts, VitsTtsConfig};
use tracing::{debug, info};

use crate::config::AppConfig;

use super::backend::{AudioChunk, AudioResult, SpeechBackend, SynthesisError, SynthesisRequest, assemble_chunks};
use super::chunker::split_chunks;

/// Piper medium-quality models render at 22.05 kHz.
const VITS_SAMPLE_RATE: u32 = 22050;

const ENGINE_NAME: &str = "VITS";

/// Only one speaker per model.
const SPEAKER_ID: i32 = 0;

/// Single-voice VITS backend.
pub struct VitsBackend {
    tts: VitsTts,
}

impl VitsBackend {
    /// Load the VITS model for the configured language.
    pub fn new(config: &AppConfig) -> Self {
        let provider = config.effective_provider();
        info!("Initializing VITS TTS ({}) with {} provider", config.vits_bundle(), provider);

        let tts_config = VitsTtsConfig {
            model: config.vits_model_path().to_string_lossy().to_string(),
            tokens: config.vits_tokens_path().to_string_lossy().to_string(),
            data_dir: config.vits_data_dir().to_string_lossy().to_string(),
            length_scale: 1.0,
            noise_scale: 0.667,
            noise_scale_w: 0.8,
            onnx_config: OnnxConfig {
                provider: provider.as_sherpa_provider().to_string(),
                num_threads: config.num_threads.try_into().unwrap_or(2),
                debug: config.verbose,
            },
            ..Default::default()
        };

        let tts = VitsTts::new(tts_config);
        info!("✓ VITS TTS ready for {} ({} Hz)", config.language.code(), VITS_SAMPLE_RATE);

        Self { tts }
    }
}

impl SpeechBackend for VitsBackend {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn default_sample_rate(&self) -> u32 {
        VITS_SAMPLE_RATE
    }

    fn synthesize(&mut self, request: &SynthesisRequest) -> Result<AudioResult, SynthesisError> {
        if request.speed != 1.0 {
            debug!("VITS ignores speed {}x", request.speed);
        }

        let default_rate = self.default_sample_rate();
        let chunks = split_chunks(&request.text);
        let total = chunks.len();
        debug!("VITS: {} chunks", total);

        let tts = &mut self.tts;
        let audio = chunks.iter().enumerate().map(|(i, text)| {
            debug!("Synthesizing chunk {}/{}", i + 1, total);
            tts.create(text, SPEAKER_ID, 1.0).map(|audio| AudioChunk { samples: audio.samples, sample_rate: audio.sample_rate })
        });

        assemble_chunks(audio, default_rate)
    }
}
