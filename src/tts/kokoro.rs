//! Kokoro speech synthesis backend.

use sherpa_rs::OnnxConfig;
use sherpa_rs::tts::{CommonTtsConfig, KokoroTts, KokoroTtsConfig};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::config::voices::resolve_speaker_id;

use super::backend::{AudioChunk, AudioResult, BackendError, SpeechBackend, SynthesisError, SynthesisRequest, assemble_chunks};
use super::chunker::split_chunks;

/// Kokoro v1.0 output sample rate.
const KOKORO_SAMPLE_RATE: u32 = 24000;

const ENGINE_NAME: &str = "KOKORO";

/// Multi-speaker Kokoro backend. Voices are selected per request by name or speaker ID.
pub struct KokoroBackend {
    tts: KokoroTts, // Kokoro TTS engine
}

impl KokoroBackend {
    /// Load the Kokoro model.
    ///
    /// The lexicon and espeak language are picked from the configured voice,
    /// so the voice must be known at load time.
    ///
    /// # Errors
    /// Returns an error if the configured voice is not a Kokoro voice.
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let speaker_id = resolve_speaker_id(&config.voice).ok_or_else(|| BackendError::UnknownVoice { voice: config.voice.clone(), engine: ENGINE_NAME })?;

        let provider = config.effective_provider();
        info!("Initializing Kokoro TTS with {} provider", provider);
        info!("TTS voice: {} (speaker ID: {})", config.voice, speaker_id);

        let tts_config = KokoroTtsConfig {
            model: config.kokoro_model_path().to_string_lossy().to_string(),
            voices: config.kokoro_voices_path().to_string_lossy().to_string(),
            tokens: config.kokoro_tokens_path().to_string_lossy().to_string(),
            data_dir: config.kokoro_data_dir().to_string_lossy().to_string(),
            dict_dir: config.kokoro_dict_dir().to_string_lossy().to_string(),
            lexicon: config.kokoro_lexicon(),
            lang: config.kokoro_language().to_string(),
            length_scale: 1.0, // Speed is passed per request instead
            onnx_config: OnnxConfig {
                provider: provider.as_sherpa_provider().to_string(),
                num_threads: config.num_threads.try_into().unwrap_or(2),
                debug: config.verbose,
            },
            common_config: CommonTtsConfig { max_num_sentences: 1, ..Default::default() }, // Kokoro only supports 1
        };

        let tts = KokoroTts::new(tts_config);
        info!("✓ Kokoro TTS ready ({} Hz)", KOKORO_SAMPLE_RATE);

        Ok(Self { tts })
    }
}

impl SpeechBackend for KokoroBackend {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn default_sample_rate(&self) -> u32 {
        KOKORO_SAMPLE_RATE
    }

    fn synthesize(&mut self, request: &SynthesisRequest) -> Result<AudioResult, SynthesisError> {
        let speaker_id = resolve_speaker_id(&request.voice).ok_or_else(|| SynthesisError::UnknownVoice { voice: request.voice.clone(), engine: ENGINE_NAME })?;

        let default_rate = self.default_sample_rate();
        let chunks = split_chunks(&request.text);
        let total = chunks.len();
        debug!("Kokoro: {} chunks, speaker {}, speed {}", total, speaker_id, request.speed);

        let tts = &mut self.tts;
        let audio = chunks.iter().enumerate().map(|(i, text)| {
            debug!("Synthesizing chunk {}/{}", i + 1, total);
            tts.create(text, speaker_id, request.speed).map(|audio| AudioChunk { samples: audio.samples, sample_rate: audio.sample_rate })
        });

        assemble_chunks(audio, default_rate)
    }
}
