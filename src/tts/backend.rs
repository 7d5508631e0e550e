//! Engine-agnostic synthesis interface and chunk assembly.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::audio::util::convert_to_i16;
use crate::config::{AppConfig, Engine};

use super::kokoro::KokoroBackend;
use super::vits::VitsBackend;

/// Text, voice and speed for one synthesis run.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub speed: f32,
}

/// Audio produced for one chunk of text.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioChunk {
    pub samples: Vec<f32>, // Amplitude in [-1.0, 1.0]
    pub sample_rate: u32,
}

/// Complete narration as 16-bit PCM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResult {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
}

impl AudioResult {
    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 { 0.0 } else { self.samples.len() as f64 / self.sample_rate as f64 }
    }
}

/// Errors raised while synthesizing speech.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("unknown voice '{voice}' for the {engine} engine")]
    UnknownVoice { voice: String, engine: &'static str },

    #[error("synthesis failed at chunk {index}: {source}")]
    Chunk {
        index: usize, // 1-based
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Errors raised while bringing up a backend. These are fatal for the run.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("required model file not found: {}", .0.display())]
    MissingAsset(PathBuf),

    #[error("voice '{voice}' is not available for the {engine} engine")]
    UnknownVoice { voice: String, engine: &'static str },
}

/// A speech synthesis engine.
pub trait SpeechBackend: Send {
    /// Engine name shown in logs and reports.
    fn name(&self) -> &'static str;

    /// Sample rate used when no audio is produced.
    fn default_sample_rate(&self) -> u32;

    /// Convert text to a single audio buffer.
    ///
    /// # Errors
    /// Fails if the voice is unknown or any chunk fails; no partial audio is returned.
    fn synthesize(&mut self, request: &SynthesisRequest) -> Result<AudioResult, SynthesisError>;
}

/// Concatenate chunks in emission order into one PCM buffer.
///
/// The first chunk's sample rate is used for the whole result; rates reported
/// by later chunks are ignored. With no chunks, `default_sample_rate` applies.
/// The first failing chunk aborts assembly and everything collected so far is
/// dropped. Iteration stops there, so later chunks are never synthesized.
pub fn assemble_chunks<I, E>(chunks: I, default_sample_rate: u32) -> Result<AudioResult, SynthesisError>
where
    I: IntoIterator<Item = Result<AudioChunk, E>>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    let mut samples: Vec<f32> = Vec::new();
    let mut sample_rate = None;

    for (i, chunk) in chunks.into_iter().enumerate() {
        let chunk = chunk.map_err(|e| SynthesisError::Chunk { index: i + 1, source: e.into() })?;

        match sample_rate {
            None => sample_rate = Some(chunk.sample_rate),
            Some(rate) if rate != chunk.sample_rate => {
                debug!("Chunk {} reports {} Hz, keeping {} Hz", i + 1, chunk.sample_rate, rate);
            }
            Some(_) => {}
        }

        samples.extend_from_slice(&chunk.samples);
    }

    Ok(AudioResult { samples: convert_to_i16(&samples), sample_rate: sample_rate.unwrap_or(default_sample_rate) })
}

/// Check that every model file the configured engine needs is present.
pub fn verify_assets(config: &AppConfig) -> Result<(), BackendError> {
    for path in config.required_model_files() {
        if !path.exists() {
            return Err(BackendError::MissingAsset(path));
        }
    }
    Ok(())
}

/// Create and initialize the backend selected in the configuration.
///
/// # Errors
/// Returns an error if model files are missing or the configured voice is not
/// valid for the engine.
pub fn create_backend(config: &AppConfig) -> Result<Box<dyn SpeechBackend>, BackendError> {
    verify_assets(config)?;
    info!("Model files found in {}", config.model_dir.display());

    let backend: Box<dyn SpeechBackend> = match config.engine {
        Engine::Kokoro => Box::new(KokoroBackend::new(config)?),
        Engine::Vits => Box::new(VitsBackend::new(config)),
    };

    Ok(backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn chunk(samples: &[f32], sample_rate: u32) -> Result<AudioChunk, String> {
        Ok(AudioChunk { samples: samples.to_vec(), sample_rate })
    }

    #[test]
    fn test_concatenates_in_emission_order() {
        let chunks = vec![chunk(&[0.0, 1.0], 24000), chunk(&[-1.0], 24000), chunk(&[0.5, -0.5, 0.0], 24000)];
        let result = assemble_chunks(chunks, 24000).unwrap();
        assert_eq!(result.samples, vec![0, 32767, -32767, 16383, -16383, 0]);
        assert_eq!(result.sample_rate, 24000);
    }

    #[test]
    fn test_first_chunk_rate_wins() {
        let chunks = vec![chunk(&[0.0], 22050), chunk(&[0.0], 44100), chunk(&[0.0], 16000)];
        let result = assemble_chunks(chunks, 24000).unwrap();
        assert_eq!(result.sample_rate, 22050);
        assert_eq!(result.samples.len(), 3);
    }

    #[test]
    fn test_no_chunks_uses_default_rate() {
        let result = assemble_chunks(Vec::<Result<AudioChunk, String>>::new(), 24000).unwrap();
        assert!(result.samples.is_empty());
        assert_eq!(result.sample_rate, 24000);
        assert_eq!(result.duration_secs(), 0.0);
    }

    #[test]
    fn test_failing_chunk_discards_everything() {
        let mut produced = 0;
        let chunks = (1..=3).map(|i| {
            produced += 1;
            if i == 2 { Err("engine exploded".to_string()) } else { chunk(&[0.25], 24000) }
        });

        let err = assemble_chunks(chunks, 24000).unwrap_err();
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("engine exploded"));
        match err {
            SynthesisError::Chunk { index, source } => {
                assert_eq!(index, 2);
                assert_eq!(source.to_string(), "engine exploded");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(produced, 2, "chunks after the failure must not be synthesized");
    }

    #[test]
    fn test_duration() {
        let result = AudioResult { samples: vec![0; 48000], sample_rate: 24000 };
        assert_eq!(result.duration_secs(), 2.0);
    }

    #[test]
    fn test_missing_assets_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::try_parse_from(["pdf-narrator", "a.pdf", "--model-dir", dir.path().to_str().unwrap()]).unwrap();
        match verify_assets(&config) {
            Err(BackendError::MissingAsset(path)) => assert_eq!(path, config.kokoro_model_path()),
            other => panic!("expected missing asset, got {:?}", other.err()),
        }
        assert!(matches!(create_backend(&config), Err(BackendError::MissingAsset(_))));
    }

    #[test]
    fn test_missing_lexicon_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::try_parse_from(["pdf-narrator", "a.pdf", "--model-dir", dir.path().to_str().unwrap(), "--voice", "bf_emma"]).unwrap();
        let lexicon = PathBuf::from(config.kokoro_lexicon());

        for path in config.required_model_files() {
            if path == lexicon {
                continue;
            }
            if path.extension().is_some() {
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(&path, b"").unwrap();
            } else {
                std::fs::create_dir_all(&path).unwrap();
            }
        }

        match verify_assets(&config) {
            Err(BackendError::MissingAsset(path)) => assert_eq!(path, lexicon),
            other => panic!("expected missing lexicon, got {:?}", other.err()),
        }
    }
}
