//! Pipeline orchestrator.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::audio::write_wav;
use crate::config::AppConfig;
use crate::text::{DocumentReader, TextMetrics, extract, normalize};
use crate::tts::{AudioResult, SpeechBackend, SynthesisRequest};

use super::gate::EditGate;
use super::progress::Spinner;
use super::report::{ConversionReport, StatisticsTable, format_mmss};

/// Empirical synthesis cost per cleaned character, in seconds.
const SECONDS_PER_CHARACTER: f64 = 0.014;

/// Pipeline stages, in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    BackendReady,
    Extracted,
    AwaitEdit1,
    Normalized,
    AwaitEdit2,
    Estimated,
    Synthesizing,
    Reported,
    Done,
}

/// Paths and synthesis parameters for one run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub raw_text: PathBuf,
    pub cleaned_text: PathBuf,
    pub voice: String,
    pub speed: f32,
}

impl From<&AppConfig> for PipelineOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            input: config.input_path(),
            output: config.output_path(),
            raw_text: config.raw_text.clone(),
            cleaned_text: config.cleaned_text.clone(),
            voice: config.voice.clone(),
            speed: config.speed,
        }
    }
}

/// Estimated synthesis time for a cleaned text, in whole seconds.
pub fn estimate_synthesis_secs(cleaned_characters: usize) -> u64 {
    (cleaned_characters as f64 * SECONDS_PER_CHARACTER) as u64
}

/// Single-pass document-to-audio conversion.
pub struct Pipeline<R, G> {
    options: PipelineOptions,
    backend: Arc<Mutex<Box<dyn SpeechBackend>>>, // Shared with the blocking synthesis worker
    reader: R,
    gate: G,
    stage: Stage,
}

impl<R: DocumentReader, G: EditGate> Pipeline<R, G> {
    /// Create a pipeline around an initialized backend.
    pub fn new(options: PipelineOptions, backend: Box<dyn SpeechBackend>, reader: R, gate: G) -> Self {
        let mut pipeline = Self { options, backend: Arc::new(Mutex::new(backend)), reader, gate, stage: Stage::Init };
        pipeline.advance(Stage::BackendReady);
        pipeline
    }

    /// Current stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, next: Stage) {
        debug!("Stage {:?} -> {:?}", self.stage, next);
        self.stage = next;
    }

    /// Run every stage from extraction to the final report.
    ///
    /// Side files are left on disk whatever the outcome. The output audio
    /// file is only written once synthesis has fully succeeded.
    ///
    /// # Errors
    /// Returns an error if extraction, side-file I/O, synthesis or the WAV
    /// write fails.
    pub async fn run(&mut self) -> Result<ConversionReport> {
        let started = Instant::now();
        let opts = self.options.clone();

        info!("🔍 Extracting text from {}", opts.input.display());
        let raw = extract(&self.reader, &opts.input).context("Text extraction failed")?;
        save_text(&opts.raw_text, &raw)?;
        self.advance(Stage::Extracted);

        self.advance(Stage::AwaitEdit1);
        self.gate.wait_for_edits(&opts.raw_text).await?;
        let raw = load_text(&opts.raw_text)?;
        info!("✓ Raw text changes applied");

        info!("🧹 Cleaning text for TTS...");
        let cleaned = normalize(&raw);
        save_text(&opts.cleaned_text, &cleaned)?;
        self.advance(Stage::Normalized);

        self.advance(Stage::AwaitEdit2);
        self.gate.wait_for_edits(&opts.cleaned_text).await?;
        let cleaned = load_text(&opts.cleaned_text)?;
        info!("✓ Cleaned text changes applied");

        let raw_metrics = TextMetrics::of(&raw);
        let cleaned_metrics = TextMetrics::of(&cleaned);
        let estimate = estimate_synthesis_secs(cleaned_metrics.characters);
        println!("\nText Statistics:");
        print!("{}", StatisticsTable { raw: &raw_metrics, cleaned: &cleaned_metrics });
        println!("\nApproximate processing time: {} (MM:SS)\n", format_mmss(estimate as f64));
        self.advance(Stage::Estimated);

        if cleaned.trim().is_empty() {
            warn!("Cleaned text is empty, the narration will be silent");
        }

        let engine = self.backend.lock().name();
        println!("Current time: {}", local_timestamp());
        info!("🔊 Converting text to speech ({}, voice: {}, speed: {}x)", engine, opts.voice, opts.speed);
        self.advance(Stage::Synthesizing);
        let audio = self.synthesize(cleaned).await?;
        info!("✓ Audio generation complete ({} samples at {} Hz)", audio.samples.len(), audio.sample_rate);

        write_wav(&opts.output, audio.sample_rate, &audio.samples).context("Failed to write audio file")?;

        let report = ConversionReport {
            engine: engine.to_string(),
            output_path: opts.output,
            raw_text_path: opts.raw_text,
            cleaned_text_path: opts.cleaned_text,
            raw: raw_metrics,
            cleaned: cleaned_metrics,
            elapsed_secs: started.elapsed().as_secs_f64(),
            audio_secs: audio.duration_secs(),
            sample_rate: audio.sample_rate,
        };
        self.advance(Stage::Reported);

        println!("{}", report);
        self.advance(Stage::Done);

        Ok(report)
    }

    /// Run the backend on a blocking worker with the spinner alongside.
    ///
    /// The spinner is stopped and joined before returning, on success and failure.
    async fn synthesize(&self, text: String) -> Result<AudioResult> {
        let request = SynthesisRequest { text, voice: self.options.voice.clone(), speed: self.options.speed };
        let backend = Arc::clone(&self.backend);

        let spinner = Spinner::start("Generating audio");
        let outcome = tokio::task::spawn_blocking(move || backend.lock().synthesize(&request)).await;
        spinner.stop().await;

        let audio = outcome.context("Synthesis worker panicked")??;
        Ok(audio)
    }
}

/// Write a side file, creating its directory.
fn save_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Saved {} characters to {}", text.chars().count(), path.display());
    Ok(())
}

/// Reload a side file after the operator had a chance to edit it.
fn load_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Local wall-clock time as DD.MM.YYYY HH:MM, falling back to UTC.
fn local_timestamp() -> String {
    let now = time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc());
    now.format(time::macros::format_description!("[day].[month].[year] [hour]:[minute]")).unwrap_or_default()
}
