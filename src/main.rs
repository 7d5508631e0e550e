//! PDF Narrator - convert PDF documents to narrated audio with offline TTS.
//!
//! Text is extracted from the PDF, paused for manual editing, normalized for
//! speech, paused again, then synthesized with Kokoro or VITS (via sherpa-onnx)
//! into a single WAV file.

mod audio;
mod config;
mod pipeline;
mod text;
mod tts;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use config::AppConfig;
use pipeline::{AutoGate, ConsoleGate, ConversionReport, EditGate, Pipeline, PipelineOptions};
use text::PdfReader;
use tts::SpeechBackend;

/// Run the conversion with the given edit gate.
async fn convert<G: EditGate>(config: &AppConfig, backend: Box<dyn SpeechBackend>, gate: G) -> Result<ConversionReport> {
    let mut pipeline = Pipeline::new(PipelineOptions::from(config), backend, PdfReader, gate);
    let result = pipeline.run().await;
    if result.is_err() {
        error!("❌ Conversion stopped during stage {:?}", pipeline.stage());
    }
    result
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let config = AppConfig::from_args();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if config.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    info!("📖 PDF Narrator v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.validate() {
        error!("❌ Configuration error: {}", e);
        std::process::exit(1);
    }

    config.log_config();

    // Synthesis without a model is pointless, so any backend failure ends the process here
    info!("🔧 Initializing {} TTS...", config.engine);
    let backend = match tts::create_backend(&config) {
        Ok(backend) => backend,
        Err(e) => {
            error!("❌ Failed to initialize {} TTS: {}", config.engine, e);
            error!("Download the {} model files into {} and try again.", config.engine, config.model_dir.join("tts").display());
            std::process::exit(1);
        }
    };

    let report = if config.no_edit { convert(&config, backend, AutoGate).await? } else { convert(&config, backend, ConsoleGate::new()).await? };

    if let Some(ref path) = config.report_json {
        report.write_json(path)?;
        info!("Report written to {}", path.display());
    }

    info!("✅ Done");
    Ok(())
}
