//! Application configuration and CLI argument parsing.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::voices;

/// Hardware acceleration provider for ONNX models.
/// Auto-detected based on platform if not specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// CPU inference (default fallback, always available)
    #[default]
    Cpu,
    /// NVIDIA CUDA acceleration (Linux only, requires CUDA toolkit)
    Cuda,
    /// Apple CoreML acceleration (macOS only, uses Neural Engine)
    #[value(name = "coreml")]
    CoreMl,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_sherpa_provider())
    }
}

impl Provider {
    /// Convert to sherpa-rs provider string.
    pub fn as_sherpa_provider(&self) -> &'static str {
        match self {
            Provider::Cpu => "cpu",
            Provider::Cuda => "cuda",
            Provider::CoreMl => "coreml",
        }
    }
}

/// Speech synthesis engine, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Kokoro multi-speaker model (named voices, native speed control)
    #[default]
    Kokoro,
    /// VITS single-speaker models (one voice per language, speed is ignored)
    Vits,
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Engine::Kokoro => write!(f, "KOKORO"),
            Engine::Vits => write!(f, "VITS"),
        }
    }
}

/// Narration language for engines with per-language models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// German
    De,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
        }
    }
}

/// Directory name of the Kokoro model bundle.
const KOKORO_BUNDLE: &str = "kokoro-multi-lang-v1_0";

/// PDF narrator configuration.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "pdf-narrator")]
#[command(author, version, about = "Convert PDF documents to narrated audio", long_about = None)]
pub struct AppConfig {
    /// Source PDF document
    #[arg(required_unless_present_any = ["list_voices", "voice_info"])]
    pub input: Option<PathBuf>,

    /// Output WAV file (defaults to ./audio/<input name>.wav)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// List all available TTS voices and exit
    #[arg(long)]
    pub list_voices: bool,

    /// Show detailed information about a specific Kokoro voice and exit
    #[arg(long)]
    pub voice_info: Option<String>,

    /// Speech synthesis engine
    #[arg(long, short = 'e', env = "TTS_ENGINE", value_enum, default_value = "kokoro")]
    pub engine: Engine,

    /// Narration language (selects the VITS model; Kokoro derives it from the voice)
    #[arg(long, short = 'l', env = "TTS_LANGUAGE", value_enum, default_value = "en")]
    pub language: Language,

    /// Voice name. Kokoro: af_heart, am_adam, bf_emma, bm_george, ... or a numeric speaker ID.
    /// VITS has a single voice per language and ignores this.
    #[arg(long, default_value = "af_heart")]
    pub voice: String,

    /// Speech speed multiplier (ignored by VITS)
    #[arg(long, default_value = "1.0", value_parser = parse_speed)]
    pub speed: f32,

    /// Directory containing TTS model files
    #[arg(long, short = 'd', env = "MODEL_DIR", default_value_os_t = default_model_dir())]
    pub model_dir: PathBuf,

    /// Side file holding the raw extracted text for manual editing
    #[arg(long, default_value = "./temp/full_text.txt")]
    pub raw_text: PathBuf,

    /// Side file holding the cleaned text for manual editing
    #[arg(long, default_value = "./temp/cleaned_text.txt")]
    pub cleaned_text: PathBuf,

    /// Skip the manual edit pauses
    #[arg(long)]
    pub no_edit: bool,

    /// Also write the conversion report as JSON to this path
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Hardware acceleration provider (auto-detected if not specified)
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,

    /// Number of TTS inference threads (0 = auto-detect based on CPU cores)
    #[arg(long, default_value = "0")]
    pub num_threads: usize,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        let mut config = Self::parse();

        // Handle voice listing commands
        if config.list_voices {
            voices::print_voices();
            std::process::exit(0);
        }

        if let Some(ref voice_name) = config.voice_info {
            match voices::print_voice_info(voice_name) {
                Ok(_) => std::process::exit(0),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        config.normalize_thread_counts();
        config
    }

    /// Auto-detect the thread count based on CPU cores and provider.
    ///
    /// With CUDA the GPU handles parallelism, so a single CPU thread avoids contention.
    fn normalize_thread_counts(&mut self) {
        if self.num_threads == 0 {
            self.num_threads = if self.effective_provider() == Provider::Cuda { 1 } else { (num_cpus::get() / 2).max(1) };
        }
    }

    /// Get the effective inference provider.
    pub fn effective_provider(&self) -> Provider {
        self.provider.unwrap_or_else(detect_provider)
    }

    /// Source document path (empty when only listing voices).
    pub fn input_path(&self) -> PathBuf {
        self.input.clone().unwrap_or_default()
    }

    /// Destination audio path, derived from the input name unless given explicitly.
    pub fn output_path(&self) -> PathBuf {
        if let Some(ref output) = self.output {
            return output.clone();
        }
        let stem = self.input.as_ref().and_then(|p| p.file_stem()).map(|s| s.to_string_lossy().to_string()).unwrap_or_else(|| "narration".to_string());
        PathBuf::from("./audio").join(format!("{}.wav", stem))
    }

    fn kokoro_dir(&self) -> PathBuf {
        self.model_dir.join("tts").join(KOKORO_BUNDLE)
    }

    /// Get the path to the Kokoro TTS model (multi-lang v1.0 - supports CoreML).
    pub fn kokoro_model_path(&self) -> PathBuf {
        self.kokoro_dir().join("model.onnx")
    }

    /// Get the path to the Kokoro voices.bin file.
    pub fn kokoro_voices_path(&self) -> PathBuf {
        self.kokoro_dir().join("voices.bin")
    }

    /// Get the path to the Kokoro tokens file.
    pub fn kokoro_tokens_path(&self) -> PathBuf {
        self.kokoro_dir().join("tokens.txt")
    }

    /// Get the path to the Kokoro espeak-ng data directory.
    pub fn kokoro_data_dir(&self) -> PathBuf {
        self.kokoro_dir().join("espeak-ng-data")
    }

    /// Get the path to the Kokoro dict directory (for Chinese segmentation).
    pub fn kokoro_dict_dir(&self) -> PathBuf {
        self.kokoro_dir().join("dict")
    }

    /// Get the lexicon file list for Kokoro based on voice name.
    /// The model includes lexicon-us-en.txt (American), lexicon-gb-en.txt (British), lexicon-zh.txt (Chinese)
    /// For English/Chinese, use lexicon files. For other languages, return empty (use lang instead).
    pub fn kokoro_lexicon(&self) -> String {
        let dir = self.kokoro_dir();
        match voice_prefix(&self.voice) {
            Some("af" | "am") | None => dir.join("lexicon-us-en.txt").to_string_lossy().to_string(),
            Some("bf" | "bm") => dir.join("lexicon-gb-en.txt").to_string_lossy().to_string(),
            Some("zf" | "zm") => {
                // Chinese with English fallback
                format!("{},{}", dir.join("lexicon-us-en.txt").to_string_lossy(), dir.join("lexicon-zh.txt").to_string_lossy())
            }
            Some(_) => String::new(), // Other languages use lang parameter
        }
    }

    /// Get the espeak language code for Kokoro voices without a lexicon.
    /// Reference: <https://github.com/k2-fsa/sherpa-onnx/blob/master/sherpa-onnx/csrc/offline-tts-kokoro-model-config.cc>
    pub fn kokoro_language(&self) -> &'static str {
        match voice_prefix(&self.voice) {
            Some("ef" | "em") => "es",
            Some("ff") => "fr",
            Some("hf" | "hm") => "hi",
            Some("if" | "im") => "it",
            Some("jf" | "jm") => "ja",
            Some("pf" | "pm") => "pt-br",
            _ => "", // English/Chinese use lexicon files
        }
    }

    /// Directory name of the VITS model bundle for the configured language.
    pub fn vits_bundle(&self) -> &'static str {
        match self.language {
            Language::En => "vits-piper-en_US-ljspeech-medium",
            Language::De => "vits-piper-de_DE-thorsten-medium",
        }
    }

    fn vits_dir(&self) -> PathBuf {
        self.model_dir.join("tts").join(self.vits_bundle())
    }

    /// Get the path to the VITS model for the configured language.
    pub fn vits_model_path(&self) -> PathBuf {
        let file = match self.language {
            Language::En => "en_US-ljspeech-medium.onnx",
            Language::De => "de_DE-thorsten-medium.onnx",
        };
        self.vits_dir().join(file)
    }

    /// Get the path to the VITS tokens file.
    pub fn vits_tokens_path(&self) -> PathBuf {
        self.vits_dir().join("tokens.txt")
    }

    /// Get the path to the VITS espeak-ng data directory.
    pub fn vits_data_dir(&self) -> PathBuf {
        self.vits_dir().join("espeak-ng-data")
    }

    /// Model files the configured engine needs on disk.
    pub fn required_model_files(&self) -> Vec<PathBuf> {
        match self.engine {
            Engine::Kokoro => {
                let mut files = vec![self.kokoro_model_path(), self.kokoro_voices_path(), self.kokoro_tokens_path(), self.kokoro_data_dir(), self.kokoro_dict_dir()];
                files.extend(self.kokoro_lexicon().split(',').filter(|p| !p.is_empty()).map(PathBuf::from));
                files
            }
            Engine::Vits => vec![self.vits_model_path(), self.vits_tokens_path(), self.vits_data_dir()],
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.speed <= 0.0 || !self.speed.is_finite() {
            anyhow::bail!("TTS speed must be a positive number");
        }

        if self.raw_text == self.cleaned_text {
            anyhow::bail!("Raw and cleaned text side files must be different paths");
        }

        if self.input.as_ref().is_some_and(|input| *input == self.output_path()) {
            anyhow::bail!("Output path must differ from the input document");
        }

        Ok(())
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Configuration:");
        info!("  Input: {}", self.input_path().display());
        info!("  Output: {}", self.output_path().display());
        info!("  Model directory: {}", self.model_dir.display());
        info!("  Engine: {}", self.engine);
        info!("  Language: {}", self.language.code());
        info!("  Voice: {}", self.voice);
        info!("  Speed: {}", self.speed);
        info!("  Provider: {}", self.effective_provider());
        info!("  Threads: {}", self.num_threads);
        info!("  Side files: {}, {}", self.raw_text.display(), self.cleaned_text.display());
        if self.no_edit {
            info!("  Manual edit pauses disabled");
        }
    }
}

/// Two-letter Kokoro voice prefix (e.g. "bf" for British female).
///
/// Numeric speaker IDs are mapped back to their voice name first.
fn voice_prefix(voice: &str) -> Option<&'static str> {
    voices::find_voice(voice).and_then(|v| v.name.get(..2))
}

/// Get the default model directory (~/.pdf-narrator/models).
fn default_model_dir() -> PathBuf {
    if let Some(home_dir) = dirs::home_dir() {
        home_dir.join(".pdf-narrator").join("models")
    } else {
        PathBuf::from("models")
    }
}

/// Auto-detect the best hardware acceleration provider.
fn detect_provider() -> Provider {
    #[cfg(target_os = "macos")]
    {
        Provider::CoreMl
    }

    #[cfg(target_os = "linux")]
    {
        if has_nvidia_gpu() { Provider::Cuda } else { Provider::Cpu }
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux")))]
    {
        Provider::Cpu
    }
}

/// Check if an NVIDIA GPU is available (Linux only).
#[cfg(target_os = "linux")]
fn has_nvidia_gpu() -> bool {
    use std::path::Path;

    let nvidia_paths = [
        "/dev/nvidia0",
        "/dev/nvidiactl",
        "/dev/nvidia-uvm",
        // Jetson devices
        "/dev/nvhost-ctrl",
        "/dev/nvhost-ctrl-gpu",
        "/etc/nv_tegra_release",
    ];

    nvidia_paths.iter().any(|path| Path::new(path).exists())
}

/// Parse and validate the speed multiplier (must be positive).
fn parse_speed(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{}' is not a valid float", s))?;
    if value > 0.0 && value.is_finite() { Ok(value) } else { Err(format!("speed must be positive, got {}", value)) }
}
