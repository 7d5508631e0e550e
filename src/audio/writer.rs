//! WAV file writer.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while writing the output audio file.
#[derive(Debug, Error)]
pub enum AudioWriteError {
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("failed to move audio into place at {}: {source}", path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write mono 16-bit PCM samples to a WAV file, creating parent directories as needed.
///
/// Samples go to a hidden sibling file which is renamed over `path` once
/// complete, so a failed write never leaves a truncated file at `path`.
///
/// # Errors
/// Returns an error if the sample rate is zero, the directory cannot be
/// created, hound fails to encode the file, or it cannot be moved into place.
pub fn write_wav(path: &Path, sample_rate: u32, samples: &[i16]) -> Result<(), AudioWriteError> {
    if sample_rate == 0 {
        return Err(AudioWriteError::InvalidSampleRate(sample_rate));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| AudioWriteError::CreateDir { path: parent.to_path_buf(), source })?;
    }

    let partial = partial_path(path);
    let result = encode(&partial, sample_rate, samples).and_then(|()| {
        std::fs::rename(&partial, path).map_err(|source| AudioWriteError::Rename { path: path.to_path_buf(), source })
    });
    if let Err(e) = result {
        if let Err(cleanup) = std::fs::remove_file(&partial) {
            debug!("Could not remove {}: {}", partial.display(), cleanup);
        }
        return Err(e);
    }

    debug!("Wrote {} samples at {} Hz", samples.len(), sample_rate);
    info!("💾 Audio saved to {}", path.display());
    Ok(())
}

fn encode(path: &Path, sample_rate: u32, samples: &[i16]) -> Result<(), AudioWriteError> {
    let spec = WavSpec { channels: 1, sample_rate, bits_per_sample: 16, sample_format: SampleFormat::Int };
    let wav_err = |source| AudioWriteError::Wav { path: path.to_path_buf(), source };

    let mut writer = WavWriter::create(path, spec).map_err(wav_err)?;
    for &sample in samples {
        writer.write_sample(sample).map_err(wav_err)?;
    }
    writer.finalize().map_err(wav_err)
}

/// `dir/.name.partial` next to the final output.
fn partial_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{}.partial", name))
}
