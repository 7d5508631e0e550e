//! Audio output module.
//!
//! Converts synthesized float samples to 16-bit PCM and writes WAV files with hound.

pub mod util;
mod writer;

pub use writer::{AudioWriteError, write_wav};
