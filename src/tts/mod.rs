//! Text-to-speech module using sherpa-rs.
//!
//! Provides the engine-agnostic [`SpeechBackend`] interface with Kokoro and
//! VITS implementations, plus the chunking and assembly they share.

pub mod backend;
pub mod chunker;
mod kokoro;
mod vits;

pub use backend::{AudioResult, SpeechBackend, SynthesisRequest, create_backend};
