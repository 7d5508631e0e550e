//! Configuration module for the PDF narrator.
//!
//! Provides CLI argument parsing, model path resolution and the voice catalogue.

#[allow(clippy::module_inception)]
mod config;
pub mod voices;

pub use config::{AppConfig, Engine};
