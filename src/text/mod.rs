//! Text processing module.
//!
//! Extracts raw text from PDF documents, normalizes it for speech synthesis,
//! and computes the length metrics used for estimation and reporting.

pub mod extractor;
mod metrics;
mod normalizer;

pub use extractor::{DocumentReader, PdfReader, extract};
pub use metrics::TextMetrics;
pub use normalizer::normalize;
