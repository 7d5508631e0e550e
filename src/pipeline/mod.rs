//! Conversion pipeline: extraction, manual edits, normalization and synthesis.
//!
//! The orchestrator walks a linear sequence of stages. The two manual edit
//! pauses go through an [`EditGate`] so they can be replaced in automated runs,
//! and a cosmetic spinner runs while the backend synthesizes.

mod gate;
mod orchestrator;
mod progress;
mod report;

pub use gate::{AutoGate, ConsoleGate, EditGate};
pub use orchestrator::{Pipeline, PipelineOptions};
pub use report::ConversionReport;
