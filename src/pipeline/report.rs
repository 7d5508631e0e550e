//! Conversion report.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::text::TextMetrics;

/// Summary of a finished conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub engine: String,
    pub output_path: PathBuf,
    pub raw_text_path: PathBuf,
    pub cleaned_text_path: PathBuf,
    pub raw: TextMetrics,
    pub cleaned: TextMetrics,
    pub elapsed_secs: f64,
    pub audio_secs: f64,
    pub sample_rate: u32,
}

impl ConversionReport {
    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write report to {}", path.display()))
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "\n{}", rule)?;
        writeln!(f, "PDF to WAV Conversion Complete ({})", self.engine)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "\nAudio file saved to: {}", self.output_path.display())?;
        writeln!(f, "Audio length: {} (MM:SS) at {} Hz", format_mmss(self.audio_secs), self.sample_rate)?;
        writeln!(f, "Processing time: {} (MM:SS)", format_mmss(self.elapsed_secs))?;
        writeln!(f, "\nText Statistics:")?;
        write!(f, "{}", StatisticsTable { raw: &self.raw, cleaned: &self.cleaned })?;
        writeln!(f, "\nOutput Files:")?;
        writeln!(f, "- Raw text: {}", self.raw_text_path.display())?;
        writeln!(f, "- Cleaned text: {}", self.cleaned_text_path.display())?;
        writeln!(f, "{}", rule)
    }
}

/// Raw vs cleaned metrics table.
pub(crate) struct StatisticsTable<'a> {
    pub raw: &'a TextMetrics,
    pub cleaned: &'a TextMetrics,
}

impl fmt::Display for StatisticsTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(45);
        let rows = [
            ("Characters", self.raw.characters, self.cleaned.characters),
            ("Words", self.raw.words, self.cleaned.words),
            ("Tokens (approx)", self.raw.approx_tokens, self.cleaned.approx_tokens),
        ];

        writeln!(f, "{}", rule)?;
        writeln!(f, "{:<15} | {:>12} | {:>12}", "Metric", "Raw Text", "Cleaned Text")?;
        writeln!(f, "{}", rule)?;
        for (label, raw, cleaned) in rows {
            writeln!(f, "{:<15} | {:>12} | {:>12}", label, group_thousands(raw), group_thousands(cleaned))?;
        }
        Ok(())
    }
}

/// Format seconds as MM:SS, truncating fractions. Minutes are not wrapped into hours.
pub fn format_mmss(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 { seconds as u64 } else { 0 };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format an integer with comma thousands separators.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ConversionReport {
        ConversionReport {
            engine: "KOKORO".to_string(),
            output_path: PathBuf::from("audio/paper.wav"),
            raw_text_path: PathBuf::from("temp/full_text.txt"),
            cleaned_text_path: PathBuf::from("temp/cleaned_text.txt"),
            raw: TextMetrics { characters: 12345, words: 2000, approx_tokens: 3086 },
            cleaned: TextMetrics { characters: 12000, words: 1990, approx_tokens: 3000 },
            elapsed_secs: 125.9,
            audio_secs: 61.0,
            sample_rate: 24000,
        }
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0.0), "00:00");
        assert_eq!(format_mmss(59.99), "00:59");
        assert_eq!(format_mmss(125.9), "02:05");
        assert_eq!(format_mmss(3725.0), "62:05");
        assert_eq!(format_mmss(-4.0), "00:00");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_report_display() {
        let text = sample_report().to_string();
        assert!(text.contains("PDF to WAV Conversion Complete (KOKORO)"));
        assert!(text.contains("Processing time: 02:05 (MM:SS)"));
        assert!(text.contains("Characters      |       12,345 |       12,000"));
        assert!(text.contains("- Cleaned text: temp/cleaned_text.txt"));
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("run.json");
        sample_report().write_json(&path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["engine"], "KOKORO");
        assert_eq!(value["raw"]["characters"], 12345);
        assert_eq!(value["sample_rate"], 24000);
    }
}
