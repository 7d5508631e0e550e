//! Text normalization for speech synthesis.

use std::sync::LazyLock;

use regex::Regex;

/// Two or more consecutive line breaks mark a paragraph boundary.
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\r?\n){2,}").expect("valid paragraph regex"));

/// Normalize raw text while preserving paragraph structure.
///
/// Paragraphs are separated by blank lines. Empty paragraphs are dropped,
/// line breaks inside a paragraph become spaces and whitespace runs are
/// collapsed. Surviving paragraphs are joined with a blank line.
///
/// The result is a fixed point: normalizing it again returns it unchanged.
pub fn normalize(raw: &str) -> String {
    PARAGRAPH_BREAK
        .split(raw)
        .map(|paragraph| paragraph.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_irregular_spacing() {
        assert_eq!(normalize("Hello   world  \n\nFoo\nbar"), "Hello world\n\nFoo bar");
    }

    #[test]
    fn test_clean_text_is_unchanged() {
        let raw = "Hello.\n\nWorld.\n\nAgain.";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_drops_blank_paragraphs() {
        let raw = "\n\n  \n\nFirst\n\n\t \n\n\nSecond\n\n";
        assert_eq!(normalize(raw), "First\n\nSecond");
    }

    #[test]
    fn test_crlf_paragraphs() {
        assert_eq!(normalize("one\r\ntwo\r\n\r\nthree"), "one two\n\nthree");
    }

    #[test]
    fn test_single_newlines_do_not_split() {
        assert_eq!(normalize("a line\nwrapped\nby the pdf"), "a line wrapped by the pdf");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\n \n"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain",
            "Hello   world  \n\nFoo\nbar",
            "  leading\n\n\n\ntrailing  \n",
            "tabs\tand\u{00a0}nbsp\n \n\nnext",
            "a\r\n\r\n\r\nb\nc",
            "Überschrift\n\nÄrger   über  Öl\n",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_preserves_paragraph_order_and_count() {
        let raw = "alpha one\n\n\n\nbeta\ntwo\n\n   \n\ngamma   three";
        let normalized = normalize(raw);
        let paragraphs: Vec<_> = normalized.split("\n\n").collect();
        assert_eq!(paragraphs, vec!["alpha one", "beta two", "gamma three"]);
    }
}
