//! Split narration text into synthesis chunks.

/// Longest chunk handed to an engine in one call, in characters.
const MAX_CHUNK_CHARS: usize = 400;

/// Split text into sentence-sized chunks, in reading order.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace (so "3.14" and
/// "e.g.x" stay intact) or at a line break. Sentences longer than
/// `MAX_CHUNK_CHARS` are cut at the last comma or space before the limit.
pub fn split_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            push_sentence(&mut chunks, &current);
            current.clear();
            continue;
        }

        current.push(c);

        let at_boundary = matches!(c, '.' | '!' | '?') && chars.peek().is_none_or(|next| next.is_whitespace());
        if at_boundary {
            push_sentence(&mut chunks, &current);
            current.clear();
        }
    }

    push_sentence(&mut chunks, &current);
    chunks
}

/// Push a trimmed sentence, splitting it if it is too long for one call.
fn push_sentence(chunks: &mut Vec<String>, sentence: &str) {
    let mut rest = sentence.trim();

    while rest.chars().count() > MAX_CHUNK_CHARS {
        let limit = rest.char_indices().nth(MAX_CHUNK_CHARS).map(|(i, _)| i).unwrap_or(rest.len());
        let head = &rest[..limit];
        let cut = head.rfind(',').map(|i| i + 1).or_else(|| head.rfind(char::is_whitespace)).filter(|&i| i > 0).unwrap_or(limit);

        let piece = rest[..cut].trim();
        if !piece.is_empty() {
            chunks.push(piece.to_string());
        }
        rest = rest[cut..].trim_start();
    }

    if !rest.is_empty() {
        chunks.push(rest.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_sentences_and_paragraphs() {
        let chunks = split_chunks("Hello there. How are you?\n\nFine! Thanks");
        assert_eq!(chunks, vec!["Hello there.", "How are you?", "Fine!", "Thanks"]);
    }

    #[test]
    fn test_keeps_decimals_together() {
        let chunks = split_chunks("Pi is 3.14 roughly. Next.");
        assert_eq!(chunks, vec!["Pi is 3.14 roughly.", "Next."]);
    }

    #[test]
    fn test_empty_text() {
        assert!(split_chunks("").is_empty());
        assert!(split_chunks(" \n\n ").is_empty());
    }

    #[test]
    fn test_long_sentence_is_cut() {
        let sentence = format!("{}, {}", "word ".repeat(70).trim(), "tail ".repeat(40).trim());
        let chunks = split_chunks(&sentence);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert!(chunks[0].ends_with(','));
        assert_eq!(chunks.join(" ").split_whitespace().count(), sentence.split_whitespace().count());
    }

    #[test]
    fn test_unbroken_text_is_cut_at_limit() {
        let blob = "x".repeat(MAX_CHUNK_CHARS * 2 + 5);
        let chunks = split_chunks(&blob);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks.concat(), blob);
    }
}
