//! Splitting story text into the segments shown one at a time in a video.

use serde::{Deserialize, Serialize};

/// Unit a story body is split into.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Blocks separated by blank lines or an indented line
    #[default]
    #[display("paragraph")]
    Paragraph,
    /// Runs of text ending in `.`, `!` or `?`
    #[display("sentence")]
    Sentence,
}

/// Split `text` into trimmed, non-empty segments.
///
/// Paragraphs end at a blank line or before a line indented by four or more
/// whitespace characters. Sentences end after `.`, `!` or `?` followed by
/// whitespace.
///
/// # Examples
///
/// ```
/// use dreadcast_core::{SegmentKind, split_segments};
///
/// let text = "The house was quiet.\n\nThen the scratching began. It came from above!";
/// assert_eq!(
///     split_segments(text, SegmentKind::Paragraph),
///     vec!["The house was quiet.", "Then the scratching began. It came from above!"]
/// );
/// assert_eq!(split_segments(text, SegmentKind::Sentence).len(), 3);
/// ```
pub fn split_segments(text: &str, kind: SegmentKind) -> Vec<String> {
    match kind {
        SegmentKind::Paragraph => split_paragraphs(text),
        SegmentKind::Sentence => split_sentences(text),
    }
}

fn split_paragraphs(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        let blank = line.trim().is_empty();

        if blank || (indent >= 4 && !current.is_empty()) {
            push_segment(&mut segments, &current.join("\n"));
            current.clear();
        }
        if !blank {
            current.push(line);
        }
    }
    push_segment(&mut segments, &current.join("\n"));

    segments
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(end, next)) = chars.peek() {
            if next.is_whitespace() {
                push_segment(&mut segments, &text[start..end]);
                start = end;
            }
        }
    }
    push_segment(&mut segments, &text[start..]);

    segments
}

fn push_segment(segments: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let text = "\n\nFirst line\ncontinues here.\n   \nSecond.\n\n\n\nThird.\n";
        assert_eq!(
            split_paragraphs(text),
            vec!["First line\ncontinues here.", "Second.", "Third."]
        );
    }

    #[test]
    fn test_indented_line_starts_paragraph() {
        let text = "Opening paragraph.\n    Indented start of the next.\nStill the next.";
        assert_eq!(
            split_paragraphs(text),
            vec![
                "Opening paragraph.",
                "Indented start of the next.\nStill the next."
            ]
        );
    }

    #[test]
    fn test_sentences_need_trailing_whitespace() {
        let text = "It was 3.14 a.m.  Nobody answered! Why?  ...";
        assert_eq!(
            split_sentences(text),
            vec!["It was 3.14 a.m.", "Nobody answered!", "Why?", "..."]
        );
    }

    #[test]
    fn test_blank_text_has_no_segments() {
        assert!(split_segments("  \n\n ", SegmentKind::Paragraph).is_empty());
        assert!(split_segments("", SegmentKind::Sentence).is_empty());
    }

    #[test]
    fn test_kind_parses_lowercase() {
        let kind: SegmentKind = serde_json::from_str("\"sentence\"").unwrap();
        assert_eq!(kind, SegmentKind::Sentence);
        assert_eq!(SegmentKind::default().to_string(), "paragraph");
    }
}
