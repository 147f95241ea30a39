//! Text helpers shared by the speech path and the story view.
//!
//! Stories are read aloud one sentence at a time. A sentence boundary is a
//! run of whitespace immediately preceded by a period; everything else
//! (question marks, ellipses inside quotes) stays inside the chunk.

/// Maximum number of characters kept from a diagnostic response body.
pub const DIAGNOSTIC_DETAIL_CHARS: usize = 800;

/// One sentence-like slice of a text plus the whitespace that followed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The sentence, including its terminal period.
    pub body: &'a str,
    /// The whitespace run consumed as the boundary (empty for the tail).
    pub separator: &'a str,
}

/// Split `text` at sentence boundaries, keeping the separators.
///
/// Concatenating every `body` followed by its `separator` yields `text`
/// again, byte for byte.
#[must_use]
pub fn sentence_segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !(ch.is_whitespace() && prev == Some('.')) {
            prev = Some(ch);
            continue;
        }

        let mut end = idx + ch.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            end = next_idx + next.len_utf8();
            chars.next();
        }

        segments.push(Segment {
            body: &text[start..idx],
            separator: &text[idx..end],
        });
        start = end;
        prev = None;
    }

    if start < text.len() {
        segments.push(Segment {
            body: &text[start..],
            separator: "",
        });
    }

    segments
}

/// Split a story into trimmed, non-empty sentence chunks.
///
/// This is both the unit of chunked speech playback and the paragraph list
/// shown under a finished story.
#[must_use]
pub fn split_into_chunks(text: &str) -> Vec<String> {
    sentence_segments(text)
        .into_iter()
        .map(|segment| segment.body.trim())
        .filter(|body| !body.is_empty())
        .map(str::to_string)
        .collect()
}

/// Truncate to at most `max_chars` characters without splitting a code point.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

/// Truncate a response body for logs and error payloads.
#[must_use]
pub fn truncate_detail(text: &str) -> String {
    truncate_chars(text, DIAGNOSTIC_DETAIL_CHARS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(segments: &[Segment<'_>]) -> String {
        segments
            .iter()
            .map(|s| format!("{}{}", s.body, s.separator))
            .collect()
    }

    #[test]
    fn test_split_simple_story() {
        let chunks = split_into_chunks("Rex woke up. He was hungry. The end.");
        assert_eq!(chunks, vec!["Rex woke up.", "He was hungry.", "The end."]);
    }

    #[test]
    fn test_split_keeps_other_punctuation_inside_chunk() {
        let chunks = split_into_chunks("Are you sleepy? Yes! Good night. Sleep well.");
        assert_eq!(chunks, vec!["Are you sleepy? Yes! Good night.", "Sleep well."]);
    }

    #[test]
    fn test_split_period_without_whitespace_is_not_a_boundary() {
        let chunks = split_into_chunks("It was 3.5 meters tall. Wow.");
        assert_eq!(chunks, vec!["It was 3.5 meters tall.", "Wow."]);
    }

    #[test]
    fn test_split_collapses_whitespace_runs() {
        let segments = sentence_segments("One.\n\n  Two.");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].separator, "\n\n  ");
        assert_eq!(segments[1].body, "Two.");
    }

    #[test]
    fn test_split_empty_and_blank() {
        assert!(split_into_chunks("").is_empty());
        assert!(split_into_chunks("   ").is_empty());
    }

    #[test]
    fn test_segments_round_trip() {
        let texts = [
            "Once there was a Triceratops who learned: Sharing is important.",
            "First. Second.  Third.\tFourth.\n",
            "Había una vez un Spinosaurus. ¡Qué día! Fin. ",
            "No period at all",
            "  Leading space. Then more.",
        ];
        for text in texts {
            assert_eq!(rejoin(&sentence_segments(text)), text);
        }
    }

    #[test]
    fn test_trailing_separator_has_no_empty_tail() {
        let segments = sentence_segments("Done. ");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].body, "Done.");
        assert_eq!(segments[0].separator, " ");
    }

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("ñandú", 3), "ñan");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_truncate_detail_limit() {
        let long = "x".repeat(2_000);
        assert_eq!(truncate_detail(&long).chars().count(), DIAGNOSTIC_DETAIL_CHARS);
    }
}
