//! Sentence boundary tracking
//!
//! Splits page text into sentence spans and maps engine-reported character
//! offsets back onto them. Spans are derived and ephemeral: they are
//! recomputed each time playback starts for a page and never persisted.

/// Characters that terminate a sentence
const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// A substring delimited by terminal punctuation, the highlight granularity
/// during playback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceSpan {
    /// 0-based position in the page's sentence sequence
    pub index: usize,
    /// Start offset in characters, inclusive
    pub start: usize,
    /// End offset in characters, exclusive
    pub end: usize,
    /// The sentence text, terminators included
    pub text: String,
}

impl SentenceSpan {
    /// Sentence length in characters
    pub fn char_len(&self) -> usize {
        self.end - self.start
    }
}

/// Split text into sentences: maximal runs of non-terminator characters
/// followed by one or more terminators.
///
/// Text with no terminator at all is a single sentence, and an unterminated
/// tail after the last terminator becomes a final span, so the returned
/// spans always cover the whole text.
pub fn split_sentences(text: &str) -> Vec<SentenceSpan> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if TERMINATORS.contains(&chars[i]) {
            // Absorb the whole terminator run ("..." or "?!")
            while i + 1 < chars.len() && TERMINATORS.contains(&chars[i + 1]) {
                i += 1;
            }
            push_span(&mut spans, &chars, start, i + 1);
            start = i + 1;
        }
        i += 1;
    }
    if start < chars.len() {
        push_span(&mut spans, &chars, start, chars.len());
    }

    spans
}

fn push_span(spans: &mut Vec<SentenceSpan>, chars: &[char], start: usize, end: usize) {
    spans.push(SentenceSpan {
        index: spans.len(),
        start,
        end,
        text: chars[start..end].iter().collect(),
    });
}

/// Map a running character offset onto the sentence being spoken.
///
/// Each sentence accounts for its character length plus one (the
/// inter-sentence separator); the scan accumulates lengths until the offset
/// falls within `[accumulated, accumulated + length)`. Offsets landing
/// exactly on a boundary belong to the later sentence. Offsets past the
/// total return `None`, by policy, so the caller keeps its last match.
pub fn locate_sentence(spans: &[SentenceSpan], char_offset: usize) -> Option<usize> {
    let mut accumulated = 0;
    for span in spans {
        let length = span.char_len() + 1;
        if char_offset >= accumulated && char_offset < accumulated + length {
            return Some(span.index);
        }
        accumulated += length;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_each_terminator_kind() {
        let spans = split_sentences("One. Two! Three?");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "One.");
        assert_eq!(spans[1].text, " Two!");
        assert_eq!(spans[2].text, " Three?");
        assert_eq!(
            spans.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn terminator_runs_stay_with_their_sentence() {
        let spans = split_sentences("Wait... Really?!");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Wait...");
        assert_eq!(spans[1].text, " Really?!");
    }

    #[test]
    fn text_without_terminators_is_one_sentence() {
        let spans = split_sentences("no punctuation here");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].start, 0);
        assert_eq!(spans[0].text, "no punctuation here");
    }

    #[test]
    fn unterminated_tail_becomes_a_final_span() {
        let spans = split_sentences("Done. trailing words");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].text, " trailing words");
    }

    #[test]
    fn empty_text_has_no_spans() {
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn rejoined_spans_reproduce_the_text() {
        let text = "First. Second! Third? And a tail";
        let spans = split_sentences(text);
        let rejoined: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn spans_are_contiguous_char_intervals() {
        let text = "Olá. Como vai? Bem.";
        let spans = split_sentences(text);
        assert_eq!(spans[0].start, 0);
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(spans.last().map(|s| s.end), Some(text.chars().count()));
    }

    #[test]
    fn every_valid_offset_locates_exactly_one_sentence() {
        let text = "One two. Three! Four five? tail";
        let spans = split_sentences(text);
        for offset in 0..text.chars().count() {
            let index = locate_sentence(&spans, offset);
            assert!(index.is_some(), "offset {offset} found no sentence");
        }
    }

    #[test]
    fn boundary_offsets_belong_to_the_later_sentence() {
        // "ab." has effective length 4; offsets 0..=3 are sentence 0
        let spans = split_sentences("ab. cd.");
        assert_eq!(locate_sentence(&spans, 0), Some(0));
        assert_eq!(locate_sentence(&spans, 3), Some(0));
        assert_eq!(locate_sentence(&spans, 4), Some(1));
    }

    #[test]
    fn offsets_past_the_text_return_none() {
        let spans = split_sentences("ab. cd.");
        // Effective total: (3 + 1) + (4 + 1) = 9
        assert_eq!(locate_sentence(&spans, 8), Some(1));
        assert_eq!(locate_sentence(&spans, 9), None);
        assert_eq!(locate_sentence(&spans, 1000), None);
    }

    #[test]
    fn locate_on_empty_spans_is_none() {
        assert_eq!(locate_sentence(&[], 0), None);
    }
}
