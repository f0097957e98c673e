//! Sentence boundary detection and thinking pauses.

use std::time::Duration;

use super::options::ThinkingPauses;

/// A boundary fires only when more than this many characters separate it
/// from the previous one.
pub const MIN_PAUSE_GAP: usize = 10;

const AUTO_PAUSE_PER_CHAR_MS: u64 = 10;
const AUTO_PAUSE_MIN_MS: u64 = 200;
const AUTO_PAUSE_MAX_MS: u64 = 500;

/// Characters that may end a sentence.
#[inline]
pub fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '。' | '！' | '？' | '…')
}

/// Terminators that delimit sentences when measuring their length.
#[inline]
fn is_sentence_delimiter(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '。' | '！' | '？')
}

/// Returns `true` if `revealed` ends with a terminator, ignoring trailing whitespace.
pub fn ends_sentence(revealed: &[char]) -> bool {
    revealed
        .iter()
        .rev()
        .find(|c| !c.is_whitespace())
        .is_some_and(|&c| is_sentence_terminator(c))
}

/// Length in characters of the sentence that ends at the last terminator of
/// `revealed`, terminator included, trailing whitespace excluded.
pub fn last_sentence_len(revealed: &[char]) -> usize {
    let end = revealed
        .iter()
        .rposition(|c| !c.is_whitespace())
        .map_or(0, |i| i + 1);
    if end == 0 {
        return 0;
    }
    let start = revealed[..end - 1]
        .iter()
        .rposition(|&c| is_sentence_delimiter(c))
        .map_or(0, |i| i + 1);
    end - start
}

/// Pause length for automatic mode: ten milliseconds per character, clamped
/// to 200..=500 ms.
pub fn auto_pause(sentence_len: usize) -> Duration {
    let ms = (sentence_len as u64)
        .saturating_mul(AUTO_PAUSE_PER_CHAR_MS)
        .clamp(AUTO_PAUSE_MIN_MS, AUTO_PAUSE_MAX_MS);
    Duration::from_millis(ms)
}

/// A sentence boundary that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceBoundary {
    /// Characters collected since the previous boundary. Empty unless
    /// collection was requested.
    pub sentence: String,
    /// One-based ordinal of this boundary.
    pub ordinal: usize,
    /// Extra delay to add after the current character.
    pub pause: Duration,
}

/// Per-session sentence state.
#[derive(Debug, Clone, Default)]
pub struct SentenceTracker {
    last_pause_index: Option<usize>,
    buffer: String,
    count: usize,
}

impl SentenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observes the character at `index`, the last one of `revealed`.
    ///
    /// Returns the boundary if one fires. Otherwise the character is
    /// appended to the sentence buffer when `collect` is set.
    pub fn observe(
        &mut self,
        revealed: &[char],
        index: usize,
        in_code_block: bool,
        pauses: ThinkingPauses,
        collect: bool,
    ) -> Option<SentenceBoundary> {
        if !pauses.is_enabled() {
            return None;
        }

        if !in_code_block && self.gap_satisfied(index) && ends_sentence(revealed) {
            self.last_pause_index = Some(index);
            self.count += 1;
            let pause = match pauses {
                ThinkingPauses::Fixed(d) => d,
                _ => auto_pause(last_sentence_len(revealed)),
            };
            return Some(SentenceBoundary {
                sentence: std::mem::take(&mut self.buffer),
                ordinal: self.count,
                pause,
            });
        }

        if collect {
            if let Some(&ch) = revealed.last() {
                self.buffer.push(ch);
            }
        }
        None
    }

    fn gap_satisfied(&self, index: usize) -> bool {
        match self.last_pause_index {
            // no previous pause behaves like a pause at index -1
            None => index + 1 > MIN_PAUSE_GAP,
            Some(last) => index.saturating_sub(last) > MIN_PAUSE_GAP,
        }
    }

    /// Number of boundaries fired so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn last_pause_index(&self) -> Option<usize> {
        self.last_pause_index
    }

    /// Characters collected since the last boundary.
    pub fn pending_sentence(&self) -> &str {
        &self.buffer
    }
}
