//! Per-character speed model.
//!
//! Classifies the character about to be revealed as fence boundary, fenced
//! code, punctuation or plain text and derives its nominal delay from the
//! base speed.

use super::options::SpeedAdjustments;

/// Number of characters (starting at the current one) scanned for a fence.
pub const FENCE_LOOKAHEAD: usize = 10;

const FENCE_LEN: usize = 3;

/// Punctuation that changes reveal speed (Latin and CJK).
#[inline]
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        ',' | '.' | ';' | ':' | '，' | '。' | '；' | '：' | '、'
    )
}

/// Outcome of classifying one character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharSpeed {
    /// Nominal delay in milliseconds, before jitter and pauses.
    pub delay_ms: f64,
    /// The caller must flip its in-code-block flag.
    pub toggles_fence: bool,
}

/// Computes the nominal delay for `chars[index]`.
///
/// A fence is detected when "```" starts at `index`, or, while already inside
/// a code block, when it occurs anywhere in the look-ahead window. A detected
/// fence toggles the code-block flag and uses the unmodified base speed.
/// Inside code the base speed is divided by `code_block`; punctuation is
/// multiplied by `punctuation`.
pub fn char_speed(
    chars: &[char],
    index: usize,
    in_code_block: bool,
    base_ms: f64,
    adjustments: &SpeedAdjustments,
) -> CharSpeed {
    let end = (index + FENCE_LOOKAHEAD).min(chars.len());
    let window = chars.get(index..end).unwrap_or_default();

    if starts_with_fence(window) || (in_code_block && contains_fence(window)) {
        return CharSpeed {
            delay_ms: base_ms,
            toggles_fence: true,
        };
    }

    let delay_ms = if in_code_block {
        base_ms / adjustments.code_block
    } else if window.first().copied().is_some_and(is_punctuation) {
        base_ms * adjustments.punctuation
    } else {
        base_ms
    };

    CharSpeed {
        delay_ms,
        toggles_fence: false,
    }
}

fn starts_with_fence(window: &[char]) -> bool {
    window.len() >= FENCE_LEN && window[..FENCE_LEN].iter().all(|&c| c == '`')
}

fn contains_fence(window: &[char]) -> bool {
    window.windows(FENCE_LEN).any(|w| w.iter().all(|&c| c == '`'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_plain_char_uses_base_speed() {
        let text = chars("hello");
        let speed = char_speed(&text, 0, false, 30.0, &SpeedAdjustments::default());
        assert_eq!(speed.delay_ms, 30.0);
        assert!(!speed.toggles_fence);
    }

    #[test]
    fn test_punctuation_multiplies_literally() {
        let text = chars("a, b。c");
        let adj = SpeedAdjustments::default();
        assert_eq!(char_speed(&text, 1, false, 30.0, &adj).delay_ms, 15.0);
        assert_eq!(char_speed(&text, 4, false, 30.0, &adj).delay_ms, 15.0);
        // '!' is a sentence terminator but not a speed punctuation mark
        let text = chars("a!");
        assert_eq!(char_speed(&text, 1, false, 30.0, &adj).delay_ms, 30.0);
    }

    #[test]
    fn test_fence_start_toggles() {
        let text = chars("```js\nlet x = 1;\n");
        let speed = char_speed(&text, 0, false, 30.0, &SpeedAdjustments::default());
        assert!(speed.toggles_fence);
        assert_eq!(speed.delay_ms, 30.0);
    }

    #[test]
    fn test_inside_code_block_is_faster() {
        let text = chars("```js\nlet value = compute_something();\n");
        let speed = char_speed(&text, 8, true, 30.0, &SpeedAdjustments::default());
        assert!(!speed.toggles_fence);
        assert_eq!(speed.delay_ms, 10.0);
    }

    #[test]
    fn test_closing_fence_in_window_toggles_only_inside_code() {
        let text = chars("x = 1;\n```\nafter");
        let adj = SpeedAdjustments::default();
        assert!(char_speed(&text, 0, true, 30.0, &adj).toggles_fence);
        assert!(!char_speed(&text, 0, false, 30.0, &adj).toggles_fence);
    }

    #[test]
    fn test_fence_beyond_window_not_seen() {
        let text = chars("0123456789```");
        let adj = SpeedAdjustments::default();
        assert!(!char_speed(&text, 0, true, 30.0, &adj).toggles_fence);
        assert!(!char_speed(&text, 2, true, 30.0, &adj).toggles_fence);
        assert!(char_speed(&text, 3, true, 30.0, &adj).toggles_fence);
    }

    #[test]
    fn test_index_past_end_is_plain() {
        let text = chars("ab");
        let speed = char_speed(&text, 5, false, 30.0, &SpeedAdjustments::default());
        assert_eq!(speed.delay_ms, 30.0);
    }
}
