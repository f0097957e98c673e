//! Configuration for a single typewriter session.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default milliseconds per revealed character.
pub const DEFAULT_SPEED_MS: f64 = 30.0;

/// Default random jitter applied to each delay (fraction of nominal).
pub const DEFAULT_RANDOMNESS: f64 = 0.15;

/// Errors raised by [`TypewriterOptions::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    /// Speed was negative, NaN or infinite.
    #[error("speed must be a finite, non-negative number of milliseconds (got {0})")]
    InvalidSpeed(f64),

    /// Randomness outside of `[0, 1]`.
    #[error("randomness must be within [0, 1] (got {0})")]
    InvalidRandomness(f64),

    /// A speed multiplier was zero, negative or not finite.
    #[error("speed adjustment '{name}' must be a finite positive multiplier (got {value})")]
    InvalidAdjustment { name: &'static str, value: f64 },

    /// The slowest per-character delay does not fit in a `Duration`.
    #[error("speed {speed_ms} ms with the configured adjustments yields delays that are too long")]
    DelayTooLong { speed_ms: f64 },
}

/// Upper bound for any nominal per-character delay, in milliseconds.
const MAX_DELAY_MS: f64 = u64::MAX as f64;

// ============================================================
// THINKING PAUSES
// ============================================================

/// Extra delay inserted after a sentence boundary.
///
/// Deserializes from either a boolean (`true` = [`ThinkingPauses::Auto`])
/// or an integer number of milliseconds. A fixed value of `0` means disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "ThinkingPausesRepr", into = "ThinkingPausesRepr")]
pub enum ThinkingPauses {
    /// No pauses, and no sentence detection.
    Disabled,
    /// Pause length derived from the length of the finished sentence.
    #[default]
    Auto,
    /// Always pause for the given duration.
    Fixed(Duration),
}

impl ThinkingPauses {
    /// Creates a fixed pause from milliseconds; `0` disables pauses.
    pub fn fixed_ms(ms: u64) -> Self {
        if ms == 0 {
            Self::Disabled
        } else {
            Self::Fixed(Duration::from_millis(ms))
        }
    }

    /// Returns `true` unless pauses are disabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum ThinkingPausesRepr {
    Flag(bool),
    Millis(u64),
}

impl From<ThinkingPausesRepr> for ThinkingPauses {
    fn from(repr: ThinkingPausesRepr) -> Self {
        match repr {
            ThinkingPausesRepr::Flag(true) => Self::Auto,
            ThinkingPausesRepr::Flag(false) => Self::Disabled,
            ThinkingPausesRepr::Millis(ms) => Self::fixed_ms(ms),
        }
    }
}

impl From<ThinkingPauses> for ThinkingPausesRepr {
    fn from(pauses: ThinkingPauses) -> Self {
        match pauses {
            ThinkingPauses::Disabled => Self::Flag(false),
            ThinkingPauses::Auto => Self::Flag(true),
            ThinkingPauses::Fixed(d) => Self::Millis(d.as_millis() as u64),
        }
    }
}

// ============================================================
// SPEED ADJUSTMENTS
// ============================================================

/// Per-content speed multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedAdjustments {
    /// Divisor applied to the base delay inside fenced code.
    pub code_block: f64,
    /// Carried for configuration compatibility; not applied to timing.
    pub long_text: f64,
    /// Multiplier applied to the base delay on punctuation.
    pub punctuation: f64,
}

impl Default for SpeedAdjustments {
    fn default() -> Self {
        Self {
            code_block: 3.0,
            long_text: 1.5,
            punctuation: 0.5,
        }
    }
}

// ============================================================
// OPTIONS
// ============================================================

/// Options recognised by a [`TypewriterSession`](super::TypewriterSession).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterOptions {
    /// Base milliseconds per character.
    pub speed_ms: f64,
    /// Delay jitter as a fraction of nominal, in `[0, 1]`.
    pub randomness: f64,
    /// Start revealing as soon as text is set.
    pub auto_start: bool,
    /// Whether skip-to-end is honoured.
    pub interruptible: bool,
    /// Sentence pause policy.
    pub thinking_pauses: ThinkingPauses,
    /// Content-dependent speed multipliers.
    pub speed_adjustments: SpeedAdjustments,
    /// Fixed RNG seed; a fresh OS seed is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TypewriterOptions {
    fn default() -> Self {
        Self {
            speed_ms: DEFAULT_SPEED_MS,
            randomness: DEFAULT_RANDOMNESS,
            auto_start: true,
            interruptible: true,
            thinking_pauses: ThinkingPauses::Auto,
            speed_adjustments: SpeedAdjustments::default(),
            seed: None,
        }
    }
}

impl TypewriterOptions {
    #[must_use]
    pub fn with_speed_ms(mut self, speed_ms: f64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    #[must_use]
    pub fn with_randomness(mut self, randomness: f64) -> Self {
        self.randomness = randomness;
        self
    }

    #[must_use]
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    #[must_use]
    pub fn with_interruptible(mut self, interruptible: bool) -> Self {
        self.interruptible = interruptible;
        self
    }

    #[must_use]
    pub fn with_thinking_pauses(mut self, pauses: ThinkingPauses) -> Self {
        self.thinking_pauses = pauses;
        self
    }

    #[must_use]
    pub fn with_speed_adjustments(mut self, adjustments: SpeedAdjustments) -> Self {
        self.speed_adjustments = adjustments;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Auto-start is held back while the user is typing.
    #[inline]
    pub fn should_auto_start(&self, user_typing: bool) -> bool {
        self.auto_start && !user_typing
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.speed_ms.is_finite() || self.speed_ms < 0.0 {
            return Err(OptionsError::InvalidSpeed(self.speed_ms));
        }
        if !(0.0..=1.0).contains(&self.randomness) {
            return Err(OptionsError::InvalidRandomness(self.randomness));
        }
        let adj = &self.speed_adjustments;
        for (name, value) in [
            ("code_block", adj.code_block),
            ("long_text", adj.long_text),
            ("punctuation", adj.punctuation),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OptionsError::InvalidAdjustment { name, value });
            }
        }
        let slowest = self.speed_ms
            * adj.punctuation.max(1.0 / adj.code_block).max(1.0)
            * (1.0 + self.randomness);
        if !slowest.is_finite() || slowest > MAX_DELAY_MS {
            return Err(OptionsError::DelayTooLong {
                speed_ms: self.speed_ms,
            });
        }
        Ok(())
    }
}
