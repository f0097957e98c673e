//! Typewriter reveal engine for chat replies.
//!
//! A [`TypewriterSession`] reveals one message character by character with
//! timing shaped by the content:
//!
//! - fenced code is typed faster ([`lexical`]),
//! - punctuation uses its own multiplier ([`lexical`]),
//! - finished sentences add a short "thinking" pause ([`pause`]),
//! - every delay carries a little random jitter.
//!
//! Sessions are independent: each chat message owns its own session and
//! several may animate at once.

pub mod lexical;
mod options;
pub mod pause;
mod session;
mod state;

#[cfg(test)]
mod tests;

pub use options::{
    DEFAULT_RANDOMNESS, DEFAULT_SPEED_MS, OptionsError, SpeedAdjustments, ThinkingPauses,
    TypewriterOptions,
};
pub use pause::{MIN_PAUSE_GAP, SentenceBoundary, SentenceTracker};
pub use session::{SKIP_THRESHOLD_PERCENT, TypewriterSession};
pub use state::{CompleteHook, SentenceHook, TypewriterHooks, TypewriterStatus};
