//! Animation primitives for Quill.
//!
//! Everything here is driven by elapsed time passed in by the owner rather
//! than by reading the wall clock, so a frame loop and a test can drive the
//! same code.

mod progress_bar;
mod spinner;
pub mod typewriter;

pub use progress_bar::ProgressBar;
pub use spinner::{CursorBlink, DOTS, Spinner};
pub use typewriter::{
    OptionsError, SpeedAdjustments, ThinkingPauses, TypewriterHooks, TypewriterOptions,
    TypewriterSession, TypewriterStatus,
};
