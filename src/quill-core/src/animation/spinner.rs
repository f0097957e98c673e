//! Frame animations driven by elapsed time: the "typing" spinner and the
//! blinking reveal cursor.

use std::time::Duration;

/// Braille dots, used for the "AI is typing" indicator.
pub const DOTS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Cycles through a fixed set of frames.
///
/// # Example
/// ```rust,ignore
/// use std::time::Duration;
/// use quill_core::animation::Spinner;
///
/// let mut spinner = Spinner::dots();
/// spinner.advance(Duration::from_millis(160));
/// assert_eq!(spinner.frame(), "⠹");
/// ```
#[derive(Debug, Clone)]
pub struct Spinner {
    frames: &'static [&'static str],
    interval: Duration,
    elapsed: Duration,
}

impl Spinner {
    pub fn new(frames: &'static [&'static str], interval: Duration) -> Self {
        Self {
            frames,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Braille spinner at 80 ms per frame.
    pub fn dots() -> Self {
        Self::new(DOTS, Duration::from_millis(80))
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.elapsed += elapsed;
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Index of the frame currently shown.
    pub fn current_index(&self) -> usize {
        if self.frames.is_empty() || self.interval.is_zero() {
            return 0;
        }
        let steps = self.elapsed.as_nanos() / self.interval.as_nanos();
        (steps % self.frames.len() as u128) as usize
    }

    #[inline]
    pub fn frame(&self) -> &'static str {
        self.frames.get(self.current_index()).copied().unwrap_or(" ")
    }
}

/// Step-blink for the reveal cursor: visible for the first half of each
/// period, hidden for the second.
#[derive(Debug, Clone)]
pub struct CursorBlink {
    period: Duration,
    elapsed: Duration,
}

impl CursorBlink {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.elapsed += elapsed;
        if !self.period.is_zero() {
            let nanos = self.elapsed.as_nanos() % self.period.as_nanos();
            self.elapsed = Duration::from_nanos(nanos as u64);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.period.is_zero() || self.elapsed < self.period / 2
    }
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
