//! Reveal progress indicator.

/// Renders a reveal percentage as a bar.
///
/// # Example
/// ```rust,ignore
/// use quill_core::animation::ProgressBar;
///
/// let bar = ProgressBar::new(42).with_width(10);
/// assert_eq!(bar.render(), "[████░░░░░░]  42%");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ProgressBar {
    percent: u8,
    width: u16,
    filled_char: char,
    empty_char: char,
}

impl ProgressBar {
    /// Creates a bar for `percent`, clamped to 100.
    pub fn new(percent: u8) -> Self {
        Self {
            percent: percent.min(100),
            width: 20,
            filled_char: '\u{2588}', // █
            empty_char: '\u{2591}',  // ░
        }
    }

    #[must_use]
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_chars(mut self, filled: char, empty: char) -> Self {
        self.filled_char = filled;
        self.empty_char = empty;
        self
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Number of filled cells out of `width`, rounded down.
    pub fn filled_cells(&self, width: u16) -> u16 {
        ((u32::from(width) * u32::from(self.percent)) / 100) as u16
    }

    /// Format: `[████░░░░░░]  42%`
    pub fn render(&self) -> String {
        let filled = self.filled_cells(self.width) as usize;
        let empty = self.width as usize - filled;
        let mut out = String::with_capacity(self.width as usize * 3 + 8);
        out.push('[');
        out.extend(std::iter::repeat_n(self.filled_char, filled));
        out.extend(std::iter::repeat_n(self.empty_char, empty));
        out.push(']');
        out.push_str(&format!(" {:>3}%", self.percent));
        out
    }
}
