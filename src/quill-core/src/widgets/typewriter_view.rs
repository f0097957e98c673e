//! Widget that shows the revealed part of a [`TypewriterSession`].
//!
//! ```text
//! Here is an example:
//!  js
//!  const x = 1;▋
//! [██████░░░░░░░░░░░░░░]  31%  [skip]
//! ```

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use crate::animation::{ProgressBar, TypewriterSession};
use crate::render::RenderStrategy;
use crate::style::QuillStyle;

use super::wrapping::wrap_lines;

/// Default reveal cursor glyph.
pub const DEFAULT_CURSOR: &str = "▋";

/// Default label of the skip control.
pub const DEFAULT_SKIP_LABEL: &str = "[skip]";

const PROGRESS_WIDTH: u16 = 20;

/// Presentation settings shared by every message view.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub strategy: RenderStrategy,
    pub show_cursor: bool,
    pub cursor: String,
    pub show_skip_button: bool,
    pub skip_label: String,
    pub show_progress: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            strategy: RenderStrategy::default(),
            show_cursor: true,
            cursor: DEFAULT_CURSOR.to_string(),
            show_skip_button: true,
            skip_label: DEFAULT_SKIP_LABEL.to_string(),
            show_progress: true,
        }
    }
}

/// Renders one session: content, cursor, and the progress/skip row.
pub struct TypewriterView<'a> {
    session: &'a TypewriterSession,
    options: &'a ViewOptions,
    cursor_visible: bool,
}

impl<'a> TypewriterView<'a> {
    pub fn new(session: &'a TypewriterSession, options: &'a ViewOptions) -> Self {
        Self {
            session,
            options,
            cursor_visible: true,
        }
    }

    /// Blink phase of the cursor, usually from a shared `CursorBlink`.
    pub fn cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    // Paused sessions keep the footer so the "paused" marker stays visible.
    fn shows_footer(&self) -> bool {
        self.options.show_progress && (self.session.is_typing() || self.session.is_paused())
    }

    /// Lines for `width` columns, wrapped, with cursor and footer.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let text = self.session.display_text();
        let mut lines = if text.is_empty() {
            Vec::new()
        } else {
            wrap_lines(&self.options.strategy.render(text), width as usize)
        };

        if self.options.show_cursor && self.session.is_typing() && self.cursor_visible {
            let cursor = Span::styled(self.options.cursor.clone(), QuillStyle::cursor());
            match lines.last_mut() {
                Some(last) if last.width() < width as usize => last.spans.push(cursor),
                _ => lines.push(Line::from(cursor)),
            }
        }

        if self.shows_footer() {
            lines.push(self.footer(width));
        }

        lines
    }

    fn footer(&self, width: u16) -> Line<'static> {
        let bar_width = PROGRESS_WIDTH.min(width.saturating_sub(8));
        let bar = ProgressBar::new(self.session.progress()).with_width(bar_width);
        let mut spans = vec![Span::styled(bar.render(), QuillStyle::progress_filled())];

        if self.session.is_paused() {
            spans.push(Span::styled("  paused", QuillStyle::warning()));
        }
        if self.options.show_skip_button && self.session.can_skip() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                self.options.skip_label.clone(),
                QuillStyle::skip_button(),
            ));
        }

        Line::from(spans)
    }

    /// Rows needed to render at `width`.
    pub fn required_height(&self, width: u16) -> u16 {
        self.lines(width).len().min(u16::MAX as usize) as u16
    }
}

impl Widget for TypewriterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        for (i, line) in self
            .lines(area.width)
            .iter()
            .take(area.height as usize)
            .enumerate()
        {
            buf.set_line(area.x, area.y + i as u16, line, area.width);
        }
    }
}
