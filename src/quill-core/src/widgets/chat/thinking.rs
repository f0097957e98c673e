//! "AI is typing" indicator shown while a reply is pending.

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use crate::animation::Spinner;
use crate::style::QuillStyle;

/// Default indicator label.
pub const TYPING_LABEL: &str = "AI is typing…";

/// A spinner followed by a label.
///
/// ```text
/// ⠹ AI is typing…
/// ```
pub struct ThinkingIndicator<'a> {
    spinner: &'a Spinner,
    label: &'a str,
}

impl<'a> ThinkingIndicator<'a> {
    pub fn new(spinner: &'a Spinner) -> Self {
        Self {
            spinner,
            label: TYPING_LABEL,
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    pub fn line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(self.spinner.frame(), QuillStyle::cursor()),
            Span::raw(" "),
            Span::styled(self.label.to_string(), QuillStyle::dimmed()),
        ])
    }
}

impl Widget for ThinkingIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_line(area.x, area.y, &self.line(), area.width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_indicator_follows_spinner() {
        let mut spinner = Spinner::dots();
        spinner.advance(Duration::from_millis(160));
        let area = Rect::new(0, 0, 20, 1);
        let mut buf = Buffer::empty(area);
        ThinkingIndicator::new(&spinner).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "⠹");
        assert_eq!(buf[(2, 0)].symbol(), "A");
    }

    #[test]
    fn test_custom_label() {
        let spinner = Spinner::dots();
        let line = ThinkingIndicator::new(&spinner).label("thinking").line();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "⠋ thinking");
    }
}
