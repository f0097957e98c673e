//! Single message cell widget.

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use super::types::ChatMessage;
use crate::animation::TypewriterSession;
use crate::markdown::render_plain;
use crate::style::QuillStyle;
use crate::widgets::typewriter_view::{TypewriterView, ViewOptions};
use crate::widgets::wrapping::wrap_lines;

const LIKED_MARK: &str = "♥";

/// Renders one message: a header row (role, time, like mark) and a body.
///
/// Assistant messages with a session show only the revealed text; without
/// one the full content is rendered.
pub struct MessageCell<'a> {
    message: &'a ChatMessage,
    session: Option<&'a TypewriterSession>,
    view: &'a ViewOptions,
    cursor_visible: bool,
    show_timestamp: bool,
}

impl<'a> MessageCell<'a> {
    pub fn new(message: &'a ChatMessage, view: &'a ViewOptions) -> Self {
        Self {
            message,
            session: None,
            view,
            cursor_visible: true,
            show_timestamp: true,
        }
    }

    pub fn session(mut self, session: Option<&'a TypewriterSession>) -> Self {
        self.session = session;
        self
    }

    pub fn cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    pub fn show_timestamp(mut self, show: bool) -> Self {
        self.show_timestamp = show;
        self
    }

    fn header(&self) -> Line<'static> {
        let role = self.message.role;
        let mut spans = vec![Span::styled(
            role.label(),
            role.style().add_modifier(Modifier::BOLD),
        )];
        if self.show_timestamp {
            spans.push(Span::styled(
                format!("  {}", self.message.time_label()),
                QuillStyle::muted(),
            ));
        }
        if self.message.liked {
            spans.push(Span::styled(format!("  {LIKED_MARK}"), QuillStyle::liked()));
        }
        Line::from(spans)
    }

    fn body(&self, width: u16) -> Vec<Line<'static>> {
        if !self.message.is_assistant() {
            let lines = render_plain(&self.message.content, self.message.role.style());
            return wrap_lines(&lines, width as usize);
        }
        match self.session {
            Some(session) => TypewriterView::new(session, self.view)
                .cursor_visible(self.cursor_visible)
                .lines(width),
            None => wrap_lines(
                &self.view.strategy.render(&self.message.content),
                width as usize,
            ),
        }
    }

    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = vec![self.header()];
        lines.extend(self.body(width));
        lines
    }

    pub fn required_height(&self, width: u16) -> u16 {
        self.lines(width).len().min(u16::MAX as usize) as u16
    }
}

impl Widget for MessageCell<'_> {
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
