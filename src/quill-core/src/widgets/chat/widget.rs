//! Chat widget for rendering the conversation.

use std::collections::HashMap;

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use super::message_cell::MessageCell;
use super::thinking::ThinkingIndicator;
use super::types::{ChatMessage, MessageId};
use crate::animation::{Spinner, TypewriterSession};
use crate::widgets::typewriter_view::ViewOptions;

/// Renders a list of messages, newest at the bottom.
///
/// The view sticks to the bottom; `scroll_back` moves it up by rows.
pub struct ChatWidget<'a> {
    messages: &'a [ChatMessage],
    sessions: Option<&'a HashMap<MessageId, TypewriterSession>>,
    view: &'a ViewOptions,
    cursor_visible: bool,
    typing: Option<&'a Spinner>,
    scroll_back: usize,
    show_timestamps: bool,
}

impl<'a> ChatWidget<'a> {
    pub fn new(messages: &'a [ChatMessage], view: &'a ViewOptions) -> Self {
        Self {
            messages,
            sessions: None,
            view,
            cursor_visible: true,
            typing: None,
            scroll_back: 0,
            show_timestamps: true,
        }
    }

    /// Sessions for animated assistant messages, keyed by message id.
    pub fn sessions(mut self, sessions: &'a HashMap<MessageId, TypewriterSession>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    pub fn cursor_visible(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    /// Shows the typing indicator below the last message.
    pub fn typing(mut self, spinner: Option<&'a Spinner>) -> Self {
        self.typing = spinner;
        self
    }

    pub fn scroll_back(mut self, rows: usize) -> Self {
        self.scroll_back = rows;
        self
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// All rows of the conversation at `width`, top to bottom.
    pub fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (idx, message) in self.messages.iter().enumerate() {
            if idx > 0 {
                lines.push(Line::default());
            }
            let session = self.sessions.and_then(|s| s.get(&message.id));
            let cell = MessageCell::new(message, self.view)
                .session(session)
                .cursor_visible(self.cursor_visible)
                .show_timestamp(self.show_timestamps);
            lines.extend(cell.lines(width));
        }
        if let Some(spinner) = self.typing {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(ThinkingIndicator::new(spinner).line());
        }
        lines
    }

    pub fn total_height(&self, width: u16) -> usize {
        self.lines(width).len()
    }
}

impl Widget for ChatWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let lines = self.lines(area.width);
        let height = area.height as usize;
        let end = lines.len().saturating_sub(self.scroll_back.min(lines.len()));
        let start = end.saturating_sub(height);

        for (row, line) in lines[start..end].iter().enumerate() {
            buf.set_line(area.x, area.y + row as u16, line, area.width);
        }
    }
}
