//! Styles for rendered markdown elements.

use ratatui::style::{Modifier, Style};

use crate::style::{ACCENT, ACCENT_SOFT, CODE, SURFACE_1, TEXT, TEXT_DIM, TEXT_MUTED, USER};

/// Styles for every markdown element the renderer emits.
#[derive(Debug, Clone)]
pub struct MarkdownTheme {
    pub h1: Style,
    pub h2: Style,
    pub h3: Style,
    /// Used for H4 through H6.
    pub h_minor: Style,

    pub bold: Style,
    pub italic: Style,
    pub strikethrough: Style,
    pub code_inline: Style,

    pub blockquote_border: Style,
    pub list_bullet: Style,
    pub list_number: Style,
    pub task_checked: Style,
    pub task_unchecked: Style,

    pub table_border: Style,
    pub table_header_text: Style,
    pub table_cell_text: Style,

    pub link_text: Style,
    pub link_url: Style,
    pub hr: Style,
    pub text: Style,
}

impl MarkdownTheme {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the heading style for `level` (1-6).
    pub fn header_style(&self, level: u8) -> Style {
        match level {
            1 => self.h1,
            2 => self.h2,
            3 => self.h3,
            _ => self.h_minor,
        }
    }
}

impl Default for MarkdownTheme {
    fn default() -> Self {
        let bold = Modifier::BOLD;
        Self {
            h1: Style::default()
                .fg(ACCENT)
                .add_modifier(bold | Modifier::UNDERLINED),
            h2: Style::default().fg(ACCENT).add_modifier(bold),
            h3: Style::default().fg(ACCENT_SOFT).add_modifier(bold),
            h_minor: Style::default().fg(TEXT).add_modifier(bold),

            bold: Style::default().add_modifier(bold),
            italic: Style::default().add_modifier(Modifier::ITALIC),
            strikethrough: Style::default().add_modifier(Modifier::CROSSED_OUT),
            code_inline: Style::default().fg(CODE).bg(SURFACE_1),

            blockquote_border: Style::default().fg(TEXT_MUTED),
            list_bullet: Style::default().fg(ACCENT_SOFT),
            list_number: Style::default().fg(ACCENT_SOFT),
            task_checked: Style::default().fg(USER),
            task_unchecked: Style::default().fg(TEXT_DIM),

            table_border: Style::default().fg(TEXT_MUTED),
            table_header_text: Style::default().fg(TEXT).add_modifier(bold),
            table_cell_text: Style::default().fg(TEXT),

            link_text: Style::default()
                .fg(ACCENT_SOFT)
                .add_modifier(Modifier::UNDERLINED),
            link_url: Style::default().fg(TEXT_DIM),
            hr: Style::default().fg(TEXT_MUTED),
            text: Style::default().fg(TEXT),
        }
    }
}
