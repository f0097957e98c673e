//! CommonMark renderer producing styled ratatui `Line`s.
//!
//! Parsing is done by pulldown-cmark; [`RenderState`](state::RenderState)
//! consumes the event stream and accumulates lines. Word wrapping is left
//! to the widget that displays the lines.
//!
//! # Example
//!
//! ```rust,ignore
//! use quill_core::markdown::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new();
//! let lines = renderer.render("# Hello **World**");
//! ```

mod state;


use std::sync::Arc;

use pulldown_cmark::{Options, Parser};
use ratatui::text::Line;

use crate::markdown::theme::MarkdownTheme;

use self::state::RenderState;

/// Converts markdown text to styled lines.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    pub(crate) theme: Arc<MarkdownTheme>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_theme(MarkdownTheme::default())
    }

    pub fn with_theme(theme: MarkdownTheme) -> Self {
        Self {
            theme: Arc::new(theme),
        }
    }

    /// Renders a complete markdown document.
    ///
    /// Unterminated constructs (an open fence, a half-written table) are
    /// rendered from whatever the parser produced so far.
    pub fn render(&self, markdown: &str) -> Vec<Line<'static>> {
        let mut state = RenderState::new(self);
        for event in Parser::new_ext(markdown, Self::options()) {
            state.handle_event(event);
        }
        state.finish()
    }

    fn options() -> Options {
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
    }

    pub fn theme(&self) -> &MarkdownTheme {
        &self.theme
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
