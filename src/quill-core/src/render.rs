//! How the revealed prefix of a reply is turned into lines.

use std::fmt;
use std::sync::Arc;

use ratatui::text::Line;

use crate::markdown::{MarkdownRenderer, render_partial_markdown, render_plain};
use crate::style::QuillStyle;

/// Caller-supplied renderer: receives the revealed text, returns lines.
pub type RenderFn = dyn Fn(&str) -> Vec<Line<'static>> + Send + Sync;

/// Rendering strategy used by [`TypewriterView`](crate::widgets::TypewriterView).
#[derive(Clone, Default)]
pub enum RenderStrategy {
    /// A custom renderer, e.g. a full markdown renderer.
    Custom(Arc<RenderFn>),
    /// Fence-splitting renderer; an unterminated fence renders as code.
    #[default]
    BuiltinMarkdown,
    /// Text as-is, no markdown handling.
    PlainText,
}

impl RenderStrategy {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> Vec<Line<'static>> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Full CommonMark rendering through [`MarkdownRenderer`].
    pub fn commonmark(renderer: MarkdownRenderer) -> Self {
        Self::custom(move |text| renderer.render(text))
    }

    pub fn render(&self, text: &str) -> Vec<Line<'static>> {
        match self {
            Self::Custom(f) => f(text),
            Self::BuiltinMarkdown => render_partial_markdown(text, QuillStyle::text()),
            Self::PlainText => render_plain(text, QuillStyle::text()),
        }
    }
}

impl fmt::Debug for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(_) => f.write_str("Custom(<fn>)"),
            Self::BuiltinMarkdown => f.write_str("BuiltinMarkdown"),
            Self::PlainText => f.write_str("PlainText"),
        }
    }
}
