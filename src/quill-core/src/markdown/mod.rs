//! # Markdown rendering
//!
//! Two renderers turn revealed reply text into styled ratatui lines:
//!
//! - [`render_partial_markdown`] splits on fence markers only. It is cheap
//!   and keeps a half-revealed code block styled as code.
//! - [`MarkdownRenderer`] runs the full CommonMark parser (pulldown-cmark)
//!   for headings, emphasis, lists, quotes, rules and tables.
//!
//! ```rust,ignore
//! use quill_core::markdown::{MarkdownRenderer, render_partial_markdown};
//! use ratatui::style::Style;
//!
//! let partial = render_partial_markdown("```js\nconst", Style::default());
//! let full = MarkdownRenderer::new().render("# Title\n\n*hi*");
//! ```

pub mod code_block;
pub mod partial;
mod renderer;
pub mod theme;

pub use code_block::render_code_block;
pub use partial::{Segment, render_partial_markdown, render_plain, split_fences};
pub use renderer::MarkdownRenderer;
pub use theme::MarkdownTheme;
