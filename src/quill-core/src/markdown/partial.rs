//! Fence-aware rendering for text that is still being revealed.
//!
//! The revealed prefix of a reply often ends inside a fenced code block.
//! Splitting on the raw "```" markers (instead of running a full parser)
//! keeps such a block rendered as code from the moment its opening fence
//! appears, even though the closing fence has not been revealed yet.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::code_block::render_code_block;

const FENCE: &str = "```";

/// One piece of partially revealed markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain text; newlines are line breaks.
    Text(&'a str),
    /// Code between fences.
    Code {
        /// Text before the first line break, trimmed; `None` when empty or
        /// when there is no line break yet.
        language: Option<&'a str>,
        code: &'a str,
        /// `false` while the closing fence is not revealed.
        closed: bool,
    },
}

/// Splits `text` on fence markers. Even pieces are text, odd pieces code.
pub fn split_fences(text: &str) -> Vec<Segment<'_>> {
    let parts: Vec<&str> = text.split(FENCE).collect();
    let count = parts.len();

    parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 0 {
                return Segment::Text(part);
            }
            let closed = i + 1 < count;
            match part.find('\n') {
                Some(nl) if nl > 0 => {
                    let language = part[..nl].trim();
                    Segment::Code {
                        language: (!language.is_empty()).then_some(language),
                        code: &part[nl + 1..],
                        closed,
                    }
                }
                _ => Segment::Code {
                    language: None,
                    code: part,
                    closed,
                },
            }
        })
        .collect()
}

/// Renders partially revealed text with the built-in fence splitter.
pub fn render_partial_markdown(text: &str, base: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for segment in split_fences(text) {
        match segment {
            Segment::Text(t) => {
                if t.is_empty() {
                    continue;
                }
                for line in t.split('\n') {
                    lines.push(Line::from(Span::styled(line.to_string(), base)));
                }
            }
            Segment::Code { language, code, .. } => {
                lines.extend(render_code_block(language, code));
            }
        }
    }

    lines
}

/// Renders text verbatim, one `Line` per source line.
pub fn render_plain(text: &str, base: Style) -> Vec<Line<'static>> {
    text.split('\n')
        .map(|line| Line::from(Span::styled(line.to_string(), base)))
        .collect()
}
