//! Code block lines shared by the full and the partial renderer.

use ratatui::text::{Line, Span};

use crate::style::QuillStyle;

/// Renders a code body as a language tag line followed by one styled line
/// per source line. A single trailing newline is dropped.
pub fn render_code_block(language: Option<&str>, code: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(lang) = language {
        lines.push(Line::from(Span::styled(
            format!(" {lang} "),
            QuillStyle::code_language(),
        )));
    }

    let body = code.strip_suffix('\n').unwrap_or(code);
    for line in body.split('\n') {
        lines.push(Line::from(Span::styled(
            format!(" {line}"),
            QuillStyle::code(),
        )));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_tag_first() {
        let lines = render_code_block(Some("rust"), "fn main() {}\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].content, " rust ");
        assert_eq!(lines[1].spans[0].content, " fn main() {}");
    }

    #[test]
    fn test_empty_body_keeps_one_line() {
        let lines = render_code_block(None, "");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].style, QuillStyle::code());
    }
}
