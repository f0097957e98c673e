//! Wrapping of styled lines to a column width.
//!
//! Widths are measured in terminal columns with unicode-width, so CJK
//! characters and emoji take two cells.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wraps each line at word boundaries. Words wider than `max_width` are
/// split by visual width. Span styles are preserved across breaks.
pub fn wrap_lines(lines: &[Line<'static>], max_width: usize) -> Vec<Line<'static>> {
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        wrap_line_into(line, max_width, &mut out);
    }
    out
}

fn wrap_line_into(line: &Line<'static>, max_width: usize, out: &mut Vec<Line<'static>>) {
    if max_width == 0 || line.width() <= max_width {
        out.push(line.clone());
        return;
    }

    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0usize;

    let tokens = line.spans.iter().flat_map(|span| {
        span.content
            .split_inclusive(char::is_whitespace)
            .map(move |word| (word, span.style))
    });

    for (word, style) in tokens {
        let word_width = UnicodeWidthStr::width(word);

        if current_width + word_width <= max_width {
            push_piece(&mut current, word, style);
            current_width += word_width;
            continue;
        }

        // trailing whitespace may hang past the edge
        let visible = word.trim_end();
        if current_width + UnicodeWidthStr::width(visible) <= max_width {
            push_piece(&mut current, visible, style);
            out.push(take_line(&mut current));
            current_width = 0;
            continue;
        }

        if current_width > 0 {
            out.push(take_line(&mut current));
            current_width = 0;
        }

        let mut remaining = word;
        while UnicodeWidthStr::width(remaining) > max_width {
            let (chunk, rest) = split_at_visual_width(remaining, max_width);
            if chunk.is_empty() {
                // a single glyph wider than the line
                let split = remaining.chars().next().map_or(remaining.len(), char::len_utf8);
                let (glyph, rest) = remaining.split_at(split);
                out.push(Line::from(Span::styled(glyph.to_string(), style)));
                remaining = rest;
                continue;
            }
            out.push(Line::from(Span::styled(chunk.to_string(), style)));
            remaining = rest;
        }
        push_piece(&mut current, remaining, style);
        current_width = UnicodeWidthStr::width(remaining);
    }

    if !current.is_empty() {
        out.push(take_line(&mut current));
    }
}

/// Takes the accumulated spans as a line, dropping trailing whitespace.
fn take_line(spans: &mut Vec<Span<'static>>) -> Line<'static> {
    let mut spans = std::mem::take(spans);
    if let Some(last) = spans.last_mut() {
        let trimmed = last.content.trim_end().to_string();
        last.content = trimmed.into();
        if last.content.is_empty() {
            spans.pop();
        }
    }
    Line::from(spans)
}

/// Appends `text`, merging into the last span when the style matches.
fn push_piece(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.style == style => last.content.to_mut().push_str(text),
        _ => spans.push(Span::styled(text.to_string(), style)),
    }
}

/// Splits a string at a visual width boundary, returning (prefix, suffix).
pub fn split_at_visual_width(s: &str, max_width: usize) -> (&str, &str) {
    if max_width == 0 {
        return ("", s);
    }

    let mut visual_width = 0;
    let mut byte_idx = s.len();

    for (idx, ch) in s.char_indices() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if visual_width + ch_width > max_width {
            byte_idx = idx;
            break;
        }
        visual_width += ch_width;
    }

    s.split_at(byte_idx)
}
