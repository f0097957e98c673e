//! RenderState - accumulates lines while walking pulldown-cmark events.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::markdown::code_block::render_code_block;

use super::MarkdownRenderer;

/// Bullet characters by nesting depth.
const BULLETS: [&str; 3] = ["•", "◦", "▪"];

/// Spaces per list nesting level.
const INDENT_WIDTH: usize = 2;

const RULE_WIDTH: usize = 40;

struct ListContext {
    /// `Some` for ordered lists: the number of the next item.
    next_number: Option<u64>,
    depth: usize,
}

impl ListContext {
    fn marker(&mut self) -> String {
        match self.next_number.as_mut() {
            Some(n) => {
                let marker = format!("{n}. ");
                *n += 1;
                marker
            }
            None => format!("{} ", BULLETS[self.depth.min(BULLETS.len() - 1)]),
        }
    }
}

#[derive(Default)]
struct TableBuffer {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    current_row: Vec<String>,
}

pub(super) struct RenderState<'a> {
    renderer: &'a MarkdownRenderer,
    lines: Vec<Line<'static>>,
    current_spans: Vec<Span<'static>>,
    style_stack: Vec<Style>,

    list_stack: Vec<ListContext>,
    blockquote_depth: usize,

    in_code_block: bool,
    code_language: Option<String>,
    code_buffer: String,

    table: Option<TableBuffer>,
    current_cell: String,

    heading_level: Option<HeadingLevel>,
    /// Destination and index of the first span of the link text.
    link: Option<(String, usize)>,
    needs_newline: bool,
}

impl<'a> RenderState<'a> {
    pub fn new(renderer: &'a MarkdownRenderer) -> Self {
        Self {
            renderer,
            lines: Vec::new(),
            current_spans: Vec::new(),
            style_stack: Vec::new(),
            list_stack: Vec::new(),
            blockquote_depth: 0,
            in_code_block: false,
            code_language: None,
            code_buffer: String::new(),
            table: None,
            current_cell: String::new(),
            heading_level: None,
            link: None,
            needs_newline: false,
        }
    }

    pub fn handle_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.handle_start_tag(tag),
            Event::End(tag) => self.handle_end_tag(tag),
            Event::Text(text) => self.handle_text(&text),
            Event::Code(code) => self.handle_inline_code(&code),
            Event::SoftBreak | Event::HardBreak => {
                if self.table.is_some() {
                    self.current_cell.push(' ');
                } else {
                    self.flush_line();
                }
            }
            Event::Rule => {
                self.add_blank_line_if_needed();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(RULE_WIDTH),
                    self.renderer.theme.hr,
                )));
                self.needs_newline = true;
            }
            Event::TaskListMarker(checked) => {
                let renderer = self.renderer;
                let theme = &renderer.theme;
                let (marker, style) = if checked {
                    ("[x] ", theme.task_checked)
                } else {
                    ("[ ] ", theme.task_unchecked)
                };
                self.current_spans.push(Span::styled(marker, style));
            }
            // html, footnotes and math are not rendered
            _ => {}
        }
    }

    fn handle_start_tag(&mut self, tag: Tag<'_>) {
        let renderer = self.renderer;
        let theme = &renderer.theme;
        match tag {
            Tag::Paragraph => {
                if self.list_stack.is_empty() {
                    self.add_blank_line_if_needed();
                }
            }
            Tag::Heading { level, .. } => {
                self.add_blank_line_if_needed();
                self.heading_level = Some(level);
            }
            Tag::CodeBlock(kind) => {
                self.flush_line();
                self.add_blank_line_if_needed();
                self.in_code_block = true;
                self.code_buffer.clear();
                self.code_language = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.trim().is_empty() => {
                        Some(lang.trim().to_string())
                    }
                    _ => None,
                };
            }
            Tag::List(start) => {
                if self.list_stack.is_empty() {
                    self.add_blank_line_if_needed();
                } else {
                    self.flush_line();
                }
                let depth = self.list_stack.len();
                self.list_stack.push(ListContext {
                    next_number: start,
                    depth,
                });
            }
            Tag::Item => {
                self.flush_line();
                let (bullet_style, number_style) = (theme.list_bullet, theme.list_number);
                if let Some(ctx) = self.list_stack.last_mut() {
                    let style = if ctx.next_number.is_some() {
                        number_style
                    } else {
                        bullet_style
                    };
                    let indent = " ".repeat(ctx.depth * INDENT_WIDTH);
                    if !indent.is_empty() {
                        self.current_spans.push(Span::raw(indent));
                    }
                    self.current_spans.push(Span::styled(ctx.marker(), style));
                }
            }
            Tag::BlockQuote(_) => {
                if self.blockquote_depth == 0 {
                    self.add_blank_line_if_needed();
                }
                self.blockquote_depth += 1;
            }
            Tag::Emphasis => self.style_stack.push(theme.italic),
            Tag::Strong => self.style_stack.push(theme.bold),
            Tag::Strikethrough => self.style_stack.push(theme.strikethrough),
            Tag::Link { dest_url, .. } => {
                self.style_stack.push(theme.link_text);
                self.link = Some((dest_url.to_string(), self.current_spans.len()));
            }
            Tag::Table(_) => {
                self.add_blank_line_if_needed();
                self.table = Some(TableBuffer::default());
            }
            Tag::TableCell => self.current_cell.clear(),
            _ => {}
        }
    }

    fn handle_end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                if self.list_stack.is_empty() {
                    self.needs_newline = true;
                }
            }
            TagEnd::Heading(_) => self.end_heading(),
            TagEnd::CodeBlock => self.end_code_block(),
            TagEnd::List(_) => {
                self.flush_line();
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    self.needs_newline = true;
                }
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::BlockQuote(_) => {
                self.flush_line();
                self.blockquote_depth = self.blockquote_depth.saturating_sub(1);
                if self.blockquote_depth == 0 {
                    self.needs_newline = true;
                }
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.style_stack.pop();
            }
            TagEnd::Link => self.end_link(),
            TagEnd::Table => self.end_table(),
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = std::mem::take(&mut table.current_row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.current_row);
                    table.rows.push(row);
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut self.current_cell);
                    table.current_row.push(cell.trim().to_string());
                }
            }
            _ => {}
        }
    }

    fn handle_text(&mut self, text: &str) {
        if self.in_code_block {
            self.code_buffer.push_str(text);
        } else if self.table.is_some() {
            self.current_cell.push_str(text);
        } else {
            let style = self.current_style();
            self.current_spans
                .push(Span::styled(text.to_string(), style));
        }
    }

    fn handle_inline_code(&mut self, code: &str) {
        if self.table.is_some() {
            self.current_cell.push_str(code);
        } else {
            self.current_spans.push(Span::styled(
                code.to_string(),
                self.renderer.theme.code_inline,
            ));
        }
    }

    fn end_heading(&mut self) {
        if let Some(level) = self.heading_level.take() {
            let style = self
                .renderer
                .theme
                .header_style(heading_level_to_u8(level));
            for span in &mut self.current_spans {
                span.style = span.style.patch(style);
            }
            self.flush_line();
            self.needs_newline = true;
        }
    }

    fn end_code_block(&mut self) {
        self.in_code_block = false;
        let code_lines = render_code_block(self.code_language.as_deref(), &self.code_buffer);
        for line in code_lines {
            let mut spans = self.blockquote_prefix();
            spans.extend(line.spans);
            self.lines.push(Line::from(spans));
        }
        self.code_buffer.clear();
        self.code_language = None;
        self.needs_newline = true;
    }

    fn end_link(&mut self) {
        self.style_stack.pop();
        if let Some((url, start)) = self.link.take() {
            let text: String = self.current_spans[start.min(self.current_spans.len())..]
                .iter()
                .map(|s| s.content.as_ref())
                .collect();
            if !url.is_empty() && url != text {
                self.current_spans.push(Span::styled(
                    format!(" ({url})"),
                    self.renderer.theme.link_url,
                ));
            }
        }
    }

    fn end_table(&mut self) {
        let Some(table) = self.table.take() else {
            return;
        };
        let renderer = self.renderer;
        let theme = &renderer.theme;

        let columns = table
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(table.header.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in std::iter::once(&table.header).chain(table.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(UnicodeWidthStr::width(cell.as_str()));
            }
        }

        let render_row = |row: &[String], style: Style| -> Line<'static> {
            let mut spans = Vec::new();
            for (i, width) in widths.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" │ ", theme.table_border));
                }
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = width.saturating_sub(UnicodeWidthStr::width(cell));
                spans.push(Span::styled(format!("{cell}{}", " ".repeat(pad)), style));
            }
            Line::from(spans)
        };

        let mut table_lines = vec![render_row(&table.header, theme.table_header_text)];
        let separator: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        table_lines.push(Line::from(Span::styled(
            separator.join("─┼─"),
            theme.table_border,
        )));
        for row in &table.rows {
            table_lines.push(render_row(row, theme.table_cell_text));
        }

        for line in table_lines {
            let mut spans = self.blockquote_prefix();
            spans.extend(line.spans);
            self.lines.push(Line::from(spans));
        }
        self.needs_newline = true;
    }

    fn current_style(&self) -> Style {
        self.style_stack
            .iter()
            .fold(self.renderer.theme.text, |acc, s| acc.patch(*s))
    }

    fn blockquote_prefix(&self) -> Vec<Span<'static>> {
        if self.blockquote_depth == 0 {
            return Vec::new();
        }
        vec![Span::styled(
            "│ ".repeat(self.blockquote_depth),
            self.renderer.theme.blockquote_border,
        )]
    }

    fn flush_line(&mut self) {
        if self.current_spans.is_empty() {
            return;
        }
        let mut spans = self.blockquote_prefix();
        spans.append(&mut self.current_spans);
        self.lines.push(Line::from(spans));
    }

    fn add_blank_line_if_needed(&mut self) {
        if self.needs_newline && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.needs_newline = false;
    }

    /// Flushes anything the event stream left open and returns the lines.
    pub fn finish(mut self) -> Vec<Line<'static>> {
        if self.in_code_block {
            self.end_code_block();
        }
        if self.table.is_some() {
            self.end_table();
        }
        self.flush_line();
        self.lines
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
