//! Quill colour palette and shared styles.

use ratatui::style::{Color, Modifier, Style};

// ============================================================
// BRAND COLORS
// ============================================================

/// Primary accent (#1677FF)
pub const ACCENT: Color = Color::Rgb(22, 119, 255);

/// Soft accent for assistant text (#91CAFF)
pub const ACCENT_SOFT: Color = Color::Rgb(145, 202, 255);

/// User bubble text (#95DE64)
pub const USER: Color = Color::Rgb(149, 222, 100);

// ============================================================
// SURFACES AND TEXT
// ============================================================

pub const SURFACE_0: Color = Color::Rgb(24, 27, 35);
pub const SURFACE_1: Color = Color::Rgb(33, 37, 48);

pub const TEXT: Color = Color::Rgb(236, 238, 242);
pub const TEXT_DIM: Color = Color::Rgb(153, 153, 153);
pub const TEXT_MUTED: Color = Color::Rgb(96, 102, 115);

// ============================================================
// SEMANTIC COLORS
// ============================================================

pub const SUCCESS: Color = Color::Rgb(82, 196, 26);
pub const WARNING: Color = Color::Rgb(250, 173, 20);
pub const ERROR: Color = Color::Rgb(255, 77, 79);
pub const CODE: Color = Color::Rgb(255, 203, 107);

/// Pre-configured styles. All methods return fresh `Style` values.
pub struct QuillStyle;

impl QuillStyle {
    #[inline]
    pub fn text() -> Style {
        Style::default().fg(TEXT)
    }

    #[inline]
    pub fn dimmed() -> Style {
        Style::default().fg(TEXT_DIM)
    }

    #[inline]
    pub fn muted() -> Style {
        Style::default().fg(TEXT_MUTED)
    }

    #[inline]
    pub fn header() -> Style {
        Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
    }

    #[inline]
    pub fn user_message() -> Style {
        Style::default().fg(USER)
    }

    #[inline]
    pub fn assistant_message() -> Style {
        Style::default().fg(ACCENT_SOFT)
    }

    /// Fenced code body: warm text on a raised surface.
    #[inline]
    pub fn code() -> Style {
        Style::default().fg(CODE).bg(SURFACE_1)
    }

    /// Language tag above a code block.
    #[inline]
    pub fn code_language() -> Style {
        Style::default()
            .fg(TEXT_DIM)
            .bg(SURFACE_0)
            .add_modifier(Modifier::ITALIC)
    }

    #[inline]
    pub fn cursor() -> Style {
        Style::default().fg(ACCENT)
    }

    /// The skip affordance.
    #[inline]
    pub fn skip_button() -> Style {
        Style::default()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    #[inline]
    pub fn progress_filled() -> Style {
        Style::default().fg(ACCENT)
    }

    #[inline]
    pub fn liked() -> Style {
        Style::default().fg(ERROR)
    }

    #[inline]
    pub fn success() -> Style {
        Style::default().fg(SUCCESS)
    }

    #[inline]
    pub fn warning() -> Style {
        Style::default().fg(WARNING)
    }

    #[inline]
    pub fn border() -> Style {
        Style::default().fg(TEXT_MUTED)
    }
}
