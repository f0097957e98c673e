//! # Quill Core
//!
//! Typewriter-style reveal of AI chat replies for terminal interfaces.
//!
//! ## Core Components
//!
//! - **Animation**: the [`TypewriterSession`] engine (lexical speed model,
//!   sentence pauses, jitter) plus spinner, cursor blink and progress bar.
//! - **Markdown**: a fence-aware renderer for partially revealed text and a
//!   full CommonMark renderer.
//! - **Render**: [`RenderStrategy`] selects how revealed text becomes lines.
//! - **Widgets**: [`TypewriterView`](widgets::TypewriterView) and the chat
//!   conversation widgets.
//! - **Style**: the Quill palette.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Owner (frame loop)                   │
//! │          advance(elapsed) / skip / pause             │
//! └──────────────┬──────────────────────────┬────────────┘
//!                │                          │
//! ┌──────────────▼────────────┐  ┌──────────▼────────────┐
//! │     TypewriterSession     │  │       Widgets         │
//! │  lexical ─ pause ─ jitter │─▶│ RenderStrategy → Line │
//! └───────────────────────────┘  └───────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use quill_core::{TypewriterOptions, TypewriterSession};
//!
//! let mut tw = TypewriterSession::new("Hello. World!", TypewriterOptions::default())
//!     .on_sentence_complete(|sentence, n| println!("#{n}: {sentence}"));
//! while !tw.is_completed() {
//!     tw.advance(Duration::from_millis(16));
//! }
//! ```

pub mod animation;
pub mod markdown;
pub mod render;
pub mod style;
pub mod widgets;

pub use animation::{
    OptionsError, SpeedAdjustments, ThinkingPauses, TypewriterOptions, TypewriterSession,
    TypewriterStatus,
};
pub use render::RenderStrategy;
pub use style::QuillStyle;
