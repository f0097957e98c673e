//! Quill widgets
//!
//! - [`TypewriterView`] - revealed text of one session with cursor,
//!   progress row and skip control
//! - [`ChatWidget`] - the conversation, bottom-anchored
//! - [`ThinkingIndicator`] - "AI is typing…" spinner

pub mod chat;
pub mod typewriter_view;
pub mod wrapping;

pub use chat::{ChatMessage, ChatWidget, MessageCell, MessageId, MessageRole, ThinkingIndicator};
pub use typewriter_view::{DEFAULT_CURSOR, DEFAULT_SKIP_LABEL, TypewriterView, ViewOptions};
pub use wrapping::wrap_lines;
