//! Chat conversation widgets.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use quill_core::widgets::{ChatMessage, ChatWidget, ViewOptions};
//!
//! let messages = vec![ChatMessage::user(1, "Hello!"), ChatMessage::assistant(2, "Hi!")];
//! let sessions = HashMap::new();
//! let view = ViewOptions::default();
//! let chat = ChatWidget::new(&messages, &view).sessions(&sessions);
//! ```

mod message_cell;
mod thinking;
mod types;
mod widget;

pub use message_cell::MessageCell;
pub use thinking::{TYPING_LABEL, ThinkingIndicator};
pub use types::{ChatMessage, MessageId, MessageRole};
pub use widget::ChatWidget;
