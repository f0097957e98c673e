//! Canned assistant replies.

/// Replies served round-robin. The first one doubles as the greeting.
pub const MOCK_RESPONSES: &[&str] = &[
    "Hello! I'm your AI assistant and I'm happy to help. Ask me anything and I'll do my best to answer.",
    r#"React is a JavaScript library for building user interfaces. It was created at Facebook and open-sourced in 2013.

The core ideas of React are:
1. Component-based architecture
2. Virtual DOM
3. One-way data flow
4. JSX syntax

Here is a small React component:

```jsx
import React from 'react';

function Welcome(props) {
  return <h1>Hello, {props.name}</h1>;
}

export default Welcome;
```"#,
    r#"Here is a simple table:

| Name | Type | Description |
| ---- | ---- | ---- |
| id | number | Unique identifier |
| name | string | User name |
| age | number | User age |
| email | string | Email address |

You can also format text with Markdown, such as **bold**, *italic* or `code`."#,
    r#"A typewriter effect really can improve the experience of a chat interface. Revealing text progressively can:

> Make AI replies feel more natural, like a person typing
> Reduce the anxiety of waiting for a complete answer
> Give complex answers a better visual rhythm

When code needs to be shown, a code block keeps it readable:

```typescript
function calculateTotal(items: Item[]): number {
  return items.reduce((total, item) => {
    return total + item.price * item.quantity;
  }, 0);
}
```

I hope this example helps!"#,
];

/// Shortcut questions offered in the chat header.
pub const QUICK_QUESTIONS: &[&str] = &[
    "Can you explain what React is?",
    "How do I make a table in Markdown?",
    "What are the benefits of a typewriter effect?",
];

/// Hands out [`MOCK_RESPONSES`] in order, wrapping around.
#[derive(Debug, Clone)]
pub struct MockResponder {
    responses: &'static [&'static str],
    next: usize,
}

impl MockResponder {
    /// Starts after the greeting.
    pub fn new() -> Self {
        Self::with_responses(MOCK_RESPONSES, 1)
    }

    pub fn with_responses(responses: &'static [&'static str], start: usize) -> Self {
        Self {
            responses,
            next: start,
        }
    }

    pub fn greeting(&self) -> &'static str {
        self.responses.first().copied().unwrap_or_default()
    }

    /// The next reply; empty when there are no responses.
    pub fn next_reply(&mut self) -> &'static str {
        if self.responses.is_empty() {
            return "";
        }
        let reply = self.responses[self.next % self.responses.len()];
        self.next = self.next.wrapping_add(1);
        reply
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}
