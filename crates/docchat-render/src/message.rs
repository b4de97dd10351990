// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Transcript message nodes.

use crate::{escape::escape_html, sanitize::format_markdown};

/// Text color applied to error nodes.
pub const ERROR_ACCENT: &str = "#e74c3c";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
    System,
    Error,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Error => "error",
        }
    }

    /// CSS classes of the outer node.  Error nodes share the system style
    /// and add their own class on top.
    fn classes(self) -> &'static str {
        match self {
            Role::User => "message user",
            Role::Assistant => "message assistant",
            Role::System => "message system",
            Role::Error => "message system error",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inner markup for a message with `role`.
///
/// Assistant content is markdown and is rendered (citations, spacing fixes,
/// safe links).  Everything else is literal text and is escaped, so user
/// input can never inject markup.
pub fn render_message_body(content: &str, role: Role) -> String {
    match role {
        Role::Assistant => format_markdown(content),
        Role::User | Role::System => escape_html(content),
        Role::Error => escape_html(&format!("Error: {content}")),
    }
}

/// One rendered transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageNode {
    pub role: Role,
    /// Markup inside the `message-content` element.
    pub body: String,
}

impl MessageNode {
    pub fn new(content: &str, role: Role) -> Self {
        Self { role, body: render_message_body(content, role) }
    }

    pub fn accent(&self) -> Option<&'static str> {
        (self.role == Role::Error).then_some(ERROR_ACCENT)
    }

    /// Full markup of the node, as inserted into the transcript container.
    pub fn to_html(&self) -> String {
        let style = match self.accent() {
            Some(color) => format!(r#" style="color: {color}""#),
            None => String::new(),
        };
        format!(
            r#"<div class="{}"><div class="message-content"{style}>{}</div></div>"#,
            self.role.classes(),
            self.body
        )
    }
}
