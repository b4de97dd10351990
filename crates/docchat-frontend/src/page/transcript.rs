// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The scrolling message list.

use docchat_render::{MessageNode, Role};

/// Append-only list of rendered message nodes (insertion order is display
/// order).  The first node is the welcome message and is never removed.
#[derive(Debug, Clone)]
pub struct Transcript {
    nodes: Vec<MessageNode>,
    /// Index one past the last node scrolled into view.
    scroll_top: usize,
    /// Number of times the transcript was cleared back to the welcome node.
    resets: u64,
}

impl Transcript {
    pub fn with_welcome(welcome: &str) -> Self {
        Self {
            nodes: vec![MessageNode::new(welcome, Role::Assistant)],
            scroll_top: 1,
            resets: 0,
        }
    }

    /// Render `content` for `role`, append it and scroll to the end.
    pub fn add_message(&mut self, content: &str, role: Role) {
        self.nodes.push(MessageNode::new(content, role));
        self.scroll_to_end();
    }

    pub fn add_system_message(&mut self, content: &str) {
        self.add_message(content, Role::System);
    }

    pub fn add_error_message(&mut self, content: &str) {
        self.add_message(content, Role::Error);
    }

    /// Remove every node except the first (welcome) one.
    pub fn retain_welcome(&mut self) {
        self.nodes.truncate(1);
        self.resets += 1;
        self.scroll_to_end();
    }

    pub fn scroll_to_end(&mut self) {
        self.scroll_top = self.nodes.len();
    }

    pub fn is_scrolled_to_end(&self) -> bool {
        self.scroll_top == self.nodes.len()
    }

    pub fn nodes(&self) -> &[MessageNode] {
        &self.nodes
    }

    pub fn last(&self) -> Option<&MessageNode> {
        self.nodes.last()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Count of nodes with `role`.
    pub fn count(&self, role: Role) -> usize {
        self.nodes.iter().filter(|n| n.role == role).count()
    }

    /// Markup of the whole container.
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div id="chat-messages">"#);
        for node in &self.nodes {
            html.push_str(&node.to_html());
        }
        html.push_str("</div>");
        html
    }
}
