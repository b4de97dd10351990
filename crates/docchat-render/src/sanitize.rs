// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Clean-up of assistant markdown before it reaches the markdown engine.
//!
//! Assistant output cites retrieved files with markers like `【4:0†source】`
//! and is sloppy about heading and bullet spacing (`###Title`, `-item`).
//! [`sanitize_markdown`] repairs both; [`format_markdown`] then renders the
//! result to HTML.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::engine::{CmarkEngine, MarkdownEngine};

struct Patterns {
    citation: Regex,
    heading: Regex,
    bullet: Regex,
    heading_gap: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        citation: Regex::new(r"【(\d+):(\d+)†source】").expect("citation pattern"),
        heading: Regex::new(r"(?m)^(#{1,6})([^\s#])").expect("heading pattern"),
        bullet: Regex::new(r"(?m)^-([^\s-])").expect("bullet pattern"),
        heading_gap: Regex::new(r"([^\n])(\n#{1,6}[ \t])").expect("heading gap pattern"),
    })
}

/// Apply the text repairs, in order:
///
/// 1. `【N:M†source】` → `[[Source N:M]](#)`
/// 2. `###Title` at a line start → `### Title` (one to six `#`)
/// 3. `-item` at a line start → `- item` (`---` rules are left alone)
/// 4. a blank line is inserted before a heading that directly follows text
pub fn sanitize_markdown(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let p = patterns();
    let s = p.citation.replace_all(content, "[[Source $1:$2]](#)");
    let s = p.heading.replace_all(&s, "$1 $2");
    let s = p.bullet.replace_all(&s, "- $1");
    let s = p.heading_gap.replace_all(&s, "$1\n$2");
    s.into_owned()
}

/// Sanitize `content` and render it with the default engine.
pub fn format_markdown(content: &str) -> String {
    format_markdown_with(&CmarkEngine, content)
}

/// Sanitize `content` and render it with `engine`.  If the engine fails the
/// sanitized markdown is returned as-is.
pub fn format_markdown_with(engine: &dyn MarkdownEngine, content: &str) -> String {
    let sanitized = sanitize_markdown(content);
    match engine.to_html(&sanitized) {
        Ok(html) => html,
        Err(e) => {
            warn!("{e}; falling back to unrendered text");
            sanitized
        }
    }
}
