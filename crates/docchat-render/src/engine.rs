// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Markdown → HTML conversion.
//!
//! [`CmarkEngine`] is configured the way the page expects its markdown:
//! single newlines are line breaks, GFM extensions (tables, strikethrough,
//! task lists, footnotes) are on, and every anchor opens in a new browsing
//! context without leaking the opener or referrer.  Bare `http(s)://` URLs
//! in text become links, as GFM renderers do.  Raw HTML embedded in the
//! source is shown as text, so the only anchors in the output are the ones
//! this engine writes.

use std::sync::OnceLock;

use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};
use regex::Regex;
use thiserror::Error;

use crate::escape::escape_html;

/// Attribute pair carried by every rendered anchor.
pub const SAFE_LINK_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer""#;

const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "vbscript:", "data:"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("markdown engine failed: {0}")]
    Engine(String),
}

/// Converts sanitized markdown into HTML.
pub trait MarkdownEngine: Send + Sync {
    fn to_html(&self, markdown: &str) -> Result<String, RenderError>;
}

/// pulldown-cmark backed engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct CmarkEngine;

impl CmarkEngine {
    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
    }
}

impl MarkdownEngine for CmarkEngine {
    fn to_html(&self, markdown: &str) -> Result<String, RenderError> {
        let mut events = Vec::new();
        let mut pending = String::new();
        // Text inside links, images and code blocks is never linkified.
        let mut opaque = 0usize;

        for event in Parser::new_ext(markdown, Self::options()) {
            if let Event::Text(text) = &event {
                if opaque == 0 {
                    pending.push_str(text);
                    continue;
                }
            }
            flush_text(&mut pending, &mut events);
            match &event {
                Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => {
                    opaque += 1
                }
                Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                    opaque = opaque.saturating_sub(1)
                }
                _ => {}
            }
            events.push(rewrite_event(event));
        }
        flush_text(&mut pending, &mut events);

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        Ok(out)
    }
}

fn rewrite_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::SoftBreak => Event::HardBreak,
        Event::Start(Tag::Link { link_type: LinkType::Email, dest_url, title, .. }) => {
            let dest = format!("mailto:{dest_url}");
            Event::InlineHtml(CowStr::from(open_anchor(&dest, &title)))
        }
        Event::Start(Tag::Link { dest_url, title, .. }) => {
            Event::InlineHtml(CowStr::from(open_anchor(&dest_url, &title)))
        }
        Event::End(TagEnd::Link) => Event::InlineHtml(CowStr::Borrowed("</a>")),
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    }
}

fn bare_url() -> &'static Regex {
    static BARE_URL: OnceLock<Regex> = OnceLock::new();
    BARE_URL.get_or_init(|| Regex::new(r#"https?://[^\s<>"']+"#).expect("bare url pattern"))
}

/// Emit the buffered text, turning bare `http(s)://` URLs into anchors.
/// Trailing sentence punctuation stays outside the link.
fn flush_text<'a>(pending: &mut String, events: &mut Vec<Event<'a>>) {
    if pending.is_empty() {
        return;
    }
    let text = std::mem::take(pending);
    let mut last = 0;
    for m in bare_url().find_iter(&text) {
        let url = m.as_str().trim_end_matches(&['.', ',', ';', ':', '!', '?', ')', ']'][..]);
        if url.ends_with("//") {
            continue;
        }
        if m.start() > last {
            events.push(Event::Text(CowStr::from(text[last..m.start()].to_string())));
        }
        events.push(Event::InlineHtml(CowStr::from(open_anchor(url, ""))));
        events.push(Event::Text(CowStr::from(url.to_string())));
        events.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
        last = m.start() + url.len();
    }
    if last < text.len() {
        events.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}

fn open_anchor(dest: &str, title: &str) -> String {
    let href = if is_blocked_scheme(dest) { "#" } else { dest };
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    format!(r#"<a href="{}"{title_attr} {SAFE_LINK_ATTRS}>"#, escape_html(href))
}

fn is_blocked_scheme(dest: &str) -> bool {
    let lowered: String = dest
        .trim_start()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCKED_SCHEMES.iter().any(|s| lowered.starts_with(s))
}
