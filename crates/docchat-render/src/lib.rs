// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! String-to-HTML formatting for the docchat page.
//!
//! Everything here is pure: text in, markup out.  Where that markup ends up
//! (transcript, results pane) is the front end's business.

mod engine;
mod escape;
mod message;
mod sanitize;
mod search;

pub use engine::{CmarkEngine, MarkdownEngine, RenderError, SAFE_LINK_ATTRS};
pub use escape::escape_html;
pub use message::{render_message_body, MessageNode, Role, ERROR_ACCENT};
pub use sanitize::{format_markdown, format_markdown_with, sanitize_markdown};
pub use search::{
    format_score, no_results_html, render_search_error, render_search_results,
    NO_RESULTS_TEXT, UNNAMED_DOCUMENT,
};
