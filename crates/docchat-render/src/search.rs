// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Search result cards.

use docchat_api::{ResultContent, SearchPayload, SearchResultItem};
use serde_json::Value;

use crate::{escape::escape_html, sanitize::format_markdown};

pub const NO_RESULTS_TEXT: &str = "No results found for your query";
pub const UNNAMED_DOCUMENT: &str = "Unnamed Document";

/// Markup for the results pane.  An empty or missing result list renders
/// only the "no results" placeholder.
pub fn render_search_results(payload: &SearchPayload) -> String {
    let items = payload.items();
    if items.is_empty() {
        return no_results_html();
    }
    let mut html = String::from("<h3>Search Results</h3>");
    for (i, item) in items.iter().enumerate() {
        html.push_str(&render_card(item, i + 1));
    }
    html
}

pub fn no_results_html() -> String {
    placeholder(NO_RESULTS_TEXT)
}

/// Markup for the results pane when the search itself failed.
pub fn render_search_error(message: &str) -> String {
    placeholder(&format!("Error: {message}"))
}

fn placeholder(text: &str) -> String {
    format!(r#"<div class="no-results"><p>{}</p></div>"#, escape_html(text))
}

/// Similarity scores are fractions and shown as percentages with two
/// decimals; anything else is shown verbatim.
pub fn format_score(score: &Value) -> String {
    match score {
        Value::Number(n) => match n.as_f64() {
            Some(f) => format!("{:.2}%", f * 100.0),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_card(item: &SearchResultItem, index: usize) -> String {
    let filename = item
        .filename
        .as_deref()
        .filter(|f| !f.is_empty())
        .unwrap_or(UNNAMED_DOCUMENT);

    let mut html = String::from(r#"<div class="search-result">"#);
    html.push_str(r#"<div class="search-result-header">"#);
    html.push_str(&format!(
        r#"<div class="search-result-title">Result {index}: {}</div>"#,
        escape_html(filename)
    ));
    html.push_str(r#"<div class="search-result-meta">"#);
    if let Some(score) = &item.score {
        html.push_str(&format!("<span>Score: {}</span>", escape_html(&format_score(score))));
    }
    if let Some(file_id) = item.file_id.as_deref().filter(|f| !f.is_empty()) {
        html.push_str(&format!("<span>File ID: {}</span>", escape_html(file_id)));
    }
    html.push_str("</div></div>");

    if let Some(content) = &item.content {
        let fragments: Vec<&str> = match content {
            ResultContent::Text(t) if t.is_empty() => Vec::new(),
            ResultContent::Text(t) => vec![t.as_str()],
            ResultContent::Blocks(blocks) => blocks.iter().filter_map(|b| b.as_text()).collect(),
        };
        if !fragments.is_empty() || matches!(content, ResultContent::Blocks(_)) {
            html.push_str(r#"<div class="search-result-content">"#);
            for text in fragments {
                html.push_str(&format!(
                    r#"<div class="markdown-content">{}</div>"#,
                    format_markdown(text)
                ));
            }
            html.push_str("</div>");
        }
    }

    if let Some(attrs) = item.attributes.as_ref().filter(|a| !a.is_empty()) {
        html.push_str(r#"<div class="search-result-attributes">"#);
        for (key, value) in attrs {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            html.push_str(&format!(
                "<div><strong>{}:</strong> {}</div>",
                escape_html(key),
                escape_html(&value)
            ));
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}
