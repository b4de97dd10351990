// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use tracing::{debug, error};

use docchat_api::SearchRequest;
use docchat_config::clamp_max_results;
use docchat_render::{render_search_error, render_search_results};

use super::{App, EMPTY_QUERY_ALERT, FAILED_SEARCH};

/// Leading decimal digits of `raw`, ignoring surrounding whitespace.
/// `"12abc"` is 12; `"abc"`, `""` and `"0"` give `None`.
fn parse_leading_count(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(u32::try_from(n).unwrap_or(u32::MAX)),
    }
}

impl App {
    /// Result count to request, from the max-results field.
    pub fn requested_max_results(&self) -> u32 {
        let n = parse_leading_count(self.page.max_results.value())
            .unwrap_or(self.search_defaults.max_results);
        clamp_max_results(n)
    }

    /// Search the active vector store and render the results pane.
    pub async fn perform_search(&mut self) {
        if !self.variant.has_tabs() {
            debug!("search unavailable in the simple layout");
            return;
        }

        let query = self.page.search_input.value().trim().to_string();
        if query.is_empty() {
            self.page.alert(EMPTY_QUERY_ALERT);
            return;
        }

        let request = SearchRequest {
            query,
            max_results: self.requested_max_results(),
            rewrite_query: self.page.rewrite_query,
        };
        debug!(max_results = request.max_results, rewrite = request.rewrite_query, "searching");

        self.page.busy.show();
        let html = match self.backend.search(&request).await {
            Ok(payload) => render_search_results(&payload),
            Err(e) => {
                error!(error = %e, "error searching vector store");
                render_search_error(&e.user_message(FAILED_SEARCH))
            }
        };
        self.page.results.replace(html);
        self.page.busy.hide();
    }
}
