// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

/// Smallest `max_results` the search endpoint accepts.
pub const MIN_SEARCH_RESULTS: u32 = 1;
/// Largest `max_results` the search endpoint accepts.
pub const MAX_SEARCH_RESULTS: u32 = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Origin of the assistant backend.  Endpoint paths (`/api/...`) are
    /// appended to it, so a trailing slash is optional.
    pub base_url: String,
    /// Per-request timeout in seconds (0 = no limit).
    ///
    /// Sending a message blocks until the assistant run completes on the
    /// server side, so keep this generous.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result count used when the max-results field is empty or unparsable.
    pub max_results: u32,
    /// Initial state of the "rewrite query" checkbox.
    pub rewrite_query: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_results: 10, rewrite_query: false }
    }
}

impl SearchConfig {
    /// Default result count clamped into the range the backend accepts.
    pub fn effective_max_results(&self) -> u32 {
        clamp_max_results(self.max_results)
    }
}

/// Clamp a requested result count into `MIN_SEARCH_RESULTS..=MAX_SEARCH_RESULTS`.
pub fn clamp_max_results(n: u32) -> u32 {
    n.clamp(MIN_SEARCH_RESULTS, MAX_SEARCH_RESULTS)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Which page layout to drive.
    pub variant: Variant,
    /// Text of the first transcript node.  It survives vector store switches.
    pub welcome_message: String,
    /// Column width used when converting rendered HTML to terminal text.
    pub wrap_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Tabbed,
            welcome_message: "Hello! Ask me anything about the documents in the selected vector store."
                .into(),
            wrap_width: 100,
        }
    }
}

/// Page layout.  `Tabbed` is the full client (chat + search tabs); `Simple`
/// is the chat-only reduction of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Tabbed,
    Simple,
}

impl Variant {
    pub fn has_tabs(self) -> bool {
        matches!(self, Variant::Tabbed)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Tabbed => write!(f, "tabbed"),
            Variant::Simple => write!(f, "simple"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backend_points_at_local_server() {
        let c = Config::default();
        assert_eq!(c.backend.base_url, "http://127.0.0.1:5000");
        assert_eq!(c.backend.timeout_secs, 120);
    }

    #[test]
    fn default_search_settings() {
        let c = Config::default();
        assert_eq!(c.search.max_results, 10);
        assert!(!c.search.rewrite_query);
    }

    #[test]
    fn default_variant_is_tabbed() {
        assert_eq!(Config::default().ui.variant, Variant::Tabbed);
        assert!(Variant::Tabbed.has_tabs());
        assert!(!Variant::Simple.has_tabs());
    }

    #[test]
    fn clamp_keeps_values_in_backend_range() {
        assert_eq!(clamp_max_results(0), 1);
        assert_eq!(clamp_max_results(25), 25);
        assert_eq!(clamp_max_results(500), 50);
    }

    #[test]
    fn effective_max_results_is_clamped() {
        let s = SearchConfig { max_results: 99, rewrite_query: false };
        assert_eq!(s.effective_max_results(), 50);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let c: Config = toml::from_str("[search]\nrewrite_query = true\n").unwrap();
        assert!(c.search.rewrite_query);
        assert_eq!(c.search.max_results, 10);
        assert_eq!(c.ui.wrap_width, 100);
    }

    #[test]
    fn variant_parses_lowercase() {
        let c: Config = toml::from_str("[ui]\nvariant = \"simple\"\n").unwrap();
        assert_eq!(c.ui.variant, Variant::Simple);
        assert_eq!(c.ui.variant.to_string(), "simple");
    }

    #[test]
    fn config_roundtrips_through_toml_text() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(text.contains("[backend]"));
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.backend.base_url, Config::default().backend.base_url);
    }
}
