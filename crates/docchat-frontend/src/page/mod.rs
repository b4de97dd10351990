// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! In-memory page: the elements the controllers read and write.

mod busy;
mod select;
mod tabs;
mod transcript;

pub use busy::BusyIndicator;
pub use select::{SelectOption, StoreSelect, EMPTY_PLACEHOLDER, ERROR_PLACEHOLDER, LOADING_PLACEHOLDER};
pub use tabs::TabBar;
pub use transcript::Transcript;

use docchat_config::SearchConfig;

use crate::app::Field;

/// A single-line text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
}

impl InputField {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Container the search controller renders result cards into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsPane {
    html: String,
    /// Bumped on every replacement so observers can tell a re-render of
    /// identical markup from no render at all.
    revision: u64,
}

impl ResultsPane {
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn replace(&mut self, html: String) {
        self.html = html;
        self.revision += 1;
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub transcript: Transcript,
    pub store_select: StoreSelect,
    pub busy: BusyIndicator,
    pub tabs: TabBar,
    pub message_input: InputField,
    pub search_input: InputField,
    pub max_results: InputField,
    pub rewrite_query: bool,
    pub results: ResultsPane,
    /// Field holding input focus.
    pub focus: Option<Field>,
    alerts: Vec<String>,
}

impl Page {
    pub fn new(welcome: &str, search: &SearchConfig) -> Self {
        Self {
            transcript: Transcript::with_welcome(welcome),
            store_select: StoreSelect::default(),
            busy: BusyIndicator::default(),
            tabs: TabBar::default(),
            message_input: InputField::default(),
            search_input: InputField::default(),
            max_results: InputField::with_value(search.effective_max_results().to_string()),
            rewrite_query: search.rewrite_query,
            results: ResultsPane::default(),
            focus: Some(Field::MessageInput),
            alerts: Vec::new(),
        }
    }

    pub fn input(&self, field: Field) -> &InputField {
        match field {
            Field::MessageInput => &self.message_input,
            Field::SearchQuery => &self.search_input,
            Field::MaxResults => &self.max_results,
        }
    }

    pub fn input_mut(&mut self, field: Field) -> &mut InputField {
        match field {
            Field::MessageInput => &mut self.message_input,
            Field::SearchQuery => &mut self.search_input,
            Field::MaxResults => &mut self.max_results,
        }
    }

    /// Show a modal advisory.
    pub fn alert(&mut self, text: impl Into<String>) {
        self.alerts.push(text.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Dismiss and return all pending advisories.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}
