// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Vector store selection control.

use docchat_api::VectorStore;

pub const LOADING_PLACEHOLDER: &str = "Loading vector stores...";
pub const EMPTY_PLACEHOLDER: &str = "No vector stores found";
pub const ERROR_PLACEHOLDER: &str = "Error loading vector stores";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Drop-down of vector stores, keyed by store id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSelect {
    options: Vec<SelectOption>,
    selected: Option<usize>,
    disabled: bool,
}

impl StoreSelect {
    /// Replace the options with a single empty-valued placeholder and
    /// disable the control.
    pub fn show_placeholder(&mut self, label: &str) {
        self.options = vec![SelectOption { value: String::new(), label: label.to_string() }];
        self.selected = Some(0);
        self.disabled = true;
    }

    /// One option per store (value = id, label = name or id).  The first
    /// option is selected and the control is enabled; an empty list shows the
    /// empty placeholder instead.
    pub fn populate(&mut self, stores: &[VectorStore]) {
        if stores.is_empty() {
            self.show_placeholder(EMPTY_PLACEHOLDER);
            return;
        }
        self.options = stores
            .iter()
            .map(|s| SelectOption { value: s.id.clone(), label: s.label().to_string() })
            .collect();
        self.selected = Some(0);
        self.disabled = false;
    }

    /// Select the option whose value is `value`.  Nothing is selected when no
    /// option matches.  Returns whether a match was found.
    pub fn set_value(&mut self, value: &str) -> bool {
        self.selected = self.options.iter().position(|o| o.value == value);
        self.selected.is_some()
    }

    pub fn value(&self) -> Option<&str> {
        self.selected_option().map(|o| o.value.as_str())
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected_option().map(|o| o.label.as_str())
    }

    fn selected_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}
