// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use crate::state::Tab;

/// Tab controls and their content panels.  Exactly one control and its
/// matching panel are active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabBar {
    active: Tab,
}

impl TabBar {
    /// Deactivate every control and panel, then activate `tab`'s pair.
    pub fn activate(&mut self, tab: Tab) {
        self.active = tab;
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_control_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    /// Panel element id for `tab`, e.g. `search-tab`.
    pub fn panel_id(tab: Tab) -> String {
        format!("{}-tab", tab.id())
    }

    pub fn is_panel_visible(&self, tab: Tab) -> bool {
        self.active == tab
    }
}
