// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::time::Duration;

use tracing::debug;

use super::{App, FOCUS_DELAY};
use crate::state::Tab;

/// Clickable controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    SendButton,
    SearchButton,
    RefreshStores,
    Tab(Tab),
}

/// Text inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MessageInput,
    SearchQuery,
    MaxResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

/// Input events delivered by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click(Control),
    KeyDown { field: Field, key: Key, shift: bool },
    Input { field: Field, value: String },
    SetRewriteQuery(bool),
    SelectStore(String),
}

/// Focus `field` once `after` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub field: Field,
    pub after: Duration,
}

impl App {
    /// Activate `tab` and its panel.  Returns the focus change the front end
    /// should schedule, if any.
    pub fn select_tab(&mut self, tab: Tab) -> Option<FocusRequest> {
        if !self.variant.has_tabs() {
            return None;
        }
        debug!(%tab, "tab selected");
        self.page.tabs.activate(tab);
        self.state.active_tab = tab;
        let field = match tab {
            Tab::Chat => Field::MessageInput,
            Tab::Search => Field::SearchQuery,
        };
        Some(FocusRequest { field, after: FOCUS_DELAY })
    }

    async fn click_tab(&mut self, tab: Tab) {
        if let Some(req) = self.select_tab(tab) {
            tokio::time::sleep(req.after).await;
            self.page.focus = Some(req.field);
        }
    }

    /// Whether Enter in the message input should send.
    fn chat_accepts_enter(&self) -> bool {
        !self.variant.has_tabs() || self.state.active_tab == Tab::Chat
    }

    /// Route one event to its controller and wait for it to finish.
    pub async fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::Click(Control::SendButton) => self.send_message().await,
            UiEvent::Click(Control::SearchButton) => self.perform_search().await,
            UiEvent::Click(Control::RefreshStores) => self.load_vector_stores().await,
            UiEvent::Click(Control::Tab(tab)) => self.click_tab(tab).await,
            UiEvent::KeyDown { field: Field::MessageInput, key: Key::Enter, shift: false } => {
                if self.chat_accepts_enter() {
                    self.send_message().await;
                }
            }
            UiEvent::KeyDown { field: Field::SearchQuery, key: Key::Enter, .. } => {
                self.perform_search().await
            }
            UiEvent::KeyDown { .. } => {}
            UiEvent::Input { field, value } => self.page.input_mut(field).set(value),
            UiEvent::SetRewriteQuery(on) => self.page.rewrite_query = on,
            UiEvent::SelectStore(id) => self.change_vector_store(&id).await,
        }
    }
}
