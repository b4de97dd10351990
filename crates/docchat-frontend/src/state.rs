// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Page-level state: session identity, active tab and active vector store.
//!
//! All of it lives in one [`UiState`] owned by the [`App`](crate::App), so a
//! controller never reaches for ambient globals and can be tested alone.

use docchat_api::ThreadHandle;

/// Chat session lifecycle.
///
/// ```text
/// Uninitialized ──init──▶ Initializing ──ok──▶ Ready(handle)
///       ▲                      │
///       │ store switch         └──err──▶ Error ──init──▶ Initializing
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initializing,
    Ready(ThreadHandle),
    Error,
}

impl SessionState {
    /// Thread/assistant identifiers, present only when `Ready`.
    pub fn handle(&self) -> Option<&ThreadHandle> {
        match self {
            SessionState::Ready(h) => Some(h),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready(_))
    }

    pub fn begin_init(&mut self) {
        *self = SessionState::Initializing;
    }

    pub fn complete(&mut self, handle: ThreadHandle) {
        *self = SessionState::Ready(handle);
    }

    pub fn fail(&mut self) {
        *self = SessionState::Error;
    }

    /// Drop the current session.  Both identifiers are gone afterwards.
    pub fn reset(&mut self) {
        *self = SessionState::Uninitialized;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Chat,
    Search,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Chat, Tab::Search];

    /// Identifier used by tab controls (`data-tab`) and panels (`{id}-tab`).
    pub fn id(self) -> &'static str {
        match self {
            Tab::Chat => "chat",
            Tab::Search => "search",
        }
    }

    pub fn from_id(id: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.id() == id)
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything the controllers share.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub session: SessionState,
    pub active_tab: Tab,
    /// Store the backend currently uses; the selection control reverts to it
    /// when a switch fails.
    pub current_store: Option<String>,
}
