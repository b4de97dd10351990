// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! The docchat page and the controllers that drive it.
//!
//! [`Page`] is an in-memory stand-in for the page's document: a transcript
//! of rendered message nodes, the vector store selection control, the busy
//! indicator, the tab bar, the input fields and the search results pane.
//! [`App`] owns a page together with the [`UiState`] (session identity,
//! active tab, active store) and turns [`UiEvent`]s into backend requests
//! and page updates.  Front ends (the terminal driver in the `docchat`
//! binary, tests) only ever feed events in and read the page back out.

mod app;
pub mod page;
mod state;

#[cfg(test)]
mod tests;

pub use app::{
    App, Control, Field, FocusRequest, Key, UiEvent, EMPTY_QUERY_ALERT, FAILED_CHANGE_STORE,
    FAILED_INIT, FAILED_LOAD_STORES, FAILED_SEARCH, FAILED_SEND, FOCUS_DELAY, NOT_INITIALIZED,
};
pub use page::Page;
pub use state::{SessionState, Tab, UiState};
