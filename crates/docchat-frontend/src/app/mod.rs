// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Controllers: chat session, vector store selection, search and tabs.
//!
//! Every action is an `async fn` taking `&mut self`, so an action cannot be
//! re-entered while its request is outstanding.  The front end simply has
//! nothing to dispatch into until the previous action returns.

mod chat_ops;
mod dispatch;
mod search_ops;
mod store_ops;

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use docchat_api::AssistantBackend;
use docchat_config::{Config, SearchConfig, Variant};

use crate::page::{Page, LOADING_PLACEHOLDER};
use crate::state::UiState;

pub use dispatch::{Control, Field, FocusRequest, Key, UiEvent};

pub const FAILED_INIT: &str = "Failed to initialize chat";
pub const FAILED_SEND: &str = "Failed to send message";
pub const FAILED_LOAD_STORES: &str = "Failed to load vector stores";
pub const FAILED_CHANGE_STORE: &str = "Failed to change vector store";
pub const FAILED_SEARCH: &str = "Failed to search vector store";
pub const NOT_INITIALIZED: &str = "Chat not initialized. Please try refreshing the page.";
pub const EMPTY_QUERY_ALERT: &str = "Please enter a search query";

/// Delay between activating a tab and focusing its primary input.
pub const FOCUS_DELAY: Duration = Duration::from_millis(100);

pub struct App {
    backend: Arc<dyn AssistantBackend>,
    variant: Variant,
    search_defaults: SearchConfig,
    pub page: Page,
    pub state: UiState,
}

impl App {
    pub fn new(backend: Arc<dyn AssistantBackend>, config: &Config) -> Self {
        Self {
            backend,
            variant: config.ui.variant,
            search_defaults: config.search.clone(),
            page: Page::new(&config.ui.welcome_message, &config.search),
            state: UiState::default(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Page load: list the vector stores and start a chat session.
    ///
    /// Both requests are issued together; their results are applied in a
    /// fixed order (stores first) once both have settled.
    pub async fn boot(&mut self) {
        debug!(variant = %self.variant, "booting page");
        self.page.store_select.show_placeholder(LOADING_PLACEHOLDER);
        self.state.session.begin_init();
        self.page.busy.show();

        let backend = Arc::clone(&self.backend);
        let (stores, thread) =
            futures::join!(backend.list_vector_stores(), backend.start_thread());

        self.apply_vector_stores(stores);
        self.apply_thread(thread);
        self.page.busy.hide();
    }
}
