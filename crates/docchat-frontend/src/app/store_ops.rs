// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use tracing::{debug, error, info, warn};

use docchat_api::{ApiError, VectorStoreListing};

use super::{App, FAILED_CHANGE_STORE, FAILED_LOAD_STORES};
use crate::page::{EMPTY_PLACEHOLDER, ERROR_PLACEHOLDER, LOADING_PLACEHOLDER};

impl App {
    /// Re-fetch the store list and rebuild the selection control.
    pub async fn load_vector_stores(&mut self) {
        self.page.store_select.show_placeholder(LOADING_PLACEHOLDER);
        let result = self.backend.list_vector_stores().await;
        self.apply_vector_stores(result);
    }

    pub(super) fn apply_vector_stores(&mut self, result: Result<VectorStoreListing, ApiError>) {
        match result {
            Ok(listing) => {
                debug!(count = listing.vector_stores.len(), "vector stores loaded");
                self.state.current_store = listing.current_vector_store_id.clone();
                if listing.vector_stores.is_empty() {
                    self.page.store_select.show_placeholder(EMPTY_PLACEHOLDER);
                    return;
                }
                self.page.store_select.populate(&listing.vector_stores);
                if let Some(current) = &listing.current_vector_store_id {
                    if !self.page.store_select.set_value(current) {
                        warn!(id = %current, "current vector store not in listing");
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "error loading vector stores");
                self.page.transcript.add_error_message(&e.user_message(FAILED_LOAD_STORES));
                self.page.store_select.show_placeholder(ERROR_PLACEHOLDER);
            }
        }
    }

    /// Make `id` the active store.  On success the conversation is reset and
    /// a new session is started against the new store; on failure the
    /// control goes back to the previous store.  Only listed options of an
    /// enabled control can be chosen.
    pub async fn change_vector_store(&mut self, id: &str) {
        if self.page.store_select.is_disabled() {
            debug!(id, "store selection is disabled");
            return;
        }
        if id.is_empty() || self.state.current_store.as_deref() == Some(id) {
            return;
        }
        if !self.page.store_select.set_value(id) {
            warn!(id, "selected vector store is not listed");
            self.page.alert(format!("Unknown vector store \"{id}\""));
            let previous = self.state.current_store.clone().unwrap_or_default();
            self.page.store_select.set_value(&previous);
            return;
        }

        self.page.busy.show();
        match self.backend.set_vector_store(id).await {
            Ok(()) => {
                info!(id, "vector store changed");
                let label = self
                    .page
                    .store_select
                    .selected_label()
                    .unwrap_or(id)
                    .to_string();
                self.state.current_store = Some(id.to_string());
                self.state.session.reset();
                self.page.transcript.retain_welcome();
                self.page.transcript.add_system_message(&format!(
                    "Vector store changed successfully. You are now using \"{label}\"."
                ));
                self.initialize_chat().await;
            }
            Err(e) => {
                error!(error = %e, id, "error changing vector store");
                self.page.transcript.add_error_message(&e.user_message(FAILED_CHANGE_STORE));
                let previous = self.state.current_store.clone().unwrap_or_default();
                self.page.store_select.set_value(&previous);
            }
        }
        self.page.busy.hide();
    }
}
