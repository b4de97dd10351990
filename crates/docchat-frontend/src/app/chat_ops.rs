// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use tracing::{debug, error, info};

use docchat_api::{ApiError, SendMessageRequest, ThreadHandle};
use docchat_render::Role;

use super::{App, FAILED_INIT, FAILED_SEND, NOT_INITIALIZED};
use crate::state::Tab;

impl App {
    /// Start a fresh chat session, replacing whatever identifiers were held.
    pub async fn initialize_chat(&mut self) {
        self.state.session.begin_init();
        self.page.busy.show();
        let result = self.backend.start_thread().await;
        self.apply_thread(result);
        self.page.busy.hide();
    }

    pub(super) fn apply_thread(&mut self, result: Result<ThreadHandle, ApiError>) {
        match result {
            Ok(handle) => {
                info!(thread_id = %handle.thread_id, "chat initialized with thread id");
                self.state.session.complete(handle);
            }
            Err(e) => {
                error!(error = %e, "error initializing chat");
                self.state.session.fail();
                self.page.transcript.add_error_message(&e.user_message(FAILED_INIT));
            }
        }
    }

    /// Send the message input to the assistant and append both sides of the
    /// exchange to the transcript.
    pub async fn send_message(&mut self) {
        if self.variant.has_tabs() && self.state.active_tab != Tab::Chat {
            debug!(tab = %self.state.active_tab, "send ignored outside the chat tab");
            return;
        }

        let message = self.page.message_input.value().trim().to_string();
        if message.is_empty() {
            return;
        }

        let Some(handle) = self.state.session.handle() else {
            self.page.transcript.add_error_message(NOT_INITIALIZED);
            return;
        };
        let request = SendMessageRequest::new(handle, message.as_str());

        self.page.message_input.clear();
        self.page.transcript.add_message(&message, Role::User);
        self.page.busy.show();

        match self.backend.send_message(&request).await {
            Ok(reply) => self.page.transcript.add_message(&reply.response, Role::Assistant),
            Err(e) => {
                error!(error = %e, "error sending message");
                self.page.transcript.add_error_message(&e.user_message(FAILED_SEND));
            }
        }

        self.page.busy.hide();
        self.page.transcript.scroll_to_end();
    }
}
