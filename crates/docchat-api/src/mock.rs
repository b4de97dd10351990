// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    ApiError, AssistantBackend, AssistantReply, SearchPayload, SearchRequest, SendMessageRequest,
    ThreadHandle, VectorStore, VectorStoreListing,
};

/// A request observed by [`ScriptedBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    StartThread,
    SendMessage(SendMessageRequest),
    ListVectorStores,
    SetVectorStore(String),
    Search(SearchRequest),
}

#[derive(Default)]
struct Scripts {
    start_thread: VecDeque<Result<ThreadHandle, ApiError>>,
    send_message: VecDeque<Result<AssistantReply, ApiError>>,
    list_vector_stores: VecDeque<Result<VectorStoreListing, ApiError>>,
    set_vector_store: VecDeque<Result<(), ApiError>>,
    search: VecDeque<Result<SearchPayload, ApiError>>,
}

/// A pre-scripted backend for tests.  Each endpoint pops the next scripted
/// result from its own queue; an endpoint with an empty queue fails with a
/// transport error.  Every call is recorded, so tests can assert both what
/// was sent and that nothing was sent at all.
#[derive(Default)]
pub struct ScriptedBackend {
    scripts: Mutex<Scripts>,
    calls: Mutex<Vec<BackendCall>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose session start succeeds with `thread`/`assistant` and
    /// whose store listing contains the given `(id, name)` pairs.
    pub fn ready(thread: &str, assistant: &str, stores: &[(&str, &str)], current: &str) -> Self {
        let b = Self::new();
        b.push_start_thread(Ok(ThreadHandle {
            thread_id: thread.into(),
            assistant_id: assistant.into(),
        }));
        b.push_list_vector_stores(Ok(VectorStoreListing {
            vector_stores: stores.iter().map(|(id, name)| VectorStore::new(*id, Some(*name))).collect(),
            current_vector_store_id: Some(current.into()),
        }));
        b
    }

    pub fn push_start_thread(&self, r: Result<ThreadHandle, ApiError>) {
        self.with_scripts(|s| s.start_thread.push_back(r));
    }

    /// Convenience: script one reply text for the next send.
    pub fn push_reply(&self, text: impl Into<String>) {
        self.push_send_message(Ok(AssistantReply { response: text.into() }));
    }

    pub fn push_send_message(&self, r: Result<AssistantReply, ApiError>) {
        self.with_scripts(|s| s.send_message.push_back(r));
    }

    pub fn push_list_vector_stores(&self, r: Result<VectorStoreListing, ApiError>) {
        self.with_scripts(|s| s.list_vector_stores.push_back(r));
    }

    pub fn push_set_vector_store(&self, r: Result<(), ApiError>) {
        self.with_scripts(|s| s.set_vector_store.push_back(r));
    }

    pub fn push_search(&self, r: Result<SearchPayload, ApiError>) {
        self.with_scripts(|s| s.search.push_back(r));
    }

    /// All calls so far, in issue order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn start_thread_calls(&self) -> usize {
        self.count(|c| matches!(c, BackendCall::StartThread))
    }

    pub fn send_message_calls(&self) -> Vec<SendMessageRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BackendCall::SendMessage(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn search_calls(&self) -> Vec<SearchRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BackendCall::Search(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BackendCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn with_scripts<R>(&self, f: impl FnOnce(&mut Scripts) -> R) -> R {
        let mut guard = match self.scripts.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }
}

fn unscripted<T>(endpoint: &str) -> Result<T, ApiError> {
    Err(ApiError::transport(format!("no scripted response for {endpoint}")))
}

#[async_trait]
impl AssistantBackend for ScriptedBackend {
    async fn start_thread(&self) -> Result<ThreadHandle, ApiError> {
        self.record(BackendCall::StartThread);
        self.with_scripts(|s| s.start_thread.pop_front())
            .unwrap_or_else(|| unscripted("/api/start-thread"))
    }

    async fn send_message(&self, req: &SendMessageRequest) -> Result<AssistantReply, ApiError> {
        self.record(BackendCall::SendMessage(req.clone()));
        self.with_scripts(|s| s.send_message.pop_front())
            .unwrap_or_else(|| unscripted("/api/send-message"))
    }

    async fn list_vector_stores(&self) -> Result<VectorStoreListing, ApiError> {
        self.record(BackendCall::ListVectorStores);
        self.with_scripts(|s| s.list_vector_stores.pop_front())
            .unwrap_or_else(|| unscripted("/api/vector-stores"))
    }

    async fn set_vector_store(&self, vector_store_id: &str) -> Result<(), ApiError> {
        self.record(BackendCall::SetVectorStore(vector_store_id.to_string()));
        self.with_scripts(|s| s.set_vector_store.pop_front())
            .unwrap_or_else(|| unscripted("/api/set-vector-store"))
    }

    async fn search(&self, req: &SearchRequest) -> Result<SearchPayload, ApiError> {
        self.record(BackendCall::Search(req.clone()));
        self.with_scripts(|s| s.search.pop_front())
            .unwrap_or_else(|| unscripted("/api/search-vector-store"))
    }
}
