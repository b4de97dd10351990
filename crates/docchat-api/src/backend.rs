// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use async_trait::async_trait;

use crate::{
    ApiError, AssistantReply, SearchPayload, SearchRequest, SendMessageRequest, ThreadHandle,
    VectorStoreListing,
};

/// One method per backend endpoint.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// `POST /api/start-thread`
    async fn start_thread(&self) -> Result<ThreadHandle, ApiError>;

    /// `POST /api/send-message`
    async fn send_message(&self, req: &SendMessageRequest) -> Result<AssistantReply, ApiError>;

    /// `GET /api/vector-stores`
    async fn list_vector_stores(&self) -> Result<VectorStoreListing, ApiError>;

    /// `POST /api/set-vector-store`
    async fn set_vector_store(&self, vector_store_id: &str) -> Result<(), ApiError>;

    /// `POST /api/search-vector-store`
    async fn search(&self, req: &SearchRequest) -> Result<SearchPayload, ApiError>;
}
