// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! reqwest implementation of [`AssistantBackend`].

use std::time::Duration;

use async_trait::async_trait;
use docchat_config::BackendConfig;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{
    types::SetVectorStoreAck, ApiError, AssistantBackend, AssistantReply, SearchPayload,
    SearchRequest, SendMessageRequest, SetVectorStoreRequest, ThreadHandle, VectorStoreListing,
};

/// JSON-over-HTTP client for the docchat backend.
pub struct HttpBackend {
    /// Origin without a trailing slash, e.g. `http://127.0.0.1:5000`.
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Build a client for `base_url`.  `timeout` of `None` means requests
    /// may take as long as the server needs.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn from_config(cfg: &BackendConfig) -> Result<Self, ApiError> {
        let timeout = (cfg.timeout_secs > 0).then(|| Duration::from_secs(cfg.timeout_secs));
        Self::new(&cfg.base_url, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let resp = self.client.get(self.url(path)).send().await?;
        decode_response(path, resp).await
    }

    async fn post_json<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(path, "POST");
        let req = self.client.post(self.url(path));
        let req = match body {
            Some(b) => req.json(b),
            None => req.header(reqwest::header::CONTENT_TYPE, "application/json"),
        };
        let resp = req.send().await?;
        decode_response(path, resp).await
    }
}

/// Map a response onto `T` or an [`ApiError`].
///
/// A non-success status is always a failure, even with a well-formed body.
/// A success status whose body carries a non-null `error` field is a failure
/// too.  A body that is not JSON (or not the expected shape) on a success
/// status counts as a transport fault.
async fn decode_response<T: DeserializeOwned>(
    path: &str,
    resp: reqwest::Response,
) -> Result<T, ApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    let body: Option<Value> = serde_json::from_slice(&bytes).ok();
    let server_error = body.as_ref().and_then(error_field);

    if !status.is_success() {
        debug!(path, status = status.as_u16(), "backend returned failure status");
        return Err(ApiError::Application { status: Some(status.as_u16()), message: server_error });
    }
    if let Some(message) = server_error {
        return Err(ApiError::Application { status: Some(status.as_u16()), message: Some(message) });
    }

    let body = body.ok_or_else(|| ApiError::transport(format!("invalid JSON in response to {path}")))?;
    serde_json::from_value(body)
        .map_err(|e| ApiError::transport(format!("unexpected response to {path}: {e}")))
}

fn error_field(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl AssistantBackend for HttpBackend {
    async fn start_thread(&self) -> Result<ThreadHandle, ApiError> {
        self.post_json::<(), _>("/api/start-thread", None).await
    }

    async fn send_message(&self, req: &SendMessageRequest) -> Result<AssistantReply, ApiError> {
        self.post_json("/api/send-message", Some(req)).await
    }

    async fn list_vector_stores(&self) -> Result<VectorStoreListing, ApiError> {
        self.get_json("/api/vector-stores").await
    }

    async fn set_vector_store(&self, vector_store_id: &str) -> Result<(), ApiError> {
        let req = SetVectorStoreRequest { vector_store_id: vector_store_id.to_string() };
        let ack: SetVectorStoreAck = self.post_json("/api/set-vector-store", Some(&req)).await?;
        debug!(success = ack.success, message = ?ack.message, "vector store switch acknowledged");
        Ok(())
    }

    async fn search(&self, req: &SearchRequest) -> Result<SearchPayload, ApiError> {
        self.post_json("/api/search-vector-store", Some(req)).await
    }
}
