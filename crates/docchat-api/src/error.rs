// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use thiserror::Error;

/// Failure of a backend request.
///
/// Both variants are caught by the controller that issued the request and
/// turned into a single transcript line; neither escapes further.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered, but with a non-success status or with an
    /// `error` field in the body.  `message` is the server-supplied text.
    #[error("{}", .message.as_deref().unwrap_or("request rejected by backend"))]
    Application {
        status: Option<u16>,
        message: Option<String>,
    },

    /// The request never produced a usable response (connect failure,
    /// timeout, unreadable body).
    #[error("Network error: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn application(status: u16, message: impl Into<String>) -> Self {
        ApiError::Application { status: Some(status), message: Some(message.into()) }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport(message.into())
    }

    /// Text shown to the user.  Server-supplied errors are shown verbatim,
    /// application errors without a message fall back to `fallback`, and
    /// transport faults are prefixed with `Network error:`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Application { message: Some(m), .. } if !m.is_empty() => m.clone(),
            ApiError::Application { .. } => fallback.to_string(),
            ApiError::Transport(_) => self.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}
