// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
//! Client side of the docchat backend contract.
//!
//! Five JSON endpoints make up the whole surface:
//!
//! | method | path                       | success body                                   |
//! |--------|----------------------------|------------------------------------------------|
//! | POST   | `/api/start-thread`        | `{ thread_id, assistant_id }`                  |
//! | POST   | `/api/send-message`        | `{ response }`                                 |
//! | GET    | `/api/vector-stores`       | `{ vector_stores, current_vector_store_id }`   |
//! | POST   | `/api/set-vector-store`    | `{ success, message }`                         |
//! | POST   | `/api/search-vector-store` | search payload (see [`SearchPayload`])         |
//!
//! Any endpoint may answer `{ error }` instead; see [`ApiError`].

mod backend;
mod error;
mod http;
mod mock;
mod types;

pub use backend::AssistantBackend;
pub use error::ApiError;
pub use http::HttpBackend;
pub use mock::{BackendCall, ScriptedBackend};
pub use types::*;
