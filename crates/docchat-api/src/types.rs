// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

// ── Session ───────────────────────────────────────────────────────────────────

/// Identifiers issued by `/api/start-thread`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadHandle {
    pub thread_id: String,
    pub assistant_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub thread_id: String,
    pub assistant_id: String,
    pub message: String,
}

impl SendMessageRequest {
    pub fn new(handle: &ThreadHandle, message: impl Into<String>) -> Self {
        Self {
            thread_id: handle.thread_id.clone(),
            assistant_id: handle.assistant_id.clone(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    #[serde(default)]
    pub response: String,
}

// ── Vector stores ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStore {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_counts: Option<FileCounts>,
}

impl VectorStore {
    pub fn new(id: impl Into<String>, name: Option<&str>) -> Self {
        Self { id: id.into(), name: name.map(str::to_string), ..Self::default() }
    }

    /// Display label: the store name, or the id when the name is absent or empty.
    pub fn label(&self) -> &str {
        match self.name.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => &self.id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCounts {
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub completed: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub cancelled: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorStoreListing {
    #[serde(default)]
    pub vector_stores: Vec<VectorStore>,
    #[serde(default)]
    pub current_vector_store_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetVectorStoreRequest {
    pub vector_store_id: String,
}

/// Body of a successful `/api/set-vector-store` answer.  Only the status
/// matters to the client; the fields are read for logging.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SetVectorStoreAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Search ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u32,
    pub rewrite_query: bool,
}

/// Raw search answer.  The backend has produced three shapes over time:
///
/// - `{ "data": [item, ...] }`
/// - `{ "data": { "<key>": item, ... } }` (iterated in key order)
/// - `[item, ...]`
///
/// [`SearchPayload::items`] flattens all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchPayload(pub Value);

impl SearchPayload {
    pub fn items(&self) -> Vec<SearchResultItem> {
        let raw: Vec<&Value> = match &self.0 {
            Value::Object(obj) => match obj.get("data") {
                Some(Value::Array(items)) => items.iter().collect(),
                Some(Value::Object(items)) => items.values().collect(),
                _ => Vec::new(),
            },
            Value::Array(items) => items.iter().collect(),
            _ => Vec::new(),
        };
        raw.into_iter().map(SearchResultItem::from_value).collect()
    }
}

/// One search hit.  Decoding never fails: a field of an unexpected type is
/// dropped (scalars are shown as text), so every item the backend returns
/// still becomes a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct SearchResultItem {
    pub filename: Option<String>,
    /// Usually a similarity in `0.0..=1.0`, but shown verbatim when the
    /// backend sends something else.
    pub score: Option<Value>,
    pub file_id: Option<String>,
    pub content: Option<ResultContent>,
    pub attributes: Option<Map<String, Value>>,
}

impl SearchResultItem {
    pub fn from_value(v: &Value) -> Self {
        let Some(obj) = v.as_object() else {
            debug!("search result is not an object; rendering an empty card");
            return Self::default();
        };
        Self {
            filename: obj.get("filename").and_then(scalar_text),
            score: obj.get("score").filter(|s| !s.is_null()).cloned(),
            file_id: obj.get("file_id").and_then(scalar_text),
            content: obj.get("content").and_then(ResultContent::from_value),
            attributes: obj.get("attributes").and_then(Value::as_object).cloned(),
        }
    }
}

impl From<Value> for SearchResultItem {
    fn from(v: Value) -> Self {
        Self::from_value(&v)
    }
}

/// Strings as-is, numbers and booleans in their JSON form, anything else absent.
fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl ResultContent {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::String(s) => Some(ResultContent::Text(s.clone())),
            Value::Array(blocks) => {
                Some(ResultContent::Blocks(blocks.iter().map(ContentBlock::from_value).collect()))
            }
            _ => None,
        }
    }
}

/// Typed fragment of a result or message, e.g. `{"type": "text", "text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self { kind: "text".into(), text: Some(text.into()) }
    }

    /// Lenient decode: a block without a string `type` has an empty kind and
    /// is therefore never treated as text.
    fn from_value(v: &Value) -> Self {
        Self {
            kind: v.get("type").and_then(Value::as_str).unwrap_or_default().to_string(),
            text: v.get("text").and_then(Value::as_str).map(str::to_string),
        }
    }

    /// The text of a `text` block; `None` for any other block type.
    pub fn as_text(&self) -> Option<&str> {
        if self.kind == "text" {
            Some(self.text.as_deref().unwrap_or(""))
        } else {
            None
        }
    }
}
