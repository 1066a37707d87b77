//! Typed response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Shard summary included in most responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shards {
    /// Shards addressed.
    pub total: u32,
    /// Shards that answered.
    pub successful: u32,
    /// Shards that failed.
    #[serde(default)]
    pub failed: u32,
}

/// Response to an index or create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexResult {
    /// Index name.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document type.
    #[serde(rename = "_type", default)]
    pub doc_type: Option<String>,
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Document version.
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    /// Whether a new document was created (older servers).
    #[serde(default)]
    pub created: Option<bool>,
    /// `created` or `updated` (newer servers).
    #[serde(default)]
    pub result: Option<String>,
}

impl IndexResult {
    /// True when the request created a new document.
    pub fn is_created(&self) -> bool {
        self.created.unwrap_or(false) || self.result.as_deref() == Some("created")
    }
}

/// Response to a delete request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResult {
    /// Index name.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document type.
    #[serde(rename = "_type", default)]
    pub doc_type: Option<String>,
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Document version.
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    /// Whether the document existed (older servers).
    #[serde(default)]
    pub found: Option<bool>,
    /// `deleted` or `not_found` (newer servers).
    #[serde(default)]
    pub result: Option<String>,
}

impl DeleteResult {
    /// True when a document was removed.
    pub fn is_deleted(&self) -> bool {
        self.found.unwrap_or(false) || self.result.as_deref() == Some("deleted")
    }
}

/// Response to a get request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetResult<T> {
    /// Index name.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document type.
    #[serde(rename = "_type", default)]
    pub doc_type: Option<String>,
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Document version.
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    /// Whether the document exists.
    pub found: bool,
    /// Document source.
    #[serde(rename = "_source")]
    pub source: Option<T>,
}

/// Total hit count. Older servers send a number, newer ones an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    /// Plain count.
    Count(u64),
    /// Count with its accuracy.
    Detailed {
        /// Count.
        value: u64,
        /// `eq` or `gte`.
        relation: String,
    },
}

impl TotalHits {
    /// The count, whatever the shape.
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Count(value) | TotalHits::Detailed { value, .. } => *value,
        }
    }
}

impl Default for TotalHits {
    fn default() -> Self {
        TotalHits::Count(0)
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit<T> {
    /// Index name.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document type.
    #[serde(rename = "_type", default)]
    pub doc_type: Option<String>,
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score.
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    /// Document source.
    #[serde(rename = "_source")]
    pub source: Option<T>,
    /// Highlighted fragments per field.
    #[serde(default)]
    pub highlight: HashMap<String, Vec<String>>,
    /// Sort values.
    #[serde(default)]
    pub sort: Vec<Value>,
}

/// The `hits` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hits<T> {
    /// Total matches.
    #[serde(default)]
    pub total: TotalHits,
    /// Best score.
    #[serde(default)]
    pub max_score: Option<f64>,
    /// Returned page of hits.
    #[serde(default = "Vec::new")]
    pub hits: Vec<Hit<T>>,
}

/// Response to a search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// Time taken in milliseconds.
    #[serde(default)]
    pub took: u64,
    /// Whether the search timed out.
    #[serde(default)]
    pub timed_out: bool,
    /// Shard summary.
    #[serde(rename = "_shards", default)]
    pub shards: Option<Shards>,
    /// Hits.
    pub hits: Hits<T>,
    /// Raw aggregation results.
    #[serde(default)]
    pub aggregations: Option<Value>,
}

impl<T> SearchResult<T> {
    /// Total matches.
    pub fn total(&self) -> u64 {
        self.hits.total.value()
    }

    /// Sources of the returned hits, skipping hits without one.
    pub fn documents(&self) -> impl Iterator<Item = &T> {
        self.hits.hits.iter().filter_map(|hit| hit.source.as_ref())
    }
}

/// Response to a count request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountResult {
    /// Matching documents.
    pub count: u64,
    /// Shard summary.
    #[serde(rename = "_shards", default)]
    pub shards: Option<Shards>,
}

/// Response to a bulk request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkResult {
    /// Time taken in milliseconds.
    #[serde(default)]
    pub took: u64,
    /// Whether any item failed.
    #[serde(default)]
    pub errors: bool,
    /// Per-action results, in request order.
    #[serde(default)]
    pub items: Vec<BulkItem>,
}

impl BulkResult {
    /// Items whose status is not a success.
    pub fn failed_items(&self) -> Vec<&BulkItemStatus> {
        self.items
            .iter()
            .map(BulkItem::status)
            .filter(|status| !status.is_success())
            .collect()
    }
}

/// Bulk item result, keyed by action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkItem {
    /// Index result.
    Index(BulkItemStatus),
    /// Create result.
    Create(BulkItemStatus),
    /// Update result.
    Update(BulkItemStatus),
    /// Delete result.
    Delete(BulkItemStatus),
}

impl BulkItem {
    /// Status regardless of action.
    pub fn status(&self) -> &BulkItemStatus {
        match self {
            BulkItem::Index(status)
            | BulkItem::Create(status)
            | BulkItem::Update(status)
            | BulkItem::Delete(status) => status,
        }
    }
}

/// Status of a bulk item operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItemStatus {
    /// Index name.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document type.
    #[serde(rename = "_type", default)]
    pub doc_type: Option<String>,
    /// Document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// Document version.
    #[serde(rename = "_version", default)]
    pub version: Option<i64>,
    /// HTTP status code.
    pub status: u16,
    /// Error, a string on older servers and an object on newer ones.
    #[serde(default)]
    pub error: Option<Value>,
}

impl BulkItemStatus {
    /// Check if the operation was successful.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status)
    }

    /// Readable error reason, if any.
    pub fn error_reason(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::String(reason) => Some(reason.clone()),
            Value::Object(error) => error
                .get("reason")
                .or_else(|| error.get("type"))
                .and_then(Value::as_str)
                .map(str::to_string),
            other => Some(other.to_string()),
        }
    }
}
