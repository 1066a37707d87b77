//! JSON in and out of the client.

use crate::error::Result;
use crate::results::{BulkResult, CountResult, DeleteResult, GetResult, IndexResult, SearchResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serializes documents and parses response bodies into result types.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl JsonSerializer {
    /// Compact JSON for a document.
    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    /// Parse any response body.
    pub fn parse<T: DeserializeOwned>(&self, body: &str) -> Result<T> {
        Ok(serde_json::from_str(body)?)
    }

    /// Parse an index or create response.
    pub fn parse_index_result(&self, body: &str) -> Result<IndexResult> {
        self.parse(body)
    }

    /// Parse a delete response.
    pub fn parse_delete_result(&self, body: &str) -> Result<DeleteResult> {
        self.parse(body)
    }

    /// Parse a get response.
    pub fn parse_get_result<T: DeserializeOwned>(&self, body: &str) -> Result<GetResult<T>> {
        self.parse(body)
    }

    /// Parse a search response.
    pub fn parse_search_result<T: DeserializeOwned>(&self, body: &str) -> Result<SearchResult<T>> {
        self.parse(body)
    }

    /// Parse a bulk response.
    pub fn parse_bulk_result(&self, body: &str) -> Result<BulkResult> {
        self.parse(body)
    }

    /// Parse a count response.
    pub fn parse_count_result(&self, body: &str) -> Result<CountResult> {
        self.parse(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::results::TotalHits;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Product {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Price")]
        price: f64,
    }

    #[test]
    fn test_to_json() {
        let json = JsonSerializer
            .to_json(&Product { name: "lamp".into(), price: 12.5 })
            .unwrap();
        assert_eq!(json, r#"{"Name":"lamp","Price":12.5}"#);
    }

    #[test]
    fn test_parse_index_result() {
        let old = JsonSerializer
            .parse_index_result(r#"{"_index":"shop","_type":"product","_id":"1","_version":1,"created":true}"#)
            .unwrap();
        assert!(old.is_created());
        assert_eq!(old.doc_type.as_deref(), Some("product"));

        let new = JsonSerializer
            .parse_index_result(r#"{"_index":"shop","_id":"1","_version":2,"result":"updated"}"#)
            .unwrap();
        assert!(!new.is_created());
        assert_eq!(new.version, Some(2));
    }

    #[test]
    fn test_parse_delete_result() {
        let result = JsonSerializer
            .parse_delete_result(r#"{"found":true,"_index":"shop","_type":"product","_id":"1","_version":3}"#)
            .unwrap();
        assert!(result.is_deleted());
    }

    #[test]
    fn test_parse_get_result() {
        let found: GetResult<Product> = JsonSerializer
            .parse_get_result(r#"{"_index":"shop","_type":"product","_id":"1","_version":1,"found":true,"_source":{"Name":"lamp","Price":12.5}}"#)
            .unwrap();
        assert_eq!(found.source.unwrap().name, "lamp");

        let missing: GetResult<Product> = JsonSerializer
            .parse_get_result(r#"{"_index":"shop","_type":"product","_id":"2","found":false}"#)
            .unwrap();
        assert!(!missing.found);
        assert!(missing.source.is_none());
    }

    #[test]
    fn test_parse_search_result_total_shapes() {
        let old: SearchResult<Product> = JsonSerializer
            .parse_search_result(
                r#"{"took":3,"timed_out":false,"_shards":{"total":5,"successful":5,"failed":0},
                "hits":{"total":1,"max_score":1.0,"hits":[{"_index":"shop","_type":"product","_id":"1","_score":1.0,
                "_source":{"Name":"lamp","Price":12.5},"highlight":{"Name":["<b>lamp</b>"]}}]}}"#,
            )
            .unwrap();
        assert_eq!(old.total(), 1);
        assert_eq!(old.documents().count(), 1);
        assert_eq!(old.hits.hits[0].highlight["Name"], vec!["<b>lamp</b>".to_string()]);

        let new: SearchResult<Product> = JsonSerializer
            .parse_search_result(r#"{"took":1,"timed_out":false,"hits":{"total":{"value":10000,"relation":"gte"},"max_score":null,"hits":[]}}"#)
            .unwrap();
        assert_eq!(new.total(), 10000);
        assert!(matches!(new.hits.total, TotalHits::Detailed { ref relation, .. } if relation == "gte"));
    }

    #[test]
    fn test_parse_bulk_result_failed_items() {
        let result = JsonSerializer
            .parse_bulk_result(
                r#"{"took":30,"errors":true,"items":[
                {"index":{"_index":"shop","_type":"product","_id":"1","_version":1,"status":201}},
                {"create":{"_index":"shop","_type":"product","_id":"2","status":409,"error":"DocumentAlreadyExistsException[[shop][2]]"}},
                {"delete":{"_index":"shop","_id":"3","status":404,"error":{"type":"not_found","reason":"missing"}}}]}"#,
            )
            .unwrap();
        assert!(result.errors);
        let failed = result.failed_items();
        assert_eq!(failed.len(), 2);
        assert_eq!(failed[0].id, "2");
        assert_eq!(failed[0].error_reason().as_deref(), Some("DocumentAlreadyExistsException[[shop][2]]"));
        assert_eq!(failed[1].error_reason().as_deref(), Some("missing"));
    }

    #[test]
    fn test_parse_count_result() {
        let result = JsonSerializer
            .parse_count_result(r#"{"count":42,"_shards":{"total":1,"successful":1,"failed":0}}"#)
            .unwrap();
        assert_eq!(result.count, 42);
    }

    #[test]
    fn test_malformed_body_is_serialization_error() {
        let err = JsonSerializer.parse_count_result("{\"count\":").unwrap_err();
        assert!(matches!(err, ClientError::Serialization(_)));
    }
}
