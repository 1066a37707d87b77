//! The top-level search request.
//!
//! ```rust
//! use plainsearch::QueryBuilder;
//!
//! let full_text = Some("text");
//! let category: Option<&str> = None;
//!
//! let body = QueryBuilder::new()
//!     .query(|q| q.query_string(|qs| qs.fields(["Name", "Description"]).query(full_text)))
//!     .filter(|f| f.term(|t| t.field("Category").value(category)))
//!     .build();
//!
//! assert_eq!(
//!     body,
//!     r#"{"query":{"query_string":{"fields":["Name","Description"],"query":"text"}}}"#
//! );
//! ```

use crate::aggregation::Aggregations;
use crate::beautify;
use crate::builder::{Component, Fragments};
use crate::filter::Filter;
use crate::highlight::Highlight;
use crate::json::JsonLiteral;
use crate::query::Query;
use crate::sort::Sort;

/// Builder for a search request body.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    body: Fragments,
}

impl QueryBuilder {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `query` section.
    pub fn query<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Query) -> Query,
    {
        self.body.compose("query", configure);
        self
    }

    /// The top-level `filter` section.
    pub fn filter<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Filter) -> Filter,
    {
        self.body.compose("filter", configure);
        self
    }

    /// Offset of the first hit.
    pub fn from(mut self, from: impl JsonLiteral) -> Self {
        self.body.set("from", from);
        self
    }

    /// Number of hits to return.
    pub fn size(mut self, size: impl JsonLiteral) -> Self {
        self.body.set("size", size);
        self
    }

    /// The `sort` array.
    pub fn sort<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Sort) -> Sort,
    {
        self.body.compose("sort", configure);
        self
    }

    /// The `highlight` section.
    pub fn highlight<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Highlight) -> Highlight,
    {
        self.body.compose("highlight", configure);
        self
    }

    /// The `aggs` section.
    pub fn aggregations<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Aggregations) -> Aggregations,
    {
        self.body.compose("aggs", configure);
        self
    }

    /// Stored fields to return.
    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: JsonLiteral,
    {
        self.body.literals("fields", fields);
        self
    }

    /// Return scoring explanations.
    pub fn explain(mut self, explain: impl JsonLiteral) -> Self {
        self.body.set("explain", explain);
        self
    }

    /// Return document versions.
    pub fn version(mut self, version: impl JsonLiteral) -> Self {
        self.body.set("version", version);
        self
    }

    /// Drop hits scoring below this.
    pub fn min_score(mut self, score: impl JsonLiteral) -> Self {
        self.body.set("min_score", score);
        self
    }

    /// Compute scores even when sorting on a field.
    pub fn track_scores(mut self, track: impl JsonLiteral) -> Self {
        self.body.set("track_scores", track);
        self
    }

    /// `_source`: `false` disables it.
    pub fn source(mut self, enabled: impl JsonLiteral) -> Self {
        self.body.set("_source", enabled);
        self
    }

    /// `_source` restricted to the listed fields.
    pub fn source_fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: JsonLiteral,
    {
        self.body.literals("_source", fields);
        self
    }

    /// A section this builder has no method for, as pre-rendered JSON.
    pub fn custom(mut self, key: &str, json: impl AsRef<str>) -> Self {
        self.body.raw(key, json);
        self
    }

    /// Compact request body. Always an object, `{}` when nothing is set.
    pub fn build(&self) -> String {
        format!("{{{}}}", self.body.members())
    }

    /// Indented request body.
    pub fn build_beautified(&self) -> String {
        beautify::pretty(&self.build())
    }
}

impl Component for QueryBuilder {
    fn render(&self) -> String {
        self.body.object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;

    #[test]
    fn test_empty_build() {
        assert_eq!(QueryBuilder::new().build(), "{}");
        assert_eq!(QueryBuilder::new().render(), "");
        assert_eq!(QueryBuilder::new().build_beautified(), "{}");
    }

    #[test]
    fn test_query_and_filter() {
        let body = QueryBuilder::new()
            .query(|q| q.query_string(|qs| qs.fields(["Name", "Alias"]).query("John")))
            .filter(|f| f.term(|t| t.field("Active").value("true")))
            .build();
        assert_eq!(
            body,
            r#"{"query":{"query_string":{"fields":["Name","Alias"],"query":"John"}},"filter":{"term":{"Active":"true"}}}"#
        );
    }

    #[test]
    fn test_paging_sort_and_source() {
        let body = QueryBuilder::new()
            .query(|q| q.match_all())
            .from(20)
            .size(10)
            .size(None::<u32>)
            .sort(|s| s.field("Name", SortDirection::Asc))
            .source_fields(["Name", "Price"])
            .min_score(0.5)
            .build();
        assert_eq!(
            body,
            r#"{"query":{"match_all":{}},"from":20,"size":10,"sort":[{"Name":"asc"}],"_source":["Name","Price"],"min_score":0.5}"#
        );
    }

    #[test]
    fn test_all_absent_collapses_to_empty_object() {
        let name: Option<&str> = None;
        let body = QueryBuilder::new()
            .query(|q| {
                q.bool(|b| {
                    b.must(|m| m.term(|t| t.field("Name").value(name)))
                        .should(|s| s.range(|r| r.field("Price").gte(None::<i32>)))
                        .boost(2.0)
                })
            })
            .highlight(|h| h.pre_tags(["<b>"]))
            .aggregations(|a| a.terms("tags", |t| t.field("")))
            .sort(|s| s.field("", SortDirection::Desc))
            .build();
        assert_eq!(body, "{}");
    }

    #[test]
    fn test_beautified_matches_compact() {
        let builder = QueryBuilder::new()
            .query(|q| q.term(|t| t.field("Name").value("x")))
            .size(5);
        let compact: serde_json::Value = serde_json::from_str(&builder.build()).unwrap();
        let pretty: serde_json::Value = serde_json::from_str(&builder.build_beautified()).unwrap();
        assert_eq!(compact, pretty);
        assert!(builder.build_beautified().contains("\n  \"size\": 5"));
    }
}
