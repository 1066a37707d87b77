//! Filter DSL clauses.

use crate::builder::{Clauses, Component, Fragments};
use crate::clause::{Bool, Exists, Ids, Missing, Nested, Prefix, Range, Term, Terms};
use crate::json::{self, JsonLiteral};
use crate::query::Query;

/// A filter clause container.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    body: Fragments,
}

/// `bool` filter.
pub type BoolFilter = Bool<Filter>;

impl Filter {
    /// Create an empty filter container.
    pub fn new() -> Self {
        Self::default()
    }

    /// `and` filter. Each clause of the configured container becomes one
    /// array entry; repeated calls extend the same array.
    pub fn and<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Filter) -> Filter,
    {
        self.body.append_clauses("and", configure);
        self
    }

    /// `or` filter, built like [`Filter::and`].
    pub fn or<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Filter) -> Filter,
    {
        self.body.append_clauses("or", configure);
        self
    }

    /// `not` filter.
    pub fn not<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Filter) -> Filter,
    {
        let inner = configure(Filter::default()).render();
        self.body.raw("not", json::object(&json::property("filter", &inner)));
        self
    }

    /// `bool` filter.
    pub fn bool<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(BoolFilter) -> BoolFilter,
    {
        self.body.compose("bool", configure);
        self
    }

    /// `term` filter.
    pub fn term<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Term) -> Term,
    {
        self.body.compose("term", configure);
        self
    }

    /// `terms` filter.
    pub fn terms<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Terms) -> Terms,
    {
        self.body.compose("terms", configure);
        self
    }

    /// `range` filter.
    pub fn range<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Range) -> Range,
    {
        self.body.compose("range", configure);
        self
    }

    /// `prefix` filter.
    pub fn prefix<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Prefix) -> Prefix,
    {
        self.body.compose("prefix", configure);
        self
    }

    /// `exists` filter.
    pub fn exists<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Exists) -> Exists,
    {
        self.body.compose("exists", configure);
        self
    }

    /// `missing` filter.
    pub fn missing<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Missing) -> Missing,
    {
        self.body.compose("missing", configure);
        self
    }

    /// `ids` filter.
    pub fn ids<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Ids) -> Ids,
    {
        self.body.compose("ids", configure);
        self
    }

    /// `type` filter.
    pub fn doc_type(mut self, doc_type: impl JsonLiteral) -> Self {
        let mut inner = Fragments::new();
        inner.set("value", doc_type);
        self.body.raw("type", inner.object());
        self
    }

    /// `nested` filter.
    pub fn nested<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Nested) -> Nested,
    {
        self.body.compose("nested", configure);
        self
    }

    /// `query` filter: wraps a query so it can be used as a filter.
    pub fn query<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Query) -> Query,
    {
        self.body.compose("query", configure);
        self
    }

    /// `match_all` filter. Always rendered.
    pub fn match_all(mut self) -> Self {
        self.body.raw("match_all", "{}");
        self
    }

    /// A clause this builder has no method for, as pre-rendered JSON.
    pub fn custom(mut self, key: &str, json: impl AsRef<str>) -> Self {
        self.body.raw(key, json);
        self
    }
}

impl Component for Filter {
    fn render(&self) -> String {
        self.body.object()
    }
}

impl Clauses for Filter {
    fn clauses(&self) -> Vec<String> {
        self.body.clauses()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_spreads_clauses() {
        let f = Filter::new().and(|a| {
            a.range(|r| r.field("Price").gte(10))
                .term(|t| t.field("Active").value("true"))
        });
        assert_eq!(
            f.render(),
            r#"{"and":[{"range":{"Price":{"gte":10}}},{"term":{"Active":"true"}}]}"#
        );
    }

    #[test]
    fn test_and_with_only_absent_clauses_vanishes() {
        let f = Filter::new().and(|a| {
            a.range(|r| r.field("Price").gte(None::<f64>).lte(None::<f64>))
                .term(|t| t.field("Active").value(None::<bool>))
        });
        assert_eq!(f.render(), "");
    }

    #[test]
    fn test_or_accumulates_across_calls() {
        let f = Filter::new()
            .or(|o| o.term(|t| t.field("A").value(1)))
            .or(|o| o.term(|t| t.field("B").value(2)));
        assert_eq!(f.render(), r#"{"or":[{"term":{"A":1}},{"term":{"B":2}}]}"#);
    }

    #[test]
    fn test_not_wraps_filter() {
        let f = Filter::new().not(|n| n.exists(|e| e.field("Deleted")));
        assert_eq!(f.render(), r#"{"not":{"filter":{"exists":{"field":"Deleted"}}}}"#);
        assert_eq!(Filter::new().not(|n| n).render(), "");
    }

    #[test]
    fn test_bool_filter() {
        let f = Filter::new().bool(|b| {
            b.must(|f| f.term(|t| t.field("Active").value(true)))
                .must_not(|f| f.missing(|m| m.field("Email")))
        });
        assert_eq!(
            f.render(),
            r#"{"bool":{"must":[{"term":{"Active":true}}],"must_not":[{"missing":{"field":"Email"}}]}}"#
        );
    }

    #[test]
    fn test_type_and_query_filters() {
        let f = Filter::new()
            .doc_type("customer")
            .doc_type("")
            .query(|q| q.query_string(|qs| qs.query("jo*")));
        assert_eq!(
            f.render(),
            r#"{"type":{"value":"customer"},"query":{"query_string":{"query":"jo*"}}}"#
        );
    }
}
