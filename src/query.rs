//! Query DSL clauses.
//!
//! [`Query`] is the container written under `"query"`. Each method adds one
//! clause keyed by its DSL name; `match` is spelled `match_query` because it
//! is a Rust keyword.

use crate::builder::{Clauses, Component, Fragments};
use crate::clause::{Bool, Fuzzy, Ids, Nested, Prefix, Range, Term, Terms, Wildcard};
use crate::filter::Filter;
use crate::json::{self, JsonLiteral};

/// A query clause container.
#[derive(Debug, Clone, Default)]
pub struct Query {
    body: Fragments,
}

/// `bool` query.
pub type BoolQuery = Bool<Query>;

impl Query {
    /// Create an empty query container.
    pub fn new() -> Self {
        Self::default()
    }

    /// `term` query.
    pub fn term<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Term) -> Term,
    {
        self.body.compose("term", configure);
        self
    }

    /// `terms` query.
    pub fn terms<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Terms) -> Terms,
    {
        self.body.compose("terms", configure);
        self
    }

    /// `range` query.
    pub fn range<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Range) -> Range,
    {
        self.body.compose("range", configure);
        self
    }

    /// `prefix` query.
    pub fn prefix<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Prefix) -> Prefix,
    {
        self.body.compose("prefix", configure);
        self
    }

    /// `wildcard` query.
    pub fn wildcard<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Wildcard) -> Wildcard,
    {
        self.body.compose("wildcard", configure);
        self
    }

    /// `fuzzy` query.
    pub fn fuzzy<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Fuzzy) -> Fuzzy,
    {
        self.body.compose("fuzzy", configure);
        self
    }

    /// `ids` query.
    pub fn ids<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Ids) -> Ids,
    {
        self.body.compose("ids", configure);
        self
    }

    /// `match_all` query. Always rendered.
    pub fn match_all(mut self) -> Self {
        self.body.raw("match_all", "{}");
        self
    }

    /// `match_all` query with options.
    pub fn match_all_with<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(MatchAll) -> MatchAll,
    {
        self.body.compose("match_all", configure);
        self
    }

    /// `query_string` query.
    pub fn query_string<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(QueryString) -> QueryString,
    {
        self.body.compose("query_string", configure);
        self
    }

    /// `match` query.
    pub fn match_query<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Match) -> Match,
    {
        self.body.compose("match", configure);
        self
    }

    /// `multi_match` query.
    pub fn multi_match<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(MultiMatch) -> MultiMatch,
    {
        self.body.compose("multi_match", configure);
        self
    }

    /// `bool` query.
    pub fn bool<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(BoolQuery) -> BoolQuery,
    {
        self.body.compose("bool", configure);
        self
    }

    /// `nested` query.
    pub fn nested<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Nested) -> Nested,
    {
        self.body.compose("nested", configure);
        self
    }

    /// `filtered` query.
    pub fn filtered<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Filtered) -> Filtered,
    {
        self.body.compose("filtered", configure);
        self
    }

    /// `constant_score` query.
    pub fn constant_score<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(ConstantScore) -> ConstantScore,
    {
        self.body.compose("constant_score", configure);
        self
    }

    /// `dis_max` query.
    pub fn dis_max<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(DisMax) -> DisMax,
    {
        self.body.compose("dis_max", configure);
        self
    }

    /// A clause this builder has no method for, as pre-rendered JSON.
    pub fn custom(mut self, key: &str, json: impl AsRef<str>) -> Self {
        self.body.raw(key, json);
        self
    }
}

impl Component for Query {
    fn render(&self) -> String {
        self.body.object()
    }
}

impl Clauses for Query {
    fn clauses(&self) -> Vec<String> {
        self.body.clauses()
    }
}

/// Default operator for analyzed queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// All terms must match.
    And,
    /// Any term may match.
    Or,
}

impl Operator {
    /// DSL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
        }
    }
}

impl JsonLiteral for Operator {
    fn to_literal(&self) -> Option<String> {
        self.as_str().to_literal()
    }
}

/// Options for `match_all`.
#[derive(Debug, Clone, Default)]
pub struct MatchAll {
    body: Fragments,
}

impl MatchAll {
    /// Boost applied to every document.
    pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
        self.body.set("boost", boost);
        self
    }
}

impl Component for MatchAll {
    fn render(&self) -> String {
        let rendered = self.body.object();
        if rendered.is_empty() {
            "{}".to_string()
        } else {
            rendered
        }
    }
}

/// `query_string` query. Omitted until `query` is set.
#[derive(Debug, Clone, Default)]
pub struct QueryString {
    body: Fragments,
    has_query: bool,
}

impl QueryString {
    /// Lucene query text.
    pub fn query(mut self, query: impl JsonLiteral) -> Self {
        self.has_query |= self.body.set("query", query);
        self
    }

    /// Fields to search.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.body.literals(
            "fields",
            fields.into_iter().map(|f| f.as_ref().to_string()),
        );
        self
    }

    /// Field used when the query names none.
    pub fn default_field(mut self, field: impl AsRef<str>) -> Self {
        self.body.set("default_field", field.as_ref());
        self
    }

    /// Operator between terms.
    pub fn default_operator(mut self, operator: impl JsonLiteral) -> Self {
        self.body.set("default_operator", operator);
        self
    }

    /// Analyzer for the query text.
    pub fn analyzer(mut self, analyzer: impl JsonLiteral) -> Self {
        self.body.set("analyzer", analyzer);
        self
    }

    /// Allow `*` or `?` as the first character.
    pub fn allow_leading_wildcard(mut self, allow: impl JsonLiteral) -> Self {
        self.body.set("allow_leading_wildcard", allow);
        self
    }

    /// Lowercase wildcard, prefix and fuzzy terms.
    pub fn lowercase_expanded_terms(mut self, lowercase: impl JsonLiteral) -> Self {
        self.body.set("lowercase_expanded_terms", lowercase);
        self
    }

    /// Analyze wildcard terms.
    pub fn analyze_wildcard(mut self, analyze: impl JsonLiteral) -> Self {
        self.body.set("analyze_wildcard", analyze);
        self
    }

    /// Minimum similarity for fuzzy terms.
    pub fn fuzzy_min_sim(mut self, similarity: impl JsonLiteral) -> Self {
        self.body.set("fuzzy_min_sim", similarity);
        self
    }

    /// Slop for phrase terms.
    pub fn phrase_slop(mut self, slop: impl JsonLiteral) -> Self {
        self.body.set("phrase_slop", slop);
        self
    }

    /// Minimum number of optional clauses that must match.
    pub fn minimum_should_match(mut self, minimum: impl JsonLiteral) -> Self {
        self.body.set("minimum_should_match", minimum);
        self
    }

    /// Ignore format-based failures.
    pub fn lenient(mut self, lenient: impl JsonLiteral) -> Self {
        self.body.set("lenient", lenient);
        self
    }

    /// Combine multi-field matches with `dis_max`.
    pub fn use_dis_max(mut self, use_dis_max: impl JsonLiteral) -> Self {
        self.body.set("use_dis_max", use_dis_max);
        self
    }

    /// Tie breaker for `dis_max` combination.
    pub fn tie_breaker(mut self, tie_breaker: impl JsonLiteral) -> Self {
        self.body.set("tie_breaker", tie_breaker);
        self
    }

    /// Boost applied to matches.
    pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
        self.body.set("boost", boost);
        self
    }
}

impl Component for QueryString {
    fn render(&self) -> String {
        if self.has_query {
            self.body.object()
        } else {
            String::new()
        }
    }
}

/// `match` query on one field.
#[derive(Debug, Clone, Default)]
pub struct Match {
    field: Option<String>,
    body: Fragments,
    has_query: bool,
}

impl Match {
    /// Field to search.
    pub fn field(mut self, field: impl AsRef<str>) -> Self {
        let field = field.as_ref();
        if !field.is_empty() {
            self.field = Some(field.to_string());
        }
        self
    }

    /// Text to analyze and match.
    pub fn query(mut self, query: impl JsonLiteral) -> Self {
        self.has_query |= self.body.set("query", query);
        self
    }

    /// Operator between analyzed terms.
    pub fn operator(mut self, operator: impl JsonLiteral) -> Self {
        self.body.set("operator", operator);
        self
    }

    /// Match type (`boolean`, `phrase`, `phrase_prefix`).
    pub fn match_type(mut self, match_type: impl JsonLiteral) -> Self {
        self.body.set("type", match_type);
        self
    }

    /// Allowed edit distance.
    pub fn fuzziness(mut self, fuzziness: impl JsonLiteral) -> Self {
        self.body.set("fuzziness", fuzziness);
        self
    }

    /// Analyzer for the query text.
    pub fn analyzer(mut self, analyzer: impl JsonLiteral) -> Self {
        self.body.set("analyzer", analyzer);
        self
    }

    /// Minimum number of terms that must match.
    pub fn minimum_should_match(mut self, minimum: impl JsonLiteral) -> Self {
        self.body.set("minimum_should_match", minimum);
        self
    }

    /// Behaviour when the analyzer removes every term (`none`, `all`).
    pub fn zero_terms_query(mut self, behaviour: impl JsonLiteral) -> Self {
        self.body.set("zero_terms_query", behaviour);
        self
    }

    /// Boost applied to matches.
    pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
        self.body.set("boost", boost);
        self
    }
}

impl Component for Match {
    fn render(&self) -> String {
        match &self.field {
            Some(field) if self.has_query => json::object(&json::property(field, &self.body.object())),
            _ => String::new(),
        }
    }
}

/// `multi_match` query.
#[derive(Debug, Clone, Default)]
pub struct MultiMatch {
    body: Fragments,
    has_query: bool,
    has_fields: bool,
}

impl MultiMatch {
    /// Text to analyze and match.
    pub fn query(mut self, query: impl JsonLiteral) -> Self {
        self.has_query |= self.body.set("query", query);
        self
    }

    /// Fields to search.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.has_fields |= self.body.literals(
            "fields",
            fields.into_iter().map(|f| f.as_ref().to_string()),
        );
        self
    }

    /// Match type (`best_fields`, `most_fields`, `cross_fields`, `phrase`, `phrase_prefix`).
    pub fn match_type(mut self, match_type: impl JsonLiteral) -> Self {
        self.body.set("type", match_type);
        self
    }

    /// Operator between analyzed terms.
    pub fn operator(mut self, operator: impl JsonLiteral) -> Self {
        self.body.set("operator", operator);
        self
    }

    /// Tie breaker between fields.
    pub fn tie_breaker(mut self, tie_breaker: impl JsonLiteral) -> Self {
        self.body.set("tie_breaker", tie_breaker);
        self
    }

    /// Boost applied to matches.
    pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
        self.body.set("boost", boost);
        self
    }
}

impl Component for MultiMatch {
    fn render(&self) -> String {
        if self.has_query && self.has_fields {
            self.body.object()
        } else {
            String::new()
        }
    }
}

/// `filtered` query: a query narrowed by a filter.
#[derive(Debug, Clone, Default)]
pub struct Filtered {
    body: Fragments,
}

impl Filtered {
    /// Scoring query.
    pub fn query<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Query) -> Query,
    {
        self.body.compose("query", configure);
        self
    }

    /// Non-scoring filter.
    pub fn filter<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Filter) -> Filter,
    {
        self.body.compose("filter", configure);
        self
    }
}

impl Component for Filtered {
    fn render(&self) -> String {
        self.body.object()
    }
}

/// `constant_score` query.
#[derive(Debug, Clone, Default)]
pub struct ConstantScore {
    body: Fragments,
    has_inner: bool,
}

impl ConstantScore {
    /// Filter whose matches all get the same score.
    pub fn filter<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Filter) -> Filter,
    {
        self.has_inner |= self.body.compose("filter", configure);
        self
    }

    /// Query whose matches all get the same score.
    pub fn query<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Query) -> Query,
    {
        self.has_inner |= self.body.compose("query", configure);
        self
    }

    /// The constant score.
    pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
        self.body.set("boost", boost);
        self
    }
}

impl Component for ConstantScore {
    fn render(&self) -> String {
        if self.has_inner {
            self.body.object()
        } else {
            String::new()
        }
    }
}

/// `dis_max` query.
#[derive(Debug, Clone, Default)]
pub struct DisMax {
    body: Fragments,
    has_queries: bool,
}

impl DisMax {
    /// Sub-queries; repeated calls accumulate.
    pub fn queries<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Query) -> Query,
    {
        self.has_queries |= self.body.append_clauses("queries", configure);
        self
    }

    /// Weight of non-maximal sub-query scores.
    pub fn tie_breaker(mut self, tie_breaker: impl JsonLiteral) -> Self {
        self.body.set("tie_breaker", tie_breaker);
        self
    }

    /// Boost applied to matches.
    pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
        self.body.set("boost", boost);
        self
    }
}

impl Component for DisMax {
    fn render(&self) -> String {
        if self.has_queries {
            self.body.object()
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::ScoreMode;

    #[test]
    fn test_empty_query_renders_nothing() {
        assert_eq!(Query::new().render(), "");
        assert_eq!(Query::new().term(|t| t.field("Active")).render(), "");
    }

    #[test]
    fn test_query_string_query_is_replaced() {
        let q = Query::new().query_string(|qs| qs.query("lamp").boost(2).query("desk").query(""));
        assert_eq!(q.render(), r#"{"query_string":{"query":"desk","boost":2}}"#);
    }

    #[test]
    fn test_query_string_needs_query() {
        let q = Query::new().query_string(|qs| qs.fields(["Name", "Alias"]).query(None::<&str>));
        assert_eq!(q.render(), "");

        let q = Query::new().query_string(|qs| {
            qs.fields(["Name", "Alias"])
                .query("John")
                .default_operator(Operator::And)
        });
        assert_eq!(
            q.render(),
            r#"{"query_string":{"fields":["Name","Alias"],"query":"John","default_operator":"and"}}"#
        );
    }

    #[test]
    fn test_bool_must_accumulates_in_order() {
        let q = Query::new().bool(|b| {
            b.must(|q| q.term(|t| t.field("A").value("1")))
                .should(|q| q.prefix(|p| p.field("N").value("jo")))
                .must(|q| q.term(|t| t.field("B").value("2")))
                .must(|q| q.term(|t| t.field("C").value("")))
        });
        assert_eq!(
            q.render(),
            r#"{"bool":{"must":[{"term":{"A":"1"}},{"term":{"B":"2"}}],"should":[{"prefix":{"N":"jo"}}]}}"#
        );
    }

    #[test]
    fn test_bool_without_clauses_vanishes() {
        let q = Query::new().bool(|b| b.must(|q| q.term(|t| t.field("A"))).boost(2));
        assert_eq!(q.render(), "");
    }

    #[test]
    fn test_match_and_match_all() {
        let q = Query::new()
            .match_query(|m| m.field("Title").query("rust").operator(Operator::Or))
            .match_all();
        assert_eq!(
            q.render(),
            r#"{"match":{"Title":{"query":"rust","operator":"or"}},"match_all":{}}"#
        );

        let boosted = Query::new().match_all_with(|m| m.boost(1.5));
        assert_eq!(boosted.render(), r#"{"match_all":{"boost":1.5}}"#);
    }

    #[test]
    fn test_multi_match_needs_fields() {
        assert_eq!(Query::new().multi_match(|m| m.query("x")).render(), "");
        assert_eq!(
            Query::new()
                .multi_match(|m| m.query("x").fields(["A", "B"]).match_type("phrase"))
                .render(),
            r#"{"multi_match":{"query":"x","fields":["A","B"],"type":"phrase"}}"#
        );
    }

    #[test]
    fn test_nested_and_filtered() {
        let q = Query::new().nested(|n| {
            n.path("Orders")
                .query(|q| q.term(|t| t.field("Orders.Status").value("paid")))
                .score_mode(ScoreMode::Avg)
        });
        assert_eq!(
            q.render(),
            r#"{"nested":{"path":"Orders","query":{"term":{"Orders.Status":"paid"}},"score_mode":"avg"}}"#
        );

        let empty_nested = Query::new().nested(|n| n.path("Orders").query(|q| q));
        assert_eq!(empty_nested.render(), "");

        let filtered = Query::new().filtered(|f| {
            f.query(|q| q.match_all())
                .filter(|f| f.term(|t| t.field("Active").value(true)))
        });
        assert_eq!(
            filtered.render(),
            r#"{"filtered":{"query":{"match_all":{}},"filter":{"term":{"Active":true}}}}"#
        );
    }

    #[test]
    fn test_dis_max_and_constant_score() {
        let q = Query::new()
            .dis_max(|d| {
                d.queries(|q| {
                    q.term(|t| t.field("A").value("x"))
                        .term(|t| t.field("B").value("x"))
                })
                .tie_breaker(0.7)
            })
            .constant_score(|c| c.boost(3));
        assert_eq!(
            q.render(),
            r#"{"dis_max":{"queries":[{"term":{"A":"x"}},{"term":{"B":"x"}}],"tie_breaker":0.7}}"#
        );
    }

    #[test]
    fn test_custom_clause() {
        let q = Query::new().custom("more_like_this", r#"{"like_text":"x"}"#).custom("empty", "");
        assert_eq!(q.render(), r#"{"more_like_this":{"like_text":"x"}}"#);
    }
}
