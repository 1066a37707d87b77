//! Leaf clauses shared by queries and filters.
//!
//! A clause renders nothing until its driving values are present: a `term`
//! needs a field and a value, a `range` needs a field and at least one bound,
//! and so on. Options such as `boost` never make a clause appear on their own.
//!
//! Setters hold a single value: calling one again with a present value
//! replaces the earlier one, and an absent value keeps it.

use crate::builder::{Clauses, Component, Fragments};
use crate::json::{self, JsonLiteral};
use std::marker::PhantomData;

fn set_name(slot: &mut Option<String>, name: &str) {
    if !name.is_empty() {
        *slot = Some(name.to_string());
    }
}

fn set_literal(slot: &mut Option<String>, value: impl JsonLiteral) {
    if let Some(rendered) = value.to_literal() {
        *slot = Some(rendered);
    }
}

/// `{"<field>":<value>}`, or `{"<field>":{"value":<value>,<options>}}` once
/// options are set.
fn render_keyed(field: &Option<String>, value: &Option<String>, options: &Fragments) -> String {
    let (Some(field), Some(value)) = (field, value) else {
        return String::new();
    };

    let body = if options.is_empty() {
        value.clone()
    } else {
        format!("{{\"value\":{},{}}}", value, options.members())
    };
    json::object(&json::property(field, &body))
}

macro_rules! keyed_clause {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            field: Option<String>,
            value: Option<String>,
            options: Fragments,
        }

        impl $name {
            /// Field to match against.
            pub fn field(mut self, field: impl AsRef<str>) -> Self {
                set_name(&mut self.field, field.as_ref());
                self
            }

            /// Value to match. Absent values leave the clause unrendered.
            pub fn value(mut self, value: impl JsonLiteral) -> Self {
                set_literal(&mut self.value, value);
                self
            }

            /// Boost applied to matches.
            pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
                self.options.set("boost", boost);
                self
            }
        }

        impl Component for $name {
            fn render(&self) -> String {
                render_keyed(&self.field, &self.value, &self.options)
            }
        }
    };
}

keyed_clause!(
    /// `term` clause: exact, unanalyzed match.
    Term
);

keyed_clause!(
    /// `prefix` clause.
    Prefix
);

keyed_clause!(
    /// `wildcard` clause (`*` and `?` patterns).
    Wildcard
);

keyed_clause!(
    /// `fuzzy` clause.
    Fuzzy
);

impl Fuzzy {
    /// Allowed edit distance (or `AUTO`).
    pub fn fuzziness(mut self, fuzziness: impl JsonLiteral) -> Self {
        self.options.set("fuzziness", fuzziness);
        self
    }

    /// Minimum similarity (pre-1.0 engines).
    pub fn min_similarity(mut self, similarity: impl JsonLiteral) -> Self {
        self.options.set("min_similarity", similarity);
        self
    }

    /// Number of leading characters that must match exactly.
    pub fn prefix_length(mut self, length: impl JsonLiteral) -> Self {
        self.options.set("prefix_length", length);
        self
    }

    /// Maximum number of terms the query expands to.
    pub fn max_expansions(mut self, max: impl JsonLiteral) -> Self {
        self.options.set("max_expansions", max);
        self
    }
}

/// `terms` clause: match any of several exact values.
#[derive(Debug, Clone, Default)]
pub struct Terms {
    field: Option<String>,
    values: Vec<String>,
    options: Fragments,
}

impl Terms {
    /// Field to match against.
    pub fn field(mut self, field: impl AsRef<str>) -> Self {
        set_name(&mut self.field, field.as_ref());
        self
    }

    /// Values to match. Absent entries are dropped; repeated calls extend the list.
    pub fn values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: JsonLiteral,
    {
        self.values
            .extend(values.into_iter().filter_map(|v| v.to_literal()));
        self
    }

    /// Minimum number of values that must match (queries).
    pub fn minimum_match(mut self, minimum: impl JsonLiteral) -> Self {
        self.options.set("minimum_match", minimum);
        self
    }

    /// Execution mode (`plain`, `bool`, `and`, `or`; filters).
    pub fn execution(mut self, execution: impl JsonLiteral) -> Self {
        self.options.set("execution", execution);
        self
    }

    /// Boost applied to matches.
    pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
        self.options.set("boost", boost);
        self
    }
}

impl Component for Terms {
    fn render(&self) -> String {
        let Some(field) = &self.field else {
            return String::new();
        };
        let values = json::property(field, &json::array(&self.values));
        if values.is_empty() {
            return String::new();
        }
        json::object(&json::join([values, self.options.members()]))
    }
}

/// `range` clause.
#[derive(Debug, Clone, Default)]
pub struct Range {
    field: Option<String>,
    body: Fragments,
    bounded: bool,
}

impl Range {
    /// Field to bound.
    pub fn field(mut self, field: impl AsRef<str>) -> Self {
        set_name(&mut self.field, field.as_ref());
        self
    }

    fn bound(mut self, key: &str, value: impl JsonLiteral) -> Self {
        self.bounded |= self.body.set(key, value);
        self
    }

    /// Lower bound (see `include_lower`).
    pub fn from(self, value: impl JsonLiteral) -> Self {
        self.bound("from", value)
    }

    /// Upper bound (see `include_upper`).
    pub fn to(self, value: impl JsonLiteral) -> Self {
        self.bound("to", value)
    }

    /// Greater than.
    pub fn gt(self, value: impl JsonLiteral) -> Self {
        self.bound("gt", value)
    }

    /// Greater than or equal.
    pub fn gte(self, value: impl JsonLiteral) -> Self {
        self.bound("gte", value)
    }

    /// Less than.
    pub fn lt(self, value: impl JsonLiteral) -> Self {
        self.bound("lt", value)
    }

    /// Less than or equal.
    pub fn lte(self, value: impl JsonLiteral) -> Self {
        self.bound("lte", value)
    }

    /// Whether `from` is inclusive.
    pub fn include_lower(mut self, include: impl JsonLiteral) -> Self {
        self.body.set("include_lower", include);
        self
    }

    /// Whether `to` is inclusive.
    pub fn include_upper(mut self, include: impl JsonLiteral) -> Self {
        self.body.set("include_upper", include);
        self
    }

    /// Date format for date bounds.
    pub fn format(mut self, format: impl JsonLiteral) -> Self {
        self.body.set("format", format);
        self
    }

    /// Boost applied to matches.
    pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
        self.body.set("boost", boost);
        self
    }
}

impl Component for Range {
    fn render(&self) -> String {
        match &self.field {
            Some(field) if self.bounded => json::object(&json::property(field, &self.body.object())),
            _ => String::new(),
        }
    }
}

/// `ids` clause.
#[derive(Debug, Clone, Default)]
pub struct Ids {
    body: Fragments,
    has_values: bool,
}

impl Ids {
    /// Restrict to a document type.
    pub fn doc_type(mut self, doc_type: impl JsonLiteral) -> Self {
        self.body.set("type", doc_type);
        self
    }

    /// Document ids to match.
    pub fn values<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: JsonLiteral,
    {
        self.has_values |= self.body.literals("values", ids);
        self
    }
}

impl Component for Ids {
    fn render(&self) -> String {
        if self.has_values {
            self.body.object()
        } else {
            String::new()
        }
    }
}

/// `exists` clause.
#[derive(Debug, Clone, Default)]
pub struct Exists {
    body: Fragments,
}

impl Exists {
    /// Field that must have a value.
    pub fn field(mut self, field: impl JsonLiteral) -> Self {
        self.body.set("field", field);
        self
    }
}

impl Component for Exists {
    fn render(&self) -> String {
        self.body.object()
    }
}

/// `missing` clause.
#[derive(Debug, Clone, Default)]
pub struct Missing {
    body: Fragments,
    has_field: bool,
}

impl Missing {
    /// Field that must have no value.
    pub fn field(mut self, field: impl JsonLiteral) -> Self {
        self.has_field |= self.body.set("field", field);
        self
    }

    /// Match documents where the field does not exist at all.
    pub fn existence(mut self, existence: impl JsonLiteral) -> Self {
        self.body.set("existence", existence);
        self
    }

    /// Match documents where the field is explicitly null.
    pub fn null_value(mut self, null_value: impl JsonLiteral) -> Self {
        self.body.set("null_value", null_value);
        self
    }
}

impl Component for Missing {
    fn render(&self) -> String {
        if self.has_field {
            self.body.object()
        } else {
            String::new()
        }
    }
}

/// `bool` clause over queries ([`crate::Query`]) or filters ([`crate::Filter`]).
///
/// Each `must`/`must_not`/`should` call spreads the configured container's
/// clauses into the matching array, so repeated calls accumulate entries.
#[derive(Debug, Clone)]
pub struct Bool<C> {
    body: Fragments,
    has_clauses: bool,
    clauses: PhantomData<C>,
}

impl<C> Default for Bool<C> {
    fn default() -> Self {
        Self {
            body: Fragments::new(),
            has_clauses: false,
            clauses: PhantomData,
        }
    }
}

impl<C: Clauses> Bool<C> {
    /// Clauses that must match.
    pub fn must<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(C) -> C,
    {
        self.has_clauses |= self.body.append_clauses("must", configure);
        self
    }

    /// Clauses that must not match.
    pub fn must_not<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(C) -> C,
    {
        self.has_clauses |= self.body.append_clauses("must_not", configure);
        self
    }

    /// Clauses that should match.
    pub fn should<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(C) -> C,
    {
        self.has_clauses |= self.body.append_clauses("should", configure);
        self
    }

    /// Minimum number (or percentage) of `should` clauses that must match.
    pub fn minimum_should_match(mut self, minimum: impl JsonLiteral) -> Self {
        self.body.set("minimum_should_match", minimum);
        self
    }

    /// Pre-1.0 spelling of `minimum_should_match`.
    pub fn minimum_number_should_match(mut self, minimum: impl JsonLiteral) -> Self {
        self.body.set("minimum_number_should_match", minimum);
        self
    }

    /// Boost applied to matches.
    pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
        self.body.set("boost", boost);
        self
    }

    /// Disable the coordination factor.
    pub fn disable_coord(mut self, disable: impl JsonLiteral) -> Self {
        self.body.set("disable_coord", disable);
        self
    }
}

impl<C: Clauses> Component for Bool<C> {
    fn render(&self) -> String {
        if self.has_clauses {
            self.body.object()
        } else {
            String::new()
        }
    }
}

/// How child scores combine in a `nested` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    /// Average of child scores.
    Avg,
    /// Sum of child scores.
    Total,
    /// Highest child score.
    Max,
    /// Ignore child scores.
    None,
}

impl ScoreMode {
    /// DSL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMode::Avg => "avg",
            ScoreMode::Total => "total",
            ScoreMode::Max => "max",
            ScoreMode::None => "none",
        }
    }
}

impl JsonLiteral for ScoreMode {
    fn to_literal(&self) -> Option<String> {
        self.as_str().to_literal()
    }
}

/// `nested` clause over an object array mapped as `nested`.
#[derive(Debug, Clone, Default)]
pub struct Nested {
    body: Fragments,
    has_path: bool,
    has_inner: bool,
}

impl Nested {
    /// Path of the nested object.
    pub fn path(mut self, path: impl JsonLiteral) -> Self {
        self.has_path |= self.body.set("path", path);
        self
    }

    /// Query run against each nested object.
    pub fn query<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(crate::Query) -> crate::Query,
    {
        self.has_inner |= self.body.compose("query", configure);
        self
    }

    /// Filter run against each nested object.
    pub fn filter<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(crate::Filter) -> crate::Filter,
    {
        self.has_inner |= self.body.compose("filter", configure);
        self
    }

    /// How child scores combine.
    pub fn score_mode(mut self, mode: impl JsonLiteral) -> Self {
        self.body.set("score_mode", mode);
        self
    }
}

impl Component for Nested {
    fn render(&self) -> String {
        if self.has_path && self.has_inner {
            self.body.object()
        } else {
            String::new()
        }
    }
}
