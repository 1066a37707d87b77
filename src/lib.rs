//! # plainsearch
//!
//! Condition-less builders for search engine requests.
//!
//! Every builder silently drops the parts whose driving value is absent, so
//! a search form with half its inputs empty still produces minimal, valid
//! JSON without `if` chains at the call site.
//!
//! ```rust
//! use plainsearch::QueryBuilder;
//!
//! struct Criteria {
//!     full_text: Option<String>,
//!     active: Option<bool>,
//!     min_price: Option<f64>,
//! }
//!
//! let criteria = Criteria { full_text: Some("lamp".into()), active: None, min_price: None };
//!
//! let body = QueryBuilder::new()
//!     .query(|q| q.query_string(|qs| qs.fields(["Name", "Description"]).query(&criteria.full_text)))
//!     .filter(|f| {
//!         f.and(|a| {
//!             a.term(|t| t.field("Active").value(criteria.active))
//!                 .range(|r| r.field("Price").gte(criteria.min_price))
//!         })
//!     })
//!     .build();
//!
//! assert_eq!(
//!     body,
//!     r#"{"query":{"query_string":{"fields":["Name","Description"],"query":"lamp"}}}"#
//! );
//! ```
//!
//! ## Modules
//!
//! - [`search`]: the top-level [`QueryBuilder`]
//! - [`query`], [`filter`], [`clause`]: the query DSL
//! - [`aggregation`], [`sort`], [`highlight`]: request sections
//! - [`bulk`]: streaming bulk bodies split into batches
//! - [`mapping`]: put-mapping bodies
//! - [`field`]: property names derived from document types
//! - [`beautify`]: indented output for logs and debugging
//!
//! With the `client` feature, [`client`] sends the rendered bodies over HTTP.

#![warn(missing_docs)]

extern crate self as plainsearch;

pub mod aggregation;
pub mod beautify;
pub mod builder;
pub mod bulk;
pub mod clause;
pub mod error;
pub mod field;
pub mod filter;
pub mod highlight;
pub mod json;
pub mod mapping;
pub mod query;
pub mod search;
pub mod sort;

pub use aggregation::Aggregations;
pub use builder::{Clauses, Component, Fragments};
pub use bulk::{ActionBuilder, Batches, BulkAction, BulkBuilder, BulkMeta, JoinInBatches, Pipeline};
pub use clause::{Bool, Exists, Fuzzy, Ids, Missing, Nested, Prefix, Range, ScoreMode, Term, Terms, Wildcard};
pub use error::{BuilderError, Result};
pub use field::{FieldRef, Fields};
pub use filter::{BoolFilter, Filter};
pub use highlight::Highlight;
pub use json::JsonLiteral;
pub use mapping::MapBuilder;
pub use query::{BoolQuery, Operator, Query};
pub use search::QueryBuilder;
pub use sort::{Sort, SortDirection};

#[cfg(feature = "derive")]
pub use plainsearch_macro::Fields;

#[cfg(feature = "client")]
pub use plainsearch_client as client;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::builder::{Component, Clauses};
    pub use crate::bulk::{BulkBuilder, JoinInBatches};
    pub use crate::error::{BuilderError, Result};
    pub use crate::field::{FieldRef, Fields};
    pub use crate::filter::Filter;
    pub use crate::json::JsonLiteral;
    pub use crate::mapping::MapBuilder;
    pub use crate::query::{Operator, Query};
    pub use crate::search::QueryBuilder;
    pub use crate::sort::SortDirection;

    #[cfg(feature = "derive")]
    pub use plainsearch_macro::Fields;
}
