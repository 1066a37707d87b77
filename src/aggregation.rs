//! Aggregations (`"aggs"`).
//!
//! Each named entry renders as `{"<kind>":{...},"aggs":{...}}`. An entry whose
//! body has nothing to aggregate on is dropped along with its name.
//!
//! ```rust
//! use plainsearch::{Aggregations, Component, SortDirection};
//!
//! let aggs = Aggregations::default()
//!     .terms("by_category", |t| {
//!         t.field("Category")
//!             .size(5)
//!             .order("_count", SortDirection::Desc)
//!             .aggregations(|a| a.avg("avg_price", |m| m.field("Price")))
//!     })
//!     .max("top_price", |m| m.field(""));
//!
//! assert_eq!(
//!     aggs.render(),
//!     r#"{"by_category":{"terms":{"field":"Category","size":5,"order":{"_count":"desc"}},"aggs":{"avg_price":{"avg":{"field":"Price"}}}}}"#
//! );
//! ```

use crate::builder::{Component, Fragments};
use crate::filter::Filter;
use crate::json::{self, JsonLiteral};
use crate::sort::SortDirection;

trait AggregationBody: Default {
    /// The kind's parameter object, or empty when there is nothing to aggregate.
    fn body(&self) -> String;

    /// Rendered sub-aggregations, or empty.
    fn sub_aggregations(&self) -> String {
        String::new()
    }
}

/// Named aggregations.
#[derive(Debug, Clone, Default)]
pub struct Aggregations {
    body: Fragments,
}

impl Aggregations {
    fn add<A, F>(mut self, name: &str, kind: &str, configure: F) -> Self
    where
        A: AggregationBody,
        F: FnOnce(A) -> A,
    {
        if name.is_empty() {
            return self;
        }
        let agg = configure(A::default());
        let body = agg.body();
        if !body.is_empty() {
            let entry = json::join([
                json::property(kind, &body),
                json::property("aggs", &agg.sub_aggregations()),
            ]);
            self.body.raw(name, json::object(&entry));
        }
        self
    }

    /// `terms` bucket aggregation.
    pub fn terms<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(TermsAggregation) -> TermsAggregation,
    {
        self.add(name, "terms", configure)
    }

    /// `range` bucket aggregation.
    pub fn range<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(RangeAggregation) -> RangeAggregation,
    {
        self.add(name, "range", configure)
    }

    /// `histogram` bucket aggregation.
    pub fn histogram<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(HistogramAggregation) -> HistogramAggregation,
    {
        self.add(name, "histogram", configure)
    }

    /// `date_histogram` bucket aggregation.
    pub fn date_histogram<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(HistogramAggregation) -> HistogramAggregation,
    {
        self.add(name, "date_histogram", configure)
    }

    /// `missing` bucket aggregation.
    pub fn missing<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MissingAggregation) -> MissingAggregation,
    {
        self.add(name, "missing", configure)
    }

    /// `filter` bucket aggregation.
    pub fn filter<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(FilterAggregation) -> FilterAggregation,
    {
        self.add(name, "filter", configure)
    }

    /// `nested` bucket aggregation.
    pub fn nested<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(NestedAggregation) -> NestedAggregation,
    {
        self.add(name, "nested", configure)
    }

    /// `avg` metric.
    pub fn avg<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MetricAggregation) -> MetricAggregation,
    {
        self.add(name, "avg", configure)
    }

    /// `sum` metric.
    pub fn sum<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MetricAggregation) -> MetricAggregation,
    {
        self.add(name, "sum", configure)
    }

    /// `min` metric.
    pub fn min<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MetricAggregation) -> MetricAggregation,
    {
        self.add(name, "min", configure)
    }

    /// `max` metric.
    pub fn max<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MetricAggregation) -> MetricAggregation,
    {
        self.add(name, "max", configure)
    }

    /// `stats` metric.
    pub fn stats<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MetricAggregation) -> MetricAggregation,
    {
        self.add(name, "stats", configure)
    }

    /// `extended_stats` metric.
    pub fn extended_stats<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MetricAggregation) -> MetricAggregation,
    {
        self.add(name, "extended_stats", configure)
    }

    /// `value_count` metric.
    pub fn value_count<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MetricAggregation) -> MetricAggregation,
    {
        self.add(name, "value_count", configure)
    }

    /// `cardinality` metric.
    pub fn cardinality<F>(self, name: &str, configure: F) -> Self
    where
        F: FnOnce(MetricAggregation) -> MetricAggregation,
    {
        self.add(name, "cardinality", configure)
    }
}

impl Component for Aggregations {
    fn render(&self) -> String {
        self.body.object()
    }
}

/// Field/script source shared by most aggregation kinds.
#[derive(Debug, Clone, Default)]
struct Source {
    body: Fragments,
    has_source: bool,
}

impl Source {
    fn field(&mut self, field: &str) {
        self.has_source |= self.body.set("field", field);
    }

    fn script(&mut self, script: impl JsonLiteral) {
        self.has_source |= self.body.set("script", script);
    }
}

/// Metric aggregation (`avg`, `sum`, `min`, `max`, `stats`, `cardinality`, ...).
#[derive(Debug, Clone, Default)]
pub struct MetricAggregation {
    source: Source,
}

impl MetricAggregation {
    /// Field to aggregate.
    pub fn field(mut self, field: impl AsRef<str>) -> Self {
        self.source.field(field.as_ref());
        self
    }

    /// Script producing the values.
    pub fn script(mut self, script: impl JsonLiteral) -> Self {
        self.source.script(script);
        self
    }

    /// Value used for documents without the field.
    pub fn missing(mut self, missing: impl JsonLiteral) -> Self {
        self.source.body.set("missing", missing);
        self
    }

    /// Counts below this are expected to be close to exact (`cardinality`).
    pub fn precision_threshold(mut self, threshold: impl JsonLiteral) -> Self {
        self.source.body.set("precision_threshold", threshold);
        self
    }
}

impl AggregationBody for MetricAggregation {
    fn body(&self) -> String {
        if self.source.has_source {
            self.source.body.object()
        } else {
            String::new()
        }
    }
}

/// `terms` bucket aggregation.
#[derive(Debug, Clone, Default)]
pub struct TermsAggregation {
    source: Source,
    aggs: Aggregations,
}

impl TermsAggregation {
    /// Field to bucket on.
    pub fn field(mut self, field: impl AsRef<str>) -> Self {
        self.source.field(field.as_ref());
        self
    }

    /// Script producing the terms.
    pub fn script(mut self, script: impl JsonLiteral) -> Self {
        self.source.script(script);
        self
    }

    /// Number of buckets returned.
    pub fn size(mut self, size: impl JsonLiteral) -> Self {
        self.source.body.set("size", size);
        self
    }

    /// Number of buckets requested from each shard.
    pub fn shard_size(mut self, size: impl JsonLiteral) -> Self {
        self.source.body.set("shard_size", size);
        self
    }

    /// Minimum document count for a bucket.
    pub fn min_doc_count(mut self, count: impl JsonLiteral) -> Self {
        self.source.body.set("min_doc_count", count);
        self
    }

    /// Bucket order, e.g. `("_count", Desc)` or `("_term", Asc)`.
    pub fn order(mut self, key: &str, direction: SortDirection) -> Self {
        if !key.is_empty() {
            let mut order = Fragments::new();
            order.set(key, direction);
            self.source.body.raw("order", order.object());
        }
        self
    }

    /// Include pattern.
    pub fn include(mut self, pattern: impl JsonLiteral) -> Self {
        self.source.body.set("include", pattern);
        self
    }

    /// Exclude pattern.
    pub fn exclude(mut self, pattern: impl JsonLiteral) -> Self {
        self.source.body.set("exclude", pattern);
        self
    }

    /// Sub-aggregations per bucket; repeated calls add to the same set.
    pub fn aggregations<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Aggregations) -> Aggregations,
    {
        self.aggs = configure(self.aggs);
        self
    }
}

impl AggregationBody for TermsAggregation {
    fn body(&self) -> String {
        if self.source.has_source {
            self.source.body.object()
        } else {
            String::new()
        }
    }

    fn sub_aggregations(&self) -> String {
        self.aggs.render()
    }
}

/// `range` bucket aggregation.
#[derive(Debug, Clone, Default)]
pub struct RangeAggregation {
    source: Source,
    has_ranges: bool,
    aggs: Aggregations,
}

impl RangeAggregation {
    /// Field to bucket on.
    pub fn field(mut self, field: impl AsRef<str>) -> Self {
        self.source.field(field.as_ref());
        self
    }

    /// Script producing the values.
    pub fn script(mut self, script: impl JsonLiteral) -> Self {
        self.source.script(script);
        self
    }

    /// Return buckets as an object keyed by range key.
    pub fn keyed(mut self, keyed: impl JsonLiteral) -> Self {
        self.source.body.set("keyed", keyed);
        self
    }

    /// One bucket; repeated calls add buckets in order.
    pub fn range<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(RangeBucket) -> RangeBucket,
    {
        self.has_ranges |= self.source.body.append_component("ranges", configure);
        self
    }

    /// Sub-aggregations per bucket.
    pub fn aggregations<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Aggregations) -> Aggregations,
    {
        self.aggs = configure(self.aggs);
        self
    }
}

impl AggregationBody for RangeAggregation {
    fn body(&self) -> String {
        if self.source.has_source && self.has_ranges {
            self.source.body.object()
        } else {
            String::new()
        }
    }

    fn sub_aggregations(&self) -> String {
        self.aggs.render()
    }
}

/// One bucket of a `range` aggregation. Needs `from` or `to`.
#[derive(Debug, Clone, Default)]
pub struct RangeBucket {
    body: Fragments,
    bounded: bool,
}

impl RangeBucket {
    /// Bucket key.
    pub fn key(mut self, key: impl JsonLiteral) -> Self {
        self.body.set("key", key);
        self
    }

    /// Inclusive lower bound.
    pub fn from(mut self, from: impl JsonLiteral) -> Self {
        self.bounded |= self.body.set("from", from);
        self
    }

    /// Exclusive upper bound.
    pub fn to(mut self, to: impl JsonLiteral) -> Self {
        self.bounded |= self.body.set("to", to);
        self
    }
}

impl Component for RangeBucket {
    fn render(&self) -> String {
        if self.bounded {
            self.body.object()
        } else {
            String::new()
        }
    }
}

/// `histogram` and `date_histogram` bucket aggregations. Need a field (or
/// script) and an interval.
#[derive(Debug, Clone, Default)]
pub struct HistogramAggregation {
    source: Source,
    has_interval: bool,
    aggs: Aggregations,
}

impl HistogramAggregation {
    /// Field to bucket on.
    pub fn field(mut self, field: impl AsRef<str>) -> Self {
        self.source.field(field.as_ref());
        self
    }

    /// Script producing the values.
    pub fn script(mut self, script: impl JsonLiteral) -> Self {
        self.source.script(script);
        self
    }

    /// Bucket width (number, or `day`/`1h` style for dates).
    pub fn interval(mut self, interval: impl JsonLiteral) -> Self {
        self.has_interval |= self.source.body.set("interval", interval);
        self
    }

    /// Minimum document count for a bucket.
    pub fn min_doc_count(mut self, count: impl JsonLiteral) -> Self {
        self.source.body.set("min_doc_count", count);
        self
    }

    /// Key format (date histograms).
    pub fn format(mut self, format: impl JsonLiteral) -> Self {
        self.source.body.set("format", format);
        self
    }

    /// Time zone (date histograms).
    pub fn time_zone(mut self, zone: impl JsonLiteral) -> Self {
        self.source.body.set("time_zone", zone);
        self
    }

    /// Bucket order, e.g. `("_key", Asc)`.
    pub fn order(mut self, key: &str, direction: SortDirection) -> Self {
        if !key.is_empty() {
            let mut order = Fragments::new();
            order.set(key, direction);
            self.source.body.raw("order", order.object());
        }
        self
    }

    /// Sub-aggregations per bucket.
    pub fn aggregations<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Aggregations) -> Aggregations,
    {
        self.aggs = configure(self.aggs);
        self
    }
}

impl AggregationBody for HistogramAggregation {
    fn body(&self) -> String {
        if self.source.has_source && self.has_interval {
            self.source.body.object()
        } else {
            String::new()
        }
    }

    fn sub_aggregations(&self) -> String {
        self.aggs.render()
    }
}

/// `missing` bucket aggregation.
#[derive(Debug, Clone, Default)]
pub struct MissingAggregation {
    source: Source,
    aggs: Aggregations,
}

impl MissingAggregation {
    /// Field whose absence defines the bucket.
    pub fn field(mut self, field: impl AsRef<str>) -> Self {
        self.source.field(field.as_ref());
        self
    }

    /// Sub-aggregations for the bucket.
    pub fn aggregations<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Aggregations) -> Aggregations,
    {
        self.aggs = configure(self.aggs);
        self
    }
}

impl AggregationBody for MissingAggregation {
    fn body(&self) -> String {
        if self.source.has_source {
            self.source.body.object()
        } else {
            String::new()
        }
    }

    fn sub_aggregations(&self) -> String {
        self.aggs.render()
    }
}

/// `filter` bucket aggregation.
#[derive(Debug, Clone, Default)]
pub struct FilterAggregation {
    filter: Filter,
    aggs: Aggregations,
}

impl FilterAggregation {
    /// Filter defining the bucket.
    pub fn filter<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Filter) -> Filter,
    {
        self.filter = configure(self.filter);
        self
    }

    /// Sub-aggregations for the bucket.
    pub fn aggregations<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Aggregations) -> Aggregations,
    {
        self.aggs = configure(self.aggs);
        self
    }
}

impl AggregationBody for FilterAggregation {
    fn body(&self) -> String {
        self.filter.render()
    }

    fn sub_aggregations(&self) -> String {
        self.aggs.render()
    }
}

/// `nested` bucket aggregation.
#[derive(Debug, Clone, Default)]
pub struct NestedAggregation {
    body: Fragments,
    aggs: Aggregations,
}

impl NestedAggregation {
    /// Path of the nested objects.
    pub fn path(mut self, path: impl JsonLiteral) -> Self {
        self.body.set("path", path);
        self
    }

    /// Aggregations over the nested objects.
    pub fn aggregations<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Aggregations) -> Aggregations,
    {
        self.aggs = configure(self.aggs);
        self
    }
}

impl AggregationBody for NestedAggregation {
    fn body(&self) -> String {
        self.body.object()
    }

    fn sub_aggregations(&self) -> String {
        self.aggs.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_without_field_is_dropped() {
        let aggs = Aggregations::default()
            .avg("avg_price", |m| m.field(""))
            .sum("total", |m| m.field("Price"));
        assert_eq!(aggs.render(), r#"{"total":{"sum":{"field":"Price"}}}"#);
        assert_eq!(Aggregations::default().min("m", |m| m).render(), "");
    }

    #[test]
    fn test_unnamed_aggregation_is_dropped() {
        let aggs = Aggregations::default()
            .avg("", |m| m.field("Price"))
            .max("top", |m| m.field("Price"));
        assert_eq!(aggs.render(), r#"{"top":{"max":{"field":"Price"}}}"#);
    }

    #[test]
    fn test_range_buckets() {
        let aggs = Aggregations::default().range("prices", |r| {
            r.field("Price")
                .range(|b| b.to(50))
                .range(|b| b.from(50).to(100))
                .range(|b| b.key("none"))
                .range(|b| b.from(100))
        });
        assert_eq!(
            aggs.render(),
            r#"{"prices":{"range":{"field":"Price","ranges":[{"to":50},{"from":50,"to":100},{"from":100}]}}}"#
        );
    }

    #[test]
    fn test_histogram_needs_interval() {
        let aggs = Aggregations::default()
            .histogram("h", |h| h.field("Price"))
            .date_histogram("per_month", |h| h.field("Created").interval("month").format("yyyy-MM"));
        assert_eq!(
            aggs.render(),
            r#"{"per_month":{"date_histogram":{"field":"Created","interval":"month","format":"yyyy-MM"}}}"#
        );
    }

    #[test]
    fn test_filter_and_nested_aggregations() {
        let aggs = Aggregations::default()
            .filter("active", |f| {
                f.filter(|f| f.term(|t| t.field("Active").value(true)))
                    .aggregations(|a| a.value_count("count", |m| m.field("Id")))
            })
            .nested("orders", |n| {
                n.path("Orders")
                    .aggregations(|a| a.cardinality("buyers", |m| m.field("Orders.Buyer").precision_threshold(100)))
            })
            .filter("nothing", |f| f.filter(|f| f.term(|t| t.field("Active"))));
        assert_eq!(
            aggs.render(),
            concat!(
                r#"{"active":{"filter":{"term":{"Active":true}},"aggs":{"count":{"value_count":{"field":"Id"}}}},"#,
                r#""orders":{"nested":{"path":"Orders"},"aggs":{"buyers":{"cardinality":{"field":"Orders.Buyer","precision_threshold":100}}}}}"#
            )
        );
    }
}
