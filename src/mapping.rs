//! Mapping definitions.
//!
//! ```rust
//! use plainsearch::MapBuilder;
//!
//! let mapping = MapBuilder::new()
//!     .root_object("product", |o| {
//!         o.source(true).properties(|p| {
//!             p.string("Name", |s| s.index("analyzed").analyzer("english"))
//!                 .number("Price", |n| n.number_type("double"))
//!                 .date("Created", |d| d.format("dateOptionalTime"))
//!         })
//!     })
//!     .build();
//!
//! assert_eq!(
//!     mapping,
//!     r#"{"product":{"_source":{"enabled":true},"properties":{"Name":{"type":"string","index":"analyzed","analyzer":"english"},"Price":{"type":"double"},"Created":{"type":"date","format":"dateOptionalTime"}}}}"#
//! );
//! ```

use crate::builder::{Component, Fragments};
use crate::json::{self, JsonLiteral};

/// Builder for a put-mapping body.
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    body: Fragments,
}

impl MapBuilder {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Root object for a document type: `{"<type>":{...}}`.
    pub fn root_object<F>(mut self, doc_type: &str, configure: F) -> Self
    where
        F: FnOnce(ObjectMapping) -> ObjectMapping,
    {
        if !doc_type.is_empty() {
            self.body.raw(doc_type, configure(ObjectMapping::default()).options());
        }
        self
    }

    /// Compact body, `{}` when nothing is set.
    pub fn build(&self) -> String {
        format!("{{{}}}", self.body.members())
    }
}

impl Component for MapBuilder {
    fn render(&self) -> String {
        self.body.object()
    }
}

/// Property body with its `type` first.
fn typed(kind: &str, options: &Fragments) -> String {
    json::object(&json::join([
        json::property("type", &json::quote(kind)),
        options.members(),
    ]))
}

fn enabled_object(enabled: impl JsonLiteral) -> String {
    let mut inner = Fragments::new();
    inner.set("enabled", enabled);
    inner.object()
}

/// Root, `object` and `nested` mapping options.
#[derive(Debug, Clone, Default)]
pub struct ObjectMapping {
    body: Fragments,
}

impl ObjectMapping {
    /// Child properties.
    pub fn properties<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(Properties) -> Properties,
    {
        self.body.compose("properties", configure);
        self
    }

    /// Dynamic mapping (`true`, `false`, `"strict"`).
    pub fn dynamic(mut self, dynamic: impl JsonLiteral) -> Self {
        self.body.set("dynamic", dynamic);
        self
    }

    /// Whether the object is parsed at all.
    pub fn enabled(mut self, enabled: impl JsonLiteral) -> Self {
        self.body.set("enabled", enabled);
        self
    }

    /// `_source` storage.
    pub fn source(mut self, enabled: impl JsonLiteral) -> Self {
        self.body.raw("_source", enabled_object(enabled));
        self
    }

    /// `_all` field.
    pub fn all(mut self, enabled: impl JsonLiteral) -> Self {
        self.body.raw("_all", enabled_object(enabled));
        self
    }

    fn typed(&self, kind: &str) -> String {
        typed(kind, &self.body)
    }

    /// Members alone; `{}` when nothing is set.
    fn options(&self) -> String {
        format!("{{{}}}", self.body.members())
    }
}

impl Component for ObjectMapping {
    fn render(&self) -> String {
        self.body.object()
    }
}

/// The `properties` object.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    body: Fragments,
}

impl Properties {
    fn add(mut self, name: &str, rendered: String) -> Self {
        if !name.is_empty() {
            self.body.raw(name, rendered);
        }
        self
    }

    /// `string` property.
    pub fn string<F>(self, name: impl AsRef<str>, configure: F) -> Self
    where
        F: FnOnce(StringProperty) -> StringProperty,
    {
        let rendered = configure(StringProperty::default()).0.typed("string");
        self.add(name.as_ref(), rendered)
    }

    /// Numeric property; the type defaults to `float`.
    pub fn number<F>(self, name: impl AsRef<str>, configure: F) -> Self
    where
        F: FnOnce(NumberProperty) -> NumberProperty,
    {
        let number = configure(NumberProperty::default());
        let kind = number.number_type.as_deref().unwrap_or("float");
        let rendered = number.options.typed(kind);
        self.add(name.as_ref(), rendered)
    }

    /// `date` property.
    pub fn date<F>(self, name: impl AsRef<str>, configure: F) -> Self
    where
        F: FnOnce(DateProperty) -> DateProperty,
    {
        let rendered = configure(DateProperty::default()).0.typed("date");
        self.add(name.as_ref(), rendered)
    }

    /// `boolean` property.
    pub fn boolean<F>(self, name: impl AsRef<str>, configure: F) -> Self
    where
        F: FnOnce(SimpleProperty) -> SimpleProperty,
    {
        let rendered = configure(SimpleProperty::default()).0.typed("boolean");
        self.add(name.as_ref(), rendered)
    }

    /// `binary` property.
    pub fn binary<F>(self, name: impl AsRef<str>, configure: F) -> Self
    where
        F: FnOnce(SimpleProperty) -> SimpleProperty,
    {
        let rendered = configure(SimpleProperty::default()).0.typed("binary");
        self.add(name.as_ref(), rendered)
    }

    /// `object` property.
    pub fn object<F>(self, name: impl AsRef<str>, configure: F) -> Self
    where
        F: FnOnce(ObjectMapping) -> ObjectMapping,
    {
        let rendered = configure(ObjectMapping::default()).typed("object");
        self.add(name.as_ref(), rendered)
    }

    /// `nested` property.
    pub fn nested<F>(self, name: impl AsRef<str>, configure: F) -> Self
    where
        F: FnOnce(ObjectMapping) -> ObjectMapping,
    {
        let rendered = configure(ObjectMapping::default()).typed("nested");
        self.add(name.as_ref(), rendered)
    }

    /// `multi_field` property; the inner properties become `fields`.
    pub fn multi_field<F>(self, name: impl AsRef<str>, configure: F) -> Self
    where
        F: FnOnce(Properties) -> Properties,
    {
        let fields = configure(Properties::default()).render();
        let rendered = json::object(&json::join([
            json::property("type", &json::quote("multi_field")),
            json::property("fields", &fields),
        ]));
        self.add(name.as_ref(), rendered)
    }
}

impl Component for Properties {
    fn render(&self) -> String {
        self.body.object()
    }
}

/// Options shared by leaf properties.
#[derive(Debug, Clone, Default)]
struct LeafOptions {
    body: Fragments,
}

impl LeafOptions {
    fn typed(&self, kind: &str) -> String {
        typed(kind, &self.body)
    }
}

/// `string` property options.
#[derive(Debug, Clone, Default)]
pub struct StringProperty(LeafOptions);

impl StringProperty {
    /// `analyzed`, `not_analyzed` or `no`.
    pub fn index(mut self, index: impl JsonLiteral) -> Self {
        self.0.body.set("index", index);
        self
    }

    /// Analyzer for indexing and searching.
    pub fn analyzer(mut self, analyzer: impl JsonLiteral) -> Self {
        self.0.body.set("analyzer", analyzer);
        self
    }

    /// Analyzer used at index time.
    pub fn index_analyzer(mut self, analyzer: impl JsonLiteral) -> Self {
        self.0.body.set("index_analyzer", analyzer);
        self
    }

    /// Analyzer used at search time.
    pub fn search_analyzer(mut self, analyzer: impl JsonLiteral) -> Self {
        self.0.body.set("search_analyzer", analyzer);
        self
    }

    /// Store the raw value.
    pub fn store(mut self, store: impl JsonLiteral) -> Self {
        self.0.body.set("store", store);
        self
    }

    /// Index-time boost.
    pub fn boost(mut self, boost: impl JsonLiteral) -> Self {
        self.0.body.set("boost", boost);
        self
    }

    /// Value indexed in place of null.
    pub fn null_value(mut self, value: impl JsonLiteral) -> Self {
        self.0.body.set("null_value", value);
        self
    }

    /// Include in `_all`.
    pub fn include_in_all(mut self, include: impl JsonLiteral) -> Self {
        self.0.body.set("include_in_all", include);
        self
    }

    /// Term vector storage.
    pub fn term_vector(mut self, term_vector: impl JsonLiteral) -> Self {
        self.0.body.set("term_vector", term_vector);
        self
    }
}

/// Numeric property options.
#[derive(Debug, Clone, Default)]
pub struct NumberProperty {
    number_type: Option<String>,
    options: LeafOptions,
}

impl NumberProperty {
    /// `float`, `double`, `integer`, `long`, `short` or `byte`.
    pub fn number_type(mut self, number_type: impl AsRef<str>) -> Self {
        let number_type = number_type.as_ref();
        if !number_type.is_empty() {
            self.number_type = Some(number_type.to_string());
        }
        self
    }

    /// `not_analyzed` or `no`.
    pub fn index(mut self, index: impl JsonLiteral) -> Self {
        self.options.body.set("index", index);
        self
    }

    /// Store the raw value.
    pub fn store(mut self, store: impl JsonLiteral) -> Self {
        self.options.body.set("store", store);
        self
    }

    /// Terms indexed per value for range queries.
    pub fn precision_step(mut self, step: impl JsonLiteral) -> Self {
        self.options.body.set("precision_step", step);
        self
    }

    /// Value indexed in place of null.
    pub fn null_value(mut self, value: impl JsonLiteral) -> Self {
        self.options.body.set("null_value", value);
        self
    }
}

/// `date` property options.
#[derive(Debug, Clone, Default)]
pub struct DateProperty(LeafOptions);

impl DateProperty {
    /// Date format.
    pub fn format(mut self, format: impl JsonLiteral) -> Self {
        self.0.body.set("format", format);
        self
    }

    /// `not_analyzed` or `no`.
    pub fn index(mut self, index: impl JsonLiteral) -> Self {
        self.0.body.set("index", index);
        self
    }

    /// Store the raw value.
    pub fn store(mut self, store: impl JsonLiteral) -> Self {
        self.0.body.set("store", store);
        self
    }
}

/// Options for `boolean` and `binary` properties.
#[derive(Debug, Clone, Default)]
pub struct SimpleProperty(LeafOptions);

impl SimpleProperty {
    /// `not_analyzed` or `no`.
    pub fn index(mut self, index: impl JsonLiteral) -> Self {
        self.0.body.set("index", index);
        self
    }

    /// Store the raw value.
    pub fn store(mut self, store: impl JsonLiteral) -> Self {
        self.0.body.set("store", store);
        self
    }
}
