//! Sort clause.

use crate::builder::{Component, Fragments};
use crate::json::{self, JsonLiteral};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// DSL spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl JsonLiteral for SortDirection {
    fn to_literal(&self) -> Option<String> {
        self.as_str().to_literal()
    }
}

/// The `sort` array.
#[derive(Debug, Clone, Default)]
pub struct Sort {
    items: Vec<String>,
}

impl Sort {
    /// Sort by a field in the given direction: `{"<field>":"asc"}`.
    pub fn field(mut self, field: impl AsRef<str>, direction: SortDirection) -> Self {
        let field = field.as_ref();
        if !field.is_empty() {
            let entry = json::property(field, &json::quote(direction.as_str()));
            self.items.push(json::object(&entry));
        }
        self
    }

    /// Sort by a field with options.
    pub fn by<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(SortField) -> SortField,
    {
        let entry = configure(SortField::default()).render();
        if !entry.is_empty() {
            self.items.push(entry);
        }
        self
    }

    /// Sort by relevance.
    pub fn score(mut self) -> Self {
        self.items.push(json::quote("_score"));
        self
    }
}

impl Component for Sort {
    fn render(&self) -> String {
        json::array(&self.items)
    }
}

/// One sort entry with options.
#[derive(Debug, Clone, Default)]
pub struct SortField {
    field: Option<String>,
    body: Fragments,
}

impl SortField {
    /// Field to sort by.
    pub fn field(mut self, field: impl AsRef<str>) -> Self {
        let field = field.as_ref();
        if !field.is_empty() {
            self.field = Some(field.to_string());
        }
        self
    }

    /// Direction.
    pub fn order(mut self, direction: impl JsonLiteral) -> Self {
        self.body.set("order", direction);
        self
    }

    /// Placement of documents without the field (`_first`, `_last` or a value).
    pub fn missing(mut self, missing: impl JsonLiteral) -> Self {
        self.body.set("missing", missing);
        self
    }

    /// Ignore indices where the field is unmapped.
    pub fn ignore_unmapped(mut self, ignore: impl JsonLiteral) -> Self {
        self.body.set("ignore_unmapped", ignore);
        self
    }

    /// Value picked from multi-valued fields (`min`, `max`, `sum`, `avg`).
    pub fn mode(mut self, mode: impl JsonLiteral) -> Self {
        self.body.set("mode", mode);
        self
    }
}

impl Component for SortField {
    fn render(&self) -> String {
        let Some(field) = &self.field else {
            return String::new();
        };
        if self.body.is_empty() {
            json::quote(field)
        } else {
            json::object(&json::property(field, &self.body.object()))
        }
    }
}
