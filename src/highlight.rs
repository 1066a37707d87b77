//! Highlight clause.

use crate::builder::{Component, Fragments};
use crate::json::JsonLiteral;

/// The `highlight` object. Omitted until at least one field is listed.
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    body: Fragments,
    has_fields: bool,
}

impl Highlight {
    /// Tags inserted before each highlighted fragment.
    pub fn pre_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: JsonLiteral,
    {
        self.body.literals("pre_tags", tags);
        self
    }

    /// Tags inserted after each highlighted fragment.
    pub fn post_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: JsonLiteral,
    {
        self.body.literals("post_tags", tags);
        self
    }

    /// Built-in tag schema (`styled`).
    pub fn tags_schema(mut self, schema: impl JsonLiteral) -> Self {
        self.body.set("tags_schema", schema);
        self
    }

    /// Fragment ordering (`score`).
    pub fn order(mut self, order: impl JsonLiteral) -> Self {
        self.body.set("order", order);
        self
    }

    /// Fragment size in characters.
    pub fn fragment_size(mut self, size: impl JsonLiteral) -> Self {
        self.body.set("fragment_size", size);
        self
    }

    /// Maximum number of fragments.
    pub fn number_of_fragments(mut self, count: impl JsonLiteral) -> Self {
        self.body.set("number_of_fragments", count);
        self
    }

    /// Encoder (`default`, `html`).
    pub fn encoder(mut self, encoder: impl JsonLiteral) -> Self {
        self.body.set("encoder", encoder);
        self
    }

    /// Only highlight fields the query matched on.
    pub fn require_field_match(mut self, require: impl JsonLiteral) -> Self {
        self.body.set("require_field_match", require);
        self
    }

    /// Fields to highlight.
    pub fn fields<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(HighlightFields) -> HighlightFields,
    {
        self.has_fields |= self.body.compose("fields", configure);
        self
    }
}

impl Component for Highlight {
    fn render(&self) -> String {
        if self.has_fields {
            self.body.object()
        } else {
            String::new()
        }
    }
}

/// The `fields` object inside `highlight`.
#[derive(Debug, Clone, Default)]
pub struct HighlightFields {
    body: Fragments,
}

impl HighlightFields {
    /// Highlight a field with default options: `"<field>":{}`.
    pub fn field(mut self, field: impl AsRef<str>) -> Self {
        let field = field.as_ref();
        if !field.is_empty() {
            self.body.raw(field, "{}");
        }
        self
    }

    /// Highlight a field with its own options.
    pub fn field_with<F>(mut self, field: impl AsRef<str>, configure: F) -> Self
    where
        F: FnOnce(HighlightField) -> HighlightField,
    {
        let field = field.as_ref();
        if !field.is_empty() {
            let options = configure(HighlightField::default()).render();
            if options.is_empty() {
                self.body.raw(field, "{}");
            } else {
                self.body.raw(field, options);
            }
        }
        self
    }
}

impl Component for HighlightFields {
    fn render(&self) -> String {
        self.body.object()
    }
}

/// Per-field highlight options.
#[derive(Debug, Clone, Default)]
pub struct HighlightField {
    body: Fragments,
}

impl HighlightField {
    /// Fragment size in characters.
    pub fn fragment_size(mut self, size: impl JsonLiteral) -> Self {
        self.body.set("fragment_size", size);
        self
    }

    /// Maximum number of fragments.
    pub fn number_of_fragments(mut self, count: impl JsonLiteral) -> Self {
        self.body.set("number_of_fragments", count);
        self
    }

    /// Highlighter implementation (`plain`, `postings`, `fvh`).
    pub fn highlighter_type(mut self, kind: impl JsonLiteral) -> Self {
        self.body.set("type", kind);
        self
    }

    /// Characters of context when no fragment matches.
    pub fn no_match_size(mut self, size: impl JsonLiteral) -> Self {
        self.body.set("no_match_size", size);
        self
    }

    /// Per-field pre tags.
    pub fn pre_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: JsonLiteral,
    {
        self.body.literals("pre_tags", tags);
        self
    }

    /// Per-field post tags.
    pub fn post_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: JsonLiteral,
    {
        self.body.literals("post_tags", tags);
        self
    }
}

impl Component for HighlightField {
    fn render(&self) -> String {
        self.body.object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_fields() {
        let h = Highlight::default()
            .pre_tags(["<b>"])
            .post_tags(["</b>"])
            .fields(|f| {
                f.field("Name")
                    .field_with("Description", |o| o.fragment_size(150).number_of_fragments(3))
                    .field_with("Notes", |o| o)
            });
        assert_eq!(
            h.render(),
            r#"{"pre_tags":["<b>"],"post_tags":["</b>"],"fields":{"Name":{},"Description":{"fragment_size":150,"number_of_fragments":3},"Notes":{}}}"#
        );
    }

    #[test]
    fn test_highlight_without_fields_vanishes() {
        let h = Highlight::default().pre_tags(["<em>"]).fields(|f| f.field(""));
        assert_eq!(h.render(), "");
    }
}
