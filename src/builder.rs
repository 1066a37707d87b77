//! The builder core shared by every grammar type.
//!
//! A builder is a plain value holding [`Fragments`]. Fluent methods take the
//! builder by value and return it, and nested scopes are closures that receive
//! a fresh child builder and hand it back configured:
//!
//! ```rust
//! use plainsearch::{Component, Query};
//!
//! let query = Query::default()
//!     .term(|t| t.field("Active").value("true"))
//!     .prefix(|p| p.field("Name").value(""));
//!
//! // the prefix clause had no value, so it is gone
//! assert_eq!(query.render(), r#"{"term":{"Active":"true"}}"#);
//! ```
//!
//! Every value flows through [`Fragments`], which drops absent literals and
//! empty child renders. That single rule is what makes the grammar
//! condition-less.

use crate::json::{self, JsonLiteral};

/// A builder that renders to a JSON fragment.
///
/// `render` returns either an empty string (nothing was set) or a complete
/// JSON value. It must be a pure function of the builder's state.
pub trait Component: Default {
    /// Render the current state.
    fn render(&self) -> String;
}

/// A clause container whose clauses can be spread into an array.
///
/// `{"term":..,"range":..}` becomes `[{"term":..},{"range":..}]`.
pub trait Clauses: Component {
    /// Each clause wrapped as its own object, in call order.
    fn clauses(&self) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Member { key: String, member: String },
    Array { key: String, items: Vec<String> },
}

impl Slot {
    fn render(&self) -> String {
        match self {
            Slot::Member { member, .. } => member.clone(),
            Slot::Array { key, items } => json::property(key, &json::array(items)),
        }
    }
}

/// Ordered accumulator of rendered `"key":value` members.
///
/// Keys added with [`Fragments::literal`], [`Fragments::raw`] and
/// [`Fragments::compose`] are not deduplicated. [`Fragments::set`] holds one
/// value per key, and array keys fed through [`Fragments::append`] keep the
/// position of their first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    slots: Vec<Slot>,
}

impl Fragments {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Add `"key":<literal>` unless the value is absent.
    pub fn literal(&mut self, key: &str, value: impl JsonLiteral) -> bool {
        match value.to_literal() {
            Some(rendered) => self.raw(key, rendered),
            None => false,
        }
    }

    /// Single-valued `"key":<literal>`: a present value replaces the member
    /// already stored under `key`, in place. An absent value changes nothing.
    ///
    /// Leaf setters (`field`, `boost`, `size`, ...) go through here.
    pub fn set(&mut self, key: &str, value: impl JsonLiteral) -> bool {
        let Some(rendered) = value.to_literal() else {
            return false;
        };

        for slot in &mut self.slots {
            if let Slot::Member { key: existing, member } = slot {
                if existing == key {
                    *member = json::property(key, &rendered);
                    return true;
                }
            }
        }
        self.raw(key, rendered)
    }

    /// Add `"key":[<literal>,...]`. Absent items are skipped and an empty
    /// array is omitted.
    pub fn literals<I>(&mut self, key: &str, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: JsonLiteral,
    {
        let items: Vec<String> = values
            .into_iter()
            .filter_map(|v| v.to_literal())
            .collect();
        self.raw(key, json::array(items))
    }

    /// Add `"key":<rendered>` for text that is already JSON.
    pub fn raw(&mut self, key: &str, rendered: impl AsRef<str>) -> bool {
        let member = json::property(key, rendered.as_ref());
        if member.is_empty() {
            return false;
        }
        self.slots.push(Slot::Member {
            key: key.to_string(),
            member,
        });
        true
    }

    /// Configure a fresh child builder and add `"key":<child>` if the child
    /// rendered anything.
    pub fn compose<B, F>(&mut self, key: &str, configure: F) -> bool
    where
        B: Component,
        F: FnOnce(B) -> B,
    {
        let child = configure(B::default());
        self.raw(key, child.render())
    }

    /// Append one rendered entry to the array under `key`.
    pub fn append(&mut self, key: &str, rendered: impl Into<String>) -> bool {
        let rendered = rendered.into();
        if rendered.is_empty() {
            return false;
        }

        for slot in &mut self.slots {
            if let Slot::Array { key: existing, items } = slot {
                if existing == key {
                    items.push(rendered);
                    return true;
                }
            }
        }

        self.slots.push(Slot::Array {
            key: key.to_string(),
            items: vec![rendered],
        });
        true
    }

    /// Configure a fresh child and append its render to the array under `key`.
    pub fn append_component<B, F>(&mut self, key: &str, configure: F) -> bool
    where
        B: Component,
        F: FnOnce(B) -> B,
    {
        let child = configure(B::default());
        self.append(key, child.render())
    }

    /// Configure a fresh clause container and append each of its clauses to
    /// the array under `key`.
    pub fn append_clauses<B, F>(&mut self, key: &str, configure: F) -> bool
    where
        B: Clauses,
        F: FnOnce(B) -> B,
    {
        let child = configure(B::default());
        let mut added = false;
        for clause in child.clauses() {
            added |= self.append(key, clause);
        }
        added
    }

    /// Comma-joined members without braces.
    pub fn members(&self) -> String {
        json::join(self.slots.iter().map(Slot::render))
    }

    /// Members wrapped in braces, or empty.
    pub fn object(&self) -> String {
        json::object(&self.members())
    }

    /// Each member wrapped as its own object.
    pub fn clauses(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| json::object(&slot.render()))
            .filter(|clause| !clause.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Leaf {
        body: Fragments,
    }

    impl Leaf {
        fn value(mut self, value: &str) -> Self {
            self.body.literal("value", value);
            self
        }
    }

    impl Component for Leaf {
        fn render(&self) -> String {
            self.body.object()
        }
    }

    impl Clauses for Leaf {
        fn clauses(&self) -> Vec<String> {
            self.body.clauses()
        }
    }

    #[test]
    fn test_literal_omits_absent() {
        let mut body = Fragments::new();
        assert!(!body.literal("a", ""));
        assert!(!body.literal("b", None::<i32>));
        assert!(body.literal("c", 3));
        assert_eq!(body.object(), r#"{"c":3}"#);
    }

    #[test]
    fn test_empty_fragments_render_empty() {
        let body = Fragments::new();
        assert!(body.is_empty());
        assert_eq!(body.members(), "");
        assert_eq!(body.object(), "");
        assert!(body.clauses().is_empty());
    }

    #[test]
    fn test_compose_omits_empty_child() {
        let mut body = Fragments::new();
        body.compose("inner", |l: Leaf| l.value(""));
        assert!(body.is_empty());

        body.compose("inner", |l: Leaf| l.value("x"));
        assert_eq!(body.object(), r#"{"inner":{"value":"x"}}"#);
    }

    #[test]
    fn test_repeated_key_is_not_deduplicated() {
        let mut body = Fragments::new();
        body.literal("edge", "a");
        body.literal("edge", "b");
        assert_eq!(body.members(), r#""edge":"a","edge":"b""#);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut body = Fragments::new();
        assert!(body.set("field", "A"));
        body.set("boost", 2);
        assert!(body.set("field", "B"));
        assert!(!body.set("field", None::<&str>));
        assert_eq!(body.object(), r#"{"field":"B","boost":2}"#);
    }

    #[test]
    fn test_append_keeps_first_position() {
        let mut body = Fragments::new();
        body.append("must", "1");
        body.literal("boost", 2);
        body.append("must", "2");
        body.append("must", "");
        assert_eq!(body.object(), r#"{"must":[1,2],"boost":2}"#);
    }

    #[test]
    fn test_append_clauses_spreads_members() {
        let mut body = Fragments::new();
        body.append_clauses("and", |l: Leaf| l.value("a").value("b"));
        assert_eq!(body.object(), r#"{"and":[{"value":"a"},{"value":"b"}]}"#);
    }

    #[test]
    fn test_literals_array() {
        let mut body = Fragments::new();
        body.literals("fields", ["Name", "", "Alias"]);
        body.literals("empty", Vec::<String>::new());
        assert_eq!(body.object(), r#"{"fields":["Name","Alias"]}"#);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut body = Fragments::new();
        body.literal("query", "text");
        body.append("items", "1");
        assert_eq!(body.object(), body.object());
    }
}
