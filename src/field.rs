//! Field references resolved from document types.
//!
//! A document type derives [`Fields`] to publish the names its serializer
//! writes, so builders emit the same property names that indexing produced.
//!
//! ```rust
//! use plainsearch::{field, field_of_collection, Fields, FieldRef};
//! use serde::Serialize;
//!
//! #[derive(Serialize, Fields)]
//! #[serde(rename_all = "PascalCase")]
//! struct Customer {
//!     name: String,
//!     orders: Vec<Order>,
//! }
//!
//! #[derive(Serialize, Fields)]
//! struct Order {
//!     #[serde(rename = "orderId")]
//!     id: u64,
//! }
//!
//! # fn main() -> plainsearch::Result<()> {
//! assert_eq!(field!(Customer, name)?.as_str(), "Name");
//! assert_eq!(field_of_collection!(Customer, orders, Order, id)?.as_str(), "Orders.orderId");
//! assert!(FieldRef::of::<Customer>("name.len()").is_err());
//! # Ok(())
//! # }
//! ```
//!
//! Only plain member access is accepted. Selectors with calls, indexing or
//! operators are rejected when resolved.

use crate::error::{BuilderError, Result};
use crate::json::JsonLiteral;
use std::fmt;

/// Serialized-name table for a document type.
///
/// Usually generated with `#[derive(Fields)]`.
pub trait Fields {
    /// The serialized name of `member`, or `None` if the type has no such
    /// (serialized) member.
    fn field_name(member: &str) -> Option<&'static str>;
}

/// A resolved JSON property name or dotted path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef(String);

impl FieldRef {
    /// Wrap a literal name without checking it against any type.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Resolve a member of `T` to its serialized name.
    pub fn of<T: Fields>(selector: &str) -> Result<Self> {
        resolve::<T>(selector).map(|name| Self(name.to_string()))
    }

    /// Resolve `collection.member` where `collection` is a member of `C`
    /// holding elements of type `E`.
    pub fn of_collection<C: Fields, E: Fields>(collection: &str, member: &str) -> Result<Self> {
        let parent = resolve::<C>(collection)?;
        let child = resolve::<E>(member)?;
        Ok(Self(format!("{}.{}", parent, child)))
    }

    /// Append a nested segment.
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}.{}", self.0, name))
    }

    /// The property name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn resolve<T: Fields>(selector: &str) -> Result<&'static str> {
    let member = member_name(selector)?;
    T::field_name(member).ok_or_else(|| BuilderError::UnknownField {
        type_name: short_type_name::<T>(),
        member: member.to_string(),
    })
}

fn member_name(selector: &str) -> Result<&str> {
    let trimmed = selector.trim();
    let name = trimmed.strip_prefix("r#").unwrap_or(trimmed);

    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if !valid || name == "_" {
        return Err(BuilderError::InvalidFieldSelector(selector.to_string()));
    }
    Ok(name)
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

impl AsRef<str> for FieldRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldRef {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for FieldRef {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl JsonLiteral for FieldRef {
    fn to_literal(&self) -> Option<String> {
        self.0.to_literal()
    }
}

/// Resolve `Type.member` to its serialized name.
///
/// The member must exist on the type and be visible at the call site;
/// otherwise this fails to compile.
#[macro_export]
macro_rules! field {
    ($ty:ty, $member:ident) => {{
        let _ = |doc: &$ty| {
            let _ = &doc.$member;
        };
        $crate::FieldRef::of::<$ty>(stringify!($member))
    }};
}

/// Resolve `Type.collection` + `Element.member` to a dotted path.
#[macro_export]
macro_rules! field_of_collection {
    ($ty:ty, $collection:ident, $element:ty, $member:ident) => {{
        let _ = |doc: &$ty, item: &$element| {
            let _ = (&doc.$collection, &item.$member);
        };
        $crate::FieldRef::of_collection::<$ty, $element>(
            stringify!($collection),
            stringify!($member),
        )
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Product {
        title: String,
        tags: Vec<Tag>,
    }

    impl Fields for Product {
        fn field_name(member: &str) -> Option<&'static str> {
            match member {
                "title" => Some("Title"),
                "tags" => Some("Tags"),
                _ => None,
            }
        }
    }

    struct Tag {
        label: String,
    }

    impl Fields for Tag {
        fn field_name(member: &str) -> Option<&'static str> {
            match member {
                "label" => Some("label"),
                _ => None,
            }
        }
    }

    #[test]
    fn test_resolve_member() {
        let field = FieldRef::of::<Product>("title").unwrap();
        assert_eq!(field.as_str(), "Title");
        assert_eq!(field.to_string(), "Title");
    }

    #[test]
    fn test_resolve_collection_member() {
        let field = FieldRef::of_collection::<Product, Tag>("tags", "label").unwrap();
        assert_eq!(field.as_str(), "Tags.label");
    }

    #[test]
    fn test_raw_identifier_is_accepted() {
        assert_eq!(FieldRef::of::<Product>("r#title").unwrap().as_str(), "Title");
    }

    #[test]
    fn test_rejects_computed_selector() {
        for selector in ["title.len()", "tags[0]", "title + 1", "", "9lives", "_"] {
            match FieldRef::of::<Product>(selector) {
                Err(BuilderError::InvalidFieldSelector(s)) => assert_eq!(s, selector),
                other => panic!("expected invalid selector for {selector:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_unknown_member() {
        match FieldRef::of::<Product>("price") {
            Err(BuilderError::UnknownField { type_name, member }) => {
                assert_eq!(type_name, "Product");
                assert_eq!(member, "price");
            }
            other => panic!("expected unknown field, got {other:?}"),
        }
    }

    #[test]
    fn test_macros_check_members() {
        let title = field!(Product, title).unwrap();
        assert_eq!(title.as_str(), "Title");

        let label = field_of_collection!(Product, tags, Tag, label).unwrap();
        assert_eq!(label.as_str(), "Tags.label");

        // silence unused-field warnings on the fixtures
        let tag = Tag { label: String::new() };
        let product = Product { title: String::new(), tags: vec![tag] };
        assert!(product.title.is_empty() && product.tags[0].label.is_empty());
    }

    struct Menu {
        café: String,
    }

    impl Fields for Menu {
        fn field_name(member: &str) -> Option<&'static str> {
            match member {
                "café" => Some("Café"),
                _ => None,
            }
        }
    }

    #[test]
    fn test_non_ascii_member() {
        assert_eq!(field!(Menu, café).unwrap().as_str(), "Café");
        assert!(matches!(
            FieldRef::of::<Menu>("café.len()"),
            Err(BuilderError::InvalidFieldSelector(_))
        ));
        let menu = Menu { café: String::new() };
        assert!(menu.café.is_empty());
    }

    #[test]
    fn test_child_path() {
        assert_eq!(FieldRef::new("Address").child("City").as_str(), "Address.City");
    }
}
