//! Low-level JSON text primitives.
//!
//! Everything here works on already-rendered text. The one rule shared by all
//! helpers is that an empty input produces an empty output, which is what
//! lets unset clauses disappear from the final document.
//!
//! Null and the empty string are both treated as absent. A caller that really
//! wants to send `""` to the engine cannot express it through [`JsonLiteral`].

use serde_json::Value;

/// Quote and escape a string for embedding in JSON.
pub fn quote(value: &str) -> String {
    Value::String(value.to_owned()).to_string()
}

/// Render `"name":value`, or nothing if `value` is empty.
pub fn property(name: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!("{}:{}", quote(name), value)
}

/// Comma-join the non-empty parts.
pub fn join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(',');
        }
        out.push_str(part);
    }
    out
}

/// Wrap members in braces. Empty members give an empty string.
pub fn object(members: &str) -> String {
    if members.is_empty() {
        return String::new();
    }
    format!("{{{}}}", members)
}

/// Join items into a JSON array. No items gives an empty string.
pub fn array<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = join(items);
    if joined.is_empty() {
        return String::new();
    }
    format!("[{}]", joined)
}

/// A value that can be written as a JSON literal.
///
/// `None` means the value is absent and its key must be omitted.
pub trait JsonLiteral {
    /// Rendered JSON text, or `None` when absent.
    fn to_literal(&self) -> Option<String>;
}

impl JsonLiteral for str {
    fn to_literal(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(quote(self))
        }
    }
}

impl JsonLiteral for String {
    fn to_literal(&self) -> Option<String> {
        self.as_str().to_literal()
    }
}

impl<T: JsonLiteral + ?Sized> JsonLiteral for &T {
    fn to_literal(&self) -> Option<String> {
        (**self).to_literal()
    }
}

impl<T: JsonLiteral> JsonLiteral for Option<T> {
    fn to_literal(&self) -> Option<String> {
        self.as_ref().and_then(JsonLiteral::to_literal)
    }
}

impl JsonLiteral for bool {
    fn to_literal(&self) -> Option<String> {
        Some(self.to_string())
    }
}

macro_rules! integer_literal {
    ($($ty:ty),*) => {
        $(
            impl JsonLiteral for $ty {
                fn to_literal(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

integer_literal!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl JsonLiteral for f64 {
    fn to_literal(&self) -> Option<String> {
        serde_json::Number::from_f64(*self).map(|n| n.to_string())
    }
}

impl JsonLiteral for f32 {
    fn to_literal(&self) -> Option<String> {
        f64::from(*self).to_literal()
    }
}

impl JsonLiteral for Value {
    fn to_literal(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::String(s) => s.to_literal(),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("a\\b"), "\"a\\\\b\"");
        assert_eq!(quote("line\nbreak\t"), "\"line\\nbreak\\t\"");
        assert_eq!(quote("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_property_skips_empty_value() {
        assert_eq!(property("size", "10"), "\"size\":10");
        assert_eq!(property("size", ""), "");
    }

    #[test]
    fn test_join_skips_empty_parts() {
        assert_eq!(join(["\"a\":1", "", "\"b\":2"]), "\"a\":1,\"b\":2");
        assert_eq!(join(Vec::<String>::new()), "");
    }

    #[test]
    fn test_object_and_array() {
        assert_eq!(object(""), "");
        assert_eq!(object("\"a\":1"), "{\"a\":1}");
        assert_eq!(array(["1", "", "2"]), "[1,2]");
        assert_eq!(array(["", ""]), "");
    }

    #[test]
    fn test_absent_literals() {
        assert_eq!("".to_literal(), None);
        assert_eq!(String::new().to_literal(), None);
        assert_eq!(None::<&str>.to_literal(), None);
        assert_eq!(None::<i32>.to_literal(), None);
        assert_eq!(Value::Null.to_literal(), None);
        assert_eq!(json!("").to_literal(), None);
        assert_eq!(f64::NAN.to_literal(), None);
    }

    #[test]
    fn test_present_literals() {
        assert_eq!("John".to_literal().as_deref(), Some("\"John\""));
        assert_eq!(Some(42u32).to_literal().as_deref(), Some("42"));
        assert_eq!((-7i64).to_literal().as_deref(), Some("-7"));
        assert_eq!(false.to_literal().as_deref(), Some("false"));
        assert_eq!(2.5f64.to_literal().as_deref(), Some("2.5"));
        assert_eq!(json!([1, 2]).to_literal().as_deref(), Some("[1,2]"));
    }
}
