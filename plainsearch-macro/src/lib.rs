// Procedural macros for plainsearch
// Field name tables are derived from the same serde attributes the serializer reads

use proc_macro::TokenStream;

mod case;
mod fields;

/// Generates `plainsearch::Fields` for a struct with named fields.
///
/// Honours `#[serde(rename = "...")]`, `#[serde(skip)]`,
/// `#[serde(skip_serializing)]` and the container's `#[serde(rename_all = "...")]`.
#[proc_macro_derive(Fields, attributes(serde))]
pub fn fields_derive(input: TokenStream) -> TokenStream {
    fields::fields_derive_impl(input)
}
