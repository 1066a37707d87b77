use crate::case::RenameRule;
use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, LitStr, Token, parse_macro_input};

pub fn fields_derive_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            syn::Fields::Named(named) => named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Fields can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Fields can only be derived for structs",
            ));
        }
    };

    let rule = container_rule(&input.attrs)?;

    let mut arms = Vec::new();
    for field in &named.named {
        let Some(ident) = &field.ident else { continue };
        let member = ident.unraw().to_string();

        let attrs = field_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let serialized = match attrs.rename {
            Some(rename) => rename,
            None => rule.map(|r| r.apply(&member)).unwrap_or_else(|| member.clone()),
        };

        arms.push(quote! {
            #member => ::core::option::Option::Some(#serialized),
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::plainsearch::Fields for #name #ty_generics #where_clause {
            fn field_name(member: &str) -> ::core::option::Option<&'static str> {
                match member {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

fn container_rule(attrs: &[Attribute]) -> syn::Result<Option<RenameRule>> {
    let mut rule = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if let Some(lit) = serialize_name(&meta)? {
                    rule = Some(RenameRule::parse(&lit.value()).ok_or_else(|| {
                        syn::Error::new_spanned(&lit, "unknown rename_all rule")
                    })?);
                }
                Ok(())
            } else {
                skip_meta(&meta)
            }
        })?;
    }

    Ok(rule)
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
}

fn field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(lit) = serialize_name(&meta)? {
                    parsed.rename = Some(lit.value());
                }
                Ok(())
            } else if meta.path.is_ident("skip")
                || meta.path.is_ident("skip_serializing")
                || meta.path.is_ident("flatten")
            {
                parsed.skip = true;
                Ok(())
            } else {
                skip_meta(&meta)
            }
        })?;
    }

    Ok(parsed)
}

// `key = "x"` or `key(serialize = "x", deserialize = "y")`
fn serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }

    let mut name = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            name = Some(inner.value()?.parse()?);
            Ok(())
        } else {
            skip_meta(&inner)
        }
    })?;
    Ok(name)
}

fn skip_meta(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: proc_macro2::TokenStream = content.parse()?;
    }
    Ok(())
}
