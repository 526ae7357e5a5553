//! `Provider` derive macro
use proc_macro2::TokenStream;
use quote::quote;
use syn::*;

use crate::{
    attribute::{self, FieldAttr, TemplateAttr},
    config::Config,
    shared::{error, Lookup, Provider, Template},
};

/// output code is two impls:
///
/// 1. `Lookup`, a `match` from field name to borrowed field
/// 2. `Provider`, a map shape, with the struct's own template if declared
pub fn provider(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput { attrs, vis: _, ident, mut generics, data } = input;

    // every type parameter must itself be a provider
    let params: Vec<_> = generics.type_params().map(|e| e.ident.clone()).collect();
    if !params.is_empty() {
        let clause = generics.make_where_clause();
        for param in params {
            clause.predicates.push(parse_quote!(#param: #Provider));
        }
    }
    let (g1, g2, g3) = generics.split_for_impl();

    let fields = match data {
        Data::Struct(DataStruct { fields: Fields::Named(fields), .. }) => fields.named,
        Data::Struct(_) => error!(ident, "only struct with named fields is supported"),
        Data::Enum(_) | Data::Union(_) => error!(ident, "only struct is supported"),
    };

    // 1. `Lookup`
    let mut arms = vec![];
    for field in &fields {
        let attr = FieldAttr::from_attr(&field.attrs)?;
        if attr.skip {
            continue;
        }

        let id = error!(?field.ident.as_ref(), "field without name");
        let name = match attr.rename {
            Some(rename) => rename.value(),
            None => id.to_string().trim_start_matches("r#").to_owned(),
        };
        if name.is_empty() || name.contains(['.', '|', '%']) {
            error!(id, "provider name cannot be empty or contain `.`, `|`, or `%`");
        }

        arms.push(quote! {
            #name => ::core::option::Option::Some(::quill::Value::Borrowed(&self.#id)),
        });
    }

    // 2. `Provider`
    let template = attribute::container(&attrs, &Config::default())?.map(|attr| {
        let body = match attr {
            TemplateAttr::Fn(path) => quote! { #path() },
            TemplateAttr::Source(source) => own_template(quote! { #source }),
            TemplateAttr::File(path) => own_template(quote! { ::core::include_str!(#path) }),
        };
        quote! {
            fn template(&self) -> ::core::option::Option<&#Template> {
                ::core::option::Option::Some(#body)
            }
        }
    });

    Ok(quote! {
        #[automatically_derived]
        impl #g1 #Lookup for #ident #g2 #g3 {
            fn lookup(&self, name: &str) -> ::core::option::Option<::quill::Value<'_>> {
                match name {
                    #(#arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        #[automatically_derived]
        impl #g1 #Provider for #ident #g2 #g3 {
            fn shape(&self) -> ::quill::Shape<'_> {
                ::quill::Shape::Map(self)
            }

            #template
        }
    })
}

/// A lazily created `static` template.
fn own_template(source: TokenStream) -> TokenStream {
    quote! {{
        static TEMPLATE: ::quill::__private::Lazy<#Template> =
            ::quill::__private::Lazy::new(|| #Template::new(#source));
        &*TEMPLATE
    }}
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookup_arms() {
        let output = provider(parse_quote! {
            struct User {
                name: String,
                #[provider(rename = "mail")]
                email: String,
                #[provider(skip)]
                password: String,
            }
        })
        .unwrap()
        .to_string();

        assert!(output.contains("\"name\""));
        assert!(output.contains("\"mail\""));
        assert!(!output.contains("\"email\""));
        assert!(!output.contains("password"));
        assert!(!output.contains("fn template"));
    }

    #[test]
    fn own_template_source() {
        let output = provider(parse_quote! {
            #[provider(source = "{{name}}")]
            struct User { name: String }
        })
        .unwrap()
        .to_string();
        assert!(output.contains("fn template"));
        assert!(output.contains("Lazy"));
    }

    #[test]
    fn generic_bounds() {
        let output = provider(parse_quote! {
            struct Wrap<T> { value: T }
        })
        .unwrap()
        .to_string();
        assert!(output.contains("where T"));
    }

    #[test]
    fn unsupported() {
        assert!(provider(parse_quote! { struct Pair(u8, u8); }).is_err());
        assert!(provider(parse_quote! { enum Kind { A } }).is_err());
        assert!(provider(parse_quote! {
            struct User { #[provider(rename = "a.b")] name: String }
        }).is_err());
    }
}
