//! macros for `quill` template
mod attribute;
mod config;
mod provider;
mod shared;

/// derive macro for `Provider` trait
///
/// Each named field becomes a name of the provider, the struct itself is a map scope.
///
/// Field attributes:
///
/// - `#[provider(rename = "..")]`, expose the field under another name
/// - `#[provider(skip)]`, do not expose the field
///
/// Type attribute, the template used when a substitution resolves to the struct without
/// naming one:
///
/// - `#[provider(template = path::to::function)]`, a `fn() -> &'static Template`
/// - `#[provider(source = "..")]`, inline template source
/// - `#[provider(path = "..")]`, template file, relative to `templates` in the crate
///   manifest directory, or to the manifest directory itself with a leading `/`
#[proc_macro_derive(Provider, attributes(provider))]
pub fn provider(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    match provider::provider(syn::parse_macro_input!(input as syn::DeriveInput)) {
        Ok(ok) => ok.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
