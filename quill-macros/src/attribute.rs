use syn::{punctuated::Punctuated, *};

use crate::{config::Config, shared::error};

/// Where the struct's own template comes from.
pub enum TemplateAttr {
    /// `#[provider(template = path::to::fn)]`
    Fn(Path),
    /// `#[provider(source = "..")]`
    Source(LitStr),
    /// `#[provider(path = "..")]`, resolved file path
    File(String),
}

/// Derive macro type level attribute
///
/// Accept input:
///
/// - template: `#[provider(template = <Path> | source = ".." | path = "..")]`
pub fn container(attrs: &[Attribute], conf: &Config) -> Result<Option<TemplateAttr>> {
    let mut template = None;

    for attr in attrs.iter().filter(|e| e.meta.path().is_ident("provider")) {
        let pairs = attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;

        for MetaNameValue { path, value, .. } in pairs {
            let name = path.require_ident()?;
            let value = match () {
                _ if name == "template" => TemplateAttr::Fn(path_value(&value)?),
                _ if name == "source" => TemplateAttr::Source(str_value(&value)?),
                _ if name == "path" => {
                    let path = conf.resolve(&str_value(&value)?.value());
                    TemplateAttr::File(path.to_string_lossy().into_owned())
                }
                _ => error!(name, "no such key, expected `template`, `source`, or `path`"),
            };

            if template.replace(value).is_some() {
                error!(name, "only single either of `template`, `source`, or `path` allowed");
            }
        }
    }

    Ok(template)
}

/// Derive macro field level attribute
///
/// Accept input:
///
/// - rename: `#[provider(rename = "..")]`
/// - skip: `#[provider(skip)]`
#[derive(Default)]
pub struct FieldAttr {
    pub rename: Option<LitStr>,
    pub skip: bool,
}

impl FieldAttr {
    pub fn from_attr(attrs: &[Attribute]) -> Result<Self> {
        let mut me = Self::default();

        for attr in attrs.iter().filter(|e| e.meta.path().is_ident("provider")) {
            let metas = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;

            for meta in metas {
                match meta {
                    Meta::Path(path) if path.is_ident("skip") => me.skip = true,
                    Meta::NameValue(MetaNameValue { path, value, .. }) if path.is_ident("rename") => {
                        if me.rename.replace(str_value(&value)?).is_some() {
                            error!(path, "duplicate `rename` key");
                        }
                    }
                    meta => error!(meta, "expected `rename = \"..\"` or `skip`"),
                }
            }
        }

        Ok(me)
    }
}

// ===== Util =====

fn str_value(value: &Expr) -> Result<LitStr> {
    match value {
        Expr::Lit(ExprLit { lit: Lit::Str(lit), .. }) => Ok(lit.clone()),
        _ => error!(value, "expected string"),
    }
}

fn path_value(value: &Expr) -> Result<Path> {
    match value {
        Expr::Path(ExprPath { path, .. }) => Ok(path.clone()),
        _ => error!(value, "expected path to a function"),
    }
}
