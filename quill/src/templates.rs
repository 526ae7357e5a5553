//! Named templates.
use std::{collections::HashMap, fs};

use crate::{Config, Error, Result, Template};

/// Templates referenced by name, with `{{!name}}` or `{{value|name}}`.
#[derive(Debug, Clone, Default)]
pub struct TemplateMap {
    map: HashMap<String, Template>,
}

impl TemplateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every file in [`Config::templ_dir`] whose name ends with [`Config::suffix`].
    ///
    /// The file name without suffix is the template name, other files are skipped.
    pub fn load_dir(config: &Config) -> Result<Self> {
        let mut me = Self::new();

        for entry in fs::read_dir(config.templ_dir())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str().and_then(|e| e.strip_suffix(config.suffix())) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }

            let path = entry.path();
            let source = fs::read_to_string(&path)?;
            tracing::debug!(target: "quill::load", path = %path.display(), name, "loaded template");
            me.insert(name, Template::new(source));
        }

        Ok(me)
    }

    /// Returns the previous template with the same name.
    pub fn insert(&mut self, name: impl Into<String>, template: impl Into<Template>) -> Option<Template> {
        self.map.insert(name.into(), template.into())
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Template names, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Template)> {
        self.map.iter().map(|(name, template)| (name.as_str(), template))
    }

    /// Compile every template, and verify every template referenced by name exists.
    pub fn check(&self) -> Result<()> {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();

        for name in names {
            let Some(template) = self.get(name) else { continue };
            let compiled = template
                .compile()
                .map_err(|source| Error::Named { name: name.to_owned(), source })?;

            if let Some(missing) = compiled.template_refs().find(|e| !self.contains(e)) {
                let kind = crate::TemplateErrorKind::MissingTemplate(missing.to_owned());
                return Err(crate::TemplateError::new(kind, missing, compiled.source()).into());
            }
        }

        Ok(())
    }
}

impl<K, T> FromIterator<(K, T)> for TemplateMap where K: Into<String>, T: Into<Template> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut me = Self::new();
        me.extend(iter);
        me
    }
}

impl<K, T> Extend<(K, T)> for TemplateMap where K: Into<String>, T: Into<Template> {
    fn extend<I: IntoIterator<Item = (K, T)>>(&mut self, iter: I) {
        for (name, template) in iter {
            self.insert(name, template);
        }
    }
}
