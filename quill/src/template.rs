use std::{borrow::Cow, fmt};

use once_cell::sync::OnceCell;
use quill_core::{Compiled, SyntaxError};

use crate::{Provider, Result, TemplateMap, Writer};

/// Template source with its compiled form.
///
/// Compilation happens once, on first use, and the compiled form is then shared by every
/// fill, including concurrent ones. A failed compilation is not cached.
///
/// ```
/// use std::collections::HashMap;
/// use quill::Template;
///
/// let template = Template::new("Hello {{name}}!");
/// let data = HashMap::from([("name", "World")]);
/// assert_eq!(template.render(&data).unwrap(), "Hello World!");
/// ```
#[derive(Clone)]
pub struct Template {
    source: Cow<'static, str>,
    compiled: OnceCell<Compiled>,
}

impl Template {
    pub fn new(source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            source: source.into(),
            compiled: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Compile the template, or return the cached compiled form.
    pub fn compile(&self) -> Result<&Compiled, SyntaxError> {
        self.compiled.get_or_try_init(|| quill_core::compile(&self.source))
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }

    /// Fill the template with `provider` as the root scope.
    pub fn fill(&self, provider: &dyn Provider, templates: &TemplateMap) -> Result<String> {
        crate::fill(self.compile()?, provider, templates)
    }

    /// Fill the template into `writer`.
    ///
    /// Nothing is written when filling fails.
    pub fn fill_into(
        &self,
        writer: &mut impl Writer,
        provider: &dyn Provider,
        templates: &TemplateMap,
    ) -> Result<()> {
        writer.write_str(&self.fill(provider, templates)?)
    }

    /// Fill the template without named templates.
    pub fn render(&self, provider: &dyn Provider) -> Result<String> {
        self.fill(provider, &TemplateMap::new())
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source)
            .field("compiled", &self.is_compiled())
            .finish()
    }
}

impl From<&'static str> for Template {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Template {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lazy_compile() {
        let template = Template::new("a {{b}} c");
        assert!(!template.is_compiled());

        let first = template.compile().unwrap() as *const Compiled;
        assert!(template.is_compiled());
        let second = template.compile().unwrap() as *const Compiled;
        assert_eq!(first, second);
    }

    #[test]
    fn failed_compile_is_not_cached() {
        let template = Template::new("a {{b");
        assert!(template.compile().is_err());
        assert!(template.compile().is_err());
        assert!(!template.is_compiled());
    }

    #[test]
    fn send_sync() {
        fn assert<T: Send + Sync>() {}
        assert::<Template>();
    }
}
