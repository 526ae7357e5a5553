use std::{fmt, io};
use quill_core::SyntaxError;

/// [`Result`][std::result::Result] alias for [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error that can occur while filling a template.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A template from the named template map failed to compile.
    #[error("in template `{name}`: {source}")]
    Named {
        name: String,
        #[source]
        source: SyntaxError,
    },
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Convert error to [`io::Error`].
    ///
    /// Syntax and template errors will become [`io::ErrorKind::InvalidData`].
    pub fn into_io(self) -> io::Error {
        match self {
            Error::Io(error) => error,
            err => io::Error::new(io::ErrorKind::InvalidData, err),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Self::Io(io::ErrorKind::Other.into())
    }
}

/// A substitution could not be filled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} in `{substitution}` of template `{}`", excerpt(.template))]
pub struct TemplateError {
    kind: TemplateErrorKind,
    substitution: String,
    template: String,
}

/// The kind of [`TemplateError`], each carrying the name involved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateErrorKind {
    /// No scope on the provider stack has the name.
    #[error("cannot resolve `{0}`")]
    Unresolved(String),
    /// `{{!name}}` or `{{value|name}}` with no such named template.
    #[error("no template named `{0}`")]
    MissingTemplate(String),
    /// A map, or a delegate resolving to one, without any template.
    #[error("`{0}` requires a template")]
    NoTemplate(String),
    #[error("`{0}` is a sequence without element template")]
    NoElementTemplate(String),
    /// `None` reached through a pass-through value.
    #[error("`{0}` is empty")]
    EmptyValue(String),
}

impl TemplateError {
    pub(crate) fn new(kind: TemplateErrorKind, substitution: &str, template: &str) -> Self {
        Self {
            kind,
            substitution: substitution.to_owned(),
            template: template.to_owned(),
        }
    }

    pub fn kind(&self) -> &TemplateErrorKind {
        &self.kind
    }

    /// Raw `{{ .. }}` text of the offending substitution.
    pub fn substitution(&self) -> &str {
        &self.substitution
    }

    /// Source of the template containing the substitution.
    pub fn template(&self) -> &str {
        &self.template
    }
}

const EXCERPT: usize = 48;

fn excerpt(template: &str) -> String {
    let line = template.lines().next().unwrap_or_default();
    match line.char_indices().nth(EXCERPT) {
        Some((i, _)) => format!("{}..", &line[..i]),
        None if line.len() < template.len() => format!("{line}.."),
        None => line.to_owned(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        let err = TemplateError::new(
            TemplateErrorKind::Unresolved("name".into()),
            "{{name}}",
            "Hello {{name}}\nBye",
        );
        assert_eq!(
            err.to_string(),
            "cannot resolve `name` in `{{name}}` of template `Hello {{name}}..`"
        );
    }

    #[test]
    fn into_io() {
        let err = Error::from(TemplateError::new(
            TemplateErrorKind::EmptyValue("x".into()),
            "{{x}}",
            "{{x}}",
        ));
        assert_eq!(err.into_io().kind(), io::ErrorKind::InvalidData);
    }
}
