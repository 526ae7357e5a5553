//! Callback and delegating providers.
use std::{fmt, marker::PhantomData};

use crate::{Provider, Shape, Template, Value};

/// Provider invoking a closure each time it is resolved, created with [`callback`].
pub struct Callback<F, R> {
    f: F,
    _r: PhantomData<fn() -> R>,
}

/// Compute a value lazily, at fill time.
///
/// ```
/// use std::collections::HashMap;
/// use quill::{Provider, Template};
///
/// let now = quill::callback(|| 42);
/// let data = HashMap::from([("answer", &now as &dyn Provider)]);
/// assert_eq!(Template::new("{{answer}}").render(&data).unwrap(), "42");
/// ```
pub fn callback<F, R>(f: F) -> Callback<F, R>
where
    F: Fn() -> R,
    R: Provider,
{
    Callback { f, _r: PhantomData }
}

impl<F, R> Provider for Callback<F, R>
where
    F: Fn() -> R,
    R: Provider,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Callback(Value::owned((self.f)()))
    }
}

impl<F, R> fmt::Debug for Callback<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

/// Provider exposing another provider, created with [`delegate`].
///
/// Unlike [`Callback`], a delegate may carry its own template, used when a substitution
/// resolves to it without naming one.
pub struct Delegate<F, R> {
    f: F,
    template: Option<Template>,
    _r: PhantomData<fn() -> R>,
}

/// Expose the provider returned by `f`.
pub fn delegate<F, R>(f: F) -> Delegate<F, R>
where
    F: Fn() -> R,
    R: Provider,
{
    Delegate { f, template: None, _r: PhantomData }
}

impl<F, R> Delegate<F, R> {
    /// Set the template of this delegate.
    pub fn with_template(mut self, template: impl Into<Template>) -> Self {
        self.template = Some(template.into());
        self
    }
}

impl<F, R> Provider for Delegate<F, R>
where
    F: Fn() -> R,
    R: Provider,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Delegate(Value::owned((self.f)()))
    }

    fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }
}

impl<F, R> fmt::Debug for Delegate<F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate").field("template", &self.template).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn callback_runs_on_resolve() {
        let calls = Cell::new(0);
        let cb = callback(|| {
            calls.set(calls.get() + 1);
            "x"
        });
        assert_eq!(calls.get(), 0);
        assert!(matches!(cb.shape(), Shape::Callback(_)));
        assert!(matches!(cb.shape(), Shape::Callback(_)));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn delegate_template() {
        let plain = delegate(|| 1);
        assert!(plain.template().is_none());

        let templated = delegate(|| 1).with_template("[{{}}]");
        assert_eq!(templated.template().map(Template::source), Some("[{{}}]"));
    }
}
