//! The [`Provider`] trait.
//!
//! A provider is anything a template can be filled against. Every provider exposes
//! exactly one [`Shape`], chosen by its trait implementation:
//!
//! | shape | host types |
//! |---|---|
//! | [`Shape::Scalar`] | `str`, `String`, integers, floats, `bool`, `char`, [`Fmt`] |
//! | [`Shape::Callback`] | [`Callback`] |
//! | [`Shape::Sequence`] | `Vec`, slices, arrays, `VecDeque`, [`Iter`] |
//! | [`Shape::Map`] | `HashMap`, `BTreeMap`, `#[derive(Provider)]` structs |
//! | [`Shape::Delegate`] | [`Delegate`] |
//! | [`Shape::PassThrough`] | `Option` |
//!
//! References and smart pointers forward the shape of what they point to.
//!
//! [`Fmt`]: crate::Fmt
//! [`Callback`]: crate::Callback
//! [`Iter`]: crate::Iter
//! [`Delegate`]: crate::Delegate
use std::{borrow::Cow, ops::Deref, rc::Rc, sync::Arc};

use crate::Template;

/// A source of values for a template.
pub trait Provider {
    /// Returns the shape of this provider.
    fn shape(&self) -> Shape<'_>;

    /// Template used when a substitution resolves to this provider without naming one.
    fn template(&self) -> Option<&Template> {
        None
    }
}

/// Name lookup of a keyed provider.
pub trait Lookup {
    /// Returns [`None`] if `name` is absent, which lets resolution rewind to an outer
    /// scope.
    fn lookup(&self, name: &str) -> Option<Value<'_>>;
}

/// The shape of a [`Provider`].
pub enum Shape<'a> {
    /// Text inserted verbatim.
    Scalar(Cow<'a, str>),
    /// The result of invoking a callback, resolved again.
    Callback(Value<'a>),
    /// Elements filled one by one with the element template.
    Sequence(Box<dyn Iterator<Item = Value<'a>> + 'a>),
    /// Named values, a new scope for names.
    Map(&'a dyn Lookup),
    /// A provider exposed by another type, resolved again.
    Delegate(Value<'a>),
    /// A transparent wrapper, [`None`] is an error when filled.
    PassThrough(Option<Value<'a>>),
}

impl Shape<'_> {
    /// Shape name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Scalar(_) => "scalar",
            Shape::Callback(_) => "callback",
            Shape::Sequence(_) => "sequence",
            Shape::Map(_) => "map",
            Shape::Delegate(_) => "delegate",
            Shape::PassThrough(_) => "pass-through",
        }
    }
}

impl std::fmt::Debug for Shape<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Scalar(text) => f.debug_tuple("Scalar").field(text).finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// A borrowed or owned [`Provider`].
pub enum Value<'a> {
    Borrowed(&'a dyn Provider),
    Owned(Box<dyn Provider + 'a>),
}

impl<'a> Value<'a> {
    pub fn borrowed(provider: &'a dyn Provider) -> Self {
        Value::Borrowed(provider)
    }

    pub fn owned(provider: impl Provider + 'a) -> Self {
        Value::Owned(Box::new(provider))
    }
}

impl<'a> Deref for Value<'a> {
    type Target = dyn Provider + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Value::Borrowed(provider) => *provider,
            Value::Owned(provider) => &**provider,
        }
    }
}

// ===== Pass-through =====

impl<T> Provider for &T where T: Provider + ?Sized {
    fn shape(&self) -> Shape<'_> {
        T::shape(*self)
    }

    fn template(&self) -> Option<&Template> {
        T::template(*self)
    }
}

impl<T> Provider for Box<T> where T: Provider + ?Sized {
    fn shape(&self) -> Shape<'_> {
        T::shape(self)
    }

    fn template(&self) -> Option<&Template> {
        T::template(self)
    }
}

impl<T> Provider for Rc<T> where T: Provider + ?Sized {
    fn shape(&self) -> Shape<'_> {
        T::shape(self)
    }

    fn template(&self) -> Option<&Template> {
        T::template(self)
    }
}

impl<T> Provider for Arc<T> where T: Provider + ?Sized {
    fn shape(&self) -> Shape<'_> {
        T::shape(self)
    }

    fn template(&self) -> Option<&Template> {
        T::template(self)
    }
}

impl<T> Provider for Option<T> where T: Provider {
    fn shape(&self) -> Shape<'_> {
        Shape::PassThrough(self.as_ref().map(|e| Value::Borrowed(e)))
    }
}
