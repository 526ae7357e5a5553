//! Sequence and keyed map providers.
use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap, VecDeque},
    hash::{BuildHasher, Hash},
};

use crate::{Lookup, Provider, Shape, Value};

// ===== Sequence =====

impl<T> Provider for [T] where T: Provider {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Box::new(self.iter().map(|e| Value::Borrowed(e))))
    }
}

impl<T, const N: usize> Provider for [T; N] where T: Provider {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl<T> Provider for Vec<T> where T: Provider {
    fn shape(&self) -> Shape<'_> {
        self.as_slice().shape()
    }
}

impl<T> Provider for VecDeque<T> where T: Provider {
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Box::new(self.iter().map(|e| Value::Borrowed(e))))
    }
}

/// Sequence over any cloneable [`IntoIterator`], created with [`iter`].
///
/// The iterator is cloned on every fill, so the same value can be filled more than once.
#[derive(Debug, Clone)]
pub struct Iter<I>(pub I);

/// Expose an iterator of owned providers as a sequence.
///
/// ```
/// use quill::Template;
///
/// let squares = quill::iter((1..4).map(|e| e * e));
/// assert_eq!(Template::new("{{%, |!{{}}}}").render(&squares).unwrap(), "1, 4, 9");
/// ```
pub fn iter<I>(iter: I) -> Iter<I>
where
    I: IntoIterator + Clone,
    I::Item: Provider,
{
    Iter(iter)
}

impl<I> Provider for Iter<I>
where
    I: IntoIterator + Clone,
    I::Item: Provider,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(Box::new(self.0.clone().into_iter().map(Value::owned)))
    }
}

// ===== Keyed map =====

impl<K, V, S> Lookup for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: Provider,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).map(|e| Value::Borrowed(e))
    }
}

impl<K, V, S> Provider for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: Provider,
    S: BuildHasher,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Map(self)
    }
}

impl<K, V> Lookup for BTreeMap<K, V> where K: Borrow<str> + Ord, V: Provider {
    fn lookup(&self, name: &str) -> Option<Value<'_>> {
        self.get(name).map(|e| Value::Borrowed(e))
    }
}

impl<K, V> Provider for BTreeMap<K, V> where K: Borrow<str> + Ord, V: Provider {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(self)
    }
}
