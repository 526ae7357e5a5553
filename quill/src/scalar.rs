//! Scalar providers.
use std::{borrow::Cow, fmt};

use crate::{Provider, Shape};

impl Provider for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Cow::Borrowed(self))
    }
}

impl Provider for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Cow::Borrowed(self))
    }
}

impl Provider for Cow<'_, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Cow::Borrowed(self))
    }
}

impl Provider for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Cow::Owned(self.encode_utf8(&mut [0u8;4]).to_owned()))
    }
}

impl Provider for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Cow::Borrowed(if *self { "true" } else { "false" }))
    }
}

macro_rules! scalar_int {
    ($t:ty) => {
        impl Provider for $t {
            fn shape(&self) -> Shape<'_> {
                Shape::Scalar(Cow::Owned(itoa::Buffer::new().format(*self).to_owned()))
            }
        }
    };
}

scalar_int!(u8);
scalar_int!(u16);
scalar_int!(u32);
scalar_int!(u64);
scalar_int!(u128);
scalar_int!(usize);
scalar_int!(i8);
scalar_int!(i16);
scalar_int!(i32);
scalar_int!(i64);
scalar_int!(i128);
scalar_int!(isize);

impl Provider for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Cow::Owned(self.to_string()))
    }
}

impl Provider for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Cow::Owned(self.to_string()))
    }
}

/// Adapt any [`fmt::Display`] type as a scalar.
///
/// ```
/// use quill::{Fmt, Template};
///
/// let ip = std::net::Ipv4Addr::LOCALHOST;
/// assert_eq!(Template::new("{{}}").render(&Fmt(ip)).unwrap(), "127.0.0.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fmt<T>(pub T);

impl<T> Provider for Fmt<T> where T: fmt::Display {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Cow::Owned(self.0.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn text(provider: &dyn Provider) -> String {
        match provider.shape() {
            Shape::Scalar(text) => text.into_owned(),
            other => panic!("expected scalar, got {}", other.name()),
        }
    }

    #[test]
    fn scalars() {
        assert_eq!(text(&"str"), "str");
        assert_eq!(text(&String::from("string")), "string");
        assert_eq!(text(&'c'), "c");
        assert_eq!(text(&true), "true");
        assert_eq!(text(&-42i32), "-42");
        assert_eq!(text(&u128::MAX), "340282366920938463463374607431768211455");
        assert_eq!(text(&1.5f64), "1.5");
        assert_eq!(text(&Fmt(std::net::Ipv4Addr::LOCALHOST)), "127.0.0.1");
    }
}
