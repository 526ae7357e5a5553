//! The [`Writer`] trait
use std::{fmt, io};

use crate::Result;

/// Output sink of a filled template.
pub trait Writer {
    fn write_str(&mut self, value: &str) -> Result<()>;
}

impl<R> Writer for &mut R where R: Writer + ?Sized {
    fn write_str(&mut self, value: &str) -> Result<()> {
        R::write_str(self, value)
    }
}

impl Writer for Vec<u8> {
    fn write_str(&mut self, value: &str) -> Result<()> {
        self.extend_from_slice(value.as_bytes());
        Ok(())
    }
}

impl Writer for String {
    fn write_str(&mut self, value: &str) -> Result<()> {
        self.push_str(value);
        Ok(())
    }
}

impl Writer for bytes::BytesMut {
    fn write_str(&mut self, value: &str) -> Result<()> {
        bytes::BufMut::put(self, value.as_bytes());
        Ok(())
    }
}

/// Wrap [`io::Write`] as [`Writer`].
///
/// ```
/// use quill::{IoWriter, Template};
///
/// let mut out = IoWriter(Vec::new());
/// Template::new("{{}}!").fill_into(&mut out, &"hi", &Default::default()).unwrap();
/// assert_eq!(out.0, b"hi!");
/// ```
pub struct IoWriter<W>(pub W);

impl<W> Writer for IoWriter<W> where W: io::Write {
    fn write_str(&mut self, value: &str) -> Result<()> {
        self.0.write_all(value.as_bytes())?;
        Ok(())
    }
}

/// Wrap [`fmt::Write`] as [`Writer`].
pub struct FmtWriter<W>(pub W);

impl<W> Writer for FmtWriter<W> where W: fmt::Write {
    fn write_str(&mut self, value: &str) -> Result<()> {
        self.0.write_str(value)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sinks() {
        let mut bytes = bytes::BytesMut::new();
        bytes.write_str("a").unwrap();
        (&mut bytes).write_str("b").unwrap();
        assert_eq!(&bytes[..], b"ab");

        let mut fmt = FmtWriter(String::new());
        fmt.write_str("c").unwrap();
        assert_eq!(fmt.0, "c");
    }
}
