//! Logic-less text templates filled from scoped providers.
//!
//! A [`Template`] is literal text with `{{ .. }}` substitutions. Filling it resolves each
//! substitution against a [`Provider`]: maps supply names, sequences repeat a template per
//! element, and names missing from the current scope are searched in enclosing ones.
//!
//! ```
//! use quill::{Provider, Template};
//!
//! #[derive(Provider)]
//! struct Order {
//!     customer: &'static str,
//!     items: Vec<Item>,
//!     #[provider(skip)]
//!     _internal: u32,
//! }
//!
//! #[derive(Provider)]
//! struct Item {
//!     name: &'static str,
//!     qty: u32,
//! }
//!
//! let order = Order {
//!     customer: "Ada",
//!     items: vec![
//!         Item { name: "tea", qty: 2 },
//!         Item { name: "scone", qty: 1 },
//!     ],
//!     _internal: 0,
//! };
//!
//! let template = Template::new("{{customer}}: {{items%, |!{{qty}}x {{name}}}}");
//! assert_eq!(template.render(&order).unwrap(), "Ada: 2x tea, 1x scone");
//! ```
//!
//! See [`quill_core`] for the full syntax.
extern crate self as quill;

mod error;
mod write;
mod template;
mod templates;
mod config;
mod fill;

mod provider;
mod scalar;
mod collection;
mod adapter;

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "time")]
pub mod time;

pub use error::{Error, Result, TemplateError, TemplateErrorKind};
pub use write::{Writer, IoWriter, FmtWriter};
pub use template::Template;
pub use templates::TemplateMap;
pub use config::Config;
pub use fill::fill;

pub use provider::{Provider, Lookup, Shape, Value};
pub use scalar::Fmt;
pub use collection::{Iter, iter};
pub use adapter::{Callback, Delegate, callback, delegate};

pub use quill_core::{self, compile, Compiled, SyntaxError, SyntaxErrorKind};
pub use quill_macros::Provider;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
