//! The [`quill`][1] template compiler.
//!
//! The [`Parser`] type will only split literal text from substitution bodies, counting
//! nested `{{ }}` so inline templates stay whole. [`Parser`] requires a [`Visitor`]
//! implementation which collects the pieces.
//!
//! ```text
//! Hello {{ user.name }}
//! ```
//!
//! [`Parser`] will pass `"Hello "` and `" user.name "` to the [`Visitor`].
//!
//! [`compile`] drives the parser with a visitor that builds a [`Compiled`] arena: literal
//! text, substitution nodes, and nested inline bodies. Evaluation lives in [`quill`][1],
//! this crate knows nothing about providers.
//!
//! # Syntax
//!
//! ```text
//! {{ [<|<<] [!] [.]*name [%[%]joinstring] [|[!]data] [>|>>] }}
//! ```
//!
//! - `name`, dotted path `a.b.c` is split into a chain of single names
//! - `.name`, leading dots rewind to enclosing scopes
//! - `%join`, separator between sequence elements, `%%join` also before the first
//! - `|!template`, inline template, `|name` named template
//! - `!name`, insert the named template in place
//! - `<` / `>`, text before / after on the same line is dropped when the result is empty,
//!   `<<` / `>>` also drop adjacent blank lines
//! - `{{# .. }}`, comment
//! - `\{` and `\}` are literal braces
//!
//! Whitespace around a substitution body is ignored, except that an inline template
//! keeps everything between `|!` and the closing `}}`, trailing whitespace included.
//!
//! A `>` ending the body is always read as the after marker, even when it closes markup
//! in an inline template. `{{v|!<i>{{}}</i>}}` renders `<i>a</i`, write `</i\>` to keep
//! the `>`.
//!
//! [1]: <https://docs.rs/quill>
mod error;
mod parser;
mod visitor;
mod compiler;

pub mod syntax;
pub mod compiled;

pub use error::{SyntaxError, SyntaxErrorKind, Result};
pub use parser::Parser;
pub use visitor::{Visitor, StaticVisitor};
pub use compiler::compile;
pub use compiled::{Compiled, Body, BodyId, Node, NodeId, NodeKind, Shared, SharedId, Target};
