//! Template evaluation.
//!
//! Filling walks a [`Compiled`] arena body by body. Scopes entered while descending form a
//! linked list of [`Frame`]s on the call stack, the innermost first:
//!
//! ```text
//! {{a|!{{b|!{{..c}}}}}}
//!
//! frame b -> frame a -> root
//!            ^ `..c` starts here
//! ```
//!
//! A name is looked up in the starting scope, then in every enclosing scope in turn.
use quill_core::{BodyId, Compiled, NodeId, NodeKind, Target};

use crate::{
    Error, Provider, Result, Shape, Template, TemplateError, TemplateErrorKind, TemplateMap,
    Value,
};

/// Fill `compiled` with `provider` as the root scope.
///
/// `templates` supplies templates referenced by name, `{{!name}}` and `{{value|name}}`.
pub fn fill(compiled: &Compiled, provider: &dyn Provider, templates: &TemplateMap) -> Result<String> {
    let mut output = String::with_capacity(compiled.size_hint());
    let filler = Filler { templates };
    let body = Body { compiled, id: compiled.root() };

    match filler.fill_root(body, provider, &mut output) {
        Ok(()) => Ok(output),
        Err(err) => {
            tracing::debug!(target: "quill::fill", %err, "fill failed");
            Err(err)
        }
    }
}

/// A scope, only maps and sequence elements ever become one.
struct Frame<'a> {
    provider: &'a dyn Provider,
    parent: Option<&'a Frame<'a>>,
}

impl<'a> Frame<'a> {
    /// `.x` starts at the current scope, every additional dot one scope further out.
    fn rewind(&'a self, dots: usize) -> Option<&'a Frame<'a>> {
        let mut frame = self;
        for _ in 1..dots {
            frame = frame.parent?;
        }
        Some(frame)
    }

    fn lookup(&'a self, name: &str) -> Option<Value<'a>> {
        if name.is_empty() {
            return Some(Value::Borrowed(self.provider));
        }
        match self.provider.shape() {
            Shape::Map(map) => map.lookup(name),
            _ => None,
        }
    }
}

#[derive(Clone, Copy)]
struct Body<'c> {
    compiled: &'c Compiled,
    id: BodyId,
}

impl<'c> Body<'c> {
    fn root(template: &'c Template) -> Result<Self> {
        let compiled = template.compile()?;
        Ok(Self { compiled, id: compiled.root() })
    }
}

/// Node being filled, for error reporting.
#[derive(Clone, Copy)]
struct At<'c> {
    compiled: &'c Compiled,
    id: NodeId,
}

impl At<'_> {
    fn name(&self) -> String {
        self.compiled.node(self.id).name().to_owned()
    }

    fn error(&self, kind: impl FnOnce(String) -> TemplateErrorKind) -> Error {
        let err = TemplateError::new(kind(self.name()), self.compiled.raw(self.id), self.compiled.source());
        Error::Template(err)
    }
}

struct Filler<'t> {
    templates: &'t TemplateMap,
}

impl<'t> Filler<'t> {
    fn fill_root(&self, body: Body<'_>, provider: &dyn Provider, output: &mut String) -> Result<()> {
        match provider.shape() {
            Shape::Callback(inner) | Shape::Delegate(inner) | Shape::PassThrough(Some(inner)) => {
                self.fill_root(body, &*inner, output)
            }
            Shape::PassThrough(None) => {
                let source = body.compiled.source();
                let kind = TemplateErrorKind::EmptyValue(String::new());
                Err(TemplateError::new(kind, "", source).into())
            }
            _ => self.fill_body(body, &Frame { provider, parent: None }, output),
        }
    }

    fn fill_body(&self, body: Body<'_>, frame: &Frame<'_>, output: &mut String) -> Result<()> {
        for (literal, node) in body.compiled.body(body.id).pairs() {
            output.push_str(literal);
            if let Some(id) = node {
                self.fill_node(At { compiled: body.compiled, id }, frame, output)?;
            }
        }
        Ok(())
    }

    fn fill_node(&self, at: At<'_>, frame: &Frame<'_>, output: &mut String) -> Result<()> {
        let node = at.compiled.node(at.id);
        let mut result = String::new();

        match node.kind() {
            NodeKind::Comment => return Ok(()),
            NodeKind::Insert => {
                let body = self.named(at, node.name())?;
                let scope = frame
                    .rewind(node.rewind())
                    .ok_or_else(|| at.error(TemplateErrorKind::Unresolved))?;
                self.fill_body(body, scope, &mut result)?;
            }
            NodeKind::Value => {
                let value = self.resolve(at, frame)?;
                let target = self.target(at)?;
                self.fill_value(at, &*value, target, None, frame, &mut result)?;
            }
        }

        if !result.is_empty() {
            output.push_str(node.leading());
            output.push_str(&result);
            output.push_str(node.trailing());
        }
        Ok(())
    }

    fn resolve<'a>(&self, at: At<'_>, frame: &'a Frame<'a>) -> Result<Value<'a>> {
        let node = at.compiled.node(at.id);
        let name = node.name();
        let mut scope = frame.rewind(node.rewind());
        let mut depth = node.rewind().saturating_sub(1);

        while let Some(current) = scope {
            if let Some(value) = current.lookup(name) {
                if depth > 0 {
                    tracing::debug!(target: "quill::fill", name, depth, "resolved in outer scope");
                }
                return Ok(value);
            }
            scope = current.parent;
            depth += 1;
        }

        Err(at.error(TemplateErrorKind::Unresolved))
    }

    fn target<'c>(&'c self, at: At<'c>) -> Result<Option<Body<'c>>> {
        match at.compiled.node(at.id).target() {
            Target::None => Ok(None),
            Target::Inline(id) => Ok(Some(Body { compiled: at.compiled, id: *id })),
            Target::Named(name) => self.named(at, name).map(Some),
        }
    }

    fn named(&self, at: At<'_>, name: &str) -> Result<Body<'t>> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| at.error(|_| TemplateErrorKind::MissingTemplate(name.to_owned())))?;
        Body::root(template).map_err(|err| match err {
            Error::Syntax(source) => Error::Named { name: name.to_owned(), source },
            err => err,
        })
    }

    /// Fill a resolved value.
    ///
    /// `own` is the template of an already unwrapped outer value.
    fn fill_value(
        &self,
        at: At<'_>,
        value: &dyn Provider,
        target: Option<Body<'_>>,
        own: Option<&Template>,
        frame: &Frame<'_>,
        output: &mut String,
    ) -> Result<()> {
        let own = own.or_else(|| value.template());

        match value.shape() {
            Shape::Callback(inner) | Shape::Delegate(inner) | Shape::PassThrough(Some(inner)) => {
                self.fill_value(at, &*inner, target, own, frame, output)
            }
            Shape::PassThrough(None) => Err(at.error(TemplateErrorKind::EmptyValue)),
            Shape::Scalar(text) => match template(target, own)? {
                Some(body) => self.fill_body(body, &Frame { provider: value, parent: Some(frame) }, output),
                None => {
                    output.push_str(&text);
                    Ok(())
                }
            },
            Shape::Map(_) => {
                let body = template(target, own)?.ok_or_else(|| at.error(TemplateErrorKind::NoTemplate))?;
                self.fill_body(body, &Frame { provider: value, parent: Some(frame) }, output)
            }
            Shape::Sequence(items) => {
                let shared = at.compiled.shared(at.compiled.node(at.id).shared_id());
                let mut first = true;
                let mut piece = String::new();

                for item in items {
                    piece.clear();
                    self.fill_element(at, &*item, target, None, frame, &mut piece)?;

                    if shared.ignore_empty() && piece.is_empty() {
                        continue;
                    }
                    if !first || shared.leading_join() {
                        output.push_str(shared.join());
                    }
                    first = false;
                    output.push_str(&piece);
                }
                Ok(())
            }
        }
    }

    /// Fill one sequence element, which becomes the scope of the element template.
    fn fill_element(
        &self,
        at: At<'_>,
        item: &dyn Provider,
        target: Option<Body<'_>>,
        own: Option<&Template>,
        frame: &Frame<'_>,
        output: &mut String,
    ) -> Result<()> {
        let own = own.or_else(|| item.template());

        match item.shape() {
            Shape::Callback(inner) | Shape::Delegate(inner) | Shape::PassThrough(Some(inner)) => {
                self.fill_element(at, &*inner, target, own, frame, output)
            }
            Shape::PassThrough(None) => Err(at.error(TemplateErrorKind::EmptyValue)),
            _ => {
                let body = template(target, own)?.ok_or_else(|| at.error(TemplateErrorKind::NoElementTemplate))?;
                self.fill_body(body, &Frame { provider: item, parent: Some(frame) }, output)
            }
        }
    }
}

/// The template given by the substitution, else the value's own.
fn template<'c>(target: Option<Body<'c>>, own: Option<&'c Template>) -> Result<Option<Body<'c>>> {
    match (target, own) {
        (Some(body), _) => Ok(Some(body)),
        (None, Some(own)) => Body::root(own).map(Some),
        (None, None) => Ok(None),
    }
}
