//! Template compiler.
//!
//! [`Parser`] splits the source, [`BodyVisitor`] turns each substitution body into
//! arena nodes. Inline templates are compiled recursively into the same arena.
use crate::{
    Parser, Result, SyntaxError, SyntaxErrorKind,
    compiled::{Body, BodyId, Compiled, Node, NodeId, NodeKind, Shared, SharedId, Target},
    syntax::{Data, Mark, SubstSyntax, Syntax},
    visitor::Visitor,
};

/// Compile template source.
///
/// # Errors
///
/// Returns [`SyntaxError`] on unbalanced `{{` / `}}`, an empty name component, or a
/// template insertion with join string or data.
pub fn compile(source: &str) -> Result<Compiled> {
    let mut compiled = Compiled::new(source);
    let root = compile_body(&mut compiled, source, 0)?;
    debug_assert_eq!(root, compiled.root());
    tracing::debug!(
        target: "quill::compile",
        nodes = compiled.nodes.len(),
        bodies = compiled.bodies.len(),
        "compiled template"
    );
    Ok(compiled)
}

fn compile_body(compiled: &mut Compiled, source: &str, base: usize) -> Result<BodyId> {
    let body = BodyId(compiled.bodies.len());
    compiled.bodies.push(Body::default());
    Parser::nested(source, base, BodyVisitor::new(compiled, body)).parse()?;
    Ok(body)
}

/// Collect one template body into the arena.
struct BodyVisitor<'c> {
    compiled: &'c mut Compiled,
    body: BodyId,

    /// literal run since the last substitution
    literal: String,
    /// previous substitution waiting for its trailing contingent text
    pending: Option<(NodeId, Mark)>,

    statics: Vec<String>,
    substitutions: Vec<NodeId>,
}

impl<'c> BodyVisitor<'c> {
    fn new(compiled: &'c mut Compiled, body: BodyId) -> Self {
        Self {
            compiled,
            body,
            literal: String::new(),
            pending: None,
            statics: vec![],
            substitutions: vec![],
        }
    }

    /// Take the literal run, minus the trailing text owed to the previous substitution.
    fn take_literal(&mut self) -> String {
        let mut literal = std::mem::take(&mut self.literal);
        if let Some((prev, mark)) = self.pending.take() {
            self.compiled.nodes[prev.0].trailing = take_trailing(&mut literal, mark);
        }
        literal
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.compiled.nodes.len());
        self.compiled.nodes.push(node);
        id
    }

    fn push_shared(&mut self, shared: Shared) -> SharedId {
        let id = SharedId(self.compiled.shared.len());
        self.compiled.shared.push(shared);
        id
    }

    /// Build the node chain of a non-comment substitution, returns the first link.
    fn visit_subst(&mut self, subst: SubstSyntax<'_>, raw: &str, offset: usize) -> Result<NodeId> {
        let span = offset - 2..offset + raw.len() + 2;
        let error = |kind| SyntaxError::new(kind, span.start);

        let shared = self.push_shared(Shared {
            join: subst.join.as_ref().map(|e| e.text.clone()).unwrap_or_else(|| "\n".into()),
            leading_join: subst.join.as_ref().is_some_and(|e| e.leading),
            ignore_empty: subst.before.is_some() || subst.after.is_some(),
        });

        let head = NodeId(self.compiled.nodes.len());
        let template = |kind, name: &str, target| Node {
            kind,
            name: name.to_owned(),
            rewind: 0,
            shared,
            origin: head,
            leading: String::new(),
            trailing: String::new(),
            target,
            span: span.clone(),
        };

        if subst.insert {
            if subst.join.is_some() || subst.data.is_some() {
                return Err(error(SyntaxErrorKind::InsertData));
            }
            if subst.path.is_empty() {
                return Err(error(SyntaxErrorKind::EmptyName));
            }
            let mut node = template(NodeKind::Insert, subst.path, Target::None);
            node.rewind = subst.rewind;
            return Ok(self.push_node(node));
        }

        let components = match subst.path {
            "" => vec![""],
            path => path.split('.').map(str::trim).collect(),
        };
        if components.len() > 1 && components.iter().any(|e| e.is_empty()) {
            return Err(error(SyntaxErrorKind::EmptyName));
        }

        // split: every link but the last gets an inline body holding only the next link
        let ids: Vec<NodeId> = components
            .iter()
            .map(|name| self.push_node(template(NodeKind::Value, *name, Target::None)))
            .collect();
        self.compiled.nodes[head.0].rewind = subst.rewind;

        for pair in ids.windows(2) {
            let body = BodyId(self.compiled.bodies.len());
            self.compiled.bodies.push(Body {
                statics: vec![String::new()],
                substitutions: vec![pair[1]],
            });
            self.compiled.nodes[pair[0].0].target = Target::Inline(body);
        }

        let target = match subst.data {
            Some(Data::Inline { source, offset: inline }) => {
                Target::Inline(compile_body(self.compiled, &source, offset + inline)?)
            }
            Some(Data::Named("")) | None => Target::None,
            Some(Data::Named(name)) => Target::Named(name.to_owned()),
        };
        let last = ids[ids.len() - 1];
        self.compiled.nodes[last.0].target = target;

        Ok(head)
    }
}

impl Visitor for BodyVisitor<'_> {
    type Output = ();

    fn visit_static(&mut self, source: &str) -> Result<()> {
        self.literal.push_str(source);
        Ok(())
    }

    fn visit_expr(&mut self, source: &str, offset: usize) -> Result<()> {
        let mut literal = self.take_literal();
        tracing::trace!(target: "quill::compile", offset, body = source, "substitution");

        let subst = match Syntax::parse(source) {
            Syntax::Comment => {
                let shared = self.push_shared(Shared {
                    join: String::new(),
                    leading_join: false,
                    ignore_empty: false,
                });
                let id = NodeId(self.compiled.nodes.len());
                self.push_node(Node {
                    kind: NodeKind::Comment,
                    name: String::new(),
                    rewind: 0,
                    shared,
                    origin: id,
                    leading: String::new(),
                    trailing: String::new(),
                    target: Target::None,
                    span: offset - 2..offset + source.len() + 2,
                });
                self.statics.push(literal);
                self.substitutions.push(id);
                return Ok(());
            }
            Syntax::Subst(subst) => subst,
        };

        let leading = match subst.before {
            Some(mark) => take_leading(&mut literal, mark, self.substitutions.is_empty()),
            None => String::new(),
        };
        let after = subst.after;

        let head = self.visit_subst(subst, source, offset)?;
        self.compiled.nodes[head.0].leading = leading;
        if let Some(mark) = after {
            self.pending = Some((head, mark));
        }

        self.statics.push(literal);
        self.substitutions.push(head);
        Ok(())
    }

    fn finish(mut self) -> Result<Self::Output> {
        let literal = self.take_literal();
        if !literal.is_empty() {
            self.statics.push(literal);
        }
        self.compiled.bodies[self.body.0] = Body {
            statics: self.statics,
            substitutions: self.substitutions,
        };
        Ok(())
    }
}

// ===== Contingent content =====

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Split off the tail of `literal` that belongs to the following substitution.
///
/// `at_start` tells whether `literal` starts at the beginning of its body, so its first
/// line is a whole line rather than the rest of a line holding a substitution.
fn take_leading(literal: &mut String, mark: Mark, at_start: bool) -> String {
    let mut idx = literal.rfind('\n').map_or(0, |i| i + 1);

    if mark == Mark::Lines {
        // walk back over whole blank lines, `idx` always sits right after a newline
        while idx > 0 {
            let prev = literal[..idx - 1].rfind('\n').map_or(0, |i| i + 1);
            let whole_line = prev > 0 || at_start;
            if !whole_line || !is_blank(&literal[prev..idx - 1]) {
                break;
            }
            idx = prev;
        }
    }

    literal.split_off(idx)
}

/// Split off the head of `literal` that belongs to the preceding substitution.
fn take_trailing(literal: &mut String, mark: Mark) -> String {
    let mut idx = literal.find('\n').map_or(literal.len(), |i| i + 1);

    if mark == Mark::Lines {
        // walk over whole blank lines, a last line without newline is not whole
        while let Some(end) = literal[idx..].find('\n') {
            if !is_blank(&literal[idx..idx + end]) {
                break;
            }
            idx += end + 1;
        }
    }

    let rest = literal.split_off(idx);
    std::mem::replace(literal, rest)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn literal_only() {
        let c = compile("no substitutions here").unwrap();
        assert_eq!(c.statics(), ["no substitutions here"]);
        assert_eq!(c.len(), 0);
    }

    #[test]
    fn statics_invariant() {
        let c = compile("a{{x}}b{{y}}").unwrap();
        assert_eq!(c.statics(), ["a", "b"]);
        assert_eq!(c.substitutions().count(), 2);

        let c = compile("a{{x}}b").unwrap();
        assert_eq!(c.statics(), ["a", "b"]);
        assert_eq!(c.substitutions().count(), 1);
    }

    #[test]
    fn idempotent() {
        let src = "{{<a.b%, |!x {{..c}}>>}}\n\n{{!page}}{{# note }}";
        assert_eq!(compile(src).unwrap(), compile(src).unwrap());
    }

    #[test]
    fn split_chain() {
        let c = compile("{{..a.b.c|row}}").unwrap();
        assert_eq!(c.len(), 3);
        let a = c.node(NodeId(0));
        let b = c.node(NodeId(1));
        let cc = c.node(NodeId(2));
        assert_eq!((a.name(), b.name(), cc.name()), ("a", "b", "c"));
        assert_eq!((a.rewind(), b.rewind(), cc.rewind()), (2, 0, 0));
        assert_eq!(b.origin(), NodeId(0));
        assert_eq!(cc.origin(), NodeId(0));
        assert_eq!(a.shared_id(), cc.shared_id());
        assert_eq!(cc.target(), &Target::Named("row".into()));

        let Target::Inline(body) = a.target() else { panic!("expected inline") };
        assert_eq!(c.body(*body).substitutions(), [NodeId(1)]);
        assert_eq!(c.raw(NodeId(2)), "{{..a.b.c|row}}");
    }

    #[test]
    fn inline_template() {
        let c = compile("{{v%, |!<{{}}\\>}}").unwrap();
        let v = c.node(NodeId(0));
        assert_eq!(c.shared(v.shared_id()).join(), ", ");
        let Target::Inline(body) = v.target() else { panic!("expected inline") };
        assert_eq!(c.body(*body).statics(), ["<", ">"]);
        assert_eq!(c.node(NodeId(1)).name(), "");
        assert_eq!(c.raw(NodeId(1)), "{{}}");
        assert_eq!(c.node(NodeId(1)).span(), 9..13);
    }

    #[test]
    fn insert() {
        let c = compile("{{!page.header}}").unwrap();
        let node = c.node(NodeId(0));
        assert_eq!(node.kind(), NodeKind::Insert);
        assert_eq!(node.name(), "page.header");
        assert_eq!(c.template_refs().collect::<Vec<_>>(), ["page.header"]);

        let err = compile("{{!page|!x}}").unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::InsertData);
        let err = compile("x {{!}}").unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::EmptyName);
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn empty_component() {
        assert_eq!(compile("{{a..b}}").unwrap_err().kind(), &SyntaxErrorKind::EmptyName);
        assert_eq!(compile("{{a.}}").unwrap_err().kind(), &SyntaxErrorKind::EmptyName);
        assert!(compile("{{..}}").is_ok());
    }

    #[test]
    fn nested_error_offset() {
        let err = compile("abc{{v|!x}}}}").unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::Unopened);
        assert_eq!(err.offset(), 11);

        let err = compile("{{v|!{{a..b}}}}").unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::EmptyName);
        assert_eq!(err.offset(), 5);
    }

    #[test]
    fn comment() {
        let c = compile("a{{# {{nested}} }}b").unwrap();
        assert_eq!(c.statics(), ["a", "b"]);
        assert_eq!(c.node(NodeId(0)).kind(), NodeKind::Comment);
        assert_eq!(c.names().count(), 0);
    }

    #[test]
    fn leading_line() {
        let c = compile("keep\nBEFORE {{<name}} AFTER").unwrap();
        assert_eq!(c.statics(), ["keep\n", " AFTER"]);
        assert_eq!(c.node(NodeId(0)).leading(), "BEFORE ");
        assert!(c.shared(SharedId(0)).ignore_empty());
    }

    #[test]
    fn leading_lines() {
        let c = compile("head\n\n  \n  {{<<name}}").unwrap();
        assert_eq!(c.statics(), ["head\n"]);
        assert_eq!(c.node(NodeId(0)).leading(), "\n  \n  ");

        // the first line after a substitution is not a whole line
        let c = compile("{{a}}  \n\n{{<<b}}").unwrap();
        assert_eq!(c.statics(), ["", "  \n"]);
        assert_eq!(c.node(NodeId(1)).leading(), "\n");

        let c = compile("  \n{{<<b}}").unwrap();
        assert_eq!(c.statics(), [""]);
        assert_eq!(c.node(NodeId(0)).leading(), "  \n");
    }

    #[test]
    fn trailing() {
        let c = compile("{{a>}} x\ny").unwrap();
        assert_eq!(c.node(NodeId(0)).trailing(), " x\n");
        assert_eq!(c.statics(), ["", "y"]);

        let c = compile("{{a>>}}\n \n\n  \ny").unwrap();
        assert_eq!(c.node(NodeId(0)).trailing(), "\n \n\n  \n");
        assert_eq!(c.statics(), ["", "y"]);

        // trailing is taken before the next leading
        let c = compile("{{a>}} - {{<b}}").unwrap();
        assert_eq!(c.node(NodeId(0)).trailing(), " - ");
        assert_eq!(c.node(NodeId(1)).leading(), "");
        assert_eq!(c.statics(), ["", ""]);
    }
}
