//! Compiled template arena.
//!
//! All substitution nodes and template bodies of one compiled template live in flat
//! vectors and refer to each other by index. Body `0` is the root body.
//!
//! ```text
//! "Hi {{user.name}}!"
//!
//! body 0: statics ["Hi ", "!"]  substitutions [node 0]
//! node 0: `user` -> Inline(body 1)
//! body 1: statics [""]          substitutions [node 1]
//! node 1: `name`, origin node 0
//! ```
use std::ops::Range;

macro_rules! id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub(crate) usize);

        impl $name {
            /// Index into the owning [`Compiled`] arena.
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

id! {
    /// Index of a [`Node`].
    NodeId
}

id! {
    /// Index of a [`Body`].
    BodyId
}

id! {
    /// Index of [`Shared`] chain data.
    SharedId
}

/// A compiled template.
///
/// Compiling the same source always produce an equal [`Compiled`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub(crate) source: String,
    pub(crate) nodes: Vec<Node>,
    pub(crate) bodies: Vec<Body>,
    pub(crate) shared: Vec<Shared>,
}

/// Literal text interleaved with substitutions.
///
/// `statics.len()` is either `substitutions.len()` or `substitutions.len() + 1`, the
/// literal at index `i` precedes substitution `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub(crate) statics: Vec<String>,
    pub(crate) substitutions: Vec<NodeId>,
}

/// What a [`Node`] does when filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Resolve the name against providers.
    Value,
    /// Splice the named template, filled with the current provider.
    Insert,
    /// Nothing.
    Comment,
}

/// Template a resolved value is filled with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Use the template of the resolved value itself, if any.
    None,
    /// An inline body of the same arena.
    Inline(BodyId),
    /// A template from the named template map.
    Named(String),
}

/// Data shared by every link of a split chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shared {
    pub(crate) join: String,
    pub(crate) leading_join: bool,
    pub(crate) ignore_empty: bool,
}

/// A single substitution, or a single link of a dotted name.
///
/// `{{a.b.c}}` is split into three nodes, each holding one name component. Only the
/// first link carries contingent text and rewind, only the last one carries the
/// [`Target`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) name: String,
    pub(crate) rewind: usize,
    pub(crate) shared: SharedId,
    pub(crate) origin: NodeId,
    pub(crate) leading: String,
    pub(crate) trailing: String,
    pub(crate) target: Target,
    /// `{{ .. }}` range in the outermost source
    pub(crate) span: Range<usize>,
}

impl Compiled {
    pub(crate) fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            nodes: vec![],
            bodies: vec![],
            shared: vec![],
        }
    }

    /// Template source this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The root body.
    pub fn root(&self) -> BodyId {
        BodyId(0)
    }

    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn shared(&self, id: SharedId) -> &Shared {
        &self.shared[id.0]
    }

    /// Literal text of the root body.
    pub fn statics(&self) -> &[String] {
        self.body(self.root()).statics()
    }

    /// Substitutions of the root body.
    pub fn substitutions(&self) -> impl Iterator<Item = &Node> {
        self.body(self.root()).substitutions.iter().map(|id| self.node(*id))
    }

    /// Total number of substitution nodes, including nested and split ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of bodies, including the root.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Lower bound of the filled output length.
    pub fn size_hint(&self) -> usize {
        self.body(self.root()).size_hint()
    }

    /// The raw `{{ .. }}` text a node was compiled from.
    pub fn raw(&self, id: NodeId) -> &str {
        let node = self.node(self.node(id).origin);
        &self.source[node.span.clone()]
    }

    /// Every name component referenced by value substitutions.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(|e| e.kind == NodeKind::Value)
            .map(|e| e.name.as_str())
    }

    /// Returns `true` if any value substitution references `name`.
    pub fn has_name(&self, name: &str) -> bool {
        self.names().any(|e| e == name)
    }

    /// Every named template referenced, by insertion or as a value template.
    pub fn template_refs(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|e| match (&e.kind, &e.target) {
            (NodeKind::Insert, _) => Some(e.name.as_str()),
            (_, Target::Named(name)) => Some(name.as_str()),
            _ => None,
        })
    }
}

impl Body {
    pub fn statics(&self) -> &[String] {
        &self.statics
    }

    pub fn substitutions(&self) -> &[NodeId] {
        &self.substitutions
    }

    /// Sum of literal lengths.
    pub fn size_hint(&self) -> usize {
        self.statics.iter().map(String::len).sum()
    }

    /// Iterate `(literal, substitution)` pairs, the trailing literal comes with [`None`].
    pub fn pairs(&self) -> impl Iterator<Item = (&str, Option<NodeId>)> {
        let subs = self.substitutions.iter().copied().map(Some).chain(std::iter::once(None));
        self.statics
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat(""))
            .zip(subs)
            .filter(|(lit, sub)| sub.is_some() || !lit.is_empty())
    }
}

impl Shared {
    /// Separator between sequence elements, `"\n"` unless given with `%`.
    pub fn join(&self) -> &str {
        &self.join
    }

    /// `%%`, the separator also precedes the first element.
    pub fn leading_join(&self) -> bool {
        self.leading_join
    }

    /// Set by any `<` or `>` marker, empty elements are dropped with their separator.
    pub fn ignore_empty(&self) -> bool {
        self.ignore_empty
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Single name component, or the template name for [`NodeKind::Insert`].
    ///
    /// An empty name refers to the current provider itself.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rewind(&self) -> usize {
        self.rewind
    }

    pub fn shared_id(&self) -> SharedId {
        self.shared
    }

    /// First link of the split chain this node belongs to.
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// Contingent text before the substitution.
    pub fn leading(&self) -> &str {
        &self.leading
    }

    /// Contingent text after the substitution.
    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}
