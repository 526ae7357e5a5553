use crate::{Result, SyntaxError, SyntaxErrorKind, visitor::Visitor};

/// Template source code parser.
///
/// Splits the source into literal text and raw substitution bodies, handing both to a
/// [`Visitor`]. Nested `{{ }}` inside a substitution are counted, so the body of
/// `{{items|!{{name}}}}` is `items|!{{name}}`.
///
/// For more details see the [crate level docs][crate].
pub struct Parser<'a,V> {
    source: &'a str,
    /// offset of `source` in the outermost template
    base: usize,

    // parser states
    index: usize,
    state: ParseState,
    visitor: V,
}

impl<'a, V> Parser<'a, V> {
    /// Create new [`Parser`].
    ///
    /// Requires a [`Visitor`] implementation.
    ///
    /// For literal content only, use [`StaticVisitor`][crate::StaticVisitor].
    pub fn new(source: &'a str, visitor: V) -> Self {
        Self::nested(source, 0, visitor)
    }

    /// Create new [`Parser`] for a slice that starts at `base` in the outermost template.
    ///
    /// Offsets given to the visitor and carried by errors are relative to the outermost
    /// template.
    pub fn nested(source: &'a str, base: usize, visitor: V) -> Self {
        Self {
            source,
            base,
            index: 0,
            state: ParseState::Static { start: 0 },
            visitor,
        }
    }
}

#[derive(Clone, Copy)]
enum ParseState {
    Static { start: usize },
    Expr { start: usize, open: usize, depth: usize },
}

impl<'a,V> Parser<'a,V>
where
    V: Visitor,
{
    /// Start parsing.
    pub fn parse(mut self) -> Result<V::Output> {
        let bytes = self.source.as_bytes();

        loop {
            let current = self.index;
            let Some(byte) = bytes.get(current) else {
                break self.parse_leftover()?;
            };
            let next = bytes.get(current + 1);

            match self.state {
                ParseState::Static { start } => match (byte, next) {
                    (b'\\', Some(b'{' | b'}')) => {
                        self.collect_static(start, current)?;
                        self.visitor.visit_static(&self.source[current + 1..current + 2])?;
                        self.index += 2;
                        self.state = ParseState::Static { start: self.index };
                    }
                    (b'{', Some(b'{')) => {
                        self.collect_static(start, current)?;
                        self.index += 2;
                        self.state = ParseState::Expr { start: self.index, open: current, depth: 1 };
                    }
                    (b'}', Some(b'}')) => {
                        return Err(self.error(SyntaxErrorKind::Unopened, current));
                    }
                    _ => self.index += 1,
                },
                ParseState::Expr { start, open, depth } => match (byte, next) {
                    // escaped braces are not counted
                    (b'\\', Some(b'{' | b'}')) => self.index += 2,
                    (b'{', Some(b'{')) => {
                        self.index += 2;
                        self.state = ParseState::Expr { start, open, depth: depth + 1 };
                    }
                    (b'}', Some(b'}')) => {
                        self.index += 2;
                        if depth > 1 {
                            self.state = ParseState::Expr { start, open, depth: depth - 1 };
                            continue;
                        }
                        self.state = ParseState::Static { start: self.index };
                        self.visitor.visit_expr(&self.source[start..current], self.base + start)?;
                    }
                    _ => self.index += 1,
                },
            }
        }

        self.visitor.finish()
    }

    fn collect_static(&mut self, start: usize, end: usize) -> Result<()> {
        if start == end {
            return Ok(());
        }
        self.visitor.visit_static(&self.source[start..end])
    }

    fn parse_leftover(&mut self) -> Result<()> {
        match self.state {
            ParseState::Static { start } => self.collect_static(start, self.source.len()),
            // we dont have the closing delimiter here, just bail out
            ParseState::Expr { open, .. } => Err(self.error(SyntaxErrorKind::Unclosed, open)),
        }
    }

    fn error(&self, kind: SyntaxErrorKind, offset: usize) -> SyntaxError {
        SyntaxError::new(kind, self.base + offset)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::StaticVisitor;

    /// records every visit in order
    #[derive(Default)]
    struct Recorder(Vec<(bool, String, usize)>);

    impl Visitor for Recorder {
        type Output = Vec<(bool, String, usize)>;

        fn visit_static(&mut self, source: &str) -> Result<()> {
            self.0.push((false, source.to_owned(), 0));
            Ok(())
        }

        fn visit_expr(&mut self, source: &str, offset: usize) -> Result<()> {
            self.0.push((true, source.to_owned(), offset));
            Ok(())
        }

        fn finish(self) -> Result<Self::Output> {
            Ok(self.0)
        }
    }

    fn record(src: &str) -> Vec<(bool, String, usize)> {
        Parser::new(src, Recorder::default()).parse().unwrap()
    }

    #[test]
    fn basic() {
        assert_eq!(
            record("Token {{ expr }} once"),
            [
                (false, "Token ".to_owned(), 0),
                (true, " expr ".to_owned(), 8),
                (false, " once".to_owned(), 0),
            ]
        );
    }

    #[test]
    fn nested_body() {
        let visits = record("{{items|!<{{name}}>}}!");
        assert_eq!(visits[0], (true, "items|!<{{name}}>".to_owned(), 2));
        assert_eq!(visits[1], (false, "!".to_owned(), 0));
    }

    #[test]
    fn escapes() {
        let out = Parser::new(r"\{{{name}}\} \x", StaticVisitor::new()).parse().unwrap();
        assert_eq!(out.statics, r"{} \x");
    }

    #[test]
    fn escaped_braces_in_body_are_not_counted() {
        let visits = record(r"{{a|!\{{x}}}");
        assert_eq!(visits[0], (true, r"a|!\{{x".to_owned(), 2));
        assert_eq!(visits[1], (false, "}".to_owned(), 0));
    }

    #[test]
    fn single_braces_are_literal() {
        let out = Parser::new("{ a } {b}", StaticVisitor::new()).parse().unwrap();
        assert_eq!(out.statics, "{ a } {b}");
    }

    #[test]
    fn unbalanced() {
        let err = Parser::new("a{{b", StaticVisitor::new()).parse().unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::Unclosed);
        assert_eq!(err.offset(), 1);

        let err = Parser::new("a}}b", StaticVisitor::new()).parse().unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::Unopened);
        assert_eq!(err.offset(), 1);

        let err = Parser::new("{{a|!{{b}}", StaticVisitor::new()).parse().unwrap_err();
        assert_eq!(err.kind(), &SyntaxErrorKind::Unclosed);
    }

    #[test]
    fn nested_offsets() {
        let err = Parser::nested("x}}", 10, StaticVisitor::new()).parse().unwrap_err();
        assert_eq!(err.offset(), 11);
    }
}
