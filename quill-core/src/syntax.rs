//! Substitution body syntax.
//!
//! ```text
//! {{ [<|<<] [!] [.]*name [%[%]joinstring] [|[!]data] [>|>>] }}
//! {{# comment }}
//! ```
use std::borrow::Cow;

/// Ignore-empty marker, `<`/`>` or `<<`/`>>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// `<` or `>`, the rest of the current line only.
    Line,
    /// `<<` or `>>`, the rest of the current line and adjacent blank lines.
    Lines,
}

/// Parsed substitution body.
#[derive(Debug, PartialEq, Eq)]
pub enum Syntax<'a> {
    /// `{{# ... }}`
    Comment,
    /// Anything else.
    Subst(SubstSyntax<'a>),
}

/// A parsed non-comment substitution body.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SubstSyntax<'a> {
    pub before: Option<Mark>,
    /// `!`, splice a named template
    pub insert: bool,
    /// count of leading dots
    pub rewind: usize,
    /// trimmed, still dotted, name
    pub path: &'a str,
    pub join: Option<JoinSyntax>,
    pub data: Option<Data<'a>>,
    pub after: Option<Mark>,
}

/// `%joinstring` or `%%joinstring`.
#[derive(Debug, PartialEq, Eq)]
pub struct JoinSyntax {
    pub leading: bool,
    pub text: String,
}

/// `|` data section.
#[derive(Debug, PartialEq, Eq)]
pub enum Data<'a> {
    /// `|!template`, with the byte offset of the template inside the raw body
    Inline { source: Cow<'a, str>, offset: usize },
    /// `|name`
    Named(&'a str),
}

impl<'a> Syntax<'a> {
    /// Parse a raw substitution body.
    pub fn parse(raw: &'a str) -> Syntax<'a> {
        let body = raw.trim();
        if body.starts_with('#') {
            return Syntax::Comment;
        }

        let (body, after, escaped_tail) = split_after(body);
        let mut subst = SubstSyntax { after, ..Default::default() };

        let mut rest = body;
        if let Some(r) = rest.strip_prefix("<<") {
            subst.before = Some(Mark::Lines);
            rest = r.trim_start();
        } else if let Some(r) = rest.strip_prefix('<') {
            subst.before = Some(Mark::Line);
            rest = r.trim_start();
        }

        if let Some(r) = rest.strip_prefix('!') {
            subst.insert = true;
            rest = r.trim_start();
        }

        let dots = rest.bytes().take_while(|e| *e == b'.').count();
        subst.rewind = dots;
        rest = &rest[dots..];

        let name_end = rest.find(['|', '%']).unwrap_or(rest.len());
        subst.path = rest[..name_end].trim();
        rest = &rest[name_end..];

        if let Some(r) = rest.strip_prefix('%') {
            let (leading, r) = match r.strip_prefix('%') {
                Some(r) => (true, r),
                None => (false, r),
            };
            let end = find_unescaped(r, b'|').unwrap_or(r.len());
            subst.join = Some(JoinSyntax { leading, text: unescape_join(&r[..end]) });
            rest = &r[end..];
        }

        if let Some(r) = rest.strip_prefix('|') {
            subst.data = Some(match r.strip_prefix('!') {
                Some(inline) => {
                    let offset = inline.as_ptr() as usize - raw.as_ptr() as usize;
                    // without an after marker the body runs up to the closing braces,
                    // trailing whitespace included
                    let inline = match subst.after {
                        Some(_) => inline,
                        None => &raw[offset..],
                    };
                    let source = match escaped_tail {
                        true => Cow::Owned(unescape_tail(inline)),
                        false => Cow::Borrowed(inline),
                    };
                    Data::Inline { source, offset }
                }
                None => Data::Named(r.trim()),
            });
        }

        Syntax::Subst(subst)
    }
}

/// Split off a trailing `>` or `>>`.
///
/// Also returns whether the body ends with an escaped `\>`.
fn split_after(body: &str) -> (&str, Option<Mark>, bool) {
    let (rest, mark) = match body.strip_suffix('>') {
        Some(rest) if !rest.ends_with('\\') => match rest.strip_suffix('>') {
            Some(rest2) if !rest2.ends_with('\\') => (rest2.trim_end(), Some(Mark::Lines)),
            _ => (rest.trim_end(), Some(Mark::Line)),
        },
        _ => (body, None),
    };
    (rest, mark, rest.ends_with("\\>"))
}

/// `\>` ending the body is a literal `>`, whitespace after it is kept.
fn unescape_tail(inline: &str) -> String {
    let end = inline.trim_end().len();
    format!("{}>{}", &inline[..end - 2], &inline[end..])
}

fn find_unescaped(source: &str, needle: u8) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == needle => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// `\n` `\t` `\s` `\|` `\>` `\\`, anything else is kept verbatim.
fn unescape_join(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('s') => out.push(' '),
            Some(ch @ ('|' | '>' | '\\')) => out.push(ch),
            Some(ch) => {
                out.push('\\');
                out.push(ch);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn subst(raw: &str) -> SubstSyntax<'_> {
        match Syntax::parse(raw) {
            Syntax::Subst(s) => s,
            Syntax::Comment => panic!("unexpected comment"),
        }
    }

    #[test]
    fn plain_name() {
        let s = subst(" TEST ");
        assert_eq!(s.path, "TEST");
        assert_eq!(s.rewind, 0);
        assert!(!s.insert);
        assert_eq!(s.before, None);
        assert_eq!(s.after, None);
    }

    #[test]
    fn comment() {
        assert_eq!(Syntax::parse("# anything {{ here }}"), Syntax::Comment);
        assert_eq!(Syntax::parse("  #"), Syntax::Comment);
    }

    #[test]
    fn markers() {
        let s = subst("<<..a.b%%, |row>>");
        assert_eq!(s.before, Some(Mark::Lines));
        assert_eq!(s.rewind, 2);
        assert_eq!(s.path, "a.b");
        assert_eq!(s.join, Some(JoinSyntax { leading: true, text: ", ".into() }));
        assert_eq!(s.data, Some(Data::Named("row")));
        assert_eq!(s.after, Some(Mark::Lines));

        let s = subst("< name >");
        assert_eq!(s.before, Some(Mark::Line));
        assert_eq!(s.path, "name");
        assert_eq!(s.after, Some(Mark::Line));
    }

    #[test]
    fn insert() {
        let s = subst("!header");
        assert!(s.insert);
        assert_eq!(s.path, "header");
    }

    #[test]
    fn inline_data() {
        let raw = "v|!<li>{{}}</li\\>";
        let s = subst(raw);
        assert_eq!(s.after, None);
        assert_eq!(
            s.data,
            Some(Data::Inline { source: Cow::Owned("<li>{{}}</li>".into()), offset: 3 })
        );

        let s = subst("v|! {{}}>");
        assert_eq!(s.after, Some(Mark::Line));
        assert_eq!(s.data, Some(Data::Inline { source: Cow::Borrowed(" {{}}"), offset: 3 }));
    }

    #[test]
    fn inline_keeps_trailing_whitespace() {
        let s = subst("v|! [{{}}]\n ");
        assert_eq!(s.data, Some(Data::Inline { source: Cow::Borrowed(" [{{}}]\n "), offset: 3 }));

        let s = subst(" v|!</li\\>\n");
        assert_eq!(s.after, None);
        assert_eq!(
            s.data,
            Some(Data::Inline { source: Cow::Owned("</li>\n".into()), offset: 4 })
        );
    }

    #[test]
    fn join_escapes() {
        let s = subst(r"v%\n\s\|\x|!{{}}");
        assert_eq!(s.join.unwrap().text, "\n |\\x");
    }
}
