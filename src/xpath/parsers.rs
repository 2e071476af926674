//! Parsers for the identity-constraint XPath subset
//!
//! ```text
//! Selector  ::= Path ( '|' Path )*
//! Path      ::= Step ( ( '/' | '//' ) Step )*
//! Step      ::= '.' | ( 'child::' )? NameTest
//! Field     ::= FieldPath ( '|' FieldPath )*
//! FieldPath ::= Path | ( Path ( '/' | '//' ) )? ( '@' | 'attribute::' ) NameTest
//! NameTest  ::= QName | '*' | NCName ':' '*'
//! ```
//!
//! Whitespace may separate tokens but never appears inside a name test.

use std::fmt;

use super::{NameTest, StepKind, XPathExpr, XPathPath, XPathStep};
use crate::names::{is_valid_ncname, is_xml_whitespace};
use crate::namespaces::NamespaceScopes;
use crate::values::ValueError;

/// Axes that may be spelled out in the subset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XPathAxis {
    /// `child::` (the default axis)
    Child,
    /// `attribute::` (`@`), fields only
    Attribute,
}

impl XPathAxis {
    /// Parse an axis name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "child" => Some(Self::Child),
            "attribute" => Some(Self::Attribute),
            _ => None,
        }
    }
}

impl fmt::Display for XPathAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Child => write!(f, "child"),
            Self::Attribute => write!(f, "attribute"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Pipe,
    Slash,
    DoubleSlash,
    Dot,
    At,
    Star,
    Axis(String),
    Name(Option<String>, String),
    PrefixWildcard(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Pipe => write!(f, "|"),
            Token::Slash => write!(f, "/"),
            Token::DoubleSlash => write!(f, "//"),
            Token::Dot => write!(f, "."),
            Token::At => write!(f, "@"),
            Token::Star => write!(f, "*"),
            Token::Axis(axis) => write!(f, "{}::", axis),
            Token::Name(Some(prefix), local) => write!(f, "{}:{}", prefix, local),
            Token::Name(None, local) => write!(f, "{}", local),
            Token::PrefixWildcard(prefix) => write!(f, "{}:*", prefix),
        }
    }
}

fn is_delimiter(c: char) -> bool {
    is_xml_whitespace(c) || matches!(c, '|' | '/' | '@' | '*' | ':' | '(' | ')' | '[' | ']' | '=' | ',' | '\'' | '"')
}

/// Take a run of name characters starting at `start`
fn scan_name(input: &str, start: usize) -> Result<(&str, usize), ValueError> {
    let end = input[start..]
        .char_indices()
        .find(|(_, c)| is_delimiter(*c))
        .map(|(i, _)| start + i)
        .unwrap_or(input.len());
    let name = &input[start..end];
    if !is_valid_ncname(name) {
        return Err(ValueError::invalid(format!("'{}' is not a valid name", name)));
    }
    Ok((name, end))
}

fn tokenize(input: &str) -> Result<Vec<Token>, ValueError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(c) = input[pos..].chars().next() {
        match c {
            c if is_xml_whitespace(c) => pos += c.len_utf8(),
            '|' => {
                tokens.push(Token::Pipe);
                pos += 1;
            }
            '/' if input[pos + 1..].starts_with('/') => {
                tokens.push(Token::DoubleSlash);
                pos += 2;
            }
            '/' => {
                tokens.push(Token::Slash);
                pos += 1;
            }
            '.' => {
                tokens.push(Token::Dot);
                pos += 1;
            }
            '@' => {
                tokens.push(Token::At);
                pos += 1;
            }
            '*' => {
                tokens.push(Token::Star);
                pos += 1;
            }
            _ => {
                let (name, end) = scan_name(input, pos)?;
                let rest = &input[end..];
                if rest.starts_with("::") {
                    tokens.push(Token::Axis(name.to_string()));
                    pos = end + 2;
                } else if rest.starts_with(":*") {
                    tokens.push(Token::PrefixWildcard(name.to_string()));
                    pos = end + 2;
                } else if rest.starts_with(':') {
                    let (local, local_end) = scan_name(input, end + 1)?;
                    tokens.push(Token::Name(Some(name.to_string()), local.to_string()));
                    pos = local_end;
                } else {
                    tokens.push(Token::Name(None, name.to_string()));
                    pos = end;
                }
            }
        }
    }

    Ok(tokens)
}

struct PathParser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    scopes: &'a NamespaceScopes,
    allow_attributes: bool,
}

impl<'a> PathParser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn parse_expr(&mut self) -> Result<Vec<XPathPath>, ValueError> {
        let mut paths = vec![self.parse_path()?];
        while let Some(token) = self.next() {
            match token {
                Token::Pipe => paths.push(self.parse_path()?),
                other => {
                    return Err(ValueError::invalid(format!("unexpected '{}'", other)));
                }
            }
        }
        Ok(paths)
    }

    fn parse_path(&mut self) -> Result<XPathPath, ValueError> {
        if matches!(self.peek(), Some(Token::Slash | Token::DoubleSlash)) {
            return Err(ValueError::invalid("absolute paths are not allowed"));
        }

        let mut steps = vec![self.parse_step(false)?];
        loop {
            let descendant = match self.peek() {
                Some(Token::Slash) => false,
                Some(Token::DoubleSlash) => true,
                _ => break,
            };
            if matches!(steps.last().map(|s| &s.kind), Some(StepKind::Attribute(_))) {
                return Err(ValueError::invalid("an attribute step must be the last step"));
            }
            self.pos += 1;
            steps.push(self.parse_step(descendant)?);
        }
        Ok(XPathPath { steps })
    }

    fn parse_step(&mut self, descendant: bool) -> Result<XPathStep, ValueError> {
        let kind = match self.next() {
            Some(Token::Dot) => StepKind::SelfNode,
            Some(Token::At) => self.attribute_step()?,
            Some(Token::Axis(name)) => match XPathAxis::parse(&name) {
                Some(XPathAxis::Child) => StepKind::Child(self.name_test()?),
                Some(XPathAxis::Attribute) => self.attribute_step()?,
                None => {
                    return Err(ValueError::invalid(format!("axis '{}' is not allowed", name)));
                }
            },
            Some(Token::Star | Token::Name(..) | Token::PrefixWildcard(_)) => {
                self.pos -= 1;
                StepKind::Child(self.name_test()?)
            }
            Some(other) => {
                return Err(ValueError::invalid(format!("unexpected '{}'", other)));
            }
            None => return Err(ValueError::invalid("expected a step")),
        };
        Ok(XPathStep { descendant, kind })
    }

    fn attribute_step(&mut self) -> Result<StepKind, ValueError> {
        if !self.allow_attributes {
            return Err(ValueError::invalid("attribute steps are only allowed in fields"));
        }
        Ok(StepKind::Attribute(self.name_test()?))
    }

    fn name_test(&mut self) -> Result<NameTest, ValueError> {
        match self.next() {
            Some(Token::Star) => Ok(NameTest::Any),
            Some(Token::PrefixWildcard(prefix)) => {
                let namespace = self
                    .scopes
                    .resolve_prefix(&prefix)
                    .ok_or(ValueError::UnboundPrefix(prefix))?;
                Ok(NameTest::Namespace(namespace.to_string()))
            }
            Some(Token::Name(prefix, local)) => self
                .scopes
                .resolve_parts(prefix.as_deref(), &local, false)
                .map(NameTest::Name),
            Some(other) => Err(ValueError::invalid(format!(
                "expected a name test, found '{}'",
                other
            ))),
            None => Err(ValueError::invalid("expected a name test")),
        }
    }
}

fn parse_expression(
    raw: &str,
    scopes: &NamespaceScopes,
    allow_attributes: bool,
) -> Result<XPathExpr, ValueError> {
    let tokens = tokenize(raw)?;
    if tokens.is_empty() {
        return Err(ValueError::invalid("empty expression"));
    }
    let mut parser = PathParser {
        tokens,
        pos: 0,
        scopes,
        allow_attributes,
    };
    let paths = parser.parse_expr()?;
    Ok(XPathExpr {
        expression: raw.to_string(),
        paths,
    })
}

/// Parse the `xpath` attribute of `xs:selector`
pub fn parse_selector(raw: &str, scopes: &NamespaceScopes) -> Result<XPathExpr, ValueError> {
    parse_expression(raw, scopes, false)
}

/// Parse the `xpath` attribute of `xs:field`
pub fn parse_field(raw: &str, scopes: &NamespaceScopes) -> Result<XPathExpr, ValueError> {
    parse_expression(raw, scopes, true)
}
