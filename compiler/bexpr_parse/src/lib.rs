//! Recursive descent parser for bexpr attribute expressions.
//!
//! Single pass over the text, no separate lexer and no backtracking. After
//! skipping whitespace the first byte picks the sub-parser:
//!
//! | first byte | node |
//! |---|---|
//! | digit, `-` | number (a lone `-` is the symbol `-`) |
//! | `(` | list, closed by `)` |
//! | `[` | vector, closed by `]` |
//! | `'` | string |
//! | anything else | symbol |
//!
//! Groups recurse back into the dispatcher for each child, so nesting is
//! tracked by the call stack rather than by counting bracket characters.

mod cursor;
mod error;

pub use error::{ParseError, ParseErrorKind};

use std::num::IntErrorKind;

use bexpr_ir::{Node, NodeKind, Number};
use bexpr_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use cursor::{is_delimiter, Cursor};

/// Parse `input` into its top-level nodes, in source order.
///
/// Empty or all-whitespace input yields an empty vector.
///
/// # Example
///
/// ```
/// use bexpr_ir::NodeKind;
///
/// let nodes = bexpr_parse::parse("(add 1 2) x").unwrap();
/// assert_eq!(nodes.len(), 2);
/// assert!(matches!(nodes[0].kind, NodeKind::List(_)));
/// assert_eq!(nodes[1].as_symbol(), Some("x"));
/// ```
pub fn parse(input: &str) -> Result<Vec<Node>, ParseError> {
    debug!(len = input.len(), "parsing expression");
    let mut parser = Parser::new(input);
    let nodes = parser.parse_all()?;
    debug!(count = nodes.len(), "parsed top-level nodes");
    Ok(nodes)
}

/// Which bracket pair a group uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Group {
    List,
    Vector,
}

impl Group {
    fn open(self) -> u8 {
        match self {
            Group::List => b'(',
            Group::Vector => b'[',
        }
    }

    fn close(self) -> u8 {
        match self {
            Group::List => b')',
            Group::Vector => b']',
        }
    }

    fn into_kind(self, children: Vec<Node>) -> NodeKind {
        match self {
            Group::List => NodeKind::List(children),
            Group::Vector => NodeKind::Vector(children),
        }
    }
}

struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(source),
        }
    }

    fn parse_all(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => return Ok(nodes),
                Some(b @ (b')' | b']')) => {
                    let start = self.cursor.pos();
                    self.cursor.bump();
                    return Err(error::unexpected_closer(
                        char::from(b),
                        self.cursor.span_from(start),
                    ));
                }
                Some(_) => nodes.push(self.parse_node()?),
            }
        }
    }

    /// Parse one node at the cursor.
    ///
    /// The caller has skipped whitespace and checked that the cursor is
    /// neither at end of input nor on a closing bracket.
    fn parse_node(&mut self) -> Result<Node, ParseError> {
        let node = match self.cursor.peek() {
            Some(b'(') => self.parse_group(Group::List)?,
            Some(b'[') => self.parse_group(Group::Vector)?,
            Some(b'\'') => self.parse_string()?,
            Some(b'-') if is_delimiter(self.cursor.peek_at(1)) => self.parse_symbol(),
            Some(b'0'..=b'9' | b'-') => self.parse_number()?,
            _ => self.parse_symbol(),
        };
        trace!(kind = node.kind.name(), span = %node.span, "parsed node");
        Ok(node)
    }

    fn parse_group(&mut self, group: Group) -> Result<Node, ParseError> {
        let start = self.cursor.pos();
        debug_assert_eq!(self.cursor.peek(), Some(group.open()));
        self.cursor.bump();

        let children = ensure_sufficient_stack(|| self.parse_children(group, start))?;
        Ok(Node::new(
            group.into_kind(children),
            self.cursor.span_from(start),
        ))
    }

    fn parse_children(&mut self, group: Group, start: usize) -> Result<Vec<Node>, ParseError> {
        let mut children = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => {
                    return Err(error::unterminated_group(
                        char::from(group.open()),
                        self.cursor.span_from(start),
                    ));
                }
                Some(b) if b == group.close() => {
                    self.cursor.bump();
                    return Ok(children);
                }
                Some(b @ (b')' | b']')) => {
                    let at = self.cursor.pos();
                    self.cursor.bump();
                    return Err(error::mismatched_closer(
                        char::from(group.close()),
                        char::from(b),
                        self.cursor.span_from(at),
                    ));
                }
                Some(_) => children.push(self.parse_node()?),
            }
        }
    }

    /// `'...'`. A quote preceded by a backslash does not terminate the
    /// string, and every backslash is dropped from the value. There is no
    /// other escape handling.
    fn parse_string(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.pos();
        self.cursor.bump();
        let body_start = self.cursor.pos();

        // The opening quote counts as the previous byte of the first body byte.
        let mut prev = b'\'';
        loop {
            match self.cursor.peek() {
                None => return Err(error::unterminated_string(self.cursor.span_from(start))),
                Some(b'\'') if prev != b'\\' => break,
                Some(b) => {
                    prev = b;
                    self.cursor.bump();
                }
            }
        }

        let raw = self.cursor.slice(body_start, self.cursor.pos());
        self.cursor.bump();
        Ok(Node::new(
            NodeKind::String(raw.replace('\\', "")),
            self.cursor.span_from(start),
        ))
    }

    fn parse_symbol(&mut self) -> Node {
        let start = self.cursor.pos();
        self.cursor.bump();
        self.cursor.eat_until_delimiter();
        let text = self.cursor.slice(start, self.cursor.pos());
        Node::new(
            NodeKind::Symbol(text.to_string()),
            self.cursor.span_from(start),
        )
    }

    /// Digits with at most one `.`, optionally led by `-`.
    fn parse_number(&mut self) -> Result<Node, ParseError> {
        let start = self.cursor.pos();
        self.cursor.bump();
        let mut seen_decimal = false;

        loop {
            match self.cursor.peek() {
                None => break,
                Some(b) if is_delimiter(Some(b)) => break,
                Some(b'0'..=b'9') => self.cursor.bump(),
                Some(b'.') if !seen_decimal => {
                    seen_decimal = true;
                    self.cursor.bump();
                }
                Some(b'.') => {
                    self.cursor.bump();
                    let text = self.cursor.slice(start, self.cursor.pos());
                    return Err(error::extra_decimal_point(
                        text,
                        self.cursor.span_from(start),
                    ));
                }
                Some(_) => {
                    let bad = self.cursor.peek_char().unwrap_or('?');
                    let text = format!("{}{bad}", self.cursor.slice(start, self.cursor.pos()));
                    let end = self.cursor.pos() + bad.len_utf8();
                    return Err(error::malformed_number(
                        &text,
                        bexpr_ir::Span::from_range(start..end),
                    ));
                }
            }
        }

        let text = self.cursor.slice(start, self.cursor.pos());
        let span = self.cursor.span_from(start);
        let number = if seen_decimal {
            text.parse::<f64>()
                .map(Number::Float)
                .map_err(|_| error::malformed_number(text, span))?
        } else {
            text.parse::<i64>().map(Number::Int).map_err(|e| match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    error::number_too_large(text, span)
                }
                _ => error::malformed_number(text, span),
            })?
        };
        Ok(Node::new(NodeKind::Number(number), span))
    }
}
