//! Syntax tree for attribute expressions.
//!
//! Five node shapes, nothing else: numbers, strings, symbols, lists
//! (function calls) and vectors (literal aggregates). Nodes are built once
//! by the parser and never mutated afterwards.

use std::fmt;
use std::mem;

use bexpr_stack::ensure_sufficient_stack;

use crate::Span;

/// Numeric literal.
///
/// A token without a `.` is an `Int`; a token with exactly one `.` is a
/// `Float`. Leading zeros are already normalized away by the parser.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Value as a float, promoting integers.
    #[expect(
        clippy::cast_precision_loss,
        reason = "promotion to float is the intended numeric widening"
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            // Debug keeps the trailing `.0`, so the output re-parses as a float.
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// The shape of a node and its payload.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    Number(Number),
    /// String literal with every backslash already stripped.
    String(String),
    /// Name resolved at evaluation time.
    Symbol(String),
    /// `( head args... )`; `head` must be a symbol to evaluate.
    List(Vec<Node>),
    /// `[ elems... ]`; every element is evaluated independently.
    Vector(Vec<Node>),
}

impl NodeKind {
    /// Kind tag used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Number(_) => "number",
            NodeKind::String(_) => "string",
            NodeKind::Symbol(_) => "symbol",
            NodeKind::List(_) => "list",
            NodeKind::Vector(_) => "vector",
        }
    }
}

/// A parsed node together with the source text it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    #[inline]
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Node { kind, span }
    }

    /// Symbol text, if this node is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Children of a list or vector; empty for atoms.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::List(children) | NodeKind::Vector(children) => children,
            _ => &[],
        }
    }
}

/// Frees nested groups through a worklist instead of recursing per level.
impl Drop for Node {
    fn drop(&mut self) {
        let (NodeKind::List(children) | NodeKind::Vector(children)) = &mut self.kind else {
            return;
        };
        let mut pending = mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let NodeKind::List(grandchildren) | NodeKind::Vector(grandchildren) = &mut node.kind
            {
                pending.append(grandchildren);
            }
        }
    }
}

/// Writes `children` separated by single spaces.
fn write_seq(f: &mut fmt::Formatter<'_>, children: &[Node]) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{child}")?;
    }
    Ok(())
}

/// Re-serialises the node as expression source.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match &self.kind {
            NodeKind::Number(n) => write!(f, "{n}"),
            NodeKind::String(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            NodeKind::Symbol(name) => f.write_str(name),
            NodeKind::List(children) => {
                f.write_str("(")?;
                write_seq(f, children)?;
                f.write_str(")")
            }
            NodeKind::Vector(children) => {
                f.write_str("[")?;
                write_seq(f, children)?;
                f.write_str("]")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn atom(kind: NodeKind) -> Node {
        Node::new(kind, Span::DUMMY)
    }

    fn sym(name: &str) -> Node {
        atom(NodeKind::Symbol(name.to_string()))
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Number::Int(-123).to_string(), "-123");
        assert_eq!(Number::Float(1.234).to_string(), "1.234");
        assert_eq!(Number::Float(2.0).to_string(), "2.0");
    }

    #[test]
    fn test_number_as_f64() {
        assert!((Number::Int(3).as_f64() - 3.0).abs() < f64::EPSILON);
        assert!((Number::Float(0.5).as_f64() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(sym("x").kind.name(), "symbol");
        assert_eq!(atom(NodeKind::List(vec![])).kind.name(), "list");
        assert_eq!(atom(NodeKind::Vector(vec![])).kind.name(), "vector");
        assert_eq!(atom(NodeKind::Number(Number::Int(1))).kind.name(), "number");
        assert_eq!(atom(NodeKind::String(String::new())).kind.name(), "string");
    }

    #[test]
    fn test_as_symbol_and_children() {
        let call = atom(NodeKind::List(vec![sym("add"), sym("a")]));
        assert_eq!(call.as_symbol(), None);
        assert_eq!(call.children().len(), 2);
        assert_eq!(call.children()[0].as_symbol(), Some("add"));
        assert!(sym("a").children().is_empty());
    }

    #[test]
    fn test_display_reserialises_source() {
        let tree = atom(NodeKind::List(vec![
            sym("my-fn"),
            atom(NodeKind::String("here's".to_string())),
            atom(NodeKind::Vector(vec![
                atom(NodeKind::Number(Number::Int(1))),
                atom(NodeKind::Number(Number::Float(0.5))),
            ])),
        ]));
        assert_eq!(tree.to_string(), r"(my-fn 'here\'s' [1 0.5])");
    }

    fn nested(depth: usize) -> Node {
        let mut node = sym("x");
        for i in 0..depth {
            let kind = if i % 2 == 0 {
                NodeKind::List(vec![node])
            } else {
                NodeKind::Vector(vec![node])
            };
            node = atom(kind);
        }
        node
    }

    #[test]
    fn test_deep_tree_displays_and_drops() {
        let depth = 200_000;
        let tree = nested(depth);
        let printed = tree.to_string();
        assert_eq!(printed.len(), 2 * depth + 1);
        assert!(printed.starts_with("[(["));
        drop(tree);
    }
}
