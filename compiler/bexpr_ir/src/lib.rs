//! bexpr IR - syntax tree types shared by the parser and the evaluator.
//!
//! This crate holds only data:
//! - [`Span`] byte ranges into an attribute's expression text
//! - [`Node`] / [`NodeKind`] / [`Number`], the five-shape syntax tree
//!
//! The evaluator depends on these shapes, never on how the parser builds
//! them.

mod node;
mod span;

pub use node::{Node, NodeKind, Number};
pub use span::{Span, SpanError};
