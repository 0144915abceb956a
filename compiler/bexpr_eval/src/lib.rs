//! bexpr Eval - evaluator for parsed attribute expressions.
//!
//! Reduces `bexpr_ir` nodes to [`Value`]s against a caller-supplied
//! [`Environment`] and an optional symbol resolver.
//!
//! # Name resolution
//!
//! - Call heads `(name ...)` are looked up in the environment only and must
//!   name a [`Value::Function`].
//! - Bare symbols ask the resolver first, then the environment, and are
//!   `Nil` when neither knows them. [`ResolverFallthrough`] decides whether a
//!   falsy resolver answer counts as "not known".

mod compile;
mod environment;
pub mod errors;
mod prelude;
mod value;

pub use compile::{compile, eval_node, CompileOptions, ResolverFallthrough, SymbolResolver};
pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use prelude::prelude;
pub use value::{FunctionValue, NativeFn, Value};

#[cfg(test)]
mod tests;
