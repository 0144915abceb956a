//! Reduce parsed nodes to values.
//!
//! Evaluation is eager, depth-first and left to right. Every argument of a
//! call is fully evaluated before the call runs, nothing is memoized, and
//! neither the environment nor the resolver can change during a `compile`
//! call.

use std::fmt;

use bexpr_ir::{Node, NodeKind};
use bexpr_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::environment::Environment;
use crate::errors::{
    empty_call, non_symbol_call_head, not_callable, undefined_function, EvalError, EvalResult,
};
use crate::value::{FunctionValue, Value};

/// Callback consulted before the environment when a bare symbol is
/// evaluated. Returns `None` when it has no binding for the name.
pub type SymbolResolver<'r> = &'r dyn Fn(&str) -> Option<Value>;

/// Which resolver results fall through to the environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolverFallthrough {
    /// `None` and falsy values (`nil`, `false`, `0`, `""`, ...) fall
    /// through, so a falsy binding is shadowed by an environment entry of
    /// the same name.
    #[default]
    Falsy,
    /// Only `None` falls through; a falsy binding is returned as is.
    Absent,
}

/// Per-call evaluation options.
#[derive(Clone, Copy, Default)]
pub struct CompileOptions<'r> {
    pub resolve_symbol: Option<SymbolResolver<'r>>,
    pub fallthrough: ResolverFallthrough,
}

impl<'r> CompileOptions<'r> {
    pub fn new() -> Self {
        CompileOptions::default()
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: SymbolResolver<'r>) -> Self {
        self.resolve_symbol = Some(resolver);
        self
    }

    #[must_use]
    pub fn with_fallthrough(mut self, fallthrough: ResolverFallthrough) -> Self {
        self.fallthrough = fallthrough;
        self
    }

    fn resolve(&self, name: &str) -> Option<Value> {
        let resolver = self.resolve_symbol?;
        let value = resolver(name)?;
        match self.fallthrough {
            ResolverFallthrough::Falsy if !value.is_truthy() => None,
            _ => Some(value),
        }
    }
}

impl fmt::Debug for CompileOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("resolve_symbol", &self.resolve_symbol.map(|_| ".."))
            .field("fallthrough", &self.fallthrough)
            .finish()
    }
}

/// Evaluate every top-level node, producing one value per node in order.
///
/// The first failing node aborts the call; there are no partial results.
///
/// # Example
///
/// ```
/// use bexpr_eval::{compile, CompileOptions, Environment, Value};
///
/// let env = Environment::new().with_fn("add", |args| {
///     Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
/// });
/// let nodes = bexpr_parse::parse("(add 1 2 3)").unwrap();
/// let values = compile(&nodes, &env, &CompileOptions::new()).unwrap();
/// assert_eq!(values, vec![Value::Int(6)]);
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(nodes = nodes.len()))]
pub fn compile(
    nodes: &[Node],
    env: &Environment,
    options: &CompileOptions<'_>,
) -> Result<Vec<Value>, EvalError> {
    nodes
        .iter()
        .map(|node| eval_node(node, env, options))
        .collect()
}

/// Evaluate a single node.
pub fn eval_node(node: &Node, env: &Environment, options: &CompileOptions<'_>) -> EvalResult {
    ensure_sufficient_stack(|| match &node.kind {
        NodeKind::Number(n) => Ok(Value::from(*n)),
        NodeKind::String(s) => Ok(Value::Str(s.clone())),
        NodeKind::Symbol(name) => Ok(resolve_symbol(name, env, options)),
        NodeKind::Vector(children) => eval_all(children, env, options).map(Value::List),
        NodeKind::List(children) => eval_call(node, children, env, options),
    })
}

fn eval_all(
    nodes: &[Node],
    env: &Environment,
    options: &CompileOptions<'_>,
) -> Result<Vec<Value>, EvalError> {
    nodes
        .iter()
        .map(|node| eval_node(node, env, options))
        .collect()
}

/// Resolver first, then the environment; unbound symbols are `Nil`.
fn resolve_symbol(name: &str, env: &Environment, options: &CompileOptions<'_>) -> Value {
    if let Some(value) = options.resolve(name) {
        trace!(symbol = name, "resolved by resolver");
        return value;
    }
    env.get(name).cloned().unwrap_or_default()
}

/// Look up the function named by the head, evaluate the arguments, call.
///
/// The head is looked up only in the environment, never via the resolver.
fn eval_call(
    node: &Node,
    children: &[Node],
    env: &Environment,
    options: &CompileOptions<'_>,
) -> EvalResult {
    let Some((head, args)) = children.split_first() else {
        return Err(empty_call().with_span(node.span));
    };
    let Some(name) = head.as_symbol() else {
        return Err(non_symbol_call_head(head.kind.name()).with_span(head.span));
    };
    let func = lookup_function(name, env).map_err(|e| e.with_span(head.span))?;

    let args = eval_all(args, env, options)?;
    trace!(function = name, argc = args.len(), "calling function");
    func.call(&args).map_err(|e| e.with_span(node.span))
}

fn lookup_function<'e>(name: &str, env: &'e Environment) -> Result<&'e FunctionValue, EvalError> {
    match env.get(name) {
        Some(Value::Function(func)) => Ok(func),
        Some(other) => Err(not_callable(name, other.type_name())),
        None => Err(undefined_function(name)),
    }
}
