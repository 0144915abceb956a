//! Evaluator tests, grouped by the module they exercise.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use crate::{compile, CompileOptions, Environment, EvalError, Value};

/// Parse and compile `source` with no resolver.
fn eval(source: &str, env: &Environment) -> Result<Vec<Value>, EvalError> {
    eval_with(source, env, &CompileOptions::new())
}

fn eval_with(
    source: &str,
    env: &Environment,
    options: &CompileOptions<'_>,
) -> Result<Vec<Value>, EvalError> {
    let nodes = bexpr_parse::parse(source)
        .unwrap_or_else(|e| panic!("failed to parse {source:?}: {e}"));
    compile(&nodes, env, options)
}

/// Variadic integer sum, as a host would register it.
fn sum_env() -> Environment {
    Environment::new().with_fn("+", |args| {
        Ok(Value::Int(args.iter().filter_map(Value::as_int).sum()))
    })
}
