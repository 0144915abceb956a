//! Command handlers for the `bexpr` binary.

use std::fmt::Write as _;

use bexpr_attr::{evaluate_attribute, read_attribute, BindingFrame};
use bexpr_eval::{compile, prelude, CompileOptions, Environment, Value};
use bexpr_ir::{Node, NodeKind};
use bexpr_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::CliError;

/// A `--let name=<expr>` option, before evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetBinding {
    pub name: String,
    pub source: String,
}

/// Split the value of a `--let` option.
pub fn parse_let(arg: &str) -> Result<LetBinding, CliError> {
    match arg.split_once('=') {
        Some((name, source)) if !name.is_empty() => Ok(LetBinding {
            name: name.to_string(),
            source: source.to_string(),
        }),
        _ => Err(CliError::Usage(format!(
            "expected --let <name>=<expr>, got `{arg}`"
        ))),
    }
}

/// `bexpr parse <expr>`: one indented tree per top-level node.
pub fn parse_command(source: &str) -> Result<String, CliError> {
    let nodes = bexpr_parse::parse(source)?;
    let mut out = String::new();
    for node in &nodes {
        write_tree(&mut out, node, 0);
    }
    Ok(out)
}

fn write_tree(out: &mut String, node: &Node, depth: usize) {
    ensure_sufficient_stack(|| write_node(out, node, depth));
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    // Writing to a String cannot fail.
    let _ = match &node.kind {
        NodeKind::Number(n) => writeln!(out, "{indent}number {n} @{}", node.span),
        NodeKind::String(s) => writeln!(out, "{indent}string {s:?} @{}", node.span),
        NodeKind::Symbol(s) => writeln!(out, "{indent}symbol {s} @{}", node.span),
        NodeKind::List(_) | NodeKind::Vector(_) => {
            writeln!(out, "{indent}{} @{}", node.kind.name(), node.span)
        }
    };
    for child in node.children() {
        write_tree(out, child, depth + 1);
    }
}

/// Evaluate `--let` bindings in order into a root frame.
///
/// Each binding sees the prelude and the bindings before it.
fn bind_lets<'p>(lets: &[LetBinding], env: &Environment) -> Result<BindingFrame<'p>, CliError> {
    let mut frame = BindingFrame::root();
    for binding in lets {
        let value = first_value(&binding.source, env, &frame).map_err(|e| CliError::Let {
            name: binding.name.clone(),
            source: Box::new(e),
        })?;
        debug!(name = %binding.name, %value, "bound --let");
        frame.bind(binding.name.clone(), value);
    }
    Ok(frame)
}

fn first_value(source: &str, env: &Environment, frame: &BindingFrame<'_>) -> Result<Value, CliError> {
    Ok(evaluate(source, env, frame)?
        .into_iter()
        .next()
        .unwrap_or_default())
}

fn evaluate(source: &str, env: &Environment, frame: &BindingFrame<'_>) -> Result<Vec<Value>, CliError> {
    let nodes = bexpr_parse::parse(source)?;
    let resolver = |name: &str| frame.infer(name);
    let options = CompileOptions::new().with_resolver(&resolver);
    Ok(compile(&nodes, env, &options)?)
}

/// `bexpr eval <expr> [--let name=<expr>]...`: one value per line.
pub fn eval_command(source: &str, lets: &[LetBinding]) -> Result<String, CliError> {
    let env = prelude();
    let frame = bind_lets(lets, &env)?;
    let mut out = String::new();
    for value in evaluate(source, &env, &frame)? {
        let _ = writeln!(out, "{value}");
    }
    Ok(out)
}

/// `bexpr attr <name> <value> [--let name=<expr>]...`.
///
/// Every namespace key resolves to the prelude.
pub fn attr_command(name: &str, value: &str, lets: &[LetBinding]) -> Result<String, CliError> {
    let env = prelude();
    let frame = bind_lets(lets, &env)?;
    let attr = read_attribute(name, value)?;
    let result = evaluate_attribute(&attr, |_| Some(&env), &frame)?;
    Ok(format!("{}: {result}\n", attr.directive))
}
