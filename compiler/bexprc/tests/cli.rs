//! Tests for the command handlers behind the `bexpr` binary.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bexprc::commands::{attr_command, eval_command, parse_command, parse_let, LetBinding};
use bexprc::CliError;
use pretty_assertions::assert_eq;

fn lets(args: &[&str]) -> Vec<LetBinding> {
    args.iter().map(|arg| parse_let(arg).unwrap()).collect()
}

#[test]
fn parse_prints_an_indented_tree() {
    let out = parse_command("(add 1 'x') [2.5]").unwrap();
    assert_eq!(
        out,
        "list @0..11\n  symbol add @1..4\n  number 1 @5..6\n  string \"x\" @7..10\n\
         vector @12..17\n  number 2.5 @13..16\n"
    );
}

#[test]
fn parse_reports_errors() {
    let err = parse_command("(add 1").unwrap_err();
    assert!(matches!(err, CliError::Parse(_)));
    assert!(err.to_string().starts_with("parse error: "));
}

#[test]
fn eval_prints_one_value_per_line() {
    assert_eq!(
        eval_command("(+ 1 2) 'text' [1 'a']", &[]).unwrap(),
        "3\ntext\n[1, \"a\"]\n"
    );
}

#[test]
fn eval_uses_let_bindings() {
    let bindings = lets(&["x=(* 6 7)", "y=(+ x 1)"]);
    assert_eq!(eval_command("(str x '/' y)", &bindings).unwrap(), "42/43\n");
}

#[test]
fn let_errors_name_the_binding() {
    let err = eval_command("x", &lets(&["x=(nope)"])).unwrap_err();
    assert!(matches!(err, CliError::Let { ref name, .. } if name == "x"));
    assert!(err.to_string().starts_with("in --let x: eval error: "));
}

#[test]
fn malformed_let() {
    assert!(matches!(parse_let("novalue"), Err(CliError::Usage(_))));
    assert!(matches!(parse_let("=1"), Err(CliError::Usage(_))));
    assert_eq!(
        parse_let("a=b=c").unwrap(),
        LetBinding {
            name: "a".to_string(),
            source: "b=c".to_string()
        }
    );
}

#[test]
fn attr_prints_directive_and_first_value() {
    let bindings = lets(&["items=[1 2 3]"]);
    assert_eq!(
        attr_command("b-text:state", "(count items) 'ignored'", &bindings).unwrap(),
        "text: 3\n"
    );
    assert_eq!(
        attr_command("b-when-not", "hidden", &[]).unwrap(),
        "when-not: \n"
    );
}

#[test]
fn attr_rejects_unknown_directives() {
    let err = attr_command("b-show", "1", &[]).unwrap_err();
    assert_eq!(err.to_string(), "unknown directive `show`");
}

#[test]
fn deeply_nested_vectors_evaluate_and_print() {
    let depth = 60_000;
    let source = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
    assert_eq!(eval_command(&source, &[]).unwrap(), format!("{source}\n"));
}

#[test]
fn deeply_nested_parse_tree_prints() {
    let depth = 3_000;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let out = parse_command(&source).unwrap();
    assert_eq!(out.lines().count(), depth + 1);
    assert!(out.lines().last().unwrap().trim_start().starts_with("symbol x"));
}
