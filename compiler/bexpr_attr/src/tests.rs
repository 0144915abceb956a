#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use bexpr_eval::{prelude, EvalErrorKind, ResolverFallthrough};
use bexpr_parse::ParseErrorKind;

mod reading {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn directive_with_namespace() {
        let attr = read_attribute("b-for:state", "[x items]").unwrap();
        assert_eq!(
            attr,
            Attribute {
                directive: Directive::For,
                namespace: Some("state".to_string()),
                value: "[x items]".to_string(),
            }
        );
    }

    #[test]
    fn directive_without_namespace() {
        let attr = read_attribute("b-when-not", "hidden").unwrap();
        assert_eq!(attr.directive, Directive::WhenNot);
        assert_eq!(attr.namespace, None);
    }

    #[test]
    fn segments_after_the_namespace_are_ignored() {
        let attr = read_attribute("b-for:state:extra", "x").unwrap();
        assert_eq!(attr.directive, Directive::For);
        assert_eq!(attr.namespace.as_deref(), Some("state"));
    }

    #[test]
    fn empty_namespace_is_none() {
        assert_eq!(read_attribute("b-text:", "x").unwrap().namespace, None);
    }

    #[test]
    fn every_keyword_round_trips() {
        for directive in Directive::ALL {
            let name = format!("{PREFIX}{directive}");
            assert_eq!(read_attribute(&name, "").unwrap().directive, directive);
        }
    }

    #[test]
    fn unknown_directive() {
        assert_eq!(
            read_attribute("b-show", "x"),
            Err(AttrError::UnknownDirective {
                keyword: "show".to_string()
            })
        );
    }

    #[test]
    fn plain_and_internal_attributes_are_not_instrumented() {
        assert!(is_instrumented("b-text"));
        assert!(!is_instrumented("class"));
        assert!(!is_instrumented(&binding_attribute_name("index")));
        assert_eq!(
            read_attribute("class", "x"),
            Err(AttrError::NotInstrumented {
                name: "class".to_string()
            })
        );
    }

    #[test]
    fn binding_names() {
        assert_eq!(binding_attribute_name("item"), "__b-binding:item");
        assert!(binding_attribute_name("item").starts_with(INTERNAL_PREFIX));
    }
}

mod frames {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn infer_walks_ancestors() {
        let mut root = BindingFrame::root();
        root.bind("user", "ada");
        root.bind("index", 0_i64);
        let mut child = BindingFrame::child(&root);
        child.bind("index", 3_i64);
        let grandchild = BindingFrame::child(&child);

        assert_eq!(grandchild.infer("index"), Some(Value::Int(3)));
        assert_eq!(grandchild.infer("user"), Some(Value::string("ada")));
        assert_eq!(grandchild.infer("missing"), None);
        assert_eq!(grandchild.get("index"), None);
        assert!(root.parent().is_none());
    }

    #[test]
    fn bind_pairs_records_let_values() {
        let mut frame = BindingFrame::root();
        let pairs = Value::List(vec![
            Value::List(vec![Value::string("a"), Value::Int(1)]),
            Value::List(vec![Value::string("b"), Value::string("two")]),
        ]);
        assert_eq!(frame.bind_pairs(&pairs), Ok(2));
        assert_eq!(frame.get("a"), Some(&Value::Int(1)));
        assert_eq!(frame.get("b"), Some(&Value::string("two")));
    }

    #[test]
    fn malformed_let_entry_binds_nothing() {
        let mut frame = BindingFrame::root();
        let pairs = Value::List(vec![
            Value::List(vec![Value::string("a"), Value::Int(1)]),
            Value::List(vec![Value::Int(2), Value::Int(2)]),
        ]);
        assert_eq!(
            frame.bind_pairs(&pairs),
            Err(AttrError::MalformedValue {
                directive: Directive::Let,
                expected: "[[key value] ...] with string keys",
                found: "[2, 2]".to_string(),
            })
        );
        assert_eq!(frame.get("a"), None);
    }

    #[test]
    fn let_value_must_be_a_list_of_pairs() {
        let mut frame = BindingFrame::root();
        assert!(matches!(
            frame.bind_pairs(&Value::Nil),
            Err(AttrError::MalformedValue { directive: Directive::Let, .. })
        ));
        let short = Value::List(vec![Value::List(vec![Value::string("a")])]);
        assert!(frame.bind_pairs(&short).is_err());
    }

    #[test]
    fn iteration_binds_index_and_key() {
        let root = BindingFrame::root();
        let value = Value::List(vec![
            Value::string("item"),
            Value::List(vec![Value::string("x"), Value::string("y")]),
        ]);
        let (key, items) = iteration_items(&value).unwrap();
        assert_eq!(key, "item");

        let frames: Vec<BindingFrame<'_>> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mut frame = BindingFrame::child(&root);
                frame.bind_iteration(key, i, item.clone());
                frame
            })
            .collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].infer(INDEX), Some(Value::Int(1)));
        assert_eq!(frames[1].infer("item"), Some(Value::string("y")));
        assert_eq!(frames[0].infer("index"), Some(Value::Int(0)));
    }

    #[test]
    fn malformed_for_value() {
        for value in [
            Value::Nil,
            Value::List(vec![Value::string("item")]),
            Value::List(vec![Value::Int(1), Value::List(vec![])]),
            Value::List(vec![Value::string("item"), Value::Int(3)]),
        ] {
            assert!(matches!(
                iteration_items(&value),
                Err(AttrError::MalformedValue { directive: Directive::For, .. })
            ));
        }
    }

    #[test]
    fn falsy_binding_can_fall_through_to_ancestors() {
        let mut root = BindingFrame::root();
        root.bind("x", 5_i64);
        let mut child = BindingFrame::child(&root);
        child.bind("x", 0_i64);

        assert_eq!(child.infer("x"), Some(Value::Int(0)));
        assert_eq!(
            child.infer_with("x", ResolverFallthrough::Falsy),
            Some(Value::Int(5))
        );
        child.bind("y", "");
        assert_eq!(child.infer_with("y", ResolverFallthrough::Falsy), None);
    }
}

mod evaluating {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state() -> Environment {
        prelude().with_value("items", Value::List(vec![Value::Int(1), Value::Int(2)]))
    }

    #[test]
    fn namespace_functions_are_callable() {
        let env = state();
        let attr = read_attribute("b-text:state", "(str 'n=' (count items))").unwrap();
        let value = evaluate_attribute(&attr, |ns| (ns == "state").then_some(&env), &BindingFrame::root())
            .unwrap();
        assert_eq!(value, Value::string("n=2"));
    }

    #[test]
    fn only_the_first_value_is_returned() {
        let attr = read_attribute("b-text", "'first' 'second'").unwrap();
        let value = evaluate_attribute(&attr, |_| None, &BindingFrame::root()).unwrap();
        assert_eq!(value, Value::string("first"));
    }

    #[test]
    fn empty_expression_is_nil() {
        let attr = read_attribute("b-when", "   ").unwrap();
        assert_eq!(
            evaluate_attribute(&attr, |_| None, &BindingFrame::root()).unwrap(),
            Value::Nil
        );
    }

    #[test]
    fn symbols_resolve_through_frames() {
        let mut root = BindingFrame::root();
        root.bind("name", "ada");
        let child = BindingFrame::child(&root);
        let attr = read_attribute("b-text", "name").unwrap();
        assert_eq!(
            evaluate_attribute(&attr, |_| None, &child).unwrap(),
            Value::string("ada")
        );
    }

    #[test]
    fn frame_bindings_feed_namespace_calls() {
        let env = state();
        let mut frame = BindingFrame::root();
        frame.bind("x", 4_i64);
        let attr = read_attribute("b-when:state", "(> x 3)").unwrap();
        assert_eq!(
            evaluate_attribute(&attr, |_| Some(&env), &frame).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn falsy_binding_falls_through_to_outer_frame() {
        let mut root = BindingFrame::root();
        root.bind("label", "outer");
        let mut child = BindingFrame::child(&root);
        child.bind("label", "");
        let attr = read_attribute("b-text", "label").unwrap();
        assert_eq!(
            evaluate_attribute_with(&attr, |_| None, &child, ResolverFallthrough::Falsy).unwrap(),
            Value::string("outer")
        );
        assert_eq!(
            evaluate_attribute(&attr, |_| None, &child).unwrap(),
            Value::string("")
        );
    }

    #[test]
    fn for_value_drives_iteration_frames() {
        let env = state();
        let root = BindingFrame::root();
        let attr = read_attribute("b-for:state", "['n' items]").unwrap();
        let value = evaluate_attribute(&attr, |_| Some(&env), &root).unwrap();
        let (key, items) = iteration_items(&value).unwrap();

        let text = read_attribute("b-text:state", "(str index ':' n)").unwrap();
        for (i, expected) in [(0, "0:1"), (1, "1:2")] {
            let mut frame = BindingFrame::child(&root);
            frame.bind_iteration(key, i, items[i].clone());
            assert_eq!(
                evaluate_attribute(&text, |_| Some(&env), &frame).unwrap(),
                Value::string(expected)
            );
        }
    }

    #[test]
    fn deeply_nested_value_is_returned_and_dropped() {
        let depth = 50_000;
        let source = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        let attr = read_attribute("b-text", &source).unwrap();
        let value = evaluate_attribute(&attr, |_| None, &BindingFrame::root()).unwrap();
        assert_eq!(value.to_string(), source);
        drop(value);
    }

    #[test]
    fn no_namespace_means_no_functions() {
        let attr = read_attribute("b-text", "(count [1])").unwrap();
        let err = evaluate_attribute(&attr, |_| None, &BindingFrame::root()).unwrap_err();
        assert!(matches!(
            err,
            AttrError::Eval(ref e) if e.kind == EvalErrorKind::UndefinedFunction { name: "count".to_string() }
        ));
    }

    #[test]
    fn unknown_namespace() {
        let attr = read_attribute("b-text:nope", "1").unwrap();
        let err = evaluate_attribute(&attr, |_| None, &BindingFrame::root()).unwrap_err();
        assert_eq!(
            err,
            AttrError::UnknownNamespace {
                namespace: "nope".to_string()
            }
        );
        assert_eq!(err.to_string(), "lookup failed, namespace not defined: nope");
    }

    #[test]
    fn parse_errors_are_wrapped() {
        let attr = read_attribute("b-text", "(str 'x'").unwrap();
        let err = evaluate_attribute(&attr, |_| None, &BindingFrame::root()).unwrap_err();
        assert!(matches!(
            err,
            AttrError::Parse(ref e) if matches!(e.kind, ParseErrorKind::UnterminatedGroup { .. })
        ));
    }
}
