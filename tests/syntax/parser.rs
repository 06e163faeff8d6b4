//! Integration tests for the parser

use kisexp_foundation::{ErrorKind, Node};
use kisexp_syntax::{ParseConfig, Parser, parse, parse_with};

fn syntax_message(source: &str) -> String {
    match parse(source).unwrap_err().kind {
        ErrorKind::Syntax { message, .. } => message,
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

// =============================================================================
// Well-formed input
// =============================================================================

#[test]
fn parses_nested_lists() {
    let node = parse("(segment (start 0 0) (end 1 1) (width 0.5) locked)").unwrap();
    let items = node.as_list().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0], Node::atom("segment"));
    assert_eq!(
        items[3],
        Node::list([Node::atom("width"), Node::Float(0.5)])
    );
    assert_eq!(items[4], Node::atom("locked"));
}

#[test]
fn parses_single_leaf() {
    assert_eq!(parse("  42\n").unwrap(), Node::Int(42));
    assert_eq!(parse("\"x\"").unwrap(), Node::string("x"));
}

#[test]
fn string_escapes_survive_parsing() {
    let node = parse(r#"(descr "a \"b\" c")"#).unwrap();
    assert_eq!(node.as_list().unwrap()[1], Node::string(r#"a "b" c"#));
}

#[test]
fn parser_interns_repeated_atoms() {
    let mut parser = Parser::new("(pts (xy 0 0) (xy 1 0) (xy 1 1))");
    let node = parser.parse().unwrap();
    assert_eq!(parser.atoms().len(), 2);
    assert_eq!(parser.atoms().hits(), 2);

    let items = node.as_list().unwrap();
    let first = items[1].tag().unwrap();
    let last = items[3].tag().unwrap();
    assert!(first.ptr_eq(last));
}

// =============================================================================
// Grammar errors
// =============================================================================

#[test]
fn empty_input() {
    assert_eq!(syntax_message(""), "no or empty expression");
    assert_eq!(syntax_message("  \n "), "no or empty expression");
}

#[test]
fn unbalanced_input() {
    assert_eq!(syntax_message("(a (b)"), "unterminated list");
    assert_eq!(syntax_message("(a))"), "unbalanced closing parenthesis");
    assert_eq!(syntax_message(")"), "unbalanced closing parenthesis");
}

#[test]
fn leftover_garbage() {
    assert_eq!(
        syntax_message("(a) (b)"),
        "leftover garbage after end of expression"
    );
}

#[test]
fn errors_carry_position() {
    let err = parse("(a\n  \"open").unwrap_err();
    match err.kind {
        ErrorKind::Syntax { line, column, context, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, 3);
            assert_eq!(context, "  \"open");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn nesting_limit_is_configurable() {
    let deep = format!("{}x{}", "(".repeat(40), ")".repeat(40));
    assert!(parse(&deep).is_ok());

    let config = ParseConfig::new().with_max_depth(10);
    let err = parse_with(&deep, &config).unwrap_err();
    assert!(err.is_grammar());
    assert!(err.to_string().contains("nesting deeper than 10 lists"));
}
