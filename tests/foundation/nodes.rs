//! Integration tests for the node tree

use kisexp_foundation::{Atom, Node, escape_string, format_float};

// =============================================================================
// Numeric formatting
// =============================================================================

#[test]
fn float_formatting_examples() {
    assert_eq!(format_float(1.0), "1.0");
    assert_eq!(format_float(1.230_000), "1.23");
    assert_eq!(format_float(0.0), "0.0");
    assert_eq!(format_float(-2.5), "-2.5");
}

#[test]
fn float_formatting_rounds_to_six_places() {
    assert_eq!(format_float(0.123_456_7), "0.123457");
    assert_eq!(format_float(1e-9), "0.0");
    assert_eq!(format_float(1_000_000.0), "1000000.0");
}

// =============================================================================
// Strings
// =============================================================================

#[test]
fn escaping_only_touches_quotes() {
    assert_eq!(escape_string(r#"a "b" c"#), r#""a \"b\" c""#);
    assert_eq!(escape_string(r"C:\path"), r#""C:\path""#);
}

// =============================================================================
// Structure
// =============================================================================

#[test]
fn tags_and_dispatch_keys() {
    let layer = Node::list([Node::atom("layer"), Node::string("F.Cu")]);
    assert_eq!(layer.tag(), Some(&Atom::new("layer")));
    assert_eq!(layer.dispatch_key().map(Atom::as_str), Some("layer"));
    assert_eq!(Node::atom("hide").dispatch_key().map(Atom::as_str), Some("hide"));
    assert_eq!(Node::string("hide").dispatch_key(), None);
    assert_eq!(Node::list([Node::Int(0)]).tag(), None);
    assert_eq!(Node::list([]).tag(), None);
}

#[test]
fn display_renders_one_line() {
    let node = Node::list([
        Node::atom("segment"),
        Node::list([Node::atom("start"), Node::Int(0), Node::Float(1.5)]),
        Node::string("x \"y\""),
    ]);
    assert_eq!(node.to_string(), r#"(segment (start 0 1.5) "x \"y\"")"#);
}

#[test]
fn conversions() {
    assert_eq!(Node::from(3_i64), Node::Int(3));
    assert_eq!(Node::from(0.5), Node::Float(0.5));
    assert_eq!(Node::from(Atom::new("a")), Node::atom("a"));
    assert_eq!(Node::from(vec![Node::Int(1)]), Node::list([Node::Int(1)]));
}
