//! Integration tests for the KiCad-layout printer

use kisexp_foundation::Node;
use kisexp_syntax::{PrintConfig, build_sexp, build_sexp_with, parse};

const BOARD_EXCERPT: &str = r#"(kicad_pcb (version 20221018) (generator pcbnew)
  (general (thickness 1.6))
  (net 1 "GND")
  (segment (start 10 10) (end 20 10) (width 0.25) (layer "F.Cu") (net 1) (tstamp 0b2f))
)"#;

#[test]
fn board_excerpt_layout() {
    let printed = build_sexp(&parse(BOARD_EXCERPT).unwrap());
    let expected = "(kicad_pcb\n  (version 20221018)\n  (generator pcbnew)\n  (general\n    (thickness 1.6))\n  (net 1 \"GND\")\n  (segment\n    (start 10 10)\n    (end 20 10)\n    (width 0.25)\n    (layer \"F.Cu\")\n    (net 1)\n    (tstamp 0b2f)))";
    assert_eq!(printed, expected);
}

#[test]
fn printing_is_a_fixed_point() {
    let once = build_sexp(&parse(BOARD_EXCERPT).unwrap());
    let twice = build_sexp(&parse(&once).unwrap());
    assert_eq!(once, twice);
}

#[test]
fn quoted_strings_round_trip() {
    let node = parse(r#"(descr "a \"b\" c")"#).unwrap();
    assert_eq!(build_sexp(&node), r#"(descr "a \"b\" c")"#);
}

#[test]
fn floats_use_short_form() {
    let node = Node::list([
        Node::atom("at"),
        Node::Float(1.0),
        Node::Float(1.230_000),
        Node::Float(-2.5),
    ]);
    assert_eq!(build_sexp(&node), "(at 1.0 1.23 -2.5)");
}

#[test]
fn empty_atom_prints_as_empty_string() {
    let node = Node::list([Node::atom("net"), Node::Int(0), Node::atom("")]);
    assert_eq!(build_sexp(&node), "(net 0 \"\")");
}

#[test]
fn compact_and_custom_indent() {
    let node = parse("(a (b (c 1)) d)").unwrap();
    assert_eq!(
        build_sexp_with(&node, &PrintConfig::compact()),
        "(a (b (c 1)) d)"
    );
    assert_eq!(
        build_sexp_with(&node, &PrintConfig::new().with_indent_width(4)),
        "(a\n    (b\n        (c 1)) d)"
    );
}
