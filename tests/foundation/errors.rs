//! Integration tests for Error types
//!
//! Tests error construction, classification, context frames and reports.

use std::error::Error as _;

use kisexp_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_atom_lists_choices() {
    let err = Error::invalid_atom("wiggly", &["dash", "dot"]);
    assert!(matches!(err.kind, ErrorKind::InvalidAtom { .. }));
    let msg = err.to_string();
    assert!(msg.contains("wiggly"));
    assert!(msg.contains("dash, dot"));
}

#[test]
fn error_arity() {
    let err = Error::arity("1", 3);
    assert!(err.is_mapping());
    let msg = err.to_string();
    assert!(msg.contains('1'));
    assert!(msg.contains('3'));
}

#[test]
fn error_unhandled_positional() {
    let err = Error::unhandled_positional("xy", "7");
    assert!(err.is_mapping());
    assert_eq!(
        err.to_string(),
        "unhandled positional argument 7 while parsing xy"
    );
}

#[test]
fn error_format_is_neither_grammar_nor_mapping() {
    let err = Error::format("File format version 1 is not supported");
    assert!(!err.is_grammar());
    assert!(!err.is_mapping());
}

#[test]
fn io_errors_convert() {
    let err = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
    assert!(matches!(err.kind, ErrorKind::Io(_)));
    assert!(err.to_string().contains("gone"));
}

// =============================================================================
// Context and causes
// =============================================================================

#[test]
fn nested_fields_add_frames() {
    let err = Error::type_mismatch("float", "atom wide")
        .within("segment.width", || "(width wide)".into())
        .within("kicad_pcb.track_segments", || "(segment ...)".into())
        .with_source("board.kicad_pcb");

    match &err.kind {
        ErrorKind::Mapping { target, value } => {
            assert_eq!(target, "segment.width");
            assert_eq!(value, "(width wide)");
        }
        other => panic!("unexpected kind {other:?}"),
    }
    let context = err.context.as_ref().unwrap();
    assert_eq!(context.stack, ["kicad_pcb.track_segments"]);
    assert_eq!(context.source.as_deref(), Some("board.kicad_pcb"));

    let cause = err.source().unwrap().to_string();
    assert!(cause.contains("expected float"));
}

#[test]
fn report_lists_every_part() {
    let err = Error::mapping("at.x", "(at q 1)", Error::type_mismatch("float", "atom q"))
        .with_context(ErrorContext::new().with_source("f.kicad_mod").with_frame("pad.at"));
    let report = err.report();
    assert!(report.starts_with("cannot map (at q 1) into at.x at f.kicad_mod"));
    assert!(report.contains("in pad.at"));
    assert!(report.ends_with("caused by: type mismatch: expected float, got atom q"));
}
