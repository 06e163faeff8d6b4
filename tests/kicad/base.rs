//! Integration tests for the shared primitives

use kisexp_codec::{ErrorKind, Record};
use kisexp_kicad::{AtPos, EditTime, FontSpec, Justify, PageSettings, Stroke, TextEffect, Xy};
use kisexp_syntax::PrintConfig;

fn compact<R: Record>(record: &R) -> String {
    record.serialize_with(&PrintConfig::compact()).unwrap()
}

#[test]
fn text_effects_from_a_footprint() {
    let effects = TextEffect::parse(
        "(effects (font (size 1 1) (thickness 0.15) bold) (justify left bottom mirror) hide)",
    )
    .unwrap();
    assert_eq!(effects.font.size, Xy::new(1.0, 1.0));
    assert_eq!(effects.font.thickness, Some(0.15));
    assert!(effects.font.bold);
    assert!(!effects.font.italic);
    assert_eq!(effects.justify.h.as_ref().map(|a| a.as_str()), Some("left"));
    assert_eq!(effects.justify.v.as_ref().map(|a| a.as_str()), Some("bottom"));
    assert!(effects.justify.mirror);
    assert!(effects.hide);
}

#[test]
fn default_effects_stay_short() {
    assert_eq!(
        compact(&TextEffect::default()),
        "(effects (font (size 1.27 1.27)))"
    );
    let centered = TextEffect {
        justify: Justify::default(),
        ..TextEffect::default()
    };
    assert!(!compact(&centered).contains("justify"));
}

#[test]
fn font_flags_accept_both_spellings() {
    let legacy = FontSpec::parse("(font (size 1 1) italic)").unwrap();
    let modern = FontSpec::parse("(font (size 1 1) (italic yes))").unwrap();
    assert!(legacy.italic);
    assert_eq!(legacy, modern);
    assert!(compact(&modern).contains("(italic yes)"));
}

#[test]
fn stroke_type_is_a_closed_set() {
    let stroke = Stroke::parse("(stroke (width 0.1) (type dash) (color 255 0 0 1))").unwrap();
    assert_eq!(stroke.kind, "dash");
    assert_eq!(stroke.color.as_ref().map(|c| c.r), Some(255));

    let err = Stroke::parse("(stroke (type wavy))").unwrap_err();
    assert!(err.is_mapping());
    assert!(matches!(err.root_cause().kind, ErrorKind::InvalidAtom { .. }));
}

#[test]
fn rotation_is_normalized_on_write() {
    let at = AtPos {
        rotation: -90.0,
        ..AtPos::new(1.0, 2.0)
    };
    assert_eq!(compact(&at), "(at 1.0 2.0 270.0)");
    assert_eq!(at.rotation, -90.0);

    let full_turn = AtPos {
        rotation: 360.0,
        ..AtPos::new(0.0, 0.0)
    };
    assert_eq!(compact(&full_turn), "(at 0.0 0.0)");
}

#[test]
fn unlocked_position() {
    let at = AtPos::parse("(at 3 4 45 unlocked)").unwrap();
    assert_eq!(at.rotation, 45.0);
    assert!(at.unlocked);
    assert_eq!(compact(&at), "(at 3.0 4.0 45.0 unlocked)");
}

#[test]
fn edit_time_is_hex_either_way_it_lexes() {
    assert_eq!(EditTime::parse("(tedit 5E2A7F3C)").unwrap().value, 0x5E2A_7F3C);
    assert_eq!(EditTime::parse("(tedit 12345678)").unwrap().value, 0x1234_5678);
    assert_eq!(compact(&EditTime::new(0xAB)), "(tedit 000000AB)");

    let err = EditTime::parse("(tedit XYZ)").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Format(_)));
}

#[test]
fn edit_time_writes_the_current_value() {
    let mut stamp = EditTime::parse("(tedit 00000001)").unwrap();
    stamp.value = 0xFFFF_FFFF;
    assert_eq!(compact(&stamp), "(tedit FFFFFFFF)");
}

#[test]
fn custom_paper_size() {
    let page = PageSettings::parse("(paper \"User\" 297 210 portrait)").unwrap();
    assert_eq!(page.page_format, "User");
    assert_eq!(page.width, Some(297.0));
    assert_eq!(page.height, Some(210.0));
    assert!(page.portrait);
    assert_eq!(compact(&page), "(paper \"User\" 297.0 210.0 portrait)");
}
