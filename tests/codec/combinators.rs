//! Integration tests for the field codec combinators, exercised through
//! small records.

use kisexp_codec::codec::{
    Array, AtomChoice, Flag, LegacyCompatibleFlag, List, Maybe, Named, OmitDefault, Rename, Untagged,
    Wrap, YesNoAtom, atom, float, int, string,
};
use kisexp_codec::{Atom, ErrorKind, Nested, Record, sexp_record};
use kisexp_syntax::PrintConfig;

fn compact<R: Record>(record: &R) -> String {
    record.serialize_with(&PrintConfig::compact()).unwrap()
}

// =============================================================================
// Scalars
// =============================================================================

sexp_record! {
    struct Scalars("scalars") {
        pub count: i64 = 0 => Named::new(int()),
        pub ratio: f64 = 0.0 => Named::new(float()),
        pub label: String = String::new() => Named::new(string()),
        pub kind: Atom = Atom::default() => Named::new(atom()),
    }
}

#[test]
fn scalar_coercions() {
    let lenient = Scalars::parse("(scalars (count 3.0) (ratio 2) (label bare) (kind \"quoted\"))").unwrap();
    assert_eq!(lenient.count, 3);
    assert_eq!(lenient.ratio, 2.0);
    assert_eq!(lenient.label, "bare");
    assert_eq!(lenient.kind, "quoted");
    assert_eq!(
        compact(&lenient),
        "(scalars (count 3) (ratio 2.0) (label \"bare\") (kind quoted))"
    );
}

#[test]
fn scalar_mismatches() {
    for bad in [
        "(scalars (count 2.5))",
        "(scalars (count x))",
        "(scalars (ratio \"1\"))",
        "(scalars (label 1))",
        "(scalars (count 1 2))",
        "(scalars (count (1)))",
    ] {
        let err = Scalars::parse(bad).unwrap_err();
        assert!(err.is_mapping(), "{bad} gave {err}");
    }
}

// =============================================================================
// Booleans
// =============================================================================

sexp_record! {
    struct Switches("switches") {
        pub hide: bool = false => Flag::new(),
        pub visible: bool = true => Flag::with_atom("hidden"),
        pub plated: bool = false => Named::new(YesNoAtom::new()),
        pub bold: bool = false => OmitDefault::new(Named::new(LegacyCompatibleFlag::new())),
        pub allowed: bool = true => Named::with_name("tracks", YesNoAtom::with_atoms("allowed", "not_allowed")),
        pub free: bool = false => Wrap::new(Flag::new()),
    }
}

#[test]
fn flag_inverts_for_true_default() {
    let shown = Switches::parse("(switches)").unwrap();
    assert!(shown.visible);
    let hidden = Switches::parse("(switches hidden)").unwrap();
    assert!(!hidden.visible);
    assert!(compact(&hidden).contains(" hidden"));
    assert!(!compact(&shown).contains("hidden"));
}

#[test]
fn yes_no_atoms() {
    let on = Switches::parse("(switches (plated yes) (tracks not_allowed))").unwrap();
    assert!(on.plated);
    assert!(!on.allowed);
    let text = compact(&on);
    assert!(text.contains("(plated yes)"));
    assert!(text.contains("(tracks not_allowed)"));
    assert!(compact(&Switches::default()).contains("(plated no)"));

    let err = Switches::parse("(switches (plated maybe))").unwrap_err();
    assert!(matches!(err.root_cause().kind, ErrorKind::InvalidAtom { .. }));
}

#[test]
fn legacy_flag_forms() {
    for text in ["(switches bold)", "(switches (bold))", "(switches (bold yes))"] {
        assert!(Switches::parse(text).unwrap().bold, "{text}");
    }
    assert!(!Switches::parse("(switches (bold no))").unwrap().bold);

    let bold = Switches::parse("(switches bold)").unwrap();
    assert!(compact(&bold).contains("(bold yes)"));
    assert!(!compact(&Switches::default()).contains("bold"));
}

#[test]
fn wrapped_flag() {
    let free = Switches::parse("(switches (free))").unwrap();
    assert!(free.free);
    assert!(compact(&free).ends_with("(free))"));
    assert!(!compact(&Switches::default()).contains("free"));
}

// =============================================================================
// Choices and options
// =============================================================================

sexp_record! {
    struct Justify("justify") {
        pub h: Option<Atom> = None => Maybe::new(AtomChoice::new(&["left", "right"])),
        pub v: Atom = Atom::new("top") => AtomChoice::new(&["top", "bottom"]),
        pub face: Option<String> = None => Maybe::new(Named::new(string())),
    }
}

#[test]
fn atom_choice_dispatches_bare_atoms() {
    let j = Justify::parse("(justify bottom right)").unwrap();
    assert_eq!(j.h.as_ref().map(Atom::as_str), Some("right"));
    assert_eq!(j.v, "bottom");
    assert_eq!(compact(&j), "(justify right bottom)");
}

#[test]
fn atom_choice_validates_on_encode() {
    let j = Justify {
        v: Atom::new("middle"),
        ..Justify::default()
    };
    let err = j.to_node().unwrap_err();
    assert!(err.is_mapping());
    assert!(err.report().contains("justify.v"));
}

#[test]
fn maybe_is_absent_by_default() {
    let j = Justify::parse("(justify)").unwrap();
    assert_eq!(j.h, None);
    assert_eq!(j.face, None);
    assert_eq!(compact(&j), "(justify top)");

    let named = Justify::parse("(justify (face \"Arial\"))").unwrap();
    assert_eq!(named.face.as_deref(), Some("Arial"));
}

// =============================================================================
// Collections
// =============================================================================

sexp_record! {
    struct Layer("layer") {
        pub index: i64 = 0 => int(),
        pub name: String = String::new() => string(),
        pub kind: Atom = Atom::new("signal") => AtomChoice::new(&["signal", "user"]),
    }
}

sexp_record! {
    struct Item("item") {
        pub value: i64 = 0 => int(),
    }
}

sexp_record! {
    struct Stack("stack") {
        pub layers: Vec<Layer> = Vec::new() => Named::new(Array::new(Untagged::new(Nested::new()))),
        pub names: Vec<String> = Vec::new() => Named::new(Array::new(string())),
        pub items: Vec<Item> = Vec::new() => List::new(Nested::new()),
        pub main: Item = Item::default() => Named::new(Nested::new()),
    }
}

#[test]
fn untagged_array_of_records() {
    let stack = Stack::parse("(stack (layers (0 \"F.Cu\" signal) (44 \"Edge.Cuts\" user)))").unwrap();
    assert_eq!(stack.layers.len(), 2);
    assert_eq!(stack.layers[1].name, "Edge.Cuts");
    assert_eq!(stack.layers[1].kind, "user");
    assert!(compact(&stack).starts_with("(stack (layers (0 \"F.Cu\" signal) (44 \"Edge.Cuts\" user))"));
}

#[test]
fn array_of_scalars_and_empty_named() {
    let stack = Stack::parse("(stack (names a \"b\" c))").unwrap();
    assert_eq!(stack.names, ["a", "b", "c"]);
    let empty = compact(&Stack::default());
    assert!(!empty.contains("names"));
    assert!(!empty.contains("layers"));
}

#[test]
fn list_collects_scattered_children() {
    let stack = Stack::parse("(stack (item 1) (names x) (item 2) (item 3))").unwrap();
    let values: Vec<i64> = stack.items.iter().map(|i| i.value).collect();
    assert_eq!(values, [1, 2, 3]);
    assert!(compact(&stack).contains("(item 1) (item 2) (item 3)"));
}

#[test]
fn named_record_is_double_wrapped() {
    let stack = Stack::parse("(stack (main (item 7)))").unwrap();
    assert_eq!(stack.main.value, 7);
    assert!(compact(&stack).ends_with("(main (item 7)))"));
}

#[test]
fn named_list_of_records() {
    sexp_record! {
        struct Bus("bus") {
            pub members: Vec<Item> = Vec::new() => Named::with_name("items", List::new(Nested::new())),
        }
    }

    let bus = Bus::parse("(bus (items (item 1) (item 2)))").unwrap();
    let values: Vec<i64> = bus.members.iter().map(|i| i.value).collect();
    assert_eq!(values, [1, 2]);
    assert_eq!(compact(&bus), "(bus (items (item 1) (item 2)))");

    assert!(Bus::parse("(bus (items))").unwrap().members.is_empty());
    assert_eq!(compact(&Bus::default()), "(bus)");
}

// =============================================================================
// Renaming
// =============================================================================

sexp_record! {
    struct Size("size") {
        pub w: f64 = 0.0 => float(),
        pub h: f64 = 0.0 => float(),
    }
}

sexp_record! {
    struct Mount("mount") {
        pub offset: Size = Size::default() => Named::with_name("drill", Rename::new(Nested::new())),
        pub margin: Size = Size::default() => Rename::new(OmitDefault::new(Nested::new())),
        pub angle: f64 = 0.0 => Rename::new(float()),
    }
}

#[test]
fn named_rename_takes_field_name() {
    let mount = Mount::parse("(mount (drill (offset 1 2)))").unwrap();
    assert_eq!((mount.offset.w, mount.offset.h), (1.0, 2.0));
    let text = compact(&mount);
    assert!(text.starts_with("(mount (drill (offset 1.0 2.0))"));
    assert_eq!(Mount::parse(&text).unwrap(), mount);
}

#[test]
fn rename_omits_default_record() {
    let plain = compact(&Mount::default());
    assert!(!plain.contains("margin"));

    let wide = Mount {
        margin: Size { w: 0.5, h: 0.25 },
        ..Mount::default()
    };
    let text = compact(&wide);
    assert!(text.contains("(margin 0.5 0.25)"));
    assert_eq!(Mount::parse(&text).unwrap().margin, wide.margin);
}

#[test]
fn renamed_leaf_reads_back() {
    let turned = Mount {
        angle: 90.0,
        ..Mount::default()
    };
    let text = compact(&turned);
    assert!(text.ends_with("(angle 90.0))"));
    assert_eq!(Mount::parse(&text).unwrap().angle, 90.0);
    assert_eq!(Mount::parse("(mount (angle 45))").unwrap().angle, 45.0);
}
