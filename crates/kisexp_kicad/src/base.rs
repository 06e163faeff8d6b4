//! Primitives shared by every KiCad file type.
//!
//! Coordinates, positions, strokes, text effects and the small identifier
//! records (`tstamp`, `uuid`, `tedit`) that appear all over boards,
//! footprints and schematics.

use std::any::Any;
use std::borrow::Cow;

use kisexp_codec::codec::{
    Array, AtomChoice, Flag, LegacyCompatibleFlag, List, Maybe, Named, OmitDefault, Rename, atom,
    float, int, leaf, string,
};
use kisexp_codec::{Atom, Error, Nested, Node, RecordHooks, Result, sexp_record};

// =============================================================================
// Coordinates
// =============================================================================

sexp_record! {
    /// A 2D coordinate, `(xy 1.0 2.0)`.
    ///
    /// Most fields store points under their own keyword through
    /// [`Rename`], e.g. `(start 1.0 2.0)`.
    pub struct Xy("xy") {
        /// X coordinate in mm.
        pub x: f64 = 0.0 => float(),
        /// Y coordinate in mm.
        pub y: f64 = 0.0 => float(),
    }
}

impl Xy {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

sexp_record! {
    /// A 3D coordinate, `(xyz 0 0 0)`.
    pub struct Xyz("xyz") {
        /// X component.
        pub x: f64 = 0.0 => float(),
        /// Y component.
        pub y: f64 = 0.0 => float(),
        /// Z component.
        pub z: f64 = 0.0 => float(),
    }
}

sexp_record! {
    /// A polyline: `(pts (xy 0 0) (xy 1 0) ...)`.
    pub struct PointList("pts") {
        /// The points, in order.
        pub xy: Vec<Xy> = Vec::new() => List::new(Nested::new()),
    }
}

sexp_record! {
    /// Placement of an item: `(at x y [rotation] [unlocked])`.
    ///
    /// Rotation is in degrees and written only when non-zero. Encoding
    /// wraps it into `0..360`.
    pub struct AtPos("at") with hooks {
        /// X coordinate in mm.
        pub x: f64 = 0.0 => float(),
        /// Y coordinate in mm.
        pub y: f64 = 0.0 => float(),
        /// Rotation in degrees.
        pub rotation: f64 = 0.0 => OmitDefault::new(float()),
        /// Keeps its orientation when the parent rotates.
        pub unlocked: bool = false => Flag::new(),
    }
}

impl AtPos {
    /// Creates an unrotated position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
            unlocked: false,
        }
    }
}

impl RecordHooks for AtPos {
    #[allow(clippy::float_cmp)]
    fn before_encode(&self) -> Cow<'_, Self> {
        let rotation = self.rotation.rem_euclid(360.0);
        if rotation == self.rotation {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(Self {
                rotation,
                ..self.clone()
            })
        }
    }
}

// =============================================================================
// Graphics
// =============================================================================

sexp_record! {
    /// An RGBA color, `(color r g b a)`.
    pub struct Color("color") {
        /// Red, 0-255.
        pub r: i64 = 0 => int(),
        /// Green, 0-255.
        pub g: i64 = 0 => int(),
        /// Blue, 0-255.
        pub b: i64 = 0 => int(),
        /// Alpha, 0-1.
        pub a: f64 = 0.0 => float(),
    }
}

/// Line styles accepted by `(stroke (type ...))`.
pub const STROKE_TYPES: &[&str] = &["dash", "dot", "dash_dot_dot", "dash_dot", "default", "solid"];

sexp_record! {
    /// Outline style of a graphic item.
    pub struct Stroke("stroke") {
        /// Line width in mm.
        pub width: f64 = 0.254 => Named::new(float()),
        /// Written as `(type ...)`.
        pub kind: Atom = Atom::new("default") => Named::with_name("type", AtomChoice::new(STROKE_TYPES)),
        /// Explicit color; `None` uses the layer color.
        pub color: Option<Color> = None => Maybe::new(Nested::new()),
    }
}

// =============================================================================
// Text
// =============================================================================

sexp_record! {
    /// Font of a text item.
    ///
    /// `bold` and `italic` accept both the legacy bare keyword and the
    /// newer `(bold yes)` form; they are written only when set.
    pub struct FontSpec("font") {
        /// Font name; `None` is the KiCad stroke font.
        pub face: Option<String> = None => Maybe::new(Named::new(string())),
        /// Glyph height and width.
        pub size: Xy = Xy::new(1.27, 1.27) => Rename::new(Nested::new()),
        /// Stroke thickness.
        pub thickness: Option<f64> = None => Maybe::new(Named::new(float())),
        /// Bold.
        pub bold: bool = false => OmitDefault::new(Named::new(LegacyCompatibleFlag::new())),
        /// Italic.
        pub italic: bool = false => OmitDefault::new(Named::new(LegacyCompatibleFlag::new())),
        /// Line spacing factor.
        pub line_spacing: Option<f64> = None => Maybe::new(Named::new(float())),
    }
}

sexp_record! {
    /// Text alignment, `(justify left bottom mirror)`.
    pub struct Justify("justify") {
        /// `left` or `right`; `None` centers.
        pub h: Option<Atom> = None => Maybe::new(AtomChoice::new(&["left", "right"])),
        /// `top` or `bottom`; `None` centers.
        pub v: Option<Atom> = None => Maybe::new(AtomChoice::new(&["top", "bottom"])),
        /// Mirrored text.
        pub mirror: bool = false => Flag::new(),
    }
}

sexp_record! {
    /// Font, alignment and visibility of a text item.
    pub struct TextEffect("effects") {
        /// Font settings.
        pub font: FontSpec = FontSpec::default() => Nested::new(),
        /// Alignment.
        pub justify: Justify = Justify::default() => OmitDefault::new(Nested::new()),
        /// Hidden text.
        pub hide: bool = false => Flag::new(),
    }
}

sexp_record! {
    /// A key/value property.
    pub struct Property("property") {
        /// Property name.
        pub key: String = String::new() => string(),
        /// Property value.
        pub value: String = String::new() => string(),
    }
}

// =============================================================================
// Identifiers
// =============================================================================

sexp_record! {
    /// Item identifier used by KiCad 7 and later.
    pub struct Uuid("uuid") {
        /// The UUID text.
        pub value: String = String::new() => string(),
    }
}

sexp_record! {
    /// Item identifier used by KiCad 6, written as a bare atom.
    pub struct Timestamp("tstamp") {
        /// The timestamp atom.
        pub value: Atom = Atom::default() => atom(),
    }
}

sexp_record! {
    /// Last edit time of a footprint, a 32-bit value written as eight hex
    /// digits: `(tedit 5E2A7F3C)`.
    pub struct EditTime("tedit") with hooks {
        /// The stamp as it was read. Depending on its digits it lexes as an
        /// atom or an integer.
        pub raw: Node = Node::atom("00000000") => leaf();
        /// Decoded stamp.
        pub value: u32 = 0,
    }
}

impl EditTime {
    /// Creates a stamp from its value.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self {
            raw: Node::Atom(hex_stamp(value)),
            value,
        }
    }
}

fn hex_stamp(value: u32) -> Atom {
    Atom::from(format!("{value:08X}"))
}

impl RecordHooks for EditTime {
    fn after_decode(&mut self, _parent: Option<&dyn Any>) -> Result<()> {
        let text = match &self.raw {
            Node::Atom(a) => a.to_string(),
            Node::String(s) => s.clone(),
            Node::Int(n) => n.to_string(),
            other => return Err(Error::format(format!("{other} is not a hex edit time"))),
        };
        self.value = u32::from_str_radix(&text, 16)
            .map_err(|_| Error::format(format!("{text} is not a hex edit time")))?;
        Ok(())
    }

    fn before_encode(&self) -> Cow<'_, Self> {
        Cow::Owned(Self::new(self.value))
    }
}

// =============================================================================
// Document furniture
// =============================================================================

sexp_record! {
    /// Paper size: `(paper "A4")`, `(paper "User" 297 210)` or
    /// `(paper "A3" portrait)`.
    pub struct PageSettings("paper") {
        /// Paper name, `User` for a custom size.
        pub page_format: String = "A4".into() => string(),
        /// Custom width in mm.
        pub width: Option<f64> = None => Maybe::new(float()),
        /// Custom height in mm.
        pub height: Option<f64> = None => Maybe::new(float()),
        /// Portrait orientation.
        pub portrait: bool = false => Flag::new(),
    }
}

sexp_record! {
    /// A net declaration, `(net 1 "GND")`.
    pub struct Net("net") {
        /// Net code.
        pub index: i64 = 0 => int(),
        /// Net name; net 0 has an empty name.
        pub name: String = String::new() => string(),
    }
}

sexp_record! {
    /// A named group of items, referenced by their identifiers.
    pub struct Group("group") {
        /// Group name, often empty.
        pub name: String = String::new() => string(),
        /// Group identifier.
        pub id: String = String::new() => Named::new(string()),
        /// Identifiers of the grouped items.
        pub members: Vec<String> = Vec::new() => Named::new(Array::new(string())),
    }
}
