//! The `kicad_pcb` board file.
//!
//! A board is read with [`Board::open`] (or [`Record::parse`]) and written
//! back with [`Board::write`]. The catalog covers the board header, the
//! layer stack, nets, groups and the routed copper: track segments, track
//! arcs and vias.

use std::any::Any;
use std::fs;
use std::path::{Path, PathBuf};

use kisexp_codec::codec::{
    Array, AtomChoice, Flag, List, Maybe, Named, Rename, Scalar, Untagged, Wrap, YesNoAtom, atom,
    float, int, string,
};
use kisexp_codec::{Atom, Error, Nested, Record, RecordHooks, Result, sexp_record};
use kisexp_syntax::ParseConfig;

use crate::base::{AtPos, Group, Net, PageSettings, Property, Timestamp, Uuid, Xy};

/// Board file format versions this catalog reads.
pub const SUPPORTED_FILE_FORMAT_VERSIONS: &[u32] = &[20_210_108, 20_211_014, 20_221_018, 20_230_517];

/// Version written into new boards.
pub const DEFAULT_FILE_FORMAT_VERSION: u32 = 20_221_018;

// =============================================================================
// Header
// =============================================================================

sexp_record! {
    /// Board-wide physical settings.
    pub struct GeneralSection("general") {
        /// Board thickness in mm.
        pub thickness: f64 = 1.6 => Named::new(float()),
        /// Teardrops from older versions.
        pub legacy_teardrops: Option<bool> = None => Maybe::new(Named::new(YesNoAtom::new())),
    }
}

/// Layer types accepted in the layer stack.
pub const LAYER_TYPES: &[&str] = &["jumper", "mixed", "power", "signal", "user"];

sexp_record! {
    /// One entry of the layer stack, written without a keyword:
    /// `(0 "F.Cu" signal)` or `(44 "Edge.Cuts" user "Outline")`.
    pub struct LayerSettings("layer") {
        /// Layer number.
        pub index: i64 = 0 => int(),
        /// Canonical name such as `F.Cu`.
        pub canonical_name: String = String::new() => string(),
        /// One of [`LAYER_TYPES`].
        pub layer_type: Atom = Atom::new("signal") => AtomChoice::new(LAYER_TYPES),
        /// User-visible name, if renamed.
        pub custom_name: Option<String> = None => Maybe::new(string()),
    }
}

// =============================================================================
// Copper
// =============================================================================

sexp_record! {
    /// A straight piece of track.
    pub struct TrackSegment("segment") {
        /// Start point.
        pub start: Xy = Xy::default() => Rename::new(Nested::new()),
        /// End point.
        pub end: Xy = Xy::default() => Rename::new(Nested::new()),
        /// Track width in mm.
        pub width: f64 = 0.5 => Named::new(float()),
        /// Copper layer.
        pub layer: String = "F.Cu".into() => Named::new(string()),
        /// Locked against edits.
        pub locked: bool = false => Flag::new(),
        /// Net code.
        pub net: i64 = 0 => Named::new(int()),
        /// Identifier in files before version 7.
        pub tstamp: Option<Timestamp> = None => Maybe::new(Nested::new()),
        /// Identifier in version 7 files.
        pub uuid: Option<Uuid> = None => Maybe::new(Nested::new()),
    }
}

sexp_record! {
    /// A circular piece of track through three points.
    pub struct TrackArc("arc") {
        /// Start point.
        pub start: Xy = Xy::default() => Rename::new(Nested::new()),
        /// Point on the arc between the ends.
        pub mid: Xy = Xy::default() => Rename::new(Nested::new()),
        /// End point.
        pub end: Xy = Xy::default() => Rename::new(Nested::new()),
        /// Track width in mm.
        pub width: f64 = 0.5 => Named::new(float()),
        /// Copper layer.
        pub layer: String = "F.Cu".into() => Named::new(string()),
        /// Locked against edits.
        pub locked: bool = false => Flag::new(),
        /// Net code.
        pub net: i64 = 0 => Named::new(int()),
        /// Identifier in files before version 7.
        pub tstamp: Option<Timestamp> = None => Maybe::new(Nested::new()),
        /// Identifier in version 7 files.
        pub uuid: Option<Uuid> = None => Maybe::new(Nested::new()),
    }
}

sexp_record! {
    /// A plated hole connecting copper layers.
    ///
    /// Through vias have no `via_type`; blind and micro vias carry it as a
    /// bare atom right after the keyword.
    pub struct Via("via") {
        /// `blind` or `micro`; `None` for a through via.
        pub via_type: Option<Atom> = None => Maybe::new(AtomChoice::new(&["blind", "micro"])),
        /// Locked against edits.
        pub locked: bool = false => Flag::new(),
        /// Position.
        pub at: AtPos = AtPos::default() => Nested::new(),
        /// Pad diameter in mm.
        pub size: f64 = 0.8 => Named::new(float()),
        /// Drill diameter in mm.
        pub drill: f64 = 0.4 => Named::new(float()),
        /// First and last copper layer.
        pub layers: Vec<String> = vec!["F.Cu".into(), "B.Cu".into()] => Named::new(Array::new(string())),
        /// Unconnected layers carry no annulus.
        pub remove_unused_layers: bool = false => Flag::new(),
        /// Keep the annulus on the end layers anyway.
        pub keep_end_layers: bool = false => Flag::new(),
        /// Written as `(free)`.
        pub free: bool = false => Wrap::new(Flag::new()),
        /// Net code.
        pub net: i64 = 0 => Named::new(int()),
        /// Identifier in files before version 7.
        pub tstamp: Option<Timestamp> = None => Maybe::new(Nested::new()),
        /// Identifier in version 7 files.
        pub uuid: Option<Uuid> = None => Maybe::new(Nested::new()),
    }
}

sexp_record! {
    /// Keepout rules of a rule area; `true` means allowed.
    pub struct ZoneKeepout("keepout") {
        /// Tracks allowed.
        pub tracks: bool = true => Named::new(YesNoAtom::with_atoms("allowed", "not_allowed")),
        /// Vias allowed.
        pub vias: bool = true => Named::new(YesNoAtom::with_atoms("allowed", "not_allowed")),
        /// Pads allowed.
        pub pads: bool = true => Named::new(YesNoAtom::with_atoms("allowed", "not_allowed")),
        /// Copper pours allowed.
        pub copperpour: bool = true => Named::new(YesNoAtom::with_atoms("allowed", "not_allowed")),
        /// Footprints allowed.
        pub footprints: bool = true => Named::new(YesNoAtom::with_atoms("allowed", "not_allowed")),
    }
}

// =============================================================================
// Board
// =============================================================================

sexp_record! {
    /// A `.kicad_pcb` board.
    pub struct Board("kicad_pcb") with hooks {
        /// File format version, a date as `YYYYMMDD`.
        pub version: u32 = DEFAULT_FILE_FORMAT_VERSION => Named::new(Scalar::new()),
        /// Program that wrote the file.
        pub generator: Atom = Atom::new("kisexp") => Named::new(atom()),
        /// General settings.
        pub general: GeneralSection = GeneralSection::default() => Nested::new(),
        /// Paper settings.
        pub page: PageSettings = PageSettings::default() => Nested::new(),
        /// Layer stack.
        pub layers: Vec<LayerSettings> = Vec::new() => Named::new(Array::new(Untagged::new(Nested::new()))),
        /// Text variables.
        pub properties: Vec<Property> = Vec::new() => List::new(Nested::new()),
        /// Nets, net 0 first.
        pub nets: Vec<Net> = Vec::new() => List::new(Nested::new()),
        /// Straight tracks.
        pub track_segments: Vec<TrackSegment> = Vec::new() => List::new(Nested::new()),
        /// Vias.
        pub vias: Vec<Via> = Vec::new() => List::new(Nested::new()),
        /// Arc tracks.
        pub track_arcs: Vec<TrackArc> = Vec::new() => List::new(Nested::new()),
        /// Item groups.
        pub groups: Vec<Group> = Vec::new() => List::new(Nested::new());
        /// The file this board was opened from.
        pub original_filename: Option<PathBuf> = None,
    }
}

impl RecordHooks for Board {
    fn after_decode(&mut self, _parent: Option<&dyn Any>) -> Result<()> {
        if SUPPORTED_FILE_FORMAT_VERSIONS.contains(&self.version) {
            return Ok(());
        }
        let supported = SUPPORTED_FILE_FORMAT_VERSIONS
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::format(format!(
            "File format version {} is not supported. Supported versions are {supported}.",
            self.version
        )))
    }
}

impl Board {
    /// Reads a board file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, and a grammar,
    /// mapping or format error naming the file if it cannot be decoded.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &ParseConfig::default())
    }

    /// Reads a board file with custom parser limits.
    ///
    /// # Errors
    /// See [`Board::open`].
    pub fn open_with(path: impl AsRef<Path>, config: &ParseConfig) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| Error::from(e).with_source(&source))?;
        let mut board = Self::parse_with(&text, config).map_err(|e| e.with_source(&source))?;
        log::debug!(
            "{source}: version {}, {} nets, {} segments, {} arcs, {} vias",
            board.version,
            board.nets.len(),
            board.track_segments.len(),
            board.track_arcs.len(),
            board.vias.len()
        );
        board.original_filename = Some(path.to_path_buf());
        Ok(board)
    }

    /// Writes the board to `path`, or back to the file it was opened from.
    ///
    /// # Errors
    /// Returns a format error if neither is known, and an I/O error if the
    /// file cannot be written.
    pub fn write(&self, path: Option<&Path>) -> Result<()> {
        let target = path
            .or(self.original_filename.as_deref())
            .ok_or_else(|| Error::format("no file name given and the board was not read from one"))?;
        let mut text = self.serialize()?;
        text.push('\n');
        fs::write(target, text).map_err(|e| Error::from(e).with_source(target.display().to_string()))?;
        log::debug!("wrote {}", target.display());
        Ok(())
    }

    /// Looks up a net by index.
    #[must_use]
    pub fn net(&self, index: i64) -> Option<&Net> {
        self.nets.iter().find(|net| net.index == index)
    }

    /// Looks up a layer by its canonical name.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&LayerSettings> {
        self.layers.iter().find(|layer| layer.canonical_name == name)
    }
}
