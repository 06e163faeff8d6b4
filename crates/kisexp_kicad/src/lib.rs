//! KiCad board primitives declared as kisexp records.
//!
//! This crate provides:
//! - [`base`] - Coordinates, positions, strokes, text effects and identifiers
//! - [`board`] - The `kicad_pcb` board with its layer stack, nets and copper
//!
//! Every type here is a plain [`Record`](kisexp_codec::Record) declared with
//! [`sexp_record!`](kisexp_codec::sexp_record); none of them parses text by
//! hand.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod base;
pub mod board;

pub use base::{
    AtPos, Color, EditTime, FontSpec, Group, Justify, Net, PageSettings, PointList, Property,
    Stroke, TextEffect, Timestamp, Uuid, Xy, Xyz,
};
pub use board::{
    Board, GeneralSection, LayerSettings, SUPPORTED_FILE_FORMAT_VERSIONS, TrackArc, TrackSegment,
    Via, ZoneKeepout,
};
