//! Declarative bidirectional mapping between s-expressions and records.
//!
//! This crate provides:
//! - [`codec`] - The [`FieldCodec`](codec::FieldCodec) trait and its combinators
//! - [`SchemaBuilder`] / [`Schema`] - Per-record dispatch tables, built once
//! - [`Record`] - Decode (`from_node`), encode (`to_node`), `parse` and `serialize`
//! - [`sexp_record!`] - Declares a record struct and its schema in one place
//!
//! Formats are described purely by declaring records; there is no
//! hand-written parser per format.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
mod macros;
pub mod record;
pub mod schema;

pub use kisexp_foundation::{Atom, Error, ErrorKind, Node, Result};
pub use record::{Nested, Record, RecordHooks};
pub use schema::{Schema, SchemaBuilder};
