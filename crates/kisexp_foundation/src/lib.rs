//! Core types for kisexp.
//!
//! This crate provides:
//! - [`Atom`] - Bare symbols that compare equal to plain strings
//! - [`AtomTable`] - Per-document atom deduplication
//! - [`Node`] - The parsed s-expression tree shared by parser, codec and printer
//! - [`Error`] - Grammar and mapping errors with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod atom;
pub mod error;
pub mod intern;
pub mod node;

pub use atom::Atom;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use intern::AtomTable;
pub use node::{Node, escape_string, format_float};
