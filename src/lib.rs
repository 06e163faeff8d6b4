//! kisexp - Declarative s-expression codec for KiCad files
//!
//! This crate re-exports all layers of the kisexp system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: kisexp_cli        - `kisexp` binary: fmt, check, roundtrip
//! Layer 3: kisexp_kicad      - KiCad base types and board records
//! Layer 2: kisexp_codec      - Field codecs, schemas, records, sexp_record!
//! Layer 1: kisexp_syntax     - Lexer, parser, pretty-printer
//! Layer 0: kisexp_foundation - Core types (Atom, Node, Error)
//! ```

pub use kisexp_cli as cli;
pub use kisexp_codec as codec;
pub use kisexp_foundation as foundation;
pub use kisexp_kicad as kicad;
pub use kisexp_syntax as syntax;
