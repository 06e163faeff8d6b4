//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Atom, AtomTable, Node and Error.

mod errors;
mod nodes;
