//! Integration tests for Layer 3: KiCad
//!
//! Tests for the shared primitives, the board catalog and board file
//! round trips.

mod base;
mod round_trip;
