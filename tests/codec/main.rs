//! Integration tests for Layer 2: Codec
//!
//! Tests for field codecs, schemas, record lifecycle hooks and the
//! decode/encode round trip.

mod combinators;
