//! Integration tests for Layer 1: Syntax
//!
//! Tests for the lexer, the parser and the KiCad-layout printer.

mod lexer;
mod parser;
mod printer;
