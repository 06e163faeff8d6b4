//! Lexer, parser and pretty-printer for KiCad-style s-expressions.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of s-expression text
//! - [`Parser`] / [`parse`] - Parsing text into one [`Node`](kisexp_foundation::Node) tree
//! - [`build_sexp`] - Printing a tree in KiCad's layout

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod lexer;
pub mod parser;
pub mod printer;
pub mod span;
pub mod token;

pub use kisexp_foundation::{escape_string, format_float};
pub use lexer::Lexer;
pub use parser::{ParseConfig, Parser, parse, parse_with};
pub use printer::{PrintConfig, build_sexp, build_sexp_with};
pub use span::Span;
pub use token::{Token, TokenKind};
