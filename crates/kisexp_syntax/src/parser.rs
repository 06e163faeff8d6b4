//! Parser for KiCad-style s-expressions.
//!
//! The parser converts a stream of tokens into exactly one [`Node`] tree.
//! Symbols are interned into a per-document [`AtomTable`], so repeated
//! keywords share storage.

use kisexp_foundation::{AtomTable, Error, Node, Result};

use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parser limits.
#[derive(Clone, Debug)]
pub struct ParseConfig {
    /// Maximum number of nested lists. Deeper input is a grammar error.
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

impl ParseConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parser for s-expression source text.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for symbol text and error messages).
    source: &'src str,
    /// Atoms seen in this document.
    atoms: AtomTable,
    config: ParseConfig,
    /// Number of currently open lists.
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser with the default configuration.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, ParseConfig::default())
    }

    /// Creates a new parser with the given configuration.
    #[must_use]
    pub fn with_config(source: &'src str, config: ParseConfig) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
            atoms: AtomTable::new(),
            config,
            depth: 0,
        }
    }

    /// Parses the whole input as a single expression.
    ///
    /// # Errors
    /// Returns a grammar error for empty input, unbalanced parentheses,
    /// anything following the first complete expression, and lexer errors.
    pub fn parse(&mut self) -> Result<Node> {
        if self.current.is_eof() {
            return Err(self.error("no or empty expression"));
        }

        let node = self.parse_form()?;

        match self.current.kind {
            TokenKind::Eof => Ok(node),
            TokenKind::RParen => Err(self.error("unbalanced closing parenthesis")),
            _ => Err(self.error("leftover garbage after end of expression")),
        }
    }

    /// Returns the atoms interned so far.
    #[must_use]
    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    fn parse_form(&mut self) -> Result<Node> {
        let node = match &self.current.kind {
            TokenKind::LParen => return self.parse_list(),
            TokenKind::Int(n) => Node::Int(*n),
            TokenKind::Float(n) => Node::Float(*n),
            TokenKind::String(s) => Node::String(s.clone()),
            TokenKind::Symbol => {
                let text = self.current.text(self.source);
                Node::Atom(self.atoms.intern(text))
            }
            TokenKind::RParen => return Err(self.error("unbalanced closing parenthesis")),
            TokenKind::Eof => return Err(self.error("unexpected end of input")),
            TokenKind::Error(msg) => return Err(self.error(msg)),
        };
        self.advance();
        Ok(node)
    }

    /// Parses a list: `(...)`.
    fn parse_list(&mut self) -> Result<Node> {
        let start_span = self.current.span;
        if self.depth >= self.config.max_depth {
            return Err(self.error_at(
                start_span,
                &format!("nesting deeper than {} lists", self.config.max_depth),
            ));
        }
        self.depth += 1;
        self.advance(); // consume '('

        let mut elements = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::RParen => break,
                TokenKind::Eof => return Err(self.error_at(start_span, "unterminated list")),
                _ => elements.push(self.parse_form()?),
            }
        }

        self.advance(); // consume ')'
        self.depth -= 1;
        Ok(Node::List(elements))
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::syntax(
            message,
            span.line,
            span.column,
            span.line_text(self.source).to_string(),
        )
    }
}

/// Parses `source` into a single node tree.
///
/// # Errors
/// Returns a grammar error if `source` is not exactly one well-formed
/// expression.
pub fn parse(source: &str) -> Result<Node> {
    parse_with(source, &ParseConfig::default())
}

/// Parses `source` with the given limits.
///
/// # Errors
/// Returns a grammar error if `source` is not exactly one well-formed
/// expression, or nests deeper than `config.max_depth`.
pub fn parse_with(source: &str, config: &ParseConfig) -> Result<Node> {
    let mut parser = Parser::with_config(source, config.clone());
    let node = parser.parse()?;
    log::trace!(
        "parsed {} bytes, {} distinct atoms, {} repeats",
        source.len(),
        parser.atoms().len(),
        parser.atoms().hits()
    );
    Ok(node)
}
