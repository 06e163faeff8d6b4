//! Lexer for KiCad-style s-expressions.
//!
//! The grammar has only five kinds of token. Parentheses delimit lists,
//! double quotes delimit strings, and every other run of characters up to
//! the next whitespace, parenthesis or quote is a *word*. A word made only
//! of digits (optionally signed) is an integer, digits with one inner `.`
//! make a float, and anything else is a bare symbol. This keeps words such
//! as `5E2A7F3C`, `1.27mm` or `-` intact as symbols.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for s-expression source text.
pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some('(') => {
                self.advance();
                TokenKind::LParen
            }
            Some(')') => {
                self.advance();
                TokenKind::RParen
            }
            Some('"') => self.scan_string(),
            Some(_) => self.scan_word(),
        };

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
        )
    }

    /// Tokenizes all source, including the final [`TokenKind::Eof`].
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Scans a string literal.
    ///
    /// `\"` becomes `"`. `\\` is kept as both characters so that it cannot
    /// escape a following quote. Any other backslash is kept as is.
    fn scan_string(&mut self) -> TokenKind {
        self.advance(); // consume opening '"'
        let mut text = String::new();
        loop {
            match self.peek_char() {
                None => return TokenKind::Error("unterminated string".into()),
                Some('"') => {
                    self.advance();
                    return TokenKind::String(text);
                }
                Some('\\') => {
                    self.advance();
                    match self.peek_char() {
                        Some('"') => {
                            self.advance();
                            text.push('"');
                        }
                        Some('\\') => {
                            self.advance();
                            text.push_str("\\\\");
                        }
                        _ => text.push('\\'),
                    }
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
    }

    /// Scans a word and classifies it as integer, float or symbol.
    fn scan_word(&mut self) -> TokenKind {
        let word_len = self
            .rest
            .find(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '"'))
            .unwrap_or(self.rest.len());
        let word = &self.rest[..word_len];

        let kind = match classify(word) {
            Word::Int => word.parse::<i64>().map_or_else(
                |_| TokenKind::Error(format!("integer literal out of range: {word}")),
                TokenKind::Int,
            ),
            Word::Float => word.parse::<f64>().map_or_else(
                |_| TokenKind::Error(format!("malformed float literal: {word}")),
                TokenKind::Float,
            ),
            Word::Symbol => TokenKind::Symbol,
        };

        // Words never contain newlines, so only the column moves.
        self.column += u32::try_from(word.chars().count()).unwrap_or(u32::MAX);
        self.position += word_len;
        self.rest = &self.rest[word_len..];
        kind
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_eof() { None } else { Some(token) }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Word {
    Int,
    Float,
    Symbol,
}

fn classify(word: &str) -> Word {
    let unsigned = word.strip_prefix(['+', '-']).unwrap_or(word);
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    if all_digits(unsigned) {
        return Word::Int;
    }
    match unsigned.split_once('.') {
        Some((whole, frac)) if all_digits(whole) && all_digits(frac) => Word::Float,
        _ => Word::Symbol,
    }
}
