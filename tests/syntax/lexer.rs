//! Integration tests for the lexer
//!
//! Tests tokenization of KiCad s-expression text.

use kisexp_syntax::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

// =============================================================================
// Words
// =============================================================================

#[test]
fn numbers_and_symbols_are_told_apart() {
    let source = "42 -17 0.25 -1.5 5E2A7F3C 1.27mm F.Cu 1e10 .5";
    let tokens = Lexer::tokenize_all(source);
    assert_eq!(tokens[0].kind, TokenKind::Int(42));
    assert_eq!(tokens[1].kind, TokenKind::Int(-17));
    assert_eq!(tokens[2].kind, TokenKind::Float(0.25));
    assert_eq!(tokens[3].kind, TokenKind::Float(-1.5));
    for (token, text) in tokens[4..9]
        .iter()
        .zip(["5E2A7F3C", "1.27mm", "F.Cu", "1e10", ".5"])
    {
        assert_eq!(token.kind, TokenKind::Symbol);
        assert_eq!(token.text(source), text);
    }
    assert!(tokens[9].is_eof());
}

#[test]
fn words_stop_at_delimiters() {
    assert_eq!(
        kinds("(at 1 2)"),
        vec![
            TokenKind::LParen,
            TokenKind::Symbol,
            TokenKind::Int(1),
            TokenKind::Int(2),
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("a\"b\""),
        vec![
            TokenKind::Symbol,
            TokenKind::String("b".into()),
            TokenKind::Eof
        ]
    );
}

#[test]
fn integer_overflow_is_an_error_token() {
    assert!(matches!(
        kinds("99999999999999999999")[0],
        TokenKind::Error(_)
    ));
}

// =============================================================================
// Strings
// =============================================================================

#[test]
fn escaped_quotes_are_unescaped() {
    assert_eq!(
        kinds(r#""a \"b\" c""#)[0],
        TokenKind::String(r#"a "b" c"#.into())
    );
}

#[test]
fn other_backslashes_are_kept() {
    assert_eq!(
        kinds(r#""C:\dir\\""#)[0],
        TokenKind::String(r"C:\dir\\".into())
    );
    assert_eq!(kinds(r#""\n""#)[0], TokenKind::String(r"\n".into()));
}

#[test]
fn unterminated_string() {
    assert!(matches!(kinds("\"open")[0], TokenKind::Error(_)));
}

// =============================================================================
// Positions
// =============================================================================

#[test]
fn spans_track_lines_and_columns() {
    let tokens = Lexer::tokenize_all("(a\n  (b 1))");
    let b = &tokens[3];
    assert_eq!(b.kind, TokenKind::Symbol);
    assert_eq!(b.span.line, 2);
    assert_eq!(b.span.column, 4);
}
