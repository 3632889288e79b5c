//! Token types for the calculator lexer.
//!
//! Defines [`TokenKind`] covering every lexeme the lexer accepts and
//! [`Token`], which pairs a kind with a source [`Span`].

use calc_types::Span;
use num_bigint::BigInt;
use std::fmt;

/// Words that never name a value.
///
/// They lex as [`TokenKind::Reserved`] so the parser can reject statements,
/// imports, lambdas and boolean logic before anything looks at the whitelist.
pub const RESERVED_WORDS: &[&str] = &[
    // Statements (17)
    "import", "from", "as", "def", "class", "return", "yield", "del", "global",
    "nonlocal", "pass", "break", "continue", "raise", "assert", "with", "lambda",
    // Control flow (8)
    "if", "else", "elif", "for", "while", "try", "except", "finally",
    // Operators spelled as words (5)
    "and", "or", "not", "in", "is",
    // Async (2)
    "async", "await",
    // Literals (3)
    "True", "False", "None",
];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind the lexer produces.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────
    /// Integer literal: `42`
    Int(BigInt),
    /// Float literal: `3.14`, `.5`, `2.`, `1e-3`
    Float(f64),

    // ── Names ────────────────────────────────────────────────
    /// Any non-reserved name: `sin`, `pi`, `foo`
    Identifier(String),
    /// A word from [`RESERVED_WORDS`]
    Reserved(&'static str),

    // ── Arithmetic operators ─────────────────────────────────
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    StarStar,
    /// `/`
    Slash,
    /// `//`
    SlashSlash,
    /// `%`
    Percent,
    /// `^` (exponent alias)
    Caret,

    // ── Grouping ─────────────────────────────────────────────
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,

    // ── Disallowed punctuation ───────────────────────────────
    /// `=`
    Eq,
    /// `.` not part of a number
    Dot,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `;`
    Semicolon,
    /// `:`
    Colon,

    // ── Special ──────────────────────────────────────────────
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Look up a word in [`RESERVED_WORDS`].
    pub fn from_reserved(word: &str) -> Option<TokenKind> {
        RESERVED_WORDS
            .iter()
            .find(|&&w| w == word)
            .map(|&w| TokenKind::Reserved(w))
    }

    /// Returns `true` for punctuation that only appears in non-arithmetic
    /// constructs.
    pub fn is_disallowed_punctuation(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::Dot
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::LBrace
                | TokenKind::RBrace
                | TokenKind::Semicolon
                | TokenKind::Colon
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "{n}"),
            TokenKind::Float(n) => write!(f, "{n}"),
            TokenKind::Identifier(name) => write!(f, "{name}"),
            TokenKind::Reserved(word) => write!(f, "{word}"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::StarStar => f.write_str("**"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::SlashSlash => f.write_str("//"),
            TokenKind::Percent => f.write_str("%"),
            TokenKind::Caret => f.write_str("^"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Eq => f.write_str("="),
            TokenKind::Dot => f.write_str("."),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
