//! Core lexer: converts normalized expression text into a token stream.
//!
//! Features:
//! - Integer, decimal and exponent number literals (`42`, `.5`, `2.`, `1e-3`)
//! - Arithmetic operators including `**`, `//` and the `^` exponent alias
//! - Reserved words lexed apart from identifiers
//! - Disallowed punctuation (`=`, `.`, `[`, ...) tokenized for the parser
//!   to reject by construct
//! - Line breaks only inside parentheses or as trailing whitespace
//! - Fails at the first error; there is nothing useful to recover into

use calc_types::{CalcError, CalcResult, ErrorCode, Span};
use num_bigint::BigInt;

use crate::token::{Token, TokenKind};

/// The calculator lexer.
pub struct Lexer<'src> {
    /// The normalized source text.
    source: &'src str,
    /// Same text as bytes, for cheap peeking.
    bytes: &'src [u8],
    /// Current byte offset.
    pos: usize,
    /// Open parentheses not yet closed; line breaks are whitespace inside.
    paren_depth: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer over normalized text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            paren_depth: 0,
        }
    }

    /// Lex the entire input. The token stream always ends with
    /// [`TokenKind::Eof`].
    pub fn lex(mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.span_from(start))
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>, start: usize) -> CalcError {
        CalcError::syntax(code, message, self.span_from(start))
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace
    // ─────────────────────────────────────────────────────────────

    /// Skip blanks. A line break outside parentheses is only accepted when
    /// nothing but whitespace follows it.
    fn skip_whitespace(&mut self) -> CalcResult<()> {
        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\x0c' => {
                    self.advance();
                }
                b'\r' | b'\n' => {
                    if self.paren_depth == 0 && !self.rest_is_blank() {
                        let start = self.pos;
                        self.advance();
                        return Err(self.error(
                            ErrorCode::UNEXPECTED_TOKEN,
                            "line break outside parentheses",
                            start,
                        ));
                    }
                    self.advance();
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn rest_is_blank(&self) -> bool {
        self.bytes[self.pos..]
            .iter()
            .all(|b| matches!(b, b' ' | b'\t' | b'\x0c' | b'\r' | b'\n'))
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan one token.
    fn scan(&mut self) -> CalcResult<Token> {
        self.skip_whitespace()?;

        let start = self.pos;
        let Some(ch) = self.advance() else {
            return Ok(self.token(TokenKind::Eof, start));
        };

        let kind = match ch {
            b'0'..=b'9' => return self.scan_number(start),
            b'.' if matches!(self.peek(), Some(b'0'..=b'9')) => return self.scan_number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => return Ok(self.scan_word(start)),

            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'%' => TokenKind::Percent,
            b'^' => TokenKind::Caret,
            b'*' => {
                if self.peek() == Some(b'*') {
                    self.advance();
                    TokenKind::StarStar
                } else {
                    TokenKind::Star
                }
            }
            b'/' => {
                if self.peek() == Some(b'/') {
                    self.advance();
                    TokenKind::SlashSlash
                } else {
                    TokenKind::Slash
                }
            }
            b'(' => {
                self.paren_depth += 1;
                TokenKind::LParen
            }
            b')' => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                TokenKind::RParen
            }
            b',' => TokenKind::Comma,

            b'=' => TokenKind::Eq,
            b'.' => TokenKind::Dot,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,

            _ => {
                // Report the whole character, not just its first byte
                let unexpected = self.source[start..].chars().next().unwrap_or('?');
                self.pos = start + unexpected.len_utf8();
                return Err(self.error(
                    ErrorCode::UNEXPECTED_CHARACTER,
                    format!("unexpected character '{unexpected}'"),
                    start,
                ));
            }
        };
        Ok(self.token(kind, start))
    }

    // ─────────────────────────────────────────────────────────────
    // Number literals
    // ─────────────────────────────────────────────────────────────

    fn consume_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance();
        }
    }

    /// Scan a number whose first byte (a digit or `.`) is already consumed.
    fn scan_number(&mut self, start: usize) -> CalcResult<Token> {
        let mut is_float = self.bytes[start] == b'.';
        self.consume_digits();

        if !is_float && self.peek() == Some(b'.') {
            self.advance();
            self.consume_digits();
            is_float = true;
        }

        // Exponent: `e` or `E`, optional sign, at least one digit
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let digits_at = match self.peek_at(1) {
                Some(b'+' | b'-') => 2,
                _ => 1,
            };
            if matches!(self.peek_at(digits_at), Some(b'0'..=b'9')) {
                for _ in 0..digits_at {
                    self.advance();
                }
                self.consume_digits();
                is_float = true;
            }
        }

        // `2pi`, `1e`, `3_000`: a number glued to a name
        if matches!(self.peek(), Some(b'a'..=b'z' | b'A'..=b'Z' | b'_')) {
            while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
                self.advance();
            }
            return Err(self.error(
                ErrorCode::INVALID_NUMBER,
                format!("invalid number literal '{}'", &self.source[start..self.pos]),
                start,
            ));
        }

        let text = &self.source[start..self.pos];
        if is_float {
            let value: f64 = text.parse().map_err(|_| {
                self.error(
                    ErrorCode::INVALID_NUMBER,
                    format!("invalid number literal '{text}'"),
                    start,
                )
            })?;
            return Ok(self.token(TokenKind::Float(value), start));
        }

        if text.len() > 1 && text.starts_with('0') && text.bytes().any(|b| b != b'0') {
            return Err(self.error(
                ErrorCode::INVALID_NUMBER,
                "leading zeros in integer literals are not permitted",
                start,
            ));
        }
        let value: BigInt = text.parse().map_err(|_| {
            self.error(
                ErrorCode::INVALID_NUMBER,
                format!("invalid number literal '{text}'"),
                start,
            )
        })?;
        Ok(self.token(TokenKind::Int(value), start))
    }

    // ─────────────────────────────────────────────────────────────
    // Identifiers & reserved words
    // ─────────────────────────────────────────────────────────────

    fn scan_word(&mut self, start: usize) -> Token {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == b'_' {
                self.advance();
            } else {
                break;
            }
        }
        let text = &self.source[start..self.pos];
        let kind = TokenKind::from_reserved(text)
            .unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        self.token(kind, start)
    }
}
