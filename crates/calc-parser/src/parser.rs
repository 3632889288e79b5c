//! Core parser infrastructure: token cursor, error classification, depth
//! tracking.

use calc_lexer::token::{Token, TokenKind};
use calc_types::ast::Expr;
use calc_types::{CalcError, CalcResult, ErrorCode, Limits, Span};

/// The expression parser.
///
/// Consumes a token stream produced by the lexer and builds an [`Expr`].
/// Stops at the first error.
pub struct Parser {
    /// The token stream (ends with `Eof`).
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Current nesting depth.
    depth: u32,
    /// Maximum nesting depth before the input is rejected.
    max_depth: u32,
    /// Parentheses opened and not yet closed.
    pub(crate) open_parens: u32,
}

impl Parser {
    /// Create a new parser with the default nesting limit.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, Limits::DEFAULT_MAX_DEPTH)
    }

    /// Create a new parser with a custom nesting limit.
    pub fn with_max_depth(tokens: Vec<Token>, max_depth: u32) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
            open_parens: 0,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        static EOF: Token = Token {
            kind: TokenKind::Eof,
            span: Span { start: 0, end: 0 },
        };
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF)
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Returns the previously consumed token's span.
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::point(0)
        }
    }

    /// Returns the span of the current token.
    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Check if the current token matches the given kind exactly.
    pub(crate) fn check_exact(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check_exact(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Look ahead by `n` tokens from current position.
    pub(crate) fn look_ahead(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    /// Expect a specific token kind, or fail with an error describing what
    /// was found instead.
    pub(crate) fn expect(&mut self, expected: &TokenKind) -> CalcResult<Token> {
        if self.check_exact(expected) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("expected '{expected}'")))
        }
    }

    // ── Depth Tracking ────────────────────────────────────────────────────────

    /// Enter one nesting level.
    pub(crate) fn enter(&mut self) -> CalcResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(CalcError::syntax(
                ErrorCode::NESTING_LIMIT_EXCEEDED,
                format!("maximum nesting depth is {}", self.max_depth),
                self.current_span(),
            ));
        }
        Ok(())
    }

    /// Leave one nesting level.
    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // ── Error Classification ──────────────────────────────────────────────────

    /// Build the error for the current token, which the grammar cannot
    /// accept here.
    ///
    /// Reserved words and non-arithmetic punctuation become disallowed
    /// constructs; everything else is a plain syntax error.
    pub(crate) fn unexpected(&self, context: &str) -> CalcError {
        let span = self.current_span();
        match self.peek_kind() {
            TokenKind::Reserved(word) => CalcError::disallowed(format!("keyword '{word}'"), span),
            TokenKind::Eq => CalcError::disallowed("assignment", span),
            TokenKind::Dot => CalcError::disallowed("attribute access", span),
            TokenKind::LBracket | TokenKind::RBracket => CalcError::disallowed("subscript", span),
            TokenKind::LBrace | TokenKind::RBrace => {
                CalcError::disallowed("set or dict display", span)
            }
            TokenKind::Semicolon => CalcError::disallowed("statement separator", span),
            TokenKind::Colon => CalcError::disallowed("annotation or slice", span),
            TokenKind::Eof if self.open_parens > 0 => CalcError::syntax(
                ErrorCode::UNCLOSED_PAREN,
                format!("{context}, but the input ended with an open '('"),
                span,
            ),
            TokenKind::Eof => CalcError::syntax(
                ErrorCode::UNEXPECTED_END,
                format!("{context}, got end of input"),
                span,
            ),
            other => CalcError::syntax(
                ErrorCode::UNEXPECTED_TOKEN,
                format!("{context}, got '{other}'"),
                span,
            ),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the token stream into a single expression.
    pub fn parse(mut self) -> CalcResult<Expr> {
        let expr = self.parse_expression()?;
        match self.peek_kind() {
            TokenKind::Eof => Ok(expr),
            TokenKind::Comma => Err(CalcError::disallowed("tuple", self.current_span())),
            TokenKind::RParen => Err(CalcError::syntax(
                ErrorCode::UNEXPECTED_TOKEN,
                "unmatched ')'",
                self.current_span(),
            )),
            _ => Err(self.unexpected("expected an operator or end of input")),
        }
    }
}
