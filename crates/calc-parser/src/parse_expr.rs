//! Expression parsing with full operator precedence.
//!
//! Precedence (lowest → highest):
//! 4. `+`, `-`
//! 3. `*`, `/`, `//`, `%`
//! 2. unary `-`, `+`
//! 1. `**` / `^` (right-associative; binds tighter than a unary sign on its
//!    left, looser than one on its right: `-2**2 == -4`, `2**-1 == 0.5`)
//! 0. call `name(args)`, literals, names, `( ... )`

use calc_lexer::token::TokenKind;
use calc_types::ast::*;
use calc_types::{CalcError, CalcResult};

use crate::parser::Parser;

impl Parser {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> CalcResult<Expr> {
        self.enter()?;
        let result = self.parse_additive();
        self.leave();
        result
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `Additive = Term { ("+" | "-") Term }`
    fn parse_additive(&mut self) -> CalcResult<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `Term = Unary { ("*" | "/" | "//" | "%") Unary }`
    fn parse_term(&mut self) -> CalcResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::SlashSlash => BinOp::FloorDiv,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `Unary = ("-" | "+") Unary | Power`
    fn parse_unary(&mut self) -> CalcResult<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Pos,
            _ => return self.parse_power(),
        };
        let start = self.advance().span;
        self.enter()?;
        let operand = self.parse_unary();
        self.leave();
        let operand = operand?;
        let span = start.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// `Power = Call [ ("**" | "^") Unary ]`
    fn parse_power(&mut self) -> CalcResult<Expr> {
        let base = self.parse_call()?;
        if !matches!(self.peek_kind(), TokenKind::StarStar | TokenKind::Caret) {
            return Ok(base);
        }
        self.advance();
        self.enter()?;
        let exponent = self.parse_unary();
        self.leave();
        Ok(binary(base, BinOp::Pow, exponent?))
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Calls & Primary Expressions
    // ══════════════════════════════════════════════════════════════════════════

    /// `Call = Identifier "(" [ Expression { "," Expression } [ "," ] ] ")" | Primary`
    fn parse_call(&mut self) -> CalcResult<Expr> {
        let callee = match self.peek_kind() {
            TokenKind::Identifier(name) if *self.look_ahead(1) == TokenKind::LParen => {
                name.clone()
            }
            _ => return self.parse_primary(),
        };
        let name = Ident::new(callee, self.advance().span);
        self.advance(); // eat `(`
        self.open_parens += 1;
        let args = self.parse_arg_list()?;
        self.expect(&TokenKind::RParen)?;
        self.open_parens -= 1;
        let span = name.span.merge(self.previous_span());
        Ok(Expr::new(ExprKind::Call { name, args }, span))
    }

    /// Parse a comma-separated argument list, stopping before `)`.
    fn parse_arg_list(&mut self) -> CalcResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check_exact(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if self.check_exact(&TokenKind::Eq) {
                return Err(CalcError::disallowed(
                    "keyword argument",
                    self.current_span(),
                ));
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
            // Allow trailing comma before `)`
            if self.check_exact(&TokenKind::RParen) {
                break;
            }
        }
        Ok(args)
    }

    /// Parse a primary expression.
    fn parse_primary(&mut self) -> CalcResult<Expr> {
        let start = self.current_span();
        match self.peek_kind().clone() {
            // ── Literals ────────────────────────────────────────────────
            TokenKind::Int(n) => {
                self.advance();
                Ok(Expr::new(ExprKind::Int(n), start))
            }
            TokenKind::Float(n) => {
                self.advance();
                Ok(Expr::new(ExprKind::Float(n), start))
            }

            // ── Names ───────────────────────────────────────────────────
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(Expr::new(ExprKind::Identifier(name), start))
            }

            // ── Grouping ────────────────────────────────────────────────
            TokenKind::LParen => {
                self.advance(); // eat `(`
                self.open_parens += 1;
                let inner = self.parse_expression()?;
                if self.check_exact(&TokenKind::Comma) {
                    return Err(CalcError::disallowed("tuple", self.current_span()));
                }
                self.expect(&TokenKind::RParen)?;
                self.open_parens -= 1;
                let span = start.merge(self.previous_span());
                Ok(Expr::new(ExprKind::Paren(Box::new(inner)), span))
            }

            // ── Displays that only exist outside arithmetic ─────────────
            TokenKind::LBracket => Err(CalcError::disallowed("list display", start)),

            _ => Err(self.unexpected("expected an expression")),
        }
    }
}

fn binary(left: Expr, op: BinOp, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        },
        span,
    )
}
