//! Tree-walking evaluator over a validated expression.

use crate::error::{EvalError, EvalResult};
use crate::number::{self, Number};
use crate::whitelist::{self, Binding};
use calc_types::ast::{Expr, ExprKind, Ident, UnaryOp};
use calc_types::{Limits, Span};

/// Walks the expression tree and produces a [`Number`].
///
/// Names resolve only through the whitelist; there is no other environment.
pub struct Evaluator {
    /// Nodes visited so far.
    pub gas: u64,
    /// Upper bound on nodes visited.
    pub gas_limit: u64,
    /// Widest integer any intermediate result may have.
    pub max_int_bits: u64,
}

impl Evaluator {
    pub fn new(limits: &Limits) -> Self {
        Self {
            gas: 0,
            gas_limit: limits.gas_limit,
            max_int_bits: limits.max_int_bits,
        }
    }

    /// Consume one unit of gas. Returns error if exhausted.
    fn tick(&mut self) -> EvalResult<()> {
        self.gas += 1;
        if self.gas > self.gas_limit {
            Err(EvalError::GasExhausted)
        } else {
            Ok(())
        }
    }

    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Number> {
        self.tick()?;
        match &expr.kind {
            ExprKind::Int(n) => Ok(Number::Int(n.clone())),
            ExprKind::Float(x) => Ok(Number::Float(*x)),
            ExprKind::Identifier(name) => self.eval_identifier(name, expr.span),
            ExprKind::Call { name, args } => self.eval_call(name, args),
            ExprKind::Binary { left, op, right } => {
                let lhs = self.eval_expr(left)?;
                let rhs = self.eval_expr(right)?;
                number::binary(*op, lhs, rhs, self.max_int_bits)
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                Ok(match op {
                    UnaryOp::Neg => value.neg(),
                    UnaryOp::Pos => value,
                })
            }
            ExprKind::Paren(inner) => self.eval_expr(inner),
        }
    }

    // ── Identifiers & Calls ──────────────────────────────────────────────

    fn eval_identifier(&self, name: &str, span: Span) -> EvalResult<Number> {
        match whitelist::lookup(name) {
            Some(Binding::Constant(value)) => Ok(Number::Float(value)),
            Some(Binding::Function(f)) => Err(EvalError::TypeMismatch(format!(
                "function '{}' used as a value",
                f.name()
            ))),
            None => Err(EvalError::NameNotAllowed {
                name: name.to_string(),
                span,
            }),
        }
    }

    fn eval_call(&mut self, name: &Ident, args: &[Expr]) -> EvalResult<Number> {
        let function = match whitelist::lookup(&name.name) {
            Some(Binding::Function(f)) => f,
            Some(Binding::Constant(_)) => {
                return Err(EvalError::TypeMismatch(format!(
                    "'{}' is not callable",
                    name.name
                )))
            }
            None => {
                return Err(EvalError::NameNotAllowed {
                    name: name.name.clone(),
                    span: name.span,
                })
            }
        };
        let values = args
            .iter()
            .map(|arg| self.eval_expr(arg))
            .collect::<EvalResult<Vec<_>>>()?;
        function.call(&values)
    }
}
