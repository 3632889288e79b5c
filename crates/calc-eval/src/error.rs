//! Runtime error types for the evaluator.

use calc_types::{CalcError, ErrorCode, Span};
use thiserror::Error;

/// Evaluation error: everything that can go wrong after parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// `/`, `//` or `%` by zero, `0 ** -n`, `ln(x, 1)`
    #[error("division by zero")]
    DivisionByZero,

    /// `sqrt(-1)`, `log(0)`, `sin(inf)`, NaN results
    #[error("math domain error: {0}")]
    Domain(String),

    /// A result too large for its representation
    #[error("numeric overflow: {0}")]
    Overflow(String),

    /// Calling a constant, using a function as a value, non-integer digit counts
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Wrong number of arguments to a whitelisted function
    #[error("{function}() takes {expected} argument(s), got {got}")]
    WrongArgCount {
        function: &'static str,
        expected: String,
        got: usize,
    },

    /// Name absent from the whitelist
    #[error("use of {name} not allowed")]
    NameNotAllowed { name: String, span: Span },

    /// Step budget exhausted
    #[error("evaluation step limit exceeded")]
    GasExhausted,
}

impl From<EvalError> for CalcError {
    fn from(err: EvalError) -> Self {
        let code = match &err {
            EvalError::DivisionByZero => return CalcError::DivisionByZero,
            EvalError::NameNotAllowed { name, span } => {
                return CalcError::name_not_allowed(name.clone(), *span)
            }
            EvalError::Domain(_) => ErrorCode::DOMAIN_ERROR,
            EvalError::Overflow(_) => ErrorCode::OVERFLOW,
            EvalError::TypeMismatch(_) => ErrorCode::TYPE_MISMATCH,
            EvalError::WrongArgCount { .. } => ErrorCode::WRONG_ARG_COUNT,
            EvalError::GasExhausted => ErrorCode::GAS_EXHAUSTED,
        };
        CalcError::evaluation(code, err.to_string())
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
