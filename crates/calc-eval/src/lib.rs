//! Safe expression evaluation for the calculator.
//!
//! The pipeline is normalize, lex, parse, validate identifiers, evaluate,
//! format. Each stage rejects its own class of input; nothing reaches the
//! evaluator unless every identifier in the tree is whitelisted.

pub mod error;
pub mod evaluator;
pub mod format;
pub mod number;
pub mod validate;
pub mod whitelist;

pub use error::{EvalError, EvalResult};
pub use evaluator::Evaluator;
pub use format::format_number;
pub use number::Number;
pub use whitelist::{lookup, Binding, Builtin, WHITELIST};

use calc_lexer::{normalize, Lexer};
use calc_parser::Parser;
use calc_types::{CalcError, CalcResult, ErrorCode, Limits, Span};

/// Display for an empty (or glyph-only-empty) expression.
pub const EMPTY_DISPLAY: &str = "0";

/// Evaluates `expression` under the default [`Limits`].
pub fn calculate(expression: &str) -> CalcResult<String> {
    calculate_with_limits(expression, &Limits::default())
}

/// Evaluates `expression` and formats the result for display.
pub fn calculate_with_limits(expression: &str, limits: &Limits) -> CalcResult<String> {
    let normalized = normalize(expression);
    if normalized.is_empty() {
        return Ok(EMPTY_DISPLAY.to_string());
    }
    let value = evaluate(&normalized, limits)?;
    Ok(format_number(&value)?)
}

/// Parses, validates and evaluates already-normalized text without
/// formatting the result.
pub fn evaluate(source: &str, limits: &Limits) -> CalcResult<Number> {
    let len = source.chars().count();
    if len > limits.max_input_len {
        return Err(CalcError::syntax(
            ErrorCode::INPUT_TOO_LONG,
            format!(
                "expression is {len} characters; the limit is {}",
                limits.max_input_len
            ),
            Span::new(0, source.len() as u32),
        ));
    }
    let tokens = Lexer::new(source).lex()?;
    let expr = Parser::with_max_depth(tokens, limits.max_depth).parse()?;
    validate::validate(&expr)?;
    let mut evaluator = Evaluator::new(limits);
    let value = evaluator.eval_expr(&expr)?;
    log::trace!("evaluated {source:?} in {} steps", evaluator.gas);
    Ok(value)
}

/// Evaluates `expression` to its display string. Failures map to the
/// fixed error displays: `"Syntax Error"`, `"Cannot divide by zero"`,
/// `"Use of NAME not allowed"` or `"Error"`.
pub fn calculate_expression(expression: &str) -> String {
    calculate_expression_with_limits(expression, &Limits::default())
}

pub fn calculate_expression_with_limits(expression: &str, limits: &Limits) -> String {
    match calculate_with_limits(expression, limits) {
        Ok(display) => display,
        Err(err) => {
            log::debug!("rejected {expression:?}: {err}");
            err.display_message()
        }
    }
}
