//! Result display formatting.

use crate::error::{EvalError, EvalResult};
use crate::number::Number;
use num_bigint::BigInt;

/// Shown for positive or negative infinity.
pub const INFINITY_DISPLAY: &str = "Infinity";
/// Fixed-point digits printed before trimming.
pub const FLOAT_PRECISION: usize = 10;
/// Trimmed fixed-point text longer than this falls back to shortest form.
pub const MAX_FIXED_LEN: usize = 15;
/// Widest integer, in decimal digits, that will be rendered.
pub const MAX_INT_DIGITS: usize = 4300;

/// Renders a result for display.
pub fn format_number(value: &Number) -> EvalResult<String> {
    match value {
        Number::Int(n) => format_int(n),
        Number::Float(x) => format_float(*x),
    }
}

fn format_int(n: &BigInt) -> EvalResult<String> {
    let too_wide = || {
        EvalError::Overflow(format!(
            "integer exceeds the display limit of {MAX_INT_DIGITS} digits"
        ))
    };
    // Skip the decimal conversion when the bit width alone rules it out.
    if n.bits() as f64 * std::f64::consts::LOG10_2 > MAX_INT_DIGITS as f64 + 1.0 {
        return Err(too_wide());
    }
    let text = n.to_string();
    if text.trim_start_matches('-').len() > MAX_INT_DIGITS {
        return Err(too_wide());
    }
    Ok(text)
}

/// Fixed-point with 10 decimals, trailing zeros and dot trimmed. Long
/// results print the value rounded to 10 decimals in shortest form instead.
pub fn format_float(x: f64) -> EvalResult<String> {
    if x.is_infinite() {
        return Ok(INFINITY_DISPLAY.to_string());
    }
    if x.is_nan() {
        return Err(EvalError::Domain("result is not a number".into()));
    }
    let fixed = format!("{:.*}", FLOAT_PRECISION, x);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed.len() <= MAX_FIXED_LEN {
        return Ok(trimmed.to_string());
    }
    let rounded: f64 = fixed.parse().unwrap_or(x);
    Ok(rounded.to_string())
}
