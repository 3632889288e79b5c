//! Keypad actions that work on the current display value rather than an
//! expression.

use calc_types::ERROR_DISPLAY;

/// Divides the display value by 100.
///
/// The value is parsed as a float (surrounding whitespace, `inf` and `nan`
/// accepted) and the quotient rendered in repr form: `"0.5"`, `"1.0"`,
/// `"1e-05"`. Unparsable input yields `"Error"`.
pub fn percentage(value: &str) -> String {
    match value.trim().parse::<f64>() {
        Ok(number) => float_repr(number / 100.0),
        Err(_) => ERROR_DISPLAY.to_string(),
    }
}

/// Removes a leading `-`, or prepends one.
pub fn toggle_sign(value: &str) -> String {
    match value.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => format!("-{value}"),
    }
}

/// Shortest round-trip float text. Always shows a decimal point or an
/// exponent; exponents below -4 or at 16 and above use scientific form with
/// a signed two-digit exponent.
pub fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{x:e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if (-4..16).contains(&exponent) {
        let fixed = x.to_string();
        if fixed.contains('.') {
            fixed
        } else {
            format!("{fixed}.0")
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}
