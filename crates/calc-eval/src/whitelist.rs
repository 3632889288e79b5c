//! The fixed set of names an expression may reference.

use crate::error::{EvalError, EvalResult};
use crate::number::{int_divmod, Number};
use num_bigint::BigInt;
use num_traits::{FromPrimitive, Pow, Signed, ToPrimitive, Zero};
use std::ops::RangeInclusive;

/// Every permitted name, constants included.
pub const WHITELIST: &[&str] = &[
    "sin", "cos", "tan", "sqrt", "log", "ln", "pi", "e", "rad", "deg", "abs", "round", "floor",
    "ceil",
];

/// What a whitelisted name resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding {
    Constant(f64),
    Function(Builtin),
}

/// Resolves a name. Anything outside [`WHITELIST`] yields `None`.
pub fn lookup(name: &str) -> Option<Binding> {
    match name {
        "pi" => Some(Binding::Constant(std::f64::consts::PI)),
        "e" => Some(Binding::Constant(std::f64::consts::E)),
        _ => Builtin::from_name(name).map(Binding::Function),
    }
}

pub fn is_allowed(name: &str) -> bool {
    lookup(name).is_some()
}

/// A whitelisted function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Sqrt,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm, or logarithm in the base given as second argument
    Ln,
    Rad,
    Deg,
    Abs,
    /// Half-to-even rounding, optionally to a digit count
    Round,
    Floor,
    Ceil,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "sqrt" => Self::Sqrt,
            "log" => Self::Log,
            "ln" => Self::Ln,
            "rad" => Self::Rad,
            "deg" => Self::Deg,
            "abs" => Self::Abs,
            "round" => Self::Round,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Rad => "rad",
            Self::Deg => "deg",
            Self::Abs => "abs",
            Self::Round => "round",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
        }
    }

    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            Self::Ln | Self::Round => 1..=2,
            _ => 1..=1,
        }
    }

    /// Applies the function after checking the argument count.
    pub fn call(self, args: &[Number]) -> EvalResult<Number> {
        let arity = self.arity();
        if !arity.contains(&args.len()) {
            let expected = if arity.start() == arity.end() {
                arity.start().to_string()
            } else {
                format!("{} to {}", arity.start(), arity.end())
            };
            return Err(EvalError::WrongArgCount {
                function: self.name(),
                expected,
                got: args.len(),
            });
        }

        let x = &args[0];
        match self {
            Self::Sin => float_fn(x, "sin", f64::sin),
            Self::Cos => float_fn(x, "cos", f64::cos),
            Self::Tan => float_fn(x, "tan", f64::tan),
            Self::Sqrt => float_fn(x, "sqrt", f64::sqrt),
            Self::Rad => float_fn(x, "rad", f64::to_radians),
            Self::Deg => float_fn(x, "deg", f64::to_degrees),
            Self::Log => Ok(Number::Float(positive(x, "log")?.log10())),
            Self::Ln => {
                let ln = positive(x, "ln")?.ln();
                match args.get(1) {
                    None => Ok(Number::Float(ln)),
                    Some(base) => {
                        let divisor = positive(base, "ln")?.ln();
                        if divisor == 0.0 {
                            Err(EvalError::DivisionByZero)
                        } else {
                            Ok(Number::Float(ln / divisor))
                        }
                    }
                }
            }
            Self::Abs => Ok(match x {
                Number::Int(n) => Number::Int(n.abs()),
                Number::Float(v) => Number::Float(v.abs()),
            }),
            Self::Floor => integral(x, f64::floor),
            Self::Ceil => integral(x, f64::ceil),
            Self::Round => match args.get(1) {
                None => integral(x, f64::round_ties_even),
                Some(Number::Int(ndigits)) => round_to(x, ndigits),
                Some(Number::Float(_)) => Err(EvalError::TypeMismatch(
                    "round() digit count must be an integer".into(),
                )),
            },
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

/// A NaN produced from a non-NaN argument is a domain error.
fn float_fn(x: &Number, name: &str, f: fn(f64) -> f64) -> EvalResult<Number> {
    let x = x.to_f64()?;
    let result = f(x);
    if result.is_nan() && !x.is_nan() {
        return Err(EvalError::Domain(format!("{name}({x}) is undefined")));
    }
    Ok(Number::Float(result))
}

fn positive(x: &Number, name: &str) -> EvalResult<f64> {
    let x = x.to_f64()?;
    if x <= 0.0 {
        return Err(EvalError::Domain(format!(
            "{name}() requires a positive argument"
        )));
    }
    Ok(x)
}

/// Floor, ceil and single-argument round: integers pass through, floats
/// become integers.
fn integral(x: &Number, f: fn(f64) -> f64) -> EvalResult<Number> {
    match x {
        Number::Int(n) => Ok(Number::Int(n.clone())),
        Number::Float(v) => float_to_int(f(*v)),
    }
}

fn float_to_int(x: f64) -> EvalResult<Number> {
    if x.is_nan() {
        return Err(EvalError::Domain("cannot convert NaN to integer".into()));
    }
    BigInt::from_f64(x)
        .filter(|_| x.is_finite())
        .map(Number::Int)
        .ok_or_else(|| EvalError::Overflow("cannot convert infinity to integer".into()))
}

fn round_to(x: &Number, ndigits: &BigInt) -> EvalResult<Number> {
    match x {
        Number::Int(n) => Ok(Number::Int(round_int(n, ndigits))),
        Number::Float(v) => round_float(*v, ndigits).map(Number::Float),
    }
}

fn round_int(n: &BigInt, ndigits: &BigInt) -> BigInt {
    if !ndigits.is_negative() {
        return n.clone();
    }
    // 10^k exceeds 2|n| once k passes the decimal width of n.
    let width = (n.bits() as f64 * std::f64::consts::LOG10_2) as u64 + 2;
    let k = match ndigits.abs().to_u64() {
        Some(k) if k <= width => k as u32,
        _ => return BigInt::zero(),
    };
    let pow10: BigInt = Pow::pow(BigInt::from(10), k);
    let Ok((mut q, r)) = int_divmod(n, &pow10) else {
        return n.clone();
    };
    let twice = &r * 2;
    if twice > pow10 || (twice == pow10 && q.bit(0)) {
        q += 1;
    }
    q * pow10
}

fn round_float(x: f64, ndigits: &BigInt) -> EvalResult<f64> {
    if !x.is_finite() || x == 0.0 {
        return Ok(x);
    }
    match ndigits.to_i64() {
        Some(n) if n > 330 => Ok(x),
        Some(n) if n >= 0 => Ok(format!("{x:.prec$}", prec = n as usize)
            .parse()
            .unwrap_or(x)),
        Some(n) if n >= -308 => {
            let scale = 10f64.powi((-n) as i32);
            let rounded = (x / scale).round_ties_even() * scale;
            if rounded.is_finite() {
                Ok(rounded)
            } else {
                Err(EvalError::Overflow("rounded value too large".into()))
            }
        }
        _ if ndigits.is_positive() => Ok(x),
        _ => Ok(0.0f64.copysign(x)),
    }
}
