//! Numeric model: arbitrary-precision integers and IEEE-754 doubles.
//!
//! Mixed operations promote to float. `/` always yields a float, `//` and
//! `%` round toward negative infinity, and an integer raised to a negative
//! integer power becomes a float.

use crate::error::{EvalError, EvalResult};
use calc_types::ast::BinOp;
use num_bigint::BigInt;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use std::fmt;

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(BigInt),
    Float(f64),
}

impl Number {
    pub fn int(n: impl Into<BigInt>) -> Self {
        Number::Int(n.into())
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(n) => n.is_zero(),
            Number::Float(x) => *x == 0.0,
        }
    }

    /// Converts to a double, failing when an integer is out of float range.
    pub fn to_f64(&self) -> EvalResult<f64> {
        match self {
            Number::Int(n) => int_to_f64(n),
            Number::Float(x) => Ok(*x),
        }
    }

    pub fn neg(self) -> Number {
        match self {
            Number::Int(n) => Number::Int(-n),
            Number::Float(x) => Number::Float(-x),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

pub(crate) fn int_to_f64(n: &BigInt) -> EvalResult<f64> {
    match n.to_f64() {
        Some(x) if x.is_finite() => Ok(x),
        _ => Err(EvalError::Overflow("int too large to convert to float".into())),
    }
}

/// Rejects integers wider than `max_bits`.
pub(crate) fn check_int_size(n: BigInt, max_bits: u64) -> EvalResult<Number> {
    if n.bits() > max_bits {
        Err(EvalError::Overflow(format!(
            "integer result exceeds {max_bits} bits"
        )))
    } else {
        Ok(Number::Int(n))
    }
}

// ── Binary operators ─────────────────────────────────────────────────────

/// Applies `op` to two operands. Integer results wider than `max_int_bits`
/// are rejected.
pub fn binary(op: BinOp, lhs: Number, rhs: Number, max_int_bits: u64) -> EvalResult<Number> {
    match op {
        BinOp::Div => true_div(&lhs, &rhs),
        BinOp::Pow => pow(lhs, rhs, max_int_bits),
        _ => match (lhs, rhs) {
            (Number::Int(a), Number::Int(b)) => int_arith(op, a, b, max_int_bits),
            (a, b) => float_arith(op, a.to_f64()?, b.to_f64()?),
        },
    }
}

fn true_div(lhs: &Number, rhs: &Number) -> EvalResult<Number> {
    if rhs.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    Ok(Number::Float(lhs.to_f64()? / rhs.to_f64()?))
}

fn int_arith(op: BinOp, a: BigInt, b: BigInt, max_bits: u64) -> EvalResult<Number> {
    let result = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => {
            if a.bits() + b.bits() > max_bits + 1 {
                return Err(EvalError::Overflow(format!(
                    "integer result exceeds {max_bits} bits"
                )));
            }
            a * b
        }
        BinOp::FloorDiv => int_divmod(&a, &b)?.0,
        BinOp::Mod => int_divmod(&a, &b)?.1,
        BinOp::Div | BinOp::Pow => unreachable!("handled in binary()"),
    };
    check_int_size(result, max_bits)
}

fn float_arith(op: BinOp, a: f64, b: f64) -> EvalResult<Number> {
    let result = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::FloorDiv => float_divmod(a, b)?.0,
        BinOp::Mod => float_divmod(a, b)?.1,
        BinOp::Div | BinOp::Pow => unreachable!("handled in binary()"),
    };
    Ok(Number::Float(result))
}

/// Floor division and modulo; the remainder takes the divisor's sign.
pub(crate) fn int_divmod(a: &BigInt, b: &BigInt) -> EvalResult<(BigInt, BigInt)> {
    if b.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    let mut q = a / b;
    let mut r = a % b;
    if !r.is_zero() && (r.is_negative() != b.is_negative()) {
        q -= 1;
        r += b;
    }
    Ok((q, r))
}

fn float_divmod(vx: f64, wx: f64) -> EvalResult<(f64, f64)> {
    if wx == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    let mut rem = vx % wx;
    let mut div = (vx - rem) / wx;
    if rem != 0.0 {
        if (wx < 0.0) != (rem < 0.0) {
            rem += wx;
            div -= 1.0;
        }
    } else {
        rem = 0.0f64.copysign(wx);
    }
    let floordiv = if div != 0.0 {
        let mut floored = div.floor();
        if div - floored > 0.5 {
            floored += 1.0;
        }
        floored
    } else {
        0.0f64.copysign(vx / wx)
    };
    Ok((floordiv, rem))
}

// ── Exponentiation ───────────────────────────────────────────────────────

fn pow(base: Number, exp: Number, max_int_bits: u64) -> EvalResult<Number> {
    match (base, exp) {
        (Number::Int(b), Number::Int(e)) if !e.is_negative() => int_pow(b, &e, max_int_bits),
        (Number::Int(b), Number::Int(_)) if b.is_zero() => Err(EvalError::DivisionByZero),
        (b, e) => float_pow(b.to_f64()?, e.to_f64()?),
    }
}

fn int_pow(base: BigInt, exp: &BigInt, max_bits: u64) -> EvalResult<Number> {
    if exp.is_zero() {
        return Ok(Number::Int(BigInt::one()));
    }
    if base.is_zero() || base.is_one() {
        return Ok(Number::Int(base));
    }
    if base == BigInt::from(-1) {
        let odd = (exp % 2u32).is_one();
        return Ok(Number::int(if odd { -1 } else { 1 }));
    }

    // |base| >= 2 from here on, so the result has at least `exp` bits.
    let log2 = match base.abs().to_f64() {
        Some(x) if x.is_finite() => x.log2(),
        _ => base.bits() as f64,
    };
    let estimate = exp.to_f64().unwrap_or(f64::INFINITY) * log2;
    let too_big = || EvalError::Overflow(format!("integer result exceeds {max_bits} bits"));
    if estimate > max_bits as f64 {
        return Err(too_big());
    }
    let exp = exp.to_u32().ok_or_else(too_big)?;
    check_int_size(Pow::pow(&base, exp), max_bits)
}

fn float_pow(x: f64, y: f64) -> EvalResult<Number> {
    if x == 0.0 && y < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    if x < 0.0 && x.is_finite() && y.is_finite() && y.fract() != 0.0 {
        return Err(EvalError::Domain(
            "negative number cannot be raised to a fractional power".into(),
        ));
    }
    let result = x.powf(y);
    if result.is_infinite() && x.is_finite() && y.is_finite() {
        return Err(EvalError::Overflow("float power result too large".into()));
    }
    Ok(Number::Float(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BITS: u64 = 1 << 20;

    fn int(n: i64) -> Number {
        Number::int(n)
    }

    fn apply(op: BinOp, a: Number, b: Number) -> EvalResult<Number> {
        binary(op, a, b, BITS)
    }

    #[test]
    fn integer_arithmetic_stays_exact() {
        assert_eq!(apply(BinOp::Add, int(2), int(3)), Ok(int(5)));
        assert_eq!(apply(BinOp::Sub, int(2), int(3)), Ok(int(-1)));
        assert_eq!(apply(BinOp::Mul, int(6), int(7)), Ok(int(42)));
        let big = "123456789012345678901234567890".parse::<BigInt>().unwrap();
        assert_eq!(
            apply(BinOp::Mul, Number::Int(big.clone()), int(10)),
            Ok(Number::Int(big * 10))
        );
    }

    #[test]
    fn true_division_is_float() {
        assert_eq!(apply(BinOp::Div, int(6), int(3)), Ok(Number::Float(2.0)));
        assert_eq!(apply(BinOp::Div, int(1), int(4)), Ok(Number::Float(0.25)));
    }

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(apply(BinOp::FloorDiv, int(7), int(2)), Ok(int(3)));
        assert_eq!(apply(BinOp::FloorDiv, int(-7), int(2)), Ok(int(-4)));
        assert_eq!(apply(BinOp::FloorDiv, int(7), int(-2)), Ok(int(-4)));
        assert_eq!(
            apply(BinOp::FloorDiv, Number::Float(7.5), int(2)),
            Ok(Number::Float(3.0))
        );
        assert_eq!(
            apply(BinOp::FloorDiv, Number::Float(-7.5), int(2)),
            Ok(Number::Float(-4.0))
        );
    }

    #[test]
    fn modulo_takes_divisor_sign() {
        assert_eq!(apply(BinOp::Mod, int(7), int(3)), Ok(int(1)));
        assert_eq!(apply(BinOp::Mod, int(-7), int(3)), Ok(int(2)));
        assert_eq!(apply(BinOp::Mod, int(7), int(-3)), Ok(int(-2)));
        assert_eq!(
            apply(BinOp::Mod, Number::Float(-1.5), int(1)),
            Ok(Number::Float(0.5))
        );
        assert_eq!(
            apply(BinOp::Mod, Number::Float(6.0), Number::Float(-4.0)),
            Ok(Number::Float(-2.0))
        );
    }

    #[test]
    fn zero_divisors() {
        for op in [BinOp::Div, BinOp::FloorDiv, BinOp::Mod] {
            assert_eq!(apply(op, int(1), int(0)), Err(EvalError::DivisionByZero));
            assert_eq!(
                apply(op, Number::Float(1.0), Number::Float(0.0)),
                Err(EvalError::DivisionByZero)
            );
        }
        assert_eq!(apply(BinOp::Pow, int(0), int(-1)), Err(EvalError::DivisionByZero));
        assert_eq!(
            apply(BinOp::Pow, Number::Float(0.0), Number::Float(-2.5)),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn powers() {
        assert_eq!(apply(BinOp::Pow, int(2), int(10)), Ok(int(1024)));
        assert_eq!(apply(BinOp::Pow, int(0), int(0)), Ok(int(1)));
        assert_eq!(apply(BinOp::Pow, int(-1), int(7)), Ok(int(-1)));
        assert_eq!(apply(BinOp::Pow, int(2), int(-1)), Ok(Number::Float(0.5)));
        assert_eq!(
            apply(BinOp::Pow, int(4), Number::Float(0.5)),
            Ok(Number::Float(2.0))
        );
    }

    #[test]
    fn oversized_powers_fail() {
        assert!(matches!(
            apply(BinOp::Pow, int(2), int(2_000_000)),
            Err(EvalError::Overflow(_))
        ));
        assert!(matches!(
            apply(BinOp::Pow, int(10), Number::Int(BigInt::from(10).pow(30u32))),
            Err(EvalError::Overflow(_))
        ));
        assert!(matches!(
            apply(BinOp::Pow, Number::Float(10.0), int(400)),
            Err(EvalError::Overflow(_))
        ));
        // 1 and -1 never grow.
        assert_eq!(
            apply(BinOp::Pow, int(1), Number::Int(BigInt::from(10).pow(30u32))),
            Ok(int(1))
        );
    }

    #[test]
    fn negative_base_fractional_exponent() {
        assert!(matches!(
            apply(BinOp::Pow, int(-8), Number::Float(1.0 / 3.0)),
            Err(EvalError::Domain(_))
        ));
        assert_eq!(
            apply(BinOp::Pow, Number::Float(-2.0), Number::Float(2.0)),
            Ok(Number::Float(4.0))
        );
    }

    #[test]
    fn int_size_cap() {
        assert!(matches!(
            binary(BinOp::Mul, int(1 << 40), int(1 << 40), 64),
            Err(EvalError::Overflow(_))
        ));
        assert_eq!(binary(BinOp::Add, int(1), int(1), 64), Ok(int(2)));
    }

    #[test]
    fn huge_int_to_float_overflows() {
        let huge = Number::Int(BigInt::from(10).pow(400u32));
        assert!(matches!(
            apply(BinOp::Add, huge, Number::Float(1.0)),
            Err(EvalError::Overflow(_))
        ));
    }

    #[test]
    fn negation() {
        assert_eq!(int(3).neg(), int(-3));
        assert_eq!(Number::Float(1.5).neg(), Number::Float(-1.5));
    }
}
