use std::fmt;

use super::ExprError;

/// Result of an arithmetic expression.
///
/// Integer operands stay integers under `+ - * // % **` (with a non-negative
/// exponent); true division always produces a float, and any float operand
/// makes the result a float. Integer results outside the `i128` range
/// continue as floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

/// Keep an exact integer when it fits, otherwise fall back to the float result
fn int_or_float(exact: Option<i128>, approx: impl FnOnce() -> f64) -> Number {
    match exact {
        Some(i) => Number::Int(i),
        None => Number::Float(approx()),
    }
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    pub fn neg(self) -> Result<Number, ExprError> {
        match self {
            Number::Int(i) => Ok(int_or_float(i.checked_neg(), || -(i as f64))),
            Number::Float(f) => Ok(Number::Float(-f)),
        }
    }

    pub fn add(self, rhs: Number) -> Result<Number, ExprError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                Ok(int_or_float(a.checked_add(b), || a as f64 + b as f64))
            }
            (a, b) => Ok(Number::Float(a.as_f64() + b.as_f64())),
        }
    }

    pub fn sub(self, rhs: Number) -> Result<Number, ExprError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                Ok(int_or_float(a.checked_sub(b), || a as f64 - b as f64))
            }
            (a, b) => Ok(Number::Float(a.as_f64() - b.as_f64())),
        }
    }

    pub fn mul(self, rhs: Number) -> Result<Number, ExprError> {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_mul(b) {
                Some(i) => Ok(Number::Int(i)),
                None => finite(a as f64 * b as f64),
            },
            (a, b) => Ok(Number::Float(a.as_f64() * b.as_f64())),
        }
    }

    pub fn div(self, rhs: Number) -> Result<Number, ExprError> {
        if rhs.is_zero() {
            return Err(ExprError::DivisionByZero);
        }
        Ok(Number::Float(self.as_f64() / rhs.as_f64()))
    }

    /// Floor division, rounding toward negative infinity
    pub fn floor_div(self, rhs: Number) -> Result<Number, ExprError> {
        if rhs.is_zero() {
            return Err(ExprError::DivisionByZero);
        }
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_div(b) {
                Some(q) if a % b != 0 && ((a < 0) != (b < 0)) => Ok(Number::Int(q - 1)),
                Some(q) => Ok(Number::Int(q)),
                // i128::MIN // -1
                None => Ok(Number::Float(-(a as f64))),
            },
            (a, b) => Ok(Number::Float((a.as_f64() / b.as_f64()).floor())),
        }
    }

    /// Modulo whose sign follows the divisor
    pub fn rem(self, rhs: Number) -> Result<Number, ExprError> {
        if rhs.is_zero() {
            return Err(ExprError::DivisionByZero);
        }
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => {
                let r = a.checked_rem(b).unwrap_or(0);
                if r != 0 && ((r < 0) != (b < 0)) {
                    Ok(Number::Int(r + b))
                } else {
                    Ok(Number::Int(r))
                }
            }
            (a, b) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                let r = a % b;
                if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
                    Ok(Number::Float(r + b))
                } else {
                    Ok(Number::Float(r))
                }
            }
        }
    }

    pub fn pow(self, rhs: Number) -> Result<Number, ExprError> {
        if let (Number::Int(base), Number::Int(exp)) = (self, rhs) {
            if exp >= 0 {
                let exact = u32::try_from(exp).ok().and_then(|e| base.checked_pow(e));
                if let Some(i) = exact {
                    return Ok(Number::Int(i));
                }
            }
        }

        let (base, exp) = (self.as_f64(), rhs.as_f64());
        if base == 0.0 && exp < 0.0 {
            return Err(ExprError::DivisionByZero);
        }
        let value = base.powf(exp);
        if value.is_nan() {
            // fractional power of a negative number
            return Err(ExprError::Overflow);
        }
        if value.is_infinite() && base.is_finite() && exp.is_finite() {
            return Err(ExprError::Overflow);
        }
        Ok(Number::Float(value))
    }
}

/// Integer results too large even for a float cannot be shown faithfully
fn finite(value: f64) -> Result<Number, ExprError> {
    if value.is_infinite() {
        Err(ExprError::Overflow)
    } else {
        Ok(Number::Float(value))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

/// Shortest round-trip rendering: `2.0`, `3.5`, `1e+20`, `1.5e-07`
fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{:e}", v);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse::<i32>().unwrap_or(0)),
        None => (sci.clone(), 0),
    };

    if (-4..16).contains(&exponent) {
        let plain = format!("{}", v);
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
