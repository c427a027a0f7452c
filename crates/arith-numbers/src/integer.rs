//! Integer-only operations: quotient, remainder, modulo, exact division, gcd, lcm

use crate::scalar::{division_by_zero, overflow, Scalar};
use arith_core::operations::{EXACT_DIVIDE, GCD, LCM, MODULO, QUOTIENT, REMAINDER};
use arith_core::{Arithmetic, Error, Kind, Registry, Result, Value};

fn integers(operation: &str, args: &[Value]) -> Result<(i64, i64)> {
    match args {
        [a, b] => match (Scalar::from_value(operation, a)?, Scalar::from_value(operation, b)?) {
            (Scalar::Int(a), Scalar::Int(b)) => Ok((a, b)),
            _ => Err(Error::Computation(format!("{operation} requires integers"))),
        },
        _ => Err(Error::arity_mismatch(operation, "exactly 2", args.len())),
    }
}

fn nonzero_divisor(operation: &str, b: i64) -> Result<()> {
    if b == 0 {
        Err(division_by_zero(operation))
    } else {
        Ok(())
    }
}

/// Truncating division
fn quotient(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    let (a, b) = integers(QUOTIENT, args)?;
    nonzero_divisor(QUOTIENT, b)?;
    a.checked_div(b)
        .map(Value::Integer)
        .ok_or_else(|| overflow(QUOTIENT))
}

/// Remainder taking the sign of the dividend
fn remainder(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    let (a, b) = integers(REMAINDER, args)?;
    nonzero_divisor(REMAINDER, b)?;
    // i64::MIN % -1 overflows, but the remainder is 0
    Ok(Value::Integer(a.checked_rem(b).unwrap_or(0)))
}

/// Remainder taking the sign of the divisor
fn modulo(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    let (a, b) = integers(MODULO, args)?;
    nonzero_divisor(MODULO, b)?;
    let r = a.checked_rem(b).unwrap_or(0);
    if r != 0 && (r < 0) != (b < 0) {
        Ok(Value::Integer(r + b))
    } else {
        Ok(Value::Integer(r))
    }
}

fn exact_divide(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    let (a, b) = integers(EXACT_DIVIDE, args)?;
    nonzero_divisor(EXACT_DIVIDE, b)?;
    match (a.checked_rem(b), a.checked_div(b)) {
        (Some(0), Some(q)) => Ok(Value::Integer(q)),
        (Some(_), _) => Err(Error::Computation(format!("{b} does not divide {a} exactly"))),
        _ => Err(overflow(EXACT_DIVIDE)),
    }
}

fn gcd_of(a: i64, b: i64) -> Result<i64> {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    i64::try_from(a).map_err(|_| overflow(GCD))
}

fn gcd(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    let (a, b) = integers(GCD, args)?;
    gcd_of(a, b).map(Value::Integer)
}

fn lcm(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    let (a, b) = integers(LCM, args)?;
    if a == 0 || b == 0 {
        return Ok(Value::Integer(0));
    }
    let g = gcd_of(a, b)?;
    (a / g)
        .checked_mul(b)
        .and_then(i64::checked_abs)
        .map(Value::Integer)
        .ok_or_else(|| overflow(LCM))
}

pub(crate) fn install(registry: &Registry) -> Result<()> {
    let key = [Kind::Integer, Kind::Integer];
    registry.register_method(QUOTIENT, key.clone(), quotient)?;
    registry.register_method(REMAINDER, key.clone(), remainder)?;
    registry.register_method(MODULO, key.clone(), modulo)?;
    registry.register_method(EXACT_DIVIDE, key.clone(), exact_divide)?;
    registry.register_method(GCD, key.clone(), gcd)?;
    registry.register_method(LCM, key, lcm)?;
    Ok(())
}
