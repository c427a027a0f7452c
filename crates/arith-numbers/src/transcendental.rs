//! Elementary functions on native numbers
//!
//! Results are floats except where the answer is exactly known: an exact
//! zero argument maps to the function's exact value at zero, `log(1)` is an
//! exact zero, and the square root of a perfect square stays an integer.

use crate::arithmetic::{register_pairs, register_unary};
use crate::scalar::{pair, single, Scalar};
use arith_core::operations::{
    ACOS, ASIN, ATAN, COS, COSH, EXP, LOG, SIN, SINH, SQRT, TAN, TANH,
};
use arith_core::{Arithmetic, Error, Method, Registry, Result, Value};
use num_traits::Float;
use std::sync::Arc;

/// Exact value of a function at an exact zero argument
#[derive(Clone, Copy)]
enum AtZero {
    Zero,
    One,
    Inexact,
}

fn elementary(operation: &'static str, at_zero: AtZero, f: fn(f64) -> f64) -> Method {
    Arc::new(move |_: &Arithmetic, args: &[Value]| {
        let x = single(operation, args)?;
        if x.is_exact_zero() {
            match at_zero {
                AtZero::Zero => return Ok(Value::Integer(0)),
                AtZero::One => return Ok(Value::Integer(1)),
                AtZero::Inexact => {}
            }
        }
        Ok(Value::Float(f(x.to_f64())))
    })
}

/// Real logarithm; undefined at or below zero
fn log(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    match single(LOG, args)? {
        Scalar::Int(1) => Ok(Value::Integer(0)),
        x if x.to_f64() <= 0.0 => Err(Error::Computation(format!(
            "log of non-positive number {}",
            x.into_value()
        ))),
        x => Ok(Value::Float(x.to_f64().ln())),
    }
}

/// Integer square root when `n` is a perfect square
fn exact_sqrt(n: i64) -> Option<i64> {
    let root = (n as f64).sqrt().round() as i64;
    // Correct float rounding near the top of the range
    (root.saturating_sub(1)..=root.saturating_add(1))
        .find(|r| *r >= 0 && r.checked_mul(*r) == Some(n))
}

fn sqrt(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    let x = single(SQRT, args)?;
    if x.to_f64() < 0.0 {
        return Err(Error::Computation(format!(
            "square root of negative number {}",
            x.into_value()
        )));
    }
    match x {
        Scalar::Int(n) => Ok(exact_sqrt(n)
            .map(Value::Integer)
            .unwrap_or_else(|| Value::Float((n as f64).sqrt()))),
        Scalar::Real(x) => Ok(Value::Float(x.sqrt())),
    }
}

fn bounded_inverse(operation: &'static str, f: fn(f64) -> f64, at_zero: AtZero) -> Method {
    let inner = elementary(operation, at_zero, f);
    Arc::new(move |arith: &Arithmetic, args: &[Value]| {
        let x = single(operation, args)?.to_f64();
        if !(-1.0..=1.0).contains(&x) {
            return Err(Error::Computation(format!("{operation} argument {x} outside [-1, 1]")));
        }
        inner(arith, args)
    })
}

/// `atan(y, x)`; an exact zero `y` with positive `x` stays exact
fn atan2(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    match pair(ATAN, args)? {
        (y, x) if y.is_exact_zero() && x.to_f64() > 0.0 => Ok(Value::Integer(0)),
        (y, x) if y.is_exact_zero() && x.is_exact_zero() => Err(Error::Computation(
            "atan of (0, 0) is undefined".to_string(),
        )),
        (y, x) => Ok(Value::Float(Float::atan2(y.to_f64(), x.to_f64()))),
    }
}

pub(crate) fn install(registry: &Registry) -> Result<()> {
    register_unary(registry, SQRT, Arc::new(sqrt))?;
    register_unary(registry, EXP, elementary(EXP, AtZero::One, f64::exp))?;
    register_unary(registry, LOG, Arc::new(log))?;
    register_unary(registry, SIN, elementary(SIN, AtZero::Zero, f64::sin))?;
    register_unary(registry, COS, elementary(COS, AtZero::One, f64::cos))?;
    register_unary(registry, TAN, elementary(TAN, AtZero::Zero, f64::tan))?;
    register_unary(registry, ASIN, bounded_inverse(ASIN, f64::asin, AtZero::Zero))?;
    register_unary(registry, ACOS, bounded_inverse(ACOS, f64::acos, AtZero::Inexact))?;
    register_unary(registry, ATAN, elementary(ATAN, AtZero::Zero, f64::atan))?;
    register_pairs(registry, ATAN, Arc::new(atan2))?;
    register_unary(registry, SINH, elementary(SINH, AtZero::Zero, f64::sinh))?;
    register_unary(registry, COSH, elementary(COSH, AtZero::One, f64::cosh))?;
    register_unary(registry, TANH, elementary(TANH, AtZero::Zero, f64::tanh))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn arith() -> Arithmetic {
        let registry = Registry::new();
        install(&registry).unwrap();
        Arithmetic::new(Arc::new(registry))
    }

    fn float(value: Value) -> f64 {
        value.as_f64().unwrap()
    }

    #[test]
    fn test_exact_values_at_zero() {
        let arith = arith();
        let zero = Value::Integer(0);
        assert_eq!(arith.sin(&zero).unwrap(), Value::Integer(0));
        assert_eq!(arith.cos(&zero).unwrap(), Value::Integer(1));
        assert_eq!(arith.exp(&zero).unwrap(), Value::Integer(1));
        assert_eq!(arith.atan(&zero).unwrap(), Value::Integer(0));
        assert_eq!(arith.cosh(&zero).unwrap(), Value::Integer(1));
        assert_eq!(arith.log(&Value::Integer(1)).unwrap(), Value::Integer(0));
        // Float zero is not exact
        assert_eq!(arith.sin(&Value::Float(0.0)).unwrap(), Value::Float(0.0));
    }

    #[test]
    fn test_sqrt() {
        let arith = arith();
        assert_eq!(arith.sqrt(&Value::Integer(49)).unwrap(), Value::Integer(7));
        assert_eq!(arith.sqrt(&Value::Integer(0)).unwrap(), Value::Integer(0));
        assert_relative_eq!(float(arith.sqrt(&Value::Integer(2)).unwrap()), 2f64.sqrt());
        assert_relative_eq!(float(arith.sqrt(&Value::Float(6.25)).unwrap()), 2.5);
        assert!(matches!(
            arith.sqrt(&Value::Integer(-4)),
            Err(Error::Computation(_))
        ));
        assert_eq!(exact_sqrt(i64::MAX), None);
        assert_eq!(exact_sqrt(3_037_000_499 * 3_037_000_499), Some(3_037_000_499));
    }

    #[test]
    fn test_trigonometry() {
        let arith = arith();
        assert_relative_eq!(float(arith.sin(&Value::Float(FRAC_PI_2)).unwrap()), 1.0);
        assert_relative_eq!(float(arith.cos(&Value::Float(PI)).unwrap()), -1.0);
        assert_relative_eq!(float(arith.atan(&Value::Integer(1)).unwrap()), FRAC_PI_4);
        assert_relative_eq!(float(arith.acos(&Value::Integer(0)).unwrap()), FRAC_PI_2);
        assert!(arith.asin(&Value::Integer(2)).is_err());
    }

    #[test]
    fn test_atan2() {
        let arith = arith();
        assert_eq!(
            arith.atan2(&Value::Integer(0), &Value::Integer(5)).unwrap(),
            Value::Integer(0)
        );
        assert_relative_eq!(
            float(arith.atan2(&Value::Integer(1), &Value::Integer(-1)).unwrap()),
            3.0 * FRAC_PI_4
        );
        assert_relative_eq!(
            float(arith.atan2(&Value::Integer(0), &Value::Float(-1.0)).unwrap()),
            PI
        );
        assert!(arith.atan2(&Value::Integer(0), &Value::Integer(0)).is_err());
    }

    #[test]
    fn test_log() {
        let arith = arith();
        assert_relative_eq!(float(arith.log(&Value::Float(std::f64::consts::E)).unwrap()), 1.0);
        assert!(arith.log(&Value::Integer(0)).is_err());
        assert!(arith.log(&Value::Float(-2.0)).is_err());
    }
}
