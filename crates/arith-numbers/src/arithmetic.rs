//! Field operations on native numbers
//!
//! Integer/integer combinations stay exact and fail on overflow; any
//! combination involving a float is computed in `f64`. Integer division
//! stays exact when the divisor divides the dividend.

use crate::scalar::{
    division_by_zero, overflow, pair, scalar_kinds, scalar_pairs, single, Scalar,
};
use arith_core::operations::{ABS, ADD, DIV, EXPT, INVERT, MUL, NEGATE, NEGATIVE, SUB};
use arith_core::{Arithmetic, DispatchKey, Method, Registry, Result, Value};
use num_traits::{CheckedAdd, CheckedMul, CheckedSub};
use std::sync::Arc;

type IntOp = fn(&i64, &i64) -> Option<i64>;

fn checked(operation: &'static str, int_op: IntOp, float_op: fn(f64, f64) -> f64) -> Method {
    Arc::new(move |_: &Arithmetic, args: &[Value]| {
        match pair(operation, args)? {
            (Scalar::Int(a), Scalar::Int(b)) => int_op(&a, &b)
                .map(Value::Integer)
                .ok_or_else(|| overflow(operation)),
            (a, b) => Ok(Value::Float(float_op(a.to_f64(), b.to_f64()))),
        }
    })
}

fn divide(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    match pair(DIV, args)? {
        (Scalar::Int(_), Scalar::Int(0)) => Err(division_by_zero(DIV)),
        (Scalar::Int(a), Scalar::Int(b)) => match (a.checked_rem(b), a.checked_div(b)) {
            (Some(0), Some(q)) => Ok(Value::Integer(q)),
            (Some(_), _) => Ok(Value::Float(a as f64 / b as f64)),
            _ => Err(overflow(DIV)),
        },
        (a, b) => Ok(Value::Float(a.to_f64() / b.to_f64())),
    }
}

fn negate(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    match single(NEGATE, args)? {
        Scalar::Int(a) => a
            .checked_neg()
            .map(Value::Integer)
            .ok_or_else(|| overflow(NEGATE)),
        Scalar::Real(x) => Ok(Value::Float(-x)),
    }
}

fn invert(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    match single(INVERT, args)? {
        Scalar::Int(0) => Err(division_by_zero(INVERT)),
        Scalar::Int(a @ (1 | -1)) => Ok(Value::Integer(a)),
        Scalar::Int(a) => Ok(Value::Float(1.0 / a as f64)),
        Scalar::Real(x) => Ok(Value::Float(1.0 / x)),
    }
}

fn is_negative(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    let negative = match single(NEGATIVE, args)? {
        Scalar::Int(a) => a < 0,
        Scalar::Real(x) => x < 0.0,
    };
    Ok(Value::Boolean(negative))
}

fn abs(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    match single(ABS, args)? {
        Scalar::Int(a) => a
            .checked_abs()
            .map(Value::Integer)
            .ok_or_else(|| overflow(ABS)),
        Scalar::Real(x) => Ok(Value::Float(x.abs())),
    }
}

/// Exact for non-negative integer exponents of integers
fn expt(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    match pair(EXPT, args)? {
        (Scalar::Int(base), Scalar::Int(exponent)) if exponent >= 0 => {
            let exponent = usize::try_from(exponent).map_err(|_| overflow(EXPT))?;
            num_traits::checked_pow(base, exponent)
                .map(Value::Integer)
                .ok_or_else(|| overflow(EXPT))
        }
        (base, Scalar::Int(exponent)) => match i32::try_from(exponent) {
            Ok(exponent) => Ok(Value::Float(base.to_f64().powi(exponent))),
            Err(_) => Ok(Value::Float(base.to_f64().powf(exponent as f64))),
        },
        (base, exponent) => Ok(Value::Float(base.to_f64().powf(exponent.to_f64()))),
    }
}

pub(crate) fn register_pairs(registry: &Registry, operation: &str, method: Method) -> Result<()> {
    for key in scalar_pairs() {
        registry.register_method_arc(operation, DispatchKey::from(key), Arc::clone(&method))?;
    }
    Ok(())
}

pub(crate) fn register_unary(registry: &Registry, operation: &str, method: Method) -> Result<()> {
    for kind in scalar_kinds() {
        registry.register_method_arc(operation, DispatchKey::from([kind]), Arc::clone(&method))?;
    }
    Ok(())
}

pub(crate) fn install(registry: &Registry) -> Result<()> {
    register_pairs(
        registry,
        ADD,
        checked(ADD, <i64 as CheckedAdd>::checked_add, |a, b| a + b),
    )?;
    register_pairs(
        registry,
        SUB,
        checked(SUB, <i64 as CheckedSub>::checked_sub, |a, b| a - b),
    )?;
    register_pairs(
        registry,
        MUL,
        checked(MUL, <i64 as CheckedMul>::checked_mul, |a, b| a * b),
    )?;
    register_pairs(registry, DIV, Arc::new(divide))?;
    register_pairs(registry, EXPT, Arc::new(expt))?;

    register_unary(registry, NEGATE, Arc::new(negate))?;
    register_unary(registry, INVERT, Arc::new(invert))?;
    register_unary(registry, NEGATIVE, Arc::new(is_negative))?;
    register_unary(registry, ABS, Arc::new(abs))?;
    Ok(())
}
