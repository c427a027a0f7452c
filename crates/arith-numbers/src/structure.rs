//! Native numbers seen as degenerate structures
//!
//! A real number is a complex number with zero imaginary part and a 1x1
//! matrix, so the complex and matrix accessors have trivial methods here.
//! Other datatype modules register the non-trivial versions.

use crate::arithmetic::{register_pairs, register_unary};
use crate::scalar::{single, Scalar};
use arith_core::operations::{
    ANGLE, CONJUGATE, DETERMINANT, DOT_PRODUCT, IMAG_PART, INNER_PRODUCT, MAGNITUDE, REAL_PART,
    TRACE, TRANSPOSE,
};
use arith_core::{Arithmetic, Error, Method, Registry, Result, Value};
use std::sync::Arc;

fn itself(operation: &'static str) -> Method {
    Arc::new(move |_: &Arithmetic, args: &[Value]| Ok(single(operation, args)?.into_value()))
}

fn imag_part(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    single(IMAG_PART, args)?;
    Ok(Value::Integer(0))
}

fn magnitude(arith: &Arithmetic, args: &[Value]) -> Result<Value> {
    single(MAGNITUDE, args)?;
    arith.abs(&args[0])
}

fn angle(_: &Arithmetic, args: &[Value]) -> Result<Value> {
    match single(ANGLE, args)? {
        x if x.to_f64() < 0.0 => Ok(Value::Float(std::f64::consts::PI)),
        Scalar::Int(_) => Ok(Value::Integer(0)),
        Scalar::Real(_) => Ok(Value::Float(0.0)),
    }
}

/// Product of two scalars, shared by the dot and inner products
fn product(operation: &'static str) -> Method {
    Arc::new(move |arith: &Arithmetic, args: &[Value]| match args {
        [a, b] => arith.mul(&[a.clone(), b.clone()]),
        _ => Err(Error::arity_mismatch(operation, "exactly 2", args.len())),
    })
}

pub(crate) fn install(registry: &Registry) -> Result<()> {
    register_unary(registry, REAL_PART, itself(REAL_PART))?;
    register_unary(registry, IMAG_PART, Arc::new(imag_part))?;
    register_unary(registry, MAGNITUDE, Arc::new(magnitude))?;
    register_unary(registry, ANGLE, Arc::new(angle))?;
    register_unary(registry, CONJUGATE, itself(CONJUGATE))?;
    register_unary(registry, TRANSPOSE, itself(TRANSPOSE))?;
    register_unary(registry, DETERMINANT, itself(DETERMINANT))?;
    register_unary(registry, TRACE, itself(TRACE))?;
    register_pairs(registry, DOT_PRODUCT, product(DOT_PRODUCT))?;
    register_pairs(registry, INNER_PRODUCT, product(INNER_PRODUCT))?;
    Ok(())
}
