//! Real scalar view of native number values

use arith_core::{Error, Kind, Result, Value};

/// Integer or floating-point operand
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    Real(f64),
}

impl Scalar {
    /// Read a native number; other values mean a method was registered on the wrong key
    pub fn from_value(operation: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Integer(i) => Ok(Scalar::Int(*i)),
            Value::Float(x) => Ok(Scalar::Real(*x)),
            other => Err(Error::Computation(format!(
                "{operation} expected a native number, got {}",
                other.type_name()
            ))),
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::Int(i) => i as f64,
            Scalar::Real(x) => x,
        }
    }

    pub fn is_exact_zero(self) -> bool {
        self == Scalar::Int(0)
    }

    pub fn into_value(self) -> Value {
        match self {
            Scalar::Int(i) => Value::Integer(i),
            Scalar::Real(x) => Value::Float(x),
        }
    }
}

/// Kinds the module registers methods for
pub fn scalar_kinds() -> [Kind; 2] {
    [Kind::Integer, Kind::Float]
}

/// Every ordered pair of scalar kinds
pub fn scalar_pairs() -> Vec<[Kind; 2]> {
    let mut pairs = Vec::with_capacity(4);
    for a in scalar_kinds() {
        for b in scalar_kinds() {
            pairs.push([a.clone(), b]);
        }
    }
    pairs
}

pub(crate) fn overflow(operation: &str) -> Error {
    Error::Computation(format!("integer overflow in {operation}"))
}

pub(crate) fn division_by_zero(operation: &str) -> Error {
    Error::Computation(format!("division by zero in {operation}"))
}

/// Two scalar operands of a binary method
pub(crate) fn pair(operation: &str, args: &[Value]) -> Result<(Scalar, Scalar)> {
    match args {
        [a, b] => Ok((Scalar::from_value(operation, a)?, Scalar::from_value(operation, b)?)),
        _ => Err(Error::arity_mismatch(operation, "exactly 2", args.len())),
    }
}

/// The single scalar operand of a unary method
pub(crate) fn single(operation: &str, args: &[Value]) -> Result<Scalar> {
    match args {
        [a] => Scalar::from_value(operation, a),
        _ => Err(Error::arity_mismatch(operation, "exactly 1", args.len())),
    }
}
