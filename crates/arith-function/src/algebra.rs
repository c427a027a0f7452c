//! Function algebra datatype module
//!
//! Lifts arithmetic to functions: `f + g` is the function `x -> f(x) + g(x)`,
//! `f * 2` is `x -> f(x) * 2` and `sin(f)` is `x -> sin(f(x))`. Results carry
//! the joint arity of their function operands.

use arith_core::operations::{
    ABS, ADD, COS, DIV, EXP, EXPT, INVERT, LOG, MUL, NEGATE, SIN, SQRT, SUB, TAN,
};
use arith_core::{
    arity, Arithmetic, Arity, Error, Function, IdentityEntry, Kind, Registry, Result, Value,
};

const BINARY: [&str; 5] = [ADD, SUB, MUL, DIV, EXPT];
const UNARY: [&str; 9] = [NEGATE, INVERT, SQRT, EXP, LOG, SIN, COS, TAN, ABS];

/// Value of an operand at `args`: functions are applied, anything else is constant
fn evaluate(arith: &Arithmetic, operand: &Value, args: &[Value]) -> Result<Value> {
    match operand {
        Value::Function(_) => arith.apply(operand, args),
        constant => Ok(constant.clone()),
    }
}

/// Pointwise binary operation over function and constant operands
fn lift_binary(operation: &'static str, args: &[Value]) -> Result<Value> {
    let [left, right] = args else {
        return Err(Error::arity_mismatch(operation, Arity::Exactly(2), args.len()));
    };
    let arities = args
        .iter()
        .filter(|v| v.as_function().is_some())
        .map(arity)
        .collect::<Result<Vec<_>>>()?;
    let joint = Arity::joint(operation, arities)?;
    let (left, right) = (left.clone(), right.clone());
    log::trace!("Lifted {operation} to functions with arity {joint}");
    Ok(Value::from(Function::named(
        operation,
        joint,
        move |arith: &Arithmetic, args: &[Value]| {
            let l = evaluate(arith, &left, args)?;
            let r = evaluate(arith, &right, args)?;
            arith.call(operation, &[l, r])
        },
    )))
}

/// Apply a unary operation after the function
fn lift_unary(operation: &'static str, args: &[Value]) -> Result<Value> {
    let [f] = args else {
        return Err(Error::arity_mismatch(operation, Arity::Exactly(1), args.len()));
    };
    let f_arity = arity(f)?;
    let f = f.clone();
    Ok(Value::from(Function::named(
        operation,
        f_arity,
        move |arith: &Arithmetic, args: &[Value]| {
            let x = arith.apply(&f, args)?;
            arith.call(operation, std::slice::from_ref(&x))
        },
    )))
}

/// Constant function with the arity of `f`
fn constant_like(f: &Value, constant: i64) -> Result<Value> {
    let f_arity = arity(f)?;
    Ok(Value::from(Function::new(f_arity, move |_, _| {
        Ok(Value::Integer(constant))
    })))
}

/// Register function identities and the lifted operations with `registry`
pub fn install(registry: &Registry) -> Result<()> {
    registry.register_identity(
        Kind::Function,
        IdentityEntry::new()
            .with_zero_like(|f| constant_like(f, 0))
            .with_one_like(|f| constant_like(f, 1)),
    )?;

    let keys = [
        [Kind::Function, Kind::Function],
        [Kind::Function, Kind::Integer],
        [Kind::Function, Kind::Float],
        [Kind::Integer, Kind::Function],
        [Kind::Float, Kind::Function],
    ];
    for operation in BINARY {
        for key in &keys {
            let lifted = move |_: &Arithmetic, args: &[Value]| lift_binary(operation, args);
            registry.register_method(operation, key.clone(), lifted)?;
        }
    }
    for operation in UNARY {
        let lifted = move |_: &Arithmetic, args: &[Value]| lift_unary(operation, args);
        registry.register_method(operation, [Kind::Function], lifted)?;
    }

    log::debug!(
        "Installed function algebra for {} operations",
        BINARY.len() + UNARY.len()
    );
    Ok(())
}
