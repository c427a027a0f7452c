//! Arity-preserving function combinators
//!
//! Everything here builds a new [`Function`] whose arity metadata is exact,
//! so later `arity` introspection and structural application keep working
//! on the result.

use arith_core::operations::{ADD, MUL};
use arith_core::{arity, Arithmetic, Arity, Error, Function, Result, Value};

/// The unary identity function
pub fn identity() -> Value {
    Value::from(Function::named("identity", Arity::Exactly(1), |_, args| {
        Ok(args[0].clone())
    }))
}

/// `compose(f1, .., fn)` is `f1(f2(..fn(args)..))`
///
/// Only the innermost function sees the caller's arguments; every other
/// function must accept a single argument. The result has the arity of the
/// innermost function. With no functions the result is [`identity`].
pub fn compose(functions: &[Value]) -> Result<Value> {
    let Some((innermost, outer)) = functions.split_last() else {
        return Ok(identity());
    };
    let inner_arity = arity(innermost)?;
    for f in outer {
        let outer_arity = arity(f)?;
        if !outer_arity.accepts(1) {
            return Err(Error::incompatible_arities("compose", outer_arity, Arity::Exactly(1)));
        }
    }

    let innermost = innermost.clone();
    let outer = outer.to_vec();
    log::trace!("Composed {} function(s) with arity {inner_arity}", functions.len());
    Ok(Value::from(Function::named(
        "compose",
        inner_arity,
        move |arith: &Arithmetic, args: &[Value]| {
            let value = arith.apply(&innermost, args)?;
            outer
                .iter()
                .rev()
                .try_fold(value, |x, f| arith.apply(f, std::slice::from_ref(&x)))
        },
    )))
}

/// Factor count must cover the fixed arguments of `f`
fn check_factors(context: &str, expected: Arity, count: usize) -> Result<()> {
    let fits = match expected {
        Arity::Exactly(n) => n == count,
        Arity::AtLeast(n) => n <= count,
    };
    if fits {
        Ok(())
    } else {
        Err(Error::ArityMismatch {
            context: context.to_string(),
            detail: format!("function accepts {expected} argument(s), got {count} factor(s)"),
        })
    }
}

/// Combine argument `i` with factor `i` through `operation` before calling `f`
fn adjust(
    context: &'static str,
    operation: &'static str,
    f: &Value,
    factors: &[Value],
) -> Result<Value> {
    let f_arity = arity(f)?;
    check_factors(context, f_arity, factors.len())?;

    let f = f.clone();
    let factors = factors.to_vec();
    Ok(Value::from(Function::named(
        context,
        f_arity,
        move |arith: &Arithmetic, args: &[Value]| {
            let adjusted = args
                .iter()
                .enumerate()
                .map(|(i, arg)| match factors.get(i) {
                    Some(k) => arith.call(operation, &[arg.clone(), k.clone()]),
                    None => Ok(arg.clone()),
                })
                .collect::<Result<Vec<_>>>()?;
            arith.apply(&f, &adjusted)
        },
    )))
}

/// `arg_shift(f, k1 .. kn)` calls `f(x1 + k1, .., xn + kn)`
pub fn arg_shift(f: &Value, shifts: &[Value]) -> Result<Value> {
    adjust("arg-shift", ADD, f, shifts)
}

/// `arg_scale(f, k1 .. kn)` calls `f(x1 * k1, .., xn * kn)`
pub fn arg_scale(f: &Value, scales: &[Value]) -> Result<Value> {
    adjust("arg-scale", MUL, f, scales)
}

/// `add(f(lo), f(lo + 1), .., f(hi - 1))` with the generic `add`
///
/// An empty range is the additive identity.
pub fn sum(arith: &Arithmetic, f: &Value, lo: i64, hi: i64) -> Result<Value> {
    let total = (lo..hi).try_fold(None, |acc: Option<Value>, i| {
        let term = arith.apply(f, &[Value::Integer(i)])?;
        match acc {
            None => Ok(Some(term)),
            Some(acc) => arith.add(&[acc, term]).map(Some),
        }
    })?;
    match total {
        Some(total) => Ok(total),
        None => arith.add(&[]),
    }
}
