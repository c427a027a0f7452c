//! Generic operation layer
//!
//! [`Arithmetic`] is the call surface. Every call goes through the same
//! two-tier resolution:
//!
//! 1. **Identity tier** - for identity-aware operations, operands recognised
//!    as the operation's identity element answer the call directly, whether
//!    or not any method exists for the other operand's kind. When both
//!    operands are identities and a method exists for their kinds, the
//!    method answers instead, so `0 + 0.0` keeps the float.
//! 2. **Table tier** - otherwise the operands are classified and the exact
//!    dispatch key is looked up in the operation's method table. A miss is a
//!    hard error; there is no coercion.
//!
//! Variadic identity-aware operations (`add`, `sub`, `mul`, `div`) reduce
//! left to right in argument order, so non-associative methods see exactly
//! the pairs the caller wrote.

use crate::operations::*;
use crate::registry::Operation;
use crate::{arity, DispatchKey, Error, IdentityBehavior, Kind, Registry, Result, Value};
use std::sync::Arc;

macro_rules! unary_helpers {
    ($($(#[$doc:meta])* $fn_name:ident => $op:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(&self, x: &Value) -> Result<Value> {
                self.call($op, std::slice::from_ref(x))
            }
        )*
    };
}

macro_rules! binary_helpers {
    ($($(#[$doc:meta])* $fn_name:ident => $op:expr;)*) => {
        $(
            $(#[$doc])*
            pub fn $fn_name(&self, a: &Value, b: &Value) -> Result<Value> {
                self.call($op, &[a.clone(), b.clone()])
            }
        )*
    };
}

/// Call surface for generic operations over a shared registry
#[derive(Clone)]
pub struct Arithmetic {
    registry: Arc<Registry>,
}

impl Arithmetic {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn kind_of(&self, value: &Value) -> Result<Kind> {
        self.registry.kind_of(value)
    }

    /// Invoke any defined operation positionally
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let op = self.registry.operation(name)?;
        let spec = op.spec();
        if !spec.accepts(args.len()) {
            self.registry.record_failure();
            return Err(Error::ArityMismatch {
                context: name.to_string(),
                detail: format!(
                    "expected {} argument(s), got {}",
                    spec.arity_description(),
                    args.len()
                ),
            });
        }
        match spec.identity() {
            IdentityBehavior::None => self.dispatch(&op, args),
            behavior if spec.is_unary() => self.fixed_point(&op, behavior, &args[0]),
            behavior => self.reduce(&op, behavior, args),
        }
    }

    fn reduce(&self, op: &Operation, behavior: IdentityBehavior, args: &[Value]) -> Result<Value> {
        match args {
            [] => behavior
                .default_identity()
                .ok_or_else(|| Error::no_method(op.name(), Default::default())),
            [x] => match op.spec().inverse() {
                Some(inverse) => self.call(inverse, std::slice::from_ref(x)),
                None => Ok(x.clone()),
            },
            [first, rest @ ..] => rest.iter().try_fold(first.clone(), |acc, x| {
                self.binary(op, behavior, acc, x.clone())
            }),
        }
    }

    fn binary(
        &self,
        op: &Operation,
        behavior: IdentityBehavior,
        left: Value,
        right: Value,
    ) -> Result<Value> {
        if self.registry.config().identity_shortcut {
            let right_identity = self.is_identity(behavior, &right)?;
            let left_identity = self.is_identity(behavior, &left)?;
            if right_identity && left_identity && self.has_method(op, &[&left, &right])? {
                // Both sides are identities, the method decides the result kind
                return self.dispatch(op, &[left, right]);
            }
            if right_identity {
                log::trace!("{}: right operand is the identity", op.name());
                self.registry.record_shortcut();
                return Ok(left);
            }
            if left_identity {
                log::trace!("{}: left operand is the identity", op.name());
                self.registry.record_shortcut();
                return match op.spec().inverse() {
                    Some(inverse) => self.call(inverse, &[right]),
                    None => Ok(right),
                };
            }
        }
        self.dispatch(op, &[left, right])
    }

    fn fixed_point(&self, op: &Operation, behavior: IdentityBehavior, x: &Value) -> Result<Value> {
        if self.registry.config().identity_shortcut && self.is_identity(behavior, x)? {
            log::trace!("{}: operand is a fixed identity", op.name());
            self.registry.record_shortcut();
            return Ok(x.clone());
        }
        self.dispatch(op, std::slice::from_ref(x))
    }

    fn has_method(&self, op: &Operation, args: &[&Value]) -> Result<bool> {
        let mut kinds = Vec::with_capacity(args.len());
        for value in args {
            match self.registry.kind_of(value)? {
                Kind::Native => return Ok(false),
                kind => kinds.push(kind),
            }
        }
        Ok(op.lookup(&DispatchKey::new(kinds))?.is_some())
    }

    fn is_identity(&self, behavior: IdentityBehavior, x: &Value) -> Result<bool> {
        match behavior {
            IdentityBehavior::None => Ok(false),
            IdentityBehavior::Additive => self.registry.is_additive_identity(x),
            IdentityBehavior::Multiplicative => self.registry.is_multiplicative_identity(x),
        }
    }

    fn dispatch(&self, op: &Operation, args: &[Value]) -> Result<Value> {
        let key = self.registry.key_of(args)?;
        if let Some(position) = key.kinds().iter().position(|k| *k == Kind::Native) {
            self.registry.record_failure();
            return Err(Error::UnclassifiableOperand {
                operation: op.name().to_string(),
                position,
                type_name: args[position].type_name().to_string(),
            });
        }
        match op.lookup(&key)? {
            Some(method) => {
                log::trace!("{} dispatched on {key}", op.name());
                self.registry.record_hit();
                method(self, args)
            }
            None => {
                log::debug!("{} has no method for {key}", op.name());
                self.registry.record_failure();
                Err(Error::no_method(op.name(), key))
            }
        }
    }

    /// Apply a callable value
    ///
    /// Vectors of callables apply every component to the same arguments and
    /// collect the results.
    pub fn apply(&self, f: &Value, args: &[Value]) -> Result<Value> {
        let expected = arity::arity(f)?;
        if !expected.accepts(args.len()) {
            let context = match f {
                Value::Function(func) => func.name().unwrap_or("apply").to_string(),
                _ => "apply".to_string(),
            };
            return Err(Error::arity_mismatch(&context, expected, args.len()));
        }
        match f {
            Value::Function(func) => func.invoke(self, args),
            Value::Vector(items) => items
                .iter()
                .map(|item| self.apply(item, args))
                .collect::<Result<Vec<_>>>()
                .map(Value::Vector),
            other => Err(Error::not_callable("apply", other)),
        }
    }

    // ------------------------------------------------------------------
    // Core arithmetic
    // ------------------------------------------------------------------

    pub fn add(&self, args: &[Value]) -> Result<Value> {
        self.call(ADD, args)
    }

    pub fn sub(&self, args: &[Value]) -> Result<Value> {
        self.call(SUB, args)
    }

    pub fn mul(&self, args: &[Value]) -> Result<Value> {
        self.call(MUL, args)
    }

    pub fn div(&self, args: &[Value]) -> Result<Value> {
        self.call(DIV, args)
    }

    pub fn square(&self, x: &Value) -> Result<Value> {
        self.mul(&[x.clone(), x.clone()])
    }

    pub fn cube(&self, x: &Value) -> Result<Value> {
        self.mul(&[x.clone(), x.clone(), x.clone()])
    }

    /// Dispatched `negative?`; the method must answer with a boolean
    pub fn is_negative(&self, x: &Value) -> Result<bool> {
        let answer = self.call(NEGATIVE, std::slice::from_ref(x))?;
        answer.as_bool().ok_or_else(|| {
            Error::Computation(format!("{NEGATIVE} returned non-boolean {answer}"))
        })
    }

    pub fn is_zero(&self, x: &Value) -> Result<bool> {
        self.registry.is_additive_identity(x)
    }

    pub fn is_one(&self, x: &Value) -> Result<bool> {
        self.registry.is_multiplicative_identity(x)
    }

    pub fn zero_like(&self, x: &Value) -> Result<Value> {
        self.registry.zero_like(x)
    }

    pub fn one_like(&self, x: &Value) -> Result<Value> {
        self.registry.one_like(x)
    }

    unary_helpers! {
        negate => NEGATE;
        invert => INVERT;
        abs => ABS;
        sqrt => SQRT;
        exp => EXP;
        log => LOG;
        sin => SIN;
        cos => COS;
        tan => TAN;
        asin => ASIN;
        acos => ACOS;
        /// Single-argument arctangent; see [`Arithmetic::atan2`]
        atan => ATAN;
        sinh => SINH;
        cosh => COSH;
        tanh => TANH;
        real_part => REAL_PART;
        imag_part => IMAG_PART;
        magnitude => MAGNITUDE;
        angle => ANGLE;
        conjugate => CONJUGATE;
        transpose => TRANSPOSE;
        determinant => DETERMINANT;
        trace => TRACE;
    }

    binary_helpers! {
        expt => EXPT;
        /// Two-argument arctangent `atan(y, x)`
        atan2 => ATAN;
        quotient => QUOTIENT;
        remainder => REMAINDER;
        modulo => MODULO;
        exact_divide => EXACT_DIVIDE;
        gcd => GCD;
        lcm => LCM;
        dot_product => DOT_PRODUCT;
        inner_product => INNER_PRODUCT;
        outer_product => OUTER_PRODUCT;
        cross_product => CROSS_PRODUCT;
    }
}
