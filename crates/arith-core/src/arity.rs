//! Arity descriptors for callable values

use crate::{Error, Result, Value};
use std::fmt;

/// How many positional arguments a callable accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly `n` arguments
    Exactly(usize),
    /// `n` or more arguments
    AtLeast(usize),
}

impl Arity {
    /// Whether a call with `count` arguments is acceptable
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }

    /// The smallest argument count accepted
    pub fn min(&self) -> usize {
        match *self {
            Arity::Exactly(n) | Arity::AtLeast(n) => n,
        }
    }

    /// Joint arity of two callables that must accept the same arguments
    ///
    /// Fails when no argument count satisfies both.
    pub fn intersect(self, other: Arity) -> Option<Arity> {
        match (self, other) {
            (Arity::Exactly(a), Arity::Exactly(b)) => (a == b).then_some(Arity::Exactly(a)),
            (Arity::Exactly(a), Arity::AtLeast(b)) | (Arity::AtLeast(b), Arity::Exactly(a)) => {
                (a >= b).then_some(Arity::Exactly(a))
            }
            (Arity::AtLeast(a), Arity::AtLeast(b)) => Some(Arity::AtLeast(a.max(b))),
        }
    }

    /// Fold `intersect` over several arities, reporting the first conflict
    pub fn joint<I>(context: &str, arities: I) -> Result<Arity>
    where
        I: IntoIterator<Item = Arity>,
    {
        let mut joint = Arity::AtLeast(0);
        for arity in arities {
            joint = joint
                .intersect(arity)
                .ok_or_else(|| Error::incompatible_arities(context, joint, arity))?;
        }
        Ok(joint)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Arity of a callable value
///
/// A vector of callables accepts whatever every component accepts, so its
/// arity is the intersection of the component arities.
pub fn arity(value: &Value) -> Result<Arity> {
    match value {
        Value::Function(f) => Ok(f.arity()),
        Value::Vector(items) if value.is_callable() => {
            let arities = items.iter().map(arity).collect::<Result<Vec<_>>>()?;
            Arity::joint("vector of procedures", arities)
        }
        other => Err(Error::not_callable("arity", other)),
    }
}
