//! Operation descriptors and the standard operation set

use crate::{Arity, Error, Result, Value};

pub const ADD: &str = "add";
pub const SUB: &str = "sub";
pub const MUL: &str = "mul";
pub const DIV: &str = "div";
pub const NEGATE: &str = "negate";
pub const INVERT: &str = "invert";
pub const NEGATIVE: &str = "negative?";
pub const ABS: &str = "abs";
pub const SQRT: &str = "sqrt";
pub const EXP: &str = "exp";
pub const LOG: &str = "log";
pub const SIN: &str = "sin";
pub const COS: &str = "cos";
pub const TAN: &str = "tan";
pub const ASIN: &str = "asin";
pub const ACOS: &str = "acos";
pub const ATAN: &str = "atan";
pub const SINH: &str = "sinh";
pub const COSH: &str = "cosh";
pub const TANH: &str = "tanh";
pub const EXPT: &str = "expt";
pub const QUOTIENT: &str = "quotient";
pub const REMAINDER: &str = "remainder";
pub const MODULO: &str = "modulo";
pub const EXACT_DIVIDE: &str = "exact-divide";
pub const GCD: &str = "gcd";
pub const LCM: &str = "lcm";
pub const REAL_PART: &str = "real-part";
pub const IMAG_PART: &str = "imag-part";
pub const MAGNITUDE: &str = "magnitude";
pub const ANGLE: &str = "angle";
pub const CONJUGATE: &str = "conjugate";
pub const TRANSPOSE: &str = "transpose";
pub const DOT_PRODUCT: &str = "dot-product";
pub const INNER_PRODUCT: &str = "inner-product";
pub const OUTER_PRODUCT: &str = "outer-product";
pub const CROSS_PRODUCT: &str = "cross-product";
pub const DETERMINANT: &str = "determinant";
pub const TRACE: &str = "trace";

/// Unary operations over a single operand with no identity behaviour
pub const UNARY_OPERATIONS: &[&str] = &[
    NEGATIVE, ABS, SQRT, EXP, LOG, SIN, COS, TAN, ASIN, ACOS, SINH, COSH, TANH, REAL_PART,
    IMAG_PART, MAGNITUDE, ANGLE, CONJUGATE, TRANSPOSE, DETERMINANT, TRACE,
];

/// Strictly binary operations with no identity behaviour
pub const BINARY_OPERATIONS: &[&str] = &[
    EXPT,
    QUOTIENT,
    REMAINDER,
    MODULO,
    EXACT_DIVIDE,
    GCD,
    LCM,
    DOT_PRODUCT,
    INNER_PRODUCT,
    OUTER_PRODUCT,
    CROSS_PRODUCT,
];

/// Which identity element, if any, an operation short-circuits on
///
/// On a variadic operation this drives the reduction policy: zero arguments
/// yield the default identity, an identity operand yields the other operand.
/// On a unary operation the identity is a fixed point: `op(e) = e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityBehavior {
    None,
    /// Zero is the identity
    Additive,
    /// One is the identity
    Multiplicative,
}

impl IdentityBehavior {
    /// Untyped identity returned by a zero-argument call
    pub fn default_identity(&self) -> Option<Value> {
        match self {
            IdentityBehavior::None => None,
            IdentityBehavior::Additive => Some(Value::Integer(0)),
            IdentityBehavior::Multiplicative => Some(Value::Integer(1)),
        }
    }
}

/// Declaration of a named operation
#[derive(Debug, Clone)]
pub struct OperationSpec {
    name: String,
    min_arity: usize,
    max_arity: Option<usize>,
    identity: IdentityBehavior,
    inverse: Option<String>,
}

impl OperationSpec {
    /// Operation accepting `min_arity..=max_arity` operands (`None` = unbounded)
    pub fn new(name: &str, min_arity: usize, max_arity: Option<usize>) -> Self {
        Self {
            name: name.to_string(),
            min_arity,
            max_arity,
            identity: IdentityBehavior::None,
            inverse: None,
        }
    }

    pub fn unary(name: &str) -> Self {
        Self::new(name, 1, Some(1))
    }

    pub fn binary(name: &str) -> Self {
        Self::new(name, 2, Some(2))
    }

    pub fn variadic(name: &str) -> Self {
        Self::new(name, 0, None)
    }

    pub fn with_identity(mut self, identity: IdentityBehavior) -> Self {
        self.identity = identity;
        self
    }

    /// Unary operation applied to a lone operand, and to the right operand
    /// when the left one is the identity
    pub fn with_inverse(mut self, inverse: &str) -> Self {
        self.inverse = Some(inverse.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_arity(&self) -> usize {
        self.min_arity
    }

    pub fn max_arity(&self) -> Option<usize> {
        self.max_arity
    }

    pub fn identity(&self) -> IdentityBehavior {
        self.identity
    }

    pub fn inverse(&self) -> Option<&str> {
        self.inverse.as_deref()
    }

    pub fn is_unary(&self) -> bool {
        self.min_arity == 1 && self.max_arity == Some(1)
    }

    pub fn is_variadic(&self) -> bool {
        self.max_arity.is_none()
    }

    /// Whether a call with `count` operands is acceptable
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min_arity && self.max_arity.map_or(true, |max| count <= max)
    }

    /// Accepted operand counts as text, for diagnostics
    pub fn arity_description(&self) -> String {
        match self.max_arity {
            None => Arity::AtLeast(self.min_arity).to_string(),
            Some(max) if max == self.min_arity => Arity::Exactly(max).to_string(),
            Some(max) => format!("{} to {max}", self.min_arity),
        }
    }

    /// Whether a method keyed by `len` kinds can ever be reached
    ///
    /// Identity-aware variadic operations reduce pairwise, so their methods
    /// are always binary.
    pub fn accepts_key_length(&self, len: usize) -> bool {
        if self.is_variadic() && self.identity != IdentityBehavior::None {
            len == 2
        } else {
            self.accepts(len)
        }
    }

    /// Checks that do not need the rest of the registry
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::malformed("operation name must not be empty"));
        }
        if let Some(max) = self.max_arity {
            if max < self.min_arity {
                return Err(Error::malformed(format!(
                    "operation {} has max arity {max} below min arity {}",
                    self.name, self.min_arity
                )));
            }
        }
        if self.identity != IdentityBehavior::None && !self.is_unary() && !self.is_variadic() {
            return Err(Error::malformed(format!(
                "identity behaviour on {} requires a unary or variadic operation",
                self.name
            )));
        }
        let identity_aware = self.is_variadic() && self.identity != IdentityBehavior::None;
        if self.inverse.is_some() && !identity_aware {
            return Err(Error::malformed(format!(
                "inverse on {} requires an identity-aware variadic operation",
                self.name
            )));
        }
        Ok(())
    }
}

/// The operations every standard registry defines, inverses first
pub fn standard_operations() -> Vec<OperationSpec> {
    let mut specs = vec![
        OperationSpec::unary(NEGATE).with_identity(IdentityBehavior::Additive),
        OperationSpec::unary(INVERT).with_identity(IdentityBehavior::Multiplicative),
        OperationSpec::variadic(ADD).with_identity(IdentityBehavior::Additive),
        OperationSpec::variadic(SUB)
            .with_identity(IdentityBehavior::Additive)
            .with_inverse(NEGATE),
        OperationSpec::variadic(MUL).with_identity(IdentityBehavior::Multiplicative),
        OperationSpec::variadic(DIV)
            .with_identity(IdentityBehavior::Multiplicative)
            .with_inverse(INVERT),
        OperationSpec::new(ATAN, 1, Some(2)),
    ];
    specs.extend(UNARY_OPERATIONS.iter().map(|name| OperationSpec::unary(name)));
    specs.extend(BINARY_OPERATIONS.iter().map(|name| OperationSpec::binary(name)));
    specs
}
