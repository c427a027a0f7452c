//! Native number datatype module for generic arithmetic
//!
//! Teaches a [`Registry`] how to compute with [`Value::Integer`] and
//! [`Value::Float`] operands.
//!
//! # Features
//!
//! - **Identities**: `0` / `1` and `0.0` / `1.0` are the additive and
//!   multiplicative identities of their kinds
//! - **Field operations**: exact integer arithmetic with overflow detection,
//!   floats for every mixed combination
//! - **Integer operations**: quotient, remainder, modulo, exact division,
//!   gcd and lcm
//! - **Elementary functions**: sqrt, exp, log, trigonometric and hyperbolic
//!   functions, with exact answers where they are known
//! - **Degenerate structures**: complex and matrix accessors for reals
//!
//! # Example
//!
//! ```rust
//! use arith_core::{Arithmetic, Registry, Value};
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//! arith_numbers::install(&registry)?;
//! let arith = Arithmetic::new(Arc::new(registry));
//!
//! assert_eq!(arith.add(&[Value::Integer(2), Value::Integer(3)])?, Value::Integer(5));
//! assert_eq!(arith.sqrt(&Value::Integer(49))?, Value::Integer(7));
//! # Ok::<(), arith_core::Error>(())
//! ```

mod arithmetic;
mod integer;
pub mod scalar;
mod structure;
mod transcendental;

pub use scalar::{scalar_kinds, scalar_pairs, Scalar};

use arith_core::{IdentityEntry, Kind, Registry, Result, Value};

/// Register identities and every native number method with `registry`
pub fn install(registry: &Registry) -> Result<()> {
    registry.register_identity(
        Kind::Integer,
        IdentityEntry::constants(Value::Integer(0), Value::Integer(1)),
    )?;
    registry.register_identity(
        Kind::Float,
        IdentityEntry::constants(Value::Float(0.0), Value::Float(1.0)),
    )?;

    arithmetic::install(registry)?;
    integer::install(registry)?;
    transcendental::install(registry)?;
    structure::install(registry)?;

    log::debug!(
        "Installed native number methods across {} operations",
        registry.operation_names().len()
    );
    Ok(())
}
