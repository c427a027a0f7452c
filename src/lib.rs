//! Generic arithmetic over an open set of datatypes
//!
//! One set of operation names (`add`, `mul`, `negate`, `sin`, `transpose`,
//! ...) resolves per call on the kinds of its operands. Datatype modules
//! extend the engine by registering kinds, identity elements and methods
//! with an explicit [`Registry`].
//!
//! This crate is the composition root: it re-exports the member crates and
//! assembles a registry with the native number and function modules
//! installed.
//!
//! # Example
//!
//! ```rust
//! use generic_arith::{standard_arithmetic, Value};
//!
//! let arith = standard_arithmetic()?;
//! let x = arith.add(&[Value::Integer(1), Value::Float(0.5), Value::Integer(2)])?;
//! assert_eq!(x, Value::Float(3.5));
//!
//! // Identity elements work for kinds with no registered methods at all
//! let text = Value::from("opaque");
//! assert_eq!(arith.mul(&[Value::Integer(1), text.clone()])?, text);
//! # Ok::<(), generic_arith::Error>(())
//! ```

use std::sync::Arc;

// Re-export workspace crates
pub use arith_core::*;
pub use arith_function::{arg_scale, arg_shift, compose, identity, sum};
pub use arith_numbers::Scalar;
pub use {arith_core, arith_function, arith_numbers};

/// Install every bundled datatype module into `registry`
pub fn install_standard_modules(registry: &Registry) -> Result<()> {
    arith_numbers::install(registry)?;
    arith_function::install(registry)?;
    log::debug!(
        "Installed standard modules: {} operations defined",
        registry.operation_names().len()
    );
    Ok(())
}

/// Registry with the standard operations and every bundled datatype module
pub fn standard_registry() -> Result<Registry> {
    let registry = Registry::new();
    install_standard_modules(&registry)?;
    Ok(registry)
}

/// Ready-to-use [`Arithmetic`] over [`standard_registry`]
pub fn standard_arithmetic() -> Result<Arithmetic> {
    Ok(Arithmetic::new(Arc::new(standard_registry()?)))
}
