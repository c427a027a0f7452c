//! Arity and composition layer for generic arithmetic
//!
//! Function-building utilities that keep arity metadata exact, plus the
//! function-algebra datatype module.
//!
//! # Features
//!
//! - **Composition**: [`compose`] keeps the innermost function's arity
//! - **Argument adjustment**: [`arg_shift`] and [`arg_scale`] preserve the
//!   adjusted function's arity
//! - **Summation**: [`sum`] reduces a function over a half-open integer range
//!   with the generic `add`
//! - **Function algebra**: [`install`] lifts `add`, `mul`, `sin`, ... to
//!   functions, so `f + g` is again a function
//!
//! # Example
//!
//! ```rust
//! use arith_core::{Arithmetic, Arity, Function, Registry, Value};
//! use arith_function::{arg_shift, sum};
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//! arith_numbers::install(&registry)?;
//! let arith = Arithmetic::new(Arc::new(registry));
//!
//! let square = Value::from(Function::named("square", Arity::Exactly(1), |arith, args| {
//!     arith.square(&args[0])
//! }));
//! assert_eq!(sum(&arith, &square, 1, 6)?, Value::Integer(55));
//!
//! let shifted = arg_shift(&square, &[Value::Integer(3)])?;
//! assert_eq!(arith.apply(&shifted, &[Value::Integer(4)])?, Value::Integer(49));
//! # Ok::<(), arith_core::Error>(())
//! ```

pub mod algebra;
pub mod combinators;

pub use algebra::install;
pub use arith_core::arity;
pub use combinators::{arg_scale, arg_shift, compose, identity, sum};
