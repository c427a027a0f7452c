//! Generic-operation dispatch engine
//!
//! This crate provides the core of generic arithmetic: one set of operation
//! names (`add`, `mul`, `negate`, `sin`, `transpose`, ...) that resolves per
//! call on the combination of operand kinds, for an open set of datatypes.
//!
//! # Architecture Overview
//!
//! 1. **Kind Classifier** ([`kind`]) - maps every [`Value`] to a [`Kind`];
//!    external modules extend it with declared kinds and predicates
//! 2. **Identity Predicates** ([`identity`]) - per-kind zero/one recognition
//!    and construction
//! 3. **Dispatch Registry** ([`registry`]) - one method table per operation,
//!    keyed by exact [`DispatchKey`]
//! 4. **Generic Operation Layer** ([`generic`]) - the [`Arithmetic`] call
//!    surface: identity short-circuit first, table lookup second
//! 5. **Arity** ([`arity`]) - arity metadata for callables and vectors of
//!    callables
//!
//! # Example
//!
//! ```rust
//! use arith_core::{Arithmetic, IdentityEntry, Kind, Registry, Value};
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//! registry.register_identity(
//!     Kind::Integer,
//!     IdentityEntry::constants(Value::Integer(0), Value::Integer(1)),
//! )?;
//!
//! let arith = Arithmetic::new(Arc::new(registry));
//!
//! // No add method exists for text, but zero is still the additive identity
//! let text = Value::from("unchanged");
//! assert_eq!(arith.add(&[Value::Integer(0), text.clone()])?, text);
//! # Ok::<(), arith_core::Error>(())
//! ```

pub mod arity;
pub mod builder;
pub mod config;
pub mod error;
pub mod generic;
pub mod identity;
pub mod kind;
pub mod operations;
pub mod registry;
pub mod value;

// Re-export core types
pub use error::{Error, Result};

pub use arity::{arity, Arity};
pub use builder::RegistryBuilder;
pub use config::{DispatchConfig, OverwritePolicy};
pub use generic::Arithmetic;
pub use identity::{IdentityEntry, ValueConstructor, ValuePredicate};
pub use kind::{DispatchKey, Kind, KindPredicate};
pub use operations::{IdentityBehavior, OperationSpec};
pub use registry::{DispatchStats, Method, MethodFn, Operation, Registry};
pub use value::{Function, FunctionBody, Object, Value};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Arithmetic, Arity, DispatchKey, Error, Function, IdentityBehavior, IdentityEntry, Kind,
        OperationSpec, Registry, Result, Value,
    };
}
