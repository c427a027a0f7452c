//! Error types for generic arithmetic
//!
//! Provides a unified error type for all generic-arith crates.

use crate::kind::DispatchKey;
use thiserror::Error;

/// Core error type for generic dispatch
#[derive(Error, Debug)]
pub enum Error {
    /// An operand classified as an opaque native object reached structural dispatch
    #[error("Unclassifiable operand for {operation}: argument {position} is an opaque {type_name}")]
    UnclassifiableOperand {
        operation: String,
        position: usize,
        type_name: String,
    },

    /// No method registered for the operand kinds and no identity short-circuit applied
    #[error("No applicable method for {operation} on {kinds}")]
    NoApplicableMethod {
        operation: String,
        kinds: DispatchKey,
    },

    /// A callable or factor list does not fit the computed arity
    #[error("Arity mismatch in {context}: {detail}")]
    ArityMismatch { context: String, detail: String },

    /// Invalid kind, identity, operation or method registration
    #[error("Malformed registration: {0}")]
    MalformedRegistration(String),

    /// Operation name was never defined
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Failure raised by a method implementation
    #[error("Computation error: {0}")]
    Computation(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a dispatch failure for `operation` over `kinds`
    pub fn no_method(operation: &str, kinds: DispatchKey) -> Self {
        Self::NoApplicableMethod {
            operation: operation.to_string(),
            kinds,
        }
    }

    /// Create an error for a call with the wrong number of arguments
    pub fn arity_mismatch(context: &str, expected: impl std::fmt::Display, actual: usize) -> Self {
        Self::ArityMismatch {
            context: context.to_string(),
            detail: format!("expected {expected} argument(s), got {actual}"),
        }
    }

    /// Create an error for two arities with an empty intersection
    pub fn incompatible_arities(
        context: &str,
        left: impl std::fmt::Display,
        right: impl std::fmt::Display,
    ) -> Self {
        Self::ArityMismatch {
            context: context.to_string(),
            detail: format!("incompatible arities {left} and {right}"),
        }
    }

    /// Create an error for applying a value that is not callable
    pub fn not_callable(context: &str, value: &crate::Value) -> Self {
        Self::ArityMismatch {
            context: context.to_string(),
            detail: format!("{} value is not callable", value.type_name()),
        }
    }

    /// Create an error for a malformed registration
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRegistration(message.into())
    }

    /// Create an error for a poisoned lock
    pub(crate) fn poisoned(what: &str) -> Self {
        Self::Computation(format!("{what} lock poisoned"))
    }
}
