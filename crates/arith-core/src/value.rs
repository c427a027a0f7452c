//! Dynamic operand values
//!
//! [`Value`] is the operand type every generic operation accepts. Native
//! numbers, structures and callables have their own variants; anything else
//! travels as an [`Object`] and is classified through registered kind rules.

use crate::{Arithmetic, Arity, Kind, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Body of a callable value
///
/// Bodies receive the generic-operation context so that functions built from
/// other functions can keep dispatching through the same registry.
pub type FunctionBody = dyn Fn(&Arithmetic, &[Value]) -> Result<Value> + Send + Sync;

/// A callable value with arity metadata
#[derive(Clone)]
pub struct Function {
    name: Option<Arc<str>>,
    arity: Arity,
    body: Arc<FunctionBody>,
}

impl Function {
    pub fn new<F>(arity: Arity, body: F) -> Self
    where
        F: Fn(&Arithmetic, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: None,
            arity,
            body: Arc::new(body),
        }
    }

    pub fn named<F>(name: &str, arity: Arity, body: F) -> Self
    where
        F: Fn(&Arithmetic, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: Some(Arc::from(name)),
            ..Self::new(arity, body)
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Run the body without checking the argument count
    pub(crate) fn invoke(&self, arith: &Arithmetic, args: &[Value]) -> Result<Value> {
        (self.body)(arith, args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}

/// Opaque host value owned by an external datatype module
#[derive(Clone)]
pub struct Object {
    type_name: &'static str,
    payload: Arc<dyn Any + Send + Sync>,
}

impl Object {
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            payload: Arc::new(payload),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.payload.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Object<{}>", self.type_name)
    }
}

/// Operand of every generic operation
#[derive(Clone, Debug)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
    /// Leaf of a symbolic expression
    Symbol(String),
    /// Structure; a vector of callables is itself callable
    Vector(Vec<Value>),
    Function(Function),
    Object(Object),
}

impl Value {
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(name.to_string())
    }

    pub fn object<T: Any + Send + Sync>(payload: T) -> Self {
        Value::Object(Object::new(payload))
    }

    /// Kind implied by the variant alone, before any registered rule
    pub fn builtin_kind(&self) -> Kind {
        match self {
            Value::Integer(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Boolean(_) => Kind::Boolean,
            Value::Text(_) => Kind::Text,
            Value::Symbol(_) => Kind::Symbolic,
            Value::Vector(_) => Kind::Vector,
            Value::Function(_) => Kind::Function,
            Value::Object(_) => Kind::Native,
        }
    }

    /// Rust type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "i64",
            Value::Float(_) => "f64",
            Value::Boolean(_) => "bool",
            Value::Text(_) => "text",
            Value::Symbol(_) => "symbol",
            Value::Vector(_) => "vector",
            Value::Function(_) => "function",
            Value::Object(o) => o.type_name(),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as `f64`, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[Value]> {
        match self {
            Value::Vector(items) => Some(items),
            _ => None,
        }
    }

    /// Functions, and vectors whose every component is callable
    pub fn is_callable(&self) -> bool {
        match self {
            Value::Function(_) => true,
            Value::Vector(items) => !items.is_empty() && items.iter().all(Value::is_callable),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Symbol(s) => f.write_str(s),
            Value::Vector(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Function(func) => match func.name() {
                Some(name) => write!(f, "#<function {name}>"),
                None => f.write_str("#<function>"),
            },
            Value::Object(o) => write!(f, "#<{}>", o.type_name()),
        }
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Integer(val)
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Value::Integer(val as i64)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Float(val)
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Boolean(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::Text(val.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(val: Vec<Value>) -> Self {
        Value::Vector(val)
    }
}

impl From<Function> for Value {
    fn from(val: Function) -> Self {
        Value::Function(val)
    }
}
