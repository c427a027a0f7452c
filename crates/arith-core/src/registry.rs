//! Dispatch registry
//!
//! The registry owns everything dispatch consults: the kind hierarchy and
//! classification rules, the identity table, and one method table per
//! operation. It is an explicit object handed to [`Arithmetic`](crate::Arithmetic)
//! rather than process-global state, so tests can build isolated registries.
//!
//! # Thread Safety
//!
//! Registration is rare and lookup is hot. Each operation's method table sits
//! behind its own `RwLock`, the operation directory is a `DashMap`, and the
//! kind and identity tables each have a `RwLock`. Methods and identity
//! predicates are cloned out of their tables before they run, so a method may
//! freely re-enter dispatch. Classification rules run under the kind table's
//! read lock and must not register kinds.

use crate::identity::{IdentityEntry, IdentityTable, ValueConstructor, ValuePredicate};
use crate::kind::{KindPredicate, KindTable};
use crate::operations::{standard_operations, OperationSpec};
use crate::{
    Arithmetic, DispatchConfig, DispatchKey, Error, Kind, OverwritePolicy, RegistryBuilder,
    Result, Value,
};
use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Signature shared by every method implementation
pub type MethodFn = dyn Fn(&Arithmetic, &[Value]) -> Result<Value> + Send + Sync;

/// Registered implementation of an operation for one dispatch key
pub type Method = Arc<MethodFn>;

/// A named operation and its method table
pub struct Operation {
    spec: OperationSpec,
    methods: RwLock<HashMap<DispatchKey, Method>>,
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let methods = self.methods.read().map(|m| m.len()).ok();
        f.debug_struct("Operation")
            .field("spec", &self.spec)
            .field("methods", &methods)
            .finish()
    }
}

impl Operation {
    fn new(spec: OperationSpec) -> Self {
        Self {
            spec,
            methods: RwLock::new(HashMap::new()),
        }
    }

    pub fn spec(&self) -> &OperationSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        self.spec.name()
    }

    /// Exact-match lookup
    pub fn lookup(&self, key: &DispatchKey) -> Result<Option<Method>> {
        let methods = self
            .methods
            .read()
            .map_err(|_| Error::poisoned("method table"))?;
        Ok(methods.get(key).cloned())
    }

    /// Keys with a registered method, in no particular order
    pub fn keys(&self) -> Result<Vec<DispatchKey>> {
        let methods = self
            .methods
            .read()
            .map_err(|_| Error::poisoned("method table"))?;
        Ok(methods.keys().cloned().collect())
    }

    pub fn method_count(&self) -> Result<usize> {
        Ok(self.keys()?.len())
    }

    fn insert(&self, key: DispatchKey, method: Method, policy: OverwritePolicy) -> Result<()> {
        let mut methods = self
            .methods
            .write()
            .map_err(|_| Error::poisoned("method table"))?;
        if methods.contains_key(&key) {
            if policy == OverwritePolicy::Reject {
                return Err(Error::malformed(format!(
                    "{} already has a method for {key}",
                    self.name()
                )));
            }
            log::warn!("Overwriting {} method for {key}", self.name());
        } else {
            log::debug!("Registered {} method for {key}", self.name());
        }
        methods.insert(key, method);
        Ok(())
    }
}

/// Snapshot of dispatch counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Calls answered by an identity element without table lookup
    pub identity_shortcuts: usize,
    /// Calls answered by a registered method
    pub table_hits: usize,
    /// Calls that failed to resolve
    pub failures: usize,
}

#[derive(Default)]
struct DispatchCounters {
    identity_shortcuts: AtomicUsize,
    table_hits: AtomicUsize,
    failures: AtomicUsize,
}

/// Kinds, identities and operation tables for one arithmetic universe
pub struct Registry {
    config: DispatchConfig,
    kinds: RwLock<KindTable>,
    identities: RwLock<IdentityTable>,
    operations: DashMap<String, Arc<Operation>>,
    counters: DispatchCounters,
}

impl Registry {
    /// Registry with the default configuration and the standard operations
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    pub fn with_config(config: DispatchConfig) -> Self {
        let registry = Self::empty(config);
        for spec in standard_operations() {
            registry
                .operations
                .insert(spec.name().to_string(), Arc::new(Operation::new(spec)));
        }
        registry
    }

    /// Registry with no operations defined
    pub fn empty(config: DispatchConfig) -> Self {
        Self {
            config,
            kinds: RwLock::new(KindTable::new()),
            identities: RwLock::new(IdentityTable::new()),
            operations: DashMap::new(),
            counters: DispatchCounters::default(),
        }
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Kinds
    // ------------------------------------------------------------------

    /// Place `kind` in the hierarchy under `parent`
    pub fn declare_kind(&self, kind: Kind, parent: Option<Kind>) -> Result<()> {
        log::debug!("Declaring kind {kind} (parent: {parent:?})");
        self.kinds
            .write()
            .map_err(|_| Error::poisoned("kind table"))?
            .declare(kind, parent)
    }

    /// Teach the classifier to recognise values of `kind`
    pub fn register_kind<P>(&self, kind: Kind, predicate: P) -> Result<()>
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        log::debug!("Registering classification rule for {kind}");
        let predicate: KindPredicate = Arc::new(predicate);
        self.kinds
            .write()
            .map_err(|_| Error::poisoned("kind table"))?
            .add_rule(kind, predicate)
    }

    /// Kind of a single value
    pub fn kind_of(&self, value: &Value) -> Result<Kind> {
        let kinds = self.kinds.read().map_err(|_| Error::poisoned("kind table"))?;
        Ok(kinds.classify(value))
    }

    /// Dispatch key for an operand list
    pub fn key_of(&self, values: &[Value]) -> Result<DispatchKey> {
        let kinds = self.kinds.read().map_err(|_| Error::poisoned("kind table"))?;
        Ok(DispatchKey::new(values.iter().map(|v| kinds.classify(v)).collect()))
    }

    /// Whether `specific` equals `general` or descends from it
    pub fn is_kind_compatible(&self, specific: &Kind, general: &Kind) -> Result<bool> {
        let kinds = self.kinds.read().map_err(|_| Error::poisoned("kind table"))?;
        Ok(kinds.is_compatible(specific, general))
    }

    /// Kind followed by its ancestors
    pub fn lineage(&self, kind: &Kind) -> Result<Vec<Kind>> {
        let kinds = self.kinds.read().map_err(|_| Error::poisoned("kind table"))?;
        Ok(kinds.lineage(kind))
    }

    /// Predicate accepting every value whose kind is compatible with `value`'s
    pub fn kind_predicate(&self, value: &Value) -> Result<impl Fn(&Value) -> bool + '_> {
        let kind = self.kind_of(value)?;
        Ok(move |other: &Value| {
            self.kind_of(other)
                .and_then(|k| self.is_kind_compatible(&k, &kind))
                .unwrap_or(false)
        })
    }

    // ------------------------------------------------------------------
    // Identities
    // ------------------------------------------------------------------

    /// Install identity predicates and constructors for `kind`
    pub fn register_identity(&self, kind: Kind, entry: IdentityEntry) -> Result<()> {
        if kind == Kind::Native {
            return Err(Error::malformed("the native kind cannot carry identities"));
        }
        if entry.is_empty() {
            return Err(Error::malformed(format!("empty identity entry for {kind}")));
        }
        let replaced = self
            .identities
            .write()
            .map_err(|_| Error::poisoned("identity table"))?
            .insert(kind.clone(), entry);
        if replaced {
            log::warn!("Replaced identity entry for {kind}");
        } else {
            log::debug!("Registered identity entry for {kind}");
        }
        Ok(())
    }

    fn resolve_identity<T, F>(&self, value: &Value, pick: F) -> Result<Option<T>>
    where
        F: Fn(&IdentityEntry) -> Option<T>,
    {
        let lineage = self.lineage(&self.kind_of(value)?)?;
        let identities = self
            .identities
            .read()
            .map_err(|_| Error::poisoned("identity table"))?;
        Ok(identities.resolve(&lineage, pick))
    }

    /// Whether `value` is the additive identity of its kind
    pub fn is_additive_identity(&self, value: &Value) -> Result<bool> {
        let predicate: Option<ValuePredicate> =
            self.resolve_identity(value, |e| e.is_zero.clone())?;
        Ok(predicate.is_some_and(|p| p(value)))
    }

    /// Whether `value` is the multiplicative identity of its kind
    pub fn is_multiplicative_identity(&self, value: &Value) -> Result<bool> {
        let predicate: Option<ValuePredicate> =
            self.resolve_identity(value, |e| e.is_one.clone())?;
        Ok(predicate.is_some_and(|p| p(value)))
    }

    /// Additive identity matching `value`'s kind
    pub fn zero_like(&self, value: &Value) -> Result<Value> {
        let constructor: Option<ValueConstructor> =
            self.resolve_identity(value, |e| e.zero_like.clone())?;
        match constructor {
            Some(make) => make(value),
            None => Err(Error::no_method("zero-like", self.key_of(std::slice::from_ref(value))?)),
        }
    }

    /// Multiplicative identity matching `value`'s kind
    pub fn one_like(&self, value: &Value) -> Result<Value> {
        let constructor: Option<ValueConstructor> =
            self.resolve_identity(value, |e| e.one_like.clone())?;
        match constructor {
            Some(make) => make(value),
            None => Err(Error::no_method("one-like", self.key_of(std::slice::from_ref(value))?)),
        }
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Create a new named operation with an empty method table
    pub fn define_operation(&self, spec: OperationSpec) -> Result<Arc<Operation>> {
        spec.validate()?;
        if let Some(inverse) = spec.inverse() {
            let inverse_op = self.operation(inverse).map_err(|_| {
                Error::malformed(format!(
                    "inverse {inverse} of {} is not defined",
                    spec.name()
                ))
            })?;
            if !inverse_op.spec().is_unary() {
                return Err(Error::malformed(format!(
                    "inverse {inverse} of {} must be unary",
                    spec.name()
                )));
            }
        }
        match self.operations.entry(spec.name().to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(Error::malformed(format!(
                "duplicate operation {}",
                spec.name()
            ))),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                log::debug!(
                    "Defined operation {} ({})",
                    spec.name(),
                    spec.arity_description()
                );
                let operation = Arc::new(Operation::new(spec));
                slot.insert(Arc::clone(&operation));
                Ok(operation)
            }
        }
    }

    pub fn operation(&self, name: &str) -> Result<Arc<Operation>> {
        self.operations
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| Error::UnknownOperation(name.to_string()))
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Defined operation names, sorted
    pub fn operation_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.operations.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Make `operation` work on operands of the kinds in `key`
    pub fn register_method<K, F>(&self, operation: &str, key: K, method: F) -> Result<()>
    where
        K: Into<DispatchKey>,
        F: Fn(&Arithmetic, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.register_method_arc(operation, key.into(), Arc::new(method))
    }

    /// Register an already shared method, e.g. one implementation for several keys
    pub fn register_method_arc(
        &self,
        operation: &str,
        key: DispatchKey,
        method: Method,
    ) -> Result<()> {
        let op = self.operation(operation).map_err(|_| {
            Error::malformed(format!(
                "cannot register method for unknown operation {operation}"
            ))
        })?;
        if !op.spec().accepts_key_length(key.len()) {
            return Err(Error::malformed(format!(
                "{operation} can never be dispatched on {} operand(s) {key}",
                key.len()
            )));
        }
        if key.contains(&Kind::Native) {
            return Err(Error::malformed(format!(
                "{operation} key {key} uses the native fallback kind"
            )));
        }
        op.insert(key, method, self.config.overwrite)
    }

    /// Exact-match lookup by operation name
    pub fn lookup(&self, operation: &str, key: &DispatchKey) -> Result<Option<Method>> {
        self.operation(operation)?.lookup(key)
    }

    // ------------------------------------------------------------------
    // Statistics
    // ------------------------------------------------------------------

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            identity_shortcuts: self.counters.identity_shortcuts.load(Ordering::Relaxed),
            table_hits: self.counters.table_hits.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    pub fn reset_stats(&self) {
        self.counters.identity_shortcuts.store(0, Ordering::Relaxed);
        self.counters.table_hits.store(0, Ordering::Relaxed);
        self.counters.failures.store(0, Ordering::Relaxed);
    }

    pub(crate) fn record_shortcut(&self) {
        self.counters.identity_shortcuts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_hit(&self) {
        self.counters.table_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.counters.failures.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
