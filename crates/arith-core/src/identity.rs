//! Identity-element predicates and constructors per kind
//!
//! Datatype modules describe their additive and multiplicative identities
//! with an [`IdentityEntry`]. Lookups walk from a value's kind up through its
//! ancestors, so an entry registered for a general kind covers every kind
//! beneath it that has no entry of its own.

use crate::{Kind, Result, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Value-level predicate
pub type ValuePredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Builds a value shaped like its argument
pub type ValueConstructor = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// Identity description for one kind
///
/// Every part is optional: a kind may know its zero without having a one,
/// or recognise identities without being able to construct them.
#[derive(Clone, Default)]
pub struct IdentityEntry {
    pub is_zero: Option<ValuePredicate>,
    pub is_one: Option<ValuePredicate>,
    pub zero_like: Option<ValueConstructor>,
    pub one_like: Option<ValueConstructor>,
}

impl IdentityEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for a kind whose identities are fixed values compared by equality
    pub fn constants(zero: Value, one: Value) -> Self {
        let (z, o) = (zero.clone(), one.clone());
        Self::new()
            .with_zero(move |v| *v == z)
            .with_one(move |v| *v == o)
            .with_zero_like(move |_| Ok(zero.clone()))
            .with_one_like(move |_| Ok(one.clone()))
    }

    pub fn with_zero<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.is_zero = Some(Arc::new(predicate));
        self
    }

    pub fn with_one<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.is_one = Some(Arc::new(predicate));
        self
    }

    pub fn with_zero_like<C>(mut self, constructor: C) -> Self
    where
        C: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.zero_like = Some(Arc::new(constructor));
        self
    }

    pub fn with_one_like<C>(mut self, constructor: C) -> Self
    where
        C: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.one_like = Some(Arc::new(constructor));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.is_zero.is_none()
            && self.is_one.is_none()
            && self.zero_like.is_none()
            && self.one_like.is_none()
    }
}

/// Identity entries keyed by kind
#[derive(Default)]
pub struct IdentityTable {
    entries: HashMap<Kind, IdentityEntry>,
}

impl IdentityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `entry` for `kind`, returning whether an entry was replaced
    pub fn insert(&mut self, kind: Kind, entry: IdentityEntry) -> bool {
        self.entries.insert(kind, entry).is_some()
    }

    pub fn get(&self, kind: &Kind) -> Option<&IdentityEntry> {
        self.entries.get(kind)
    }

    /// Nearest part selected by `pick` along `lineage` (kind first, root last)
    pub fn resolve<T, F>(&self, lineage: &[Kind], pick: F) -> Option<T>
    where
        F: Fn(&IdentityEntry) -> Option<T>,
    {
        lineage
            .iter()
            .filter_map(|kind| self.entries.get(kind))
            .find_map(pick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_entry() {
        let entry = IdentityEntry::constants(Value::Integer(0), Value::Integer(1));
        let is_zero = entry.is_zero.as_ref().unwrap();
        let is_one = entry.is_one.as_ref().unwrap();

        assert!(is_zero(&Value::Integer(0)));
        assert!(!is_zero(&Value::Integer(1)));
        assert!(is_one(&Value::Integer(1)));

        let zero_like = entry.zero_like.as_ref().unwrap();
        assert_eq!(zero_like(&Value::Integer(42)).unwrap(), Value::Integer(0));
    }

    #[test]
    fn test_resolve_walks_lineage() {
        let mut table = IdentityTable::new();
        table.insert(
            Kind::Real,
            IdentityEntry::new().with_zero(|v| v.as_f64() == Some(0.0)),
        );
        table.insert(
            Kind::Integer,
            IdentityEntry::new().with_one(|v| *v == Value::Integer(1)),
        );

        let lineage = [Kind::Integer, Kind::Real, Kind::Number];
        // Integer has no zero predicate of its own, so the real entry answers
        let is_zero = table.resolve(&lineage, |e| e.is_zero.clone()).unwrap();
        assert!(is_zero(&Value::Integer(0)));

        let is_one = table.resolve(&lineage, |e| e.is_one.clone()).unwrap();
        assert!(is_one(&Value::Integer(1)));

        assert!(table.resolve(&[Kind::Text], |e| e.is_zero.clone()).is_none());
    }

    #[test]
    fn test_insert_reports_replacement() {
        let mut table = IdentityTable::new();
        assert!(!table.insert(Kind::Float, IdentityEntry::new()));
        assert!(table.insert(Kind::Float, IdentityEntry::new()));
        assert!(table.get(&Kind::Float).unwrap().is_empty());
    }
}
