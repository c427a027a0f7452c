//! Kind classification for dispatch
//!
//! A [`Kind`] is the unit of dispatch: every operand is classified to exactly
//! one kind, and an operation's method table is keyed by the ordered tuple of
//! operand kinds ([`DispatchKey`]). Kinds form a forest through declared
//! parents, so a value's kind may also satisfy a more general kind.
//!
//! # Classification Rules
//!
//! 1. The value's variant supplies a built-in candidate (`Object` payloads
//!    supply [`Kind::Native`]).
//! 2. Every registered rule whose predicate accepts the value is a candidate.
//! 3. The deepest candidate in the hierarchy wins. At equal depth the most
//!    recently registered rule wins, and any rule beats the built-in kind.

use crate::{Error, Result, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Classification tag for a family of values
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Number,
    Real,
    Integer,
    Float,
    Boolean,
    Text,
    Symbolic,
    Vector,
    Function,
    /// Universal fallback for values no rule recognises
    Native,
    /// Kind declared by an external datatype module
    Custom(Arc<str>),
}

impl Kind {
    /// Create a custom kind tag
    pub fn custom(name: &str) -> Self {
        Kind::Custom(Arc::from(name))
    }

    /// Human readable name used in diagnostics
    pub fn name(&self) -> &str {
        match self {
            Kind::Number => "number",
            Kind::Real => "real",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Text => "text",
            Kind::Symbolic => "symbolic",
            Kind::Vector => "vector",
            Kind::Function => "function",
            Kind::Native => "native",
            Kind::Custom(name) => name.as_ref(),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered operand kinds identifying one method of an operation
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DispatchKey(Vec<Kind>);

impl DispatchKey {
    pub fn new(kinds: Vec<Kind>) -> Self {
        Self(kinds)
    }

    pub fn kinds(&self) -> &[Kind] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, kind: &Kind) -> bool {
        self.0.contains(kind)
    }
}

impl From<Vec<Kind>> for DispatchKey {
    fn from(kinds: Vec<Kind>) -> Self {
        Self(kinds)
    }
}

impl<const N: usize> From<[Kind; N]> for DispatchKey {
    fn from(kinds: [Kind; N]) -> Self {
        Self(kinds.to_vec())
    }
}

impl fmt::Display for DispatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{kind}")?;
        }
        f.write_str(")")
    }
}

/// Predicate teaching the classifier to recognise values of a kind
pub type KindPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

struct KindRule {
    kind: Kind,
    predicate: KindPredicate,
}

/// Kind hierarchy plus the registered classification rules
pub struct KindTable {
    parents: HashMap<Kind, Option<Kind>>,
    rules: Vec<KindRule>,
}

impl KindTable {
    /// Table with the built-in hierarchy: integer and float are reals, reals are numbers
    pub fn new() -> Self {
        let mut parents = HashMap::new();
        parents.insert(Kind::Number, None);
        parents.insert(Kind::Real, Some(Kind::Number));
        parents.insert(Kind::Integer, Some(Kind::Real));
        parents.insert(Kind::Float, Some(Kind::Real));
        for root in [
            Kind::Boolean,
            Kind::Text,
            Kind::Symbolic,
            Kind::Vector,
            Kind::Function,
            Kind::Native,
        ] {
            parents.insert(root, None);
        }
        Self {
            parents,
            rules: Vec::new(),
        }
    }

    /// Record `kind` in the hierarchy under `parent`
    ///
    /// Re-declaring with the same parent is a no-op. The parent must already
    /// be declared, which keeps the hierarchy acyclic.
    pub fn declare(&mut self, kind: Kind, parent: Option<Kind>) -> Result<()> {
        if kind == Kind::Native || parent.as_ref() == Some(&Kind::Native) {
            return Err(Error::malformed("the native kind cannot be declared or extended"));
        }
        if let Some(parent) = &parent {
            if *parent == kind {
                return Err(Error::malformed(format!("kind {kind} cannot be its own parent")));
            }
            if !self.parents.contains_key(parent) {
                return Err(Error::malformed(format!(
                    "parent kind {parent} of {kind} is not declared"
                )));
            }
        }
        match self.parents.get(&kind) {
            Some(existing) if *existing == parent => Ok(()),
            Some(existing) => Err(Error::malformed(format!(
                "kind {kind} already declared with parent {}",
                existing.as_ref().map_or("none", Kind::name)
            ))),
            None => {
                self.parents.insert(kind, parent);
                Ok(())
            }
        }
    }

    /// Add a classification rule, declaring `kind` as a root if unknown
    pub fn add_rule(&mut self, kind: Kind, predicate: KindPredicate) -> Result<()> {
        if kind == Kind::Native {
            return Err(Error::malformed("values cannot be classified as native by rule"));
        }
        self.parents.entry(kind.clone()).or_insert(None);
        self.rules.push(KindRule { kind, predicate });
        Ok(())
    }

    pub fn is_declared(&self, kind: &Kind) -> bool {
        self.parents.contains_key(kind)
    }

    pub fn parent(&self, kind: &Kind) -> Option<&Kind> {
        self.parents.get(kind).and_then(Option::as_ref)
    }

    /// The kind itself followed by each ancestor up to its root
    pub fn lineage(&self, kind: &Kind) -> Vec<Kind> {
        let mut lineage = vec![kind.clone()];
        let mut current = kind;
        while let Some(parent) = self.parent(current) {
            lineage.push(parent.clone());
            current = parent;
        }
        lineage
    }

    /// Distance from the root of the kind's tree
    pub fn depth(&self, kind: &Kind) -> usize {
        self.lineage(kind).len() - 1
    }

    /// Whether `specific` equals `general` or descends from it
    pub fn is_compatible(&self, specific: &Kind, general: &Kind) -> bool {
        self.lineage(specific).iter().any(|k| k == general)
    }

    /// Compute the kind of `value`
    pub fn classify(&self, value: &Value) -> Kind {
        let builtin = value.builtin_kind();
        let mut best_depth = self.depth(&builtin);
        let mut best = builtin;
        for rule in &self.rules {
            if (rule.predicate)(value) {
                let depth = self.depth(&rule.kind);
                if depth >= best_depth {
                    best_depth = depth;
                    best = rule.kind.clone();
                }
            }
        }
        best
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

impl Default for KindTable {
    fn default() -> Self {
        Self::new()
    }
}
