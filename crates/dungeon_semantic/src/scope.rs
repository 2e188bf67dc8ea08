//! Hierarchical namespaces.

use std::fmt;

use dungeon_foundation::LtMap;

use crate::symbol::SymbolId;

/// Handle to a [`Scope`] owned by a [`SymbolTable`](crate::SymbolTable).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub(crate) u32);

impl ScopeId {
    /// The global scope, created with every table. Built-in types live here.
    pub const GLOBAL: ScopeId = ScopeId(0);

    /// Returns the raw index of this scope.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeId({})", self.0)
    }
}

/// A mapping from names to symbols with an optional parent for fallback lookup.
///
/// A scope refers to its parent by handle and does not own it.
#[derive(Clone, Debug)]
pub struct Scope {
    name: String,
    parent: Option<ScopeId>,
    symbols: LtMap<String, SymbolId>,
}

impl Scope {
    pub(crate) fn new(name: impl Into<String>, parent: Option<ScopeId>) -> Self {
        Self {
            name: name.into(),
            parent,
            symbols: LtMap::new(),
        }
    }

    /// Returns the scope's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the enclosing scope.
    #[must_use]
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Looks up a name in this scope only.
    ///
    /// Returns [`SymbolId::NULL`] if the name is not bound here.
    #[must_use]
    pub fn lookup(&self, name: &str) -> SymbolId {
        self.symbols.get(name).copied().unwrap_or(SymbolId::NULL)
    }

    /// Returns true if the name is bound in this scope.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Returns the number of local bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if nothing is bound here.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the local bindings in no particular order.
    pub fn symbols(&self) -> impl Iterator<Item = (&str, SymbolId)> {
        self.symbols.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub(crate) fn insert(&mut self, name: String, symbol: SymbolId) {
        self.symbols.insert(name, symbol);
    }
}
