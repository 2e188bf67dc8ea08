//! Named, typed bindings.

use std::fmt;

use crate::scope::ScopeId;
use crate::types::TypeRef;

/// Handle to a [`Symbol`] owned by a [`SymbolTable`](crate::SymbolTable).
///
/// Handles compare by identity. Index 0 is reserved for the null symbol,
/// which stands for a failed resolution.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    /// The null symbol, returned when a name does not resolve.
    pub const NULL: SymbolId = SymbolId(0);

    /// Returns the raw index of this symbol.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns true if this is the null symbol.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == Self::NULL.0
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "SymbolId(null)")
        } else {
            write!(f, "SymbolId({})", self.0)
        }
    }
}

/// What a symbol names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// The null symbol.
    Null,
    /// A type registered in a scope.
    Type,
    /// A member set from DSL literal data.
    Field,
    /// A member supplied by the execution context at instantiation.
    Context,
    /// A member the DSL assigns a function value to.
    Callback,
    /// A parameter of an adapter's builder function.
    Parameter,
}

/// The shared null symbol, the target of every failed resolution.
pub(crate) static NULL_SYMBOL: Symbol = Symbol {
    name: String::new(),
    data_type: TypeRef::NONE,
    scope: ScopeId::GLOBAL,
    kind: SymbolKind::Null,
    host_name: None,
};

/// A named, typed binding.
///
/// Symbols are immutable once created. They belong to exactly one scope or,
/// for context parameters, to one aggregate's context list.
#[derive(Clone, Debug)]
pub struct Symbol {
    name: String,
    data_type: TypeRef,
    scope: ScopeId,
    kind: SymbolKind,
    host_name: Option<&'static str>,
}

impl Symbol {
    /// Creates a new symbol.
    pub fn new(name: impl Into<String>, data_type: TypeRef, scope: ScopeId, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            data_type,
            scope,
            kind,
            host_name: None,
        }
    }

    pub(crate) fn null() -> Self {
        NULL_SYMBOL.clone()
    }

    /// Records the host-side name this symbol was derived from.
    #[must_use]
    pub fn with_host_name(mut self, host_name: &'static str) -> Self {
        self.host_name = Some(host_name);
        self
    }

    /// Returns the DSL-facing name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the symbol's type.
    #[must_use]
    pub fn data_type(&self) -> TypeRef {
        self.data_type
    }

    /// Returns the scope the symbol was created in.
    #[must_use]
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Returns what the symbol names.
    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Returns the host-side name, if the symbol mirrors a host declaration.
    #[must_use]
    pub fn host_name(&self) -> Option<&'static str> {
        self.host_name
    }
}
