//! The symbol table: arenas of symbols, scopes and types.
//!
//! Every handle ([`SymbolId`], [`ScopeId`], [`TypeRef`]) indexes into a
//! persistent vector owned by the table. Cloning the table is O(1), which is
//! what makes construction rollback cheap: the builder takes a [`Snapshot`]
//! before a top-level build and restores it if the build fails.

use std::any::TypeId;

use dungeon_foundation::{Error, ErrorKind, LtMap, LtVec, Result, Value};

use crate::descriptor::HostType;
use crate::scope::{Scope, ScopeId};
use crate::symbol::{NULL_SYMBOL, Symbol, SymbolId, SymbolKind};
use crate::types::{BuiltIn, FunctionType, IType, StructuralKey, TypeKind, TypeRef};

static NONE_TYPE: IType = IType::BuiltIn(BuiltIn::None);

/// Saved table state for rollback.
#[derive(Clone, Debug)]
pub struct Snapshot(SymbolTable);

/// Arena owner for symbols, scopes and types.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    symbols: LtVec<Symbol>,
    scopes: LtVec<Scope>,
    types: LtVec<IType>,
    structural: LtMap<StructuralKey, TypeRef>,
    built: LtMap<(ScopeId, TypeId), TypeRef>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table holding the null symbol, the global scope and the
    /// built-in types, each built-in bound by name in the global scope.
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self {
            symbols: LtVec::new(),
            scopes: LtVec::new(),
            types: LtVec::new(),
            structural: LtMap::new(),
            built: LtMap::new(),
        };

        table.symbols.push(Symbol::null());
        table.scopes.push(Scope::new("global", None));
        for builtin in BuiltIn::ALL {
            table.types.push(IType::BuiltIn(builtin));
            if builtin != BuiltIn::None {
                let symbol = Symbol::new(
                    builtin.name(),
                    builtin.type_ref(),
                    ScopeId::GLOBAL,
                    SymbolKind::Type,
                );
                let id = table.push_symbol(symbol);
                table.insert_binding(ScopeId::GLOBAL, builtin.name().to_string(), id);
            }
        }

        table
    }

    // =========================================================================
    // Scopes and bindings
    // =========================================================================

    /// Creates a new scope.
    ///
    /// # Errors
    ///
    /// Returns `UnknownScope` if `parent` is not a scope of this table.
    pub fn create_scope(
        &mut self,
        name: impl Into<String>,
        parent: Option<ScopeId>,
    ) -> Result<ScopeId> {
        if let Some(parent) = parent {
            if self.scope(parent).is_none() {
                return Err(Error::unknown_scope(parent.index()));
            }
        }
        let index = self.scopes.push(Scope::new(name, parent));
        Ok(ScopeId(to_handle(index)))
    }

    /// Adds a symbol and binds it under its name in `scope`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownScope` if `scope` is not a scope of this table, or
    /// `DuplicateSymbol` if the name is already bound in `scope`.
    /// Bindings in parent scopes may be shadowed.
    pub fn bind(&mut self, scope: ScopeId, symbol: Symbol) -> Result<SymbolId> {
        let Some(existing) = self.scope(scope) else {
            return Err(Error::unknown_scope(scope.index()));
        };
        if existing.contains(symbol.name()) {
            return Err(Error::new(ErrorKind::DuplicateSymbol {
                scope: existing.name().to_string(),
                name: symbol.name().to_string(),
            }));
        }
        let name = symbol.name().to_string();
        let id = self.push_symbol(symbol);
        self.insert_binding(scope, name, id);
        Ok(id)
    }

    /// Adds a symbol without binding it in any scope.
    pub(crate) fn push_symbol(&mut self, symbol: Symbol) -> SymbolId {
        SymbolId(to_handle(self.symbols.push(symbol)))
    }

    fn insert_binding(&mut self, scope: ScopeId, name: String, id: SymbolId) {
        if let Some(target) = self.scopes.get_mut(scope.0 as usize) {
            target.insert(name, id);
        }
    }

    /// Resolves a name, searching `scope` and then its ancestors.
    ///
    /// Returns [`SymbolId::NULL`] if no scope on the chain binds the name.
    #[must_use]
    pub fn resolve(&self, scope: ScopeId, name: &str) -> SymbolId {
        let mut current = Some(scope);
        while let Some(id) = current {
            let Some(scope) = self.scope(id) else {
                break;
            };
            let found = scope.lookup(name);
            if !found.is_null() {
                return found;
            }
            current = scope.parent();
        }
        SymbolId::NULL
    }

    /// Resolves a name in `scope` only.
    #[must_use]
    pub fn resolve_local(&self, scope: ScopeId, name: &str) -> SymbolId {
        self.scope(scope).map_or(SymbolId::NULL, |s| s.lookup(name))
    }

    /// Resolves a type name visible from `scope`.
    ///
    /// Returns [`TypeRef::NONE`] if the name is unbound or names a non-type.
    #[must_use]
    pub fn resolve_type(&self, scope: ScopeId, name: &str) -> TypeRef {
        let symbol = self.symbol(self.resolve(scope, name));
        if symbol.kind() == SymbolKind::Type {
            symbol.data_type()
        } else {
            TypeRef::NONE
        }
    }

    /// Resolves a dotted member path such as `chain_class.test_component_member.int_member`.
    ///
    /// The first segment is resolved through `scope` and its ancestors; every
    /// further segment is looked up among the members of the previous
    /// symbol's type. Returns [`SymbolId::NULL`] as soon as a segment misses.
    #[must_use]
    pub fn resolve_path(&self, scope: ScopeId, path: &str) -> SymbolId {
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return SymbolId::NULL;
        };

        let mut current = self.resolve(scope, first);
        for segment in segments {
            if current.is_null() {
                break;
            }
            current = self.member(self.symbol(current).data_type(), segment);
        }
        current
    }

    // =========================================================================
    // Arena access
    // =========================================================================

    /// Returns a symbol. Unknown handles yield the null symbol.
    #[must_use]
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        self.symbols.get(id.0 as usize).unwrap_or(&NULL_SYMBOL)
    }

    /// Returns a scope.
    #[must_use]
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    /// Returns the name of a scope, or an empty string for unknown handles.
    #[must_use]
    pub fn scope_name(&self, id: ScopeId) -> &str {
        self.scope(id).map_or("", Scope::name)
    }

    /// Returns a type. Unknown handles yield the `none` built-in.
    #[must_use]
    pub fn ty(&self, ty: TypeRef) -> &IType {
        self.types.get(ty.0 as usize).unwrap_or(&NONE_TYPE)
    }

    /// Returns the variant tag of a type.
    #[must_use]
    pub fn kind(&self, ty: TypeRef) -> TypeKind {
        self.ty(ty).kind()
    }

    /// Returns the number of types in the arena, built-ins included.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Returns the number of symbols in the arena, the null symbol included.
    #[must_use]
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Returns the DSL spelling of a type.
    #[must_use]
    pub fn type_name(&self, ty: TypeRef) -> String {
        match self.ty(ty) {
            IType::BuiltIn(builtin) => builtin.name().to_string(),
            IType::Aggregate(agg) => agg.name.clone(),
            IType::Adapted(adapted) => adapted.name.clone(),
            IType::List(elem) => format!("list<{}>", self.type_name(*elem)),
            IType::Set(elem) => format!("set<{}>", self.type_name(*elem)),
            IType::Graph(elem) => format!("graph<{}>", self.type_name(*elem)),
            IType::Function(func) => {
                let params: Vec<String> = func.params.iter().map(|p| self.type_name(*p)).collect();
                if func.ret == TypeRef::NONE {
                    format!("fn({})", params.join(", "))
                } else {
                    format!("fn({}) -> {}", params.join(", "), self.type_name(func.ret))
                }
            }
        }
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Looks up a member of an aggregate or adapted type.
    ///
    /// Only the type's own members are searched. Context parameters are not
    /// members. Returns [`SymbolId::NULL`] for a miss or a non-aggregate type.
    #[must_use]
    pub fn member(&self, ty: TypeRef, name: &str) -> SymbolId {
        self.ty(ty)
            .member_scope()
            .map_or(SymbolId::NULL, |scope| self.resolve_local(scope, name))
    }

    /// Returns the members of an aggregate (fields and callback slots) or the
    /// parameters of an adapted type, in declaration order.
    #[must_use]
    pub fn members(&self, ty: TypeRef) -> &[SymbolId] {
        match self.ty(ty) {
            IType::Aggregate(agg) => &agg.fields,
            IType::Adapted(adapted) => &adapted.params,
            _ => &[],
        }
    }

    /// Returns the context-supplied constructor parameters of an aggregate.
    #[must_use]
    pub fn context_parameters(&self, ty: TypeRef) -> &[SymbolId] {
        match self.ty(ty) {
            IType::Aggregate(agg) => &agg.context,
            _ => &[],
        }
    }

    /// Returns the host type an aggregate or adapted type mirrors.
    #[must_use]
    pub fn host_type(&self, ty: TypeRef) -> Option<HostType> {
        self.ty(ty).host()
    }

    /// Returns the type symbols bound directly in `scope`, sorted by name.
    #[must_use]
    pub fn types_in(&self, scope: ScopeId) -> Vec<(String, TypeRef)> {
        let Some(scope) = self.scope(scope) else {
            return Vec::new();
        };
        let mut types: Vec<(String, TypeRef)> = scope
            .symbols()
            .map(|(_, id)| self.symbol(id))
            .filter(|symbol| symbol.kind() == SymbolKind::Type)
            .map(|symbol| (symbol.name().to_string(), symbol.data_type()))
            .collect();
        types.sort();
        types
    }

    // =========================================================================
    // Structural types
    // =========================================================================

    /// Returns the interned `list<elem>` type.
    pub fn list_of(&mut self, elem: TypeRef) -> TypeRef {
        self.intern(StructuralKey::List(elem), IType::List(elem))
    }

    /// Returns the interned `set<elem>` type.
    pub fn set_of(&mut self, elem: TypeRef) -> TypeRef {
        self.intern(StructuralKey::Set(elem), IType::Set(elem))
    }

    /// Returns the interned `graph<elem>` type.
    pub fn graph_of(&mut self, elem: TypeRef) -> TypeRef {
        self.intern(StructuralKey::Graph(elem), IType::Graph(elem))
    }

    /// Returns the interned function type. Use [`TypeRef::NONE`] as `ret` for
    /// functions that return nothing.
    pub fn function(&mut self, params: Vec<TypeRef>, ret: TypeRef) -> TypeRef {
        let key = StructuralKey::Function(params.clone(), ret);
        self.intern(key, IType::Function(FunctionType { params, ret }))
    }

    fn intern(&mut self, key: StructuralKey, ty: IType) -> TypeRef {
        if let Some(existing) = self.structural.get(&key) {
            return *existing;
        }
        let id = self.add_type(ty);
        self.structural.insert(key, id);
        id
    }

    pub(crate) fn add_type(&mut self, ty: IType) -> TypeRef {
        TypeRef(to_handle(self.types.push(ty)))
    }

    pub(crate) fn ty_mut(&mut self, ty: TypeRef) -> Option<&mut IType> {
        self.types.get_mut(ty.0 as usize)
    }

    // =========================================================================
    // Compatibility
    // =========================================================================

    /// Returns true if `value` may be assigned to a member of type `ty`.
    ///
    /// Integers are accepted where floats are expected, and lists where sets
    /// are expected. A graph literal is accepted by the `graph` built-in and
    /// by every graph container.
    #[must_use]
    pub fn accepts(&self, ty: TypeRef, value: &Value) -> bool {
        match (self.ty(ty), value) {
            (IType::BuiltIn(builtin), _) => match (builtin, value) {
                (BuiltIn::Bool, Value::Bool(_))
                | (BuiltIn::Int, Value::Int(_))
                | (BuiltIn::Float, Value::Int(_) | Value::Float(_))
                | (BuiltIn::String, Value::String(_))
                | (BuiltIn::Graph, Value::Graph(_))
                | (BuiltIn::Entity, Value::Entity(_)) => true,
                _ => false,
            },
            (IType::Aggregate(agg), Value::Object(obj)) => obj.host_type_id() == agg.host.id(),
            (IType::Adapted(adapted), Value::Object(obj)) => {
                obj.host_type_id() == adapted.host.id()
            }
            (IType::Function(func), Value::Func(callback)) => callback.arity() == func.arity(),
            (IType::List(elem), Value::List(items))
            | (IType::Set(elem), Value::List(items) | Value::Set(items)) => {
                items.iter().all(|item| self.accepts(*elem, item))
            }
            (IType::Graph(_), Value::Graph(_)) => true,
            _ => false,
        }
    }

    // =========================================================================
    // Memoization and rollback
    // =========================================================================

    /// Returns the type already built for a host type in `scope`.
    pub(crate) fn built(&self, scope: ScopeId, host: TypeId) -> Option<TypeRef> {
        self.built.get(&(scope, host)).copied()
    }

    /// Records the type built for a host type in `scope`.
    pub(crate) fn remember(&mut self, scope: ScopeId, host: TypeId, ty: TypeRef) {
        self.built.insert((scope, host), ty);
    }

    /// Returns true if a host type has been built in `scope`.
    #[must_use]
    pub fn is_built(&self, scope: ScopeId, host: &HostType) -> bool {
        self.built.contains_key(&(scope, host.id()))
    }

    /// Captures the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.clone())
    }

    /// Returns to a captured state, discarding everything created since.
    pub fn restore(&mut self, snapshot: Snapshot) {
        *self = snapshot.0;
    }
}

fn to_handle(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
