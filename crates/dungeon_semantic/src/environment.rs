//! The DSL environment: one symbol table, one type builder.
//!
//! Registration goes through `&mut self` and lookups through `&self`, so the
//! build phase is finished before any script observes the table.

use dungeon_foundation::{Error, Result, Value};

use crate::adapter::{AdapterProvider, TypeAdapter};
use crate::builder::TypeBuilder;
use crate::config::BuilderConfig;
use crate::descriptor::{DslType, HostType};
use crate::instantiate::Instantiator;
use crate::pretty;
use crate::scope::ScopeId;
use crate::symbol::SymbolId;
use crate::table::SymbolTable;
use crate::types::TypeRef;

/// Pairs a [`SymbolTable`] with the [`TypeBuilder`] that fills it.
#[derive(Clone, Debug, Default)]
pub struct DslEnvironment {
    table: SymbolTable,
    builder: TypeBuilder,
}

impl DslEnvironment {
    /// Creates an environment with the default builder configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an environment with a custom builder configuration.
    #[must_use]
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            table: SymbolTable::new(),
            builder: TypeBuilder::with_config(config),
        }
    }

    /// Returns the symbol table.
    #[must_use]
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Returns the type builder.
    #[must_use]
    pub fn builder(&self) -> &TypeBuilder {
        &self.builder
    }

    /// Returns the global scope.
    #[must_use]
    pub fn global(&self) -> ScopeId {
        ScopeId::GLOBAL
    }

    // =========================================================================
    // Build phase
    // =========================================================================

    /// Registers an exposable host type in the global scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the type cannot be mirrored.
    pub fn register<T: DslType>(&mut self) -> Result<TypeRef> {
        self.register_host(HostType::of::<T>())
    }

    /// Registers a host type, exposable or adapter-covered, in the global scope.
    ///
    /// # Errors
    ///
    /// Returns an error if the type cannot be mirrored.
    pub fn register_host(&mut self, host: HostType) -> Result<TypeRef> {
        self.builder
            .create_type_from_class(&mut self.table, ScopeId::GLOBAL, host)
    }

    /// Registers an adapter against the global scope.
    ///
    /// # Errors
    ///
    /// See [`TypeBuilder::register_type_adapter`].
    pub fn register_adapter(&mut self, adapter: TypeAdapter) -> Result<Option<TypeRef>> {
        self.builder
            .register_type_adapter(&mut self.table, adapter, ScopeId::GLOBAL)
    }

    /// Registers every adapter a provider declares against the global scope.
    ///
    /// # Errors
    ///
    /// See [`TypeBuilder::register_type_adapters`].
    pub fn register_adapters<P: AdapterProvider>(&mut self) -> Result<Vec<TypeRef>> {
        self.builder
            .register_type_adapters::<P>(&mut self.table, ScopeId::GLOBAL)
    }

    // =========================================================================
    // Run phase
    // =========================================================================

    /// Resolves a name in the global scope.
    #[must_use]
    pub fn resolve(&self, name: &str) -> SymbolId {
        self.table.resolve(ScopeId::GLOBAL, name)
    }

    /// Resolves a dotted member path from the global scope.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> SymbolId {
        self.table.resolve_path(ScopeId::GLOBAL, path)
    }

    /// Resolves a type name in the global scope.
    #[must_use]
    pub fn resolve_type(&self, name: &str) -> TypeRef {
        self.table.resolve_type(ScopeId::GLOBAL, name)
    }

    /// Returns the names of the aggregate and adapted types bound in the
    /// global scope, sorted. Built-ins are left out.
    #[must_use]
    pub fn type_names(&self) -> Vec<String> {
        self.table
            .types_in(ScopeId::GLOBAL)
            .into_iter()
            .filter(|(_, ty)| self.table.ty(*ty).member_scope().is_some())
            .map(|(name, _)| name)
            .collect()
    }

    /// Returns an instantiator over this environment.
    #[must_use]
    pub fn instantiator(&self) -> Instantiator<'_> {
        Instantiator::new(&self.table, self.builder.adapters())
    }

    /// Constructs an instance of the named type from named field values.
    ///
    /// # Errors
    ///
    /// Returns `MissingMember` if the type name does not resolve, otherwise
    /// see [`Instantiator::instantiate`].
    pub fn instantiate(
        &self,
        type_name: &str,
        fields: &[(&str, Value)],
        context: &[(&str, Value)],
    ) -> Result<Value> {
        let ty = self.require_type(type_name)?;
        self.instantiator().instantiate(ty, fields, context)
    }

    /// Constructs an instance of the named type from positional values.
    ///
    /// # Errors
    ///
    /// Returns `MissingMember` if the type name does not resolve, otherwise
    /// see [`Instantiator::instantiate_positional`].
    pub fn instantiate_positional(
        &self,
        type_name: &str,
        values: &[Value],
        context: &[(&str, Value)],
    ) -> Result<Value> {
        let ty = self.require_type(type_name)?;
        self.instantiator().instantiate_positional(ty, values, context)
    }

    /// Renders the named type, or `None` if it does not resolve.
    #[must_use]
    pub fn render(&self, type_name: &str) -> Option<String> {
        let ty = self.resolve_type(type_name);
        (ty != TypeRef::NONE).then(|| pretty::render(&self.table, ty))
    }

    /// Renders every aggregate and adapted type in the global scope.
    #[must_use]
    pub fn render_all(&self) -> String {
        pretty::render_scope(&self.table, ScopeId::GLOBAL)
    }

    fn require_type(&self, name: &str) -> Result<TypeRef> {
        let ty = self.resolve_type(name);
        if ty == TypeRef::NONE {
            return Err(Error::missing_member(
                self.table.scope_name(ScopeId::GLOBAL),
                name,
            ));
        }
        Ok(ty)
    }
}
