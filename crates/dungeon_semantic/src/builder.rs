//! The type builder.
//!
//! Turns host type descriptors into mirrored types registered in a scope.
//!
//! # Construction order
//!
//! For each requested host type the builder:
//!
//! 1. returns the memoized type if the host type was already built in the scope,
//! 2. builds an adapted type if an adapter is registered for the host type,
//! 3. otherwise reserves an empty aggregate, binds and memoizes it, and only
//!    then resolves its members.
//!
//! Reserving before resolving is what makes self-referential and mutually
//! referential types terminate: a nested reference to a type under
//! construction finds the reserved aggregate in the memo table.
//!
//! A failed top-level build restores the table to its state before the call,
//! so no half-built aggregate stays bound.

use std::collections::HashMap;

use dungeon_foundation::{Error, ErrorKind, Result};
use log::{debug, trace};

use crate::adapter::{AdapterProvider, AdapterRegistry, TypeAdapter};
use crate::config::BuilderConfig;
use crate::descriptor::{
    DslType, HostType, MemberDescriptor, MemberRole, Shape, TypeDescriptor, TypeForm,
};
use crate::scope::ScopeId;
use crate::symbol::{Symbol, SymbolId, SymbolKind};
use crate::table::SymbolTable;
use crate::types::{AdaptedType, AggregateType, IType, TypeRef};

/// Builds mirrored types from host type descriptors.
#[derive(Clone, Debug, Default)]
pub struct TypeBuilder {
    config: BuilderConfig,
    adapters: AdapterRegistry,
}

impl TypeBuilder {
    /// Creates a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BuilderConfig::default())
    }

    /// Creates a builder with a custom configuration.
    #[must_use]
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            adapters: AdapterRegistry::with_policy(config.adapter_policy),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Returns the adapter registry.
    #[must_use]
    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Builds the mirrored type for `host` and registers it in `scope`.
    ///
    /// Nested exposable and adapted types reachable from `host` are registered
    /// in the same scope. Building a host type that was already built in
    /// `scope` returns the existing type.
    ///
    /// # Errors
    ///
    /// Returns an error if `host` or any type it reaches cannot be mirrored.
    /// The table is left exactly as it was before the call.
    pub fn create_type_from_class(
        &self,
        table: &mut SymbolTable,
        scope: ScopeId,
        host: HostType,
    ) -> Result<TypeRef> {
        let snapshot = table.snapshot();
        match self.build(table, scope, host) {
            Ok(ty) => Ok(ty),
            Err(err) => {
                debug!(
                    "rolled back construction of `{}` in scope `{}`: {err}",
                    host.name(),
                    table.scope_name(scope)
                );
                let scope_name = table.scope_name(scope).to_string();
                table.restore(snapshot);
                Err(err.in_scope(scope_name))
            }
        }
    }

    /// Builds the mirrored type for `T` and registers it in `scope`.
    ///
    /// # Errors
    ///
    /// See [`TypeBuilder::create_type_from_class`].
    pub fn create_type<T: DslType>(&self, table: &mut SymbolTable, scope: ScopeId) -> Result<TypeRef> {
        self.create_type_from_class(table, scope, HostType::of::<T>())
    }

    /// Registers an adapter.
    ///
    /// With [`BuilderConfig::bind_adapted_types`] set, the adapted type is also
    /// built and bound in `scope` right away and returned.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAdapter` under the rejecting policy, or a build error
    /// if the adapter's parameters cannot be mirrored. A failed build leaves
    /// both the table and the registry as they were.
    pub fn register_type_adapter(
        &mut self,
        table: &mut SymbolTable,
        adapter: TypeAdapter,
        scope: ScopeId,
    ) -> Result<Option<TypeRef>> {
        let target = adapter.target();
        let previous = self.adapters.register(adapter)?;
        if !self.config.bind_adapted_types {
            return Ok(None);
        }
        match self.create_type_from_class(table, scope, target) {
            Ok(ty) => Ok(Some(ty)),
            Err(err) => {
                self.adapters.restore(&target, previous);
                Err(err)
            }
        }
    }

    /// Registers every adapter a provider declares.
    ///
    /// Returns the adapted types bound eagerly, in declaration order.
    ///
    /// # Errors
    ///
    /// Stops at the first adapter that fails to register.
    pub fn register_type_adapters<P: AdapterProvider>(
        &mut self,
        table: &mut SymbolTable,
        scope: ScopeId,
    ) -> Result<Vec<TypeRef>> {
        let mut bound = Vec::new();
        for adapter in P::adapters() {
            if let Some(ty) = self.register_type_adapter(table, adapter, scope)? {
                bound.push(ty);
            }
        }
        Ok(bound)
    }

    /// Returns the adapter registered for a host type.
    #[must_use]
    pub fn get_registered_type_adapter(&self, host: &HostType) -> Option<&TypeAdapter> {
        self.adapters.lookup(host)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    fn build(&self, table: &mut SymbolTable, scope: ScopeId, host: HostType) -> Result<TypeRef> {
        if let Some(existing) = table.built(scope, host.id()) {
            trace!("`{}` already built as {existing:?}", host.name());
            return Ok(existing);
        }

        if let Some(adapter) = self.adapters.lookup(&host) {
            return self.build_adapted(table, scope, adapter);
        }

        let Some(descriptor) = host.descriptor() else {
            return Err(Error::new(ErrorKind::UnsupportedType(host.name().to_string())));
        };
        self.build_aggregate(table, scope, host, &descriptor)
    }

    fn build_aggregate(
        &self,
        table: &mut SymbolTable,
        scope: ScopeId,
        host: HostType,
        descriptor: &TypeDescriptor,
    ) -> Result<TypeRef> {
        let name = descriptor.dsl_name();
        let members = table.create_scope(name.clone(), Some(scope))?;
        let ty = table.add_type(IType::Aggregate(AggregateType::shell(
            name.clone(),
            host,
            descriptor.form(),
            members,
        )));

        // Bound and memoized before any member is resolved.
        let type_symbol = Symbol::new(name.clone(), ty, scope, SymbolKind::Type)
            .with_host_name(descriptor.host_name());
        table.bind(scope, type_symbol)?;
        table.remember(scope, host.id(), ty);
        debug!("registering `{name}` for host type `{}`", host.name());

        let (fields, context) = self
            .resolve_members(table, scope, &name, members, descriptor)
            .map_err(|err| err.with_frame(format!("while building `{name}`")))?;

        if let Some(IType::Aggregate(agg)) = table.ty_mut(ty) {
            agg.fields = fields;
            agg.context = context;
            agg.complete = true;
        }
        Ok(ty)
    }

    fn resolve_members(
        &self,
        table: &mut SymbolTable,
        scope: ScopeId,
        owner: &str,
        members: ScopeId,
        descriptor: &TypeDescriptor,
    ) -> Result<(Vec<SymbolId>, Vec<SymbolId>)> {
        let mut seen: HashMap<String, &'static str> = HashMap::new();
        let mut fields = Vec::new();
        let mut context = Vec::new();

        for member in descriptor.members() {
            let dsl_name = member.dsl_name();
            if let Some(first) = seen.insert(dsl_name.clone(), member.host_name()) {
                return Err(Error::new(ErrorKind::DuplicateMember {
                    owner: owner.to_string(),
                    first: first.to_string(),
                    second: member.host_name().to_string(),
                    dsl_name,
                }));
            }

            let role = self.role_of(owner, descriptor.form(), member)?;
            let member_ty = match role {
                MemberRole::Callback => self.resolve_callback(table, scope, owner, member)?,
                MemberRole::Literal | MemberRole::Context => {
                    self.resolve_shape(table, scope, owner, member.host_name(), member.shape())?
                }
            };
            trace!(
                "`{owner}.{dsl_name}` resolved to `{}`",
                table.type_name(member_ty)
            );

            let kind = match role {
                MemberRole::Literal => SymbolKind::Field,
                MemberRole::Context => SymbolKind::Context,
                MemberRole::Callback => SymbolKind::Callback,
            };
            let symbol = Symbol::new(dsl_name, member_ty, members, kind).with_host_name(member.host_name());
            if role == MemberRole::Context {
                context.push(table.push_symbol(symbol));
            } else {
                fields.push(table.bind(members, symbol)?);
            }
        }

        Ok((fields, context))
    }

    fn build_adapted(
        &self,
        table: &mut SymbolTable,
        scope: ScopeId,
        adapter: &TypeAdapter,
    ) -> Result<TypeRef> {
        let name = adapter.dsl_name();
        let host = adapter.target();
        let members = table.create_scope(name.clone(), Some(scope))?;
        let ty = table.add_type(IType::Adapted(AdaptedType::shell(
            name.clone(),
            host,
            members,
            adapter.name(),
        )));

        let type_symbol = Symbol::new(name.clone(), ty, scope, SymbolKind::Type).with_host_name(host.name());
        table.bind(scope, type_symbol)?;
        table.remember(scope, host.id(), ty);
        debug!(
            "registering adapted `{name}` for host type `{}` via `{}`",
            host.name(),
            adapter.name()
        );

        let params = self
            .resolve_params(table, scope, &name, members, adapter)
            .map_err(|err| err.with_frame(format!("while building `{name}`")))?;

        if let Some(IType::Adapted(adapted)) = table.ty_mut(ty) {
            adapted.params = params;
            adapted.complete = true;
        }
        Ok(ty)
    }

    fn resolve_params(
        &self,
        table: &mut SymbolTable,
        scope: ScopeId,
        owner: &str,
        members: ScopeId,
        adapter: &TypeAdapter,
    ) -> Result<Vec<SymbolId>> {
        let mut params = Vec::with_capacity(adapter.arity());
        for param in adapter.params() {
            if param.shape().is_function() {
                return Err(Error::unsupported_member(
                    owner,
                    param.name(),
                    param.shape().to_string(),
                ));
            }
            if !table.resolve_local(members, param.name()).is_null() {
                return Err(Error::new(ErrorKind::DuplicateMember {
                    owner: owner.to_string(),
                    first: param.name().to_string(),
                    second: param.name().to_string(),
                    dsl_name: param.name().to_string(),
                }));
            }
            let param_ty = self.resolve_shape(table, scope, owner, param.name(), param.shape())?;
            let symbol = Symbol::new(param.name(), param_ty, members, SymbolKind::Parameter);
            params.push(table.bind(members, symbol)?);
        }
        Ok(params)
    }

    /// Decides how a member receives its value, checking function shapes.
    fn role_of(&self, owner: &str, form: TypeForm, member: &MemberDescriptor) -> Result<MemberRole> {
        let is_function = member.shape().is_function();
        // Record components are plain data.
        if form == TypeForm::Record && (is_function || member.role() != MemberRole::Literal) {
            return Err(Error::unsupported_member(
                owner,
                member.host_name(),
                match member.role() {
                    MemberRole::Literal => member.shape().to_string(),
                    MemberRole::Context => format!("context {}", member.shape()),
                    MemberRole::Callback => format!("callback {}", member.shape()),
                },
            ));
        }
        match member.role() {
            MemberRole::Callback if !is_function => Err(Error::unsupported_member(
                owner,
                member.host_name(),
                member.shape().to_string(),
            )),
            MemberRole::Literal | MemberRole::Context if is_function => {
                if self.config.strict_callbacks {
                    Err(Error::unsupported_member(
                        owner,
                        member.host_name(),
                        member.shape().to_string(),
                    ))
                } else {
                    Ok(MemberRole::Callback)
                }
            }
            role => Ok(role),
        }
    }

    fn resolve_callback(
        &self,
        table: &mut SymbolTable,
        scope: ScopeId,
        owner: &str,
        member: &MemberDescriptor,
    ) -> Result<TypeRef> {
        let Shape::Function { params, ret } = member.shape() else {
            return Err(Error::unsupported_member(
                owner,
                member.host_name(),
                member.shape().to_string(),
            ));
        };

        let mut param_types = Vec::with_capacity(params.len());
        for param in params {
            param_types.push(self.resolve_shape(table, scope, owner, member.host_name(), param)?);
        }
        let ret_type = match ret {
            Some(ret) => self.resolve_shape(table, scope, owner, member.host_name(), ret)?,
            None => TypeRef::NONE,
        };
        Ok(table.function(param_types, ret_type))
    }

    /// Maps a declared shape onto a type, building nested host types on demand.
    fn resolve_shape(
        &self,
        table: &mut SymbolTable,
        scope: ScopeId,
        owner: &str,
        member: &str,
        shape: &Shape,
    ) -> Result<TypeRef> {
        match shape {
            Shape::Bool => Ok(TypeRef::BOOL),
            Shape::Int => Ok(TypeRef::INT),
            Shape::Float => Ok(TypeRef::FLOAT),
            Shape::String => Ok(TypeRef::STRING),
            Shape::Entity => Ok(TypeRef::ENTITY),
            Shape::List(elem) => {
                let elem = self.resolve_shape(table, scope, owner, member, elem)?;
                Ok(table.list_of(elem))
            }
            Shape::Set(elem) => {
                let elem = self.resolve_shape(table, scope, owner, member, elem)?;
                Ok(table.set_of(elem))
            }
            Shape::Graph(elem) => {
                // Graph values carry string node labels only.
                let elem_ty = self.resolve_shape(table, scope, owner, member, elem)?;
                if elem_ty != TypeRef::STRING {
                    return Err(Error::unsupported_member(owner, member, shape.to_string()));
                }
                Ok(table.graph_of(elem_ty))
            }
            Shape::Host(host) => {
                let mirrored = host.is_exposable()
                    || self.adapters.contains(host)
                    || table.is_built(scope, host);
                if !mirrored {
                    return Err(Error::unsupported_member(owner, member, shape.to_string()));
                }
                self.build(table, scope, *host)
            }
            Shape::Function { .. } => Err(Error::unsupported_member(owner, member, shape.to_string())),
        }
    }
}
