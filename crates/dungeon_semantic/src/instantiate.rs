//! Instance construction.
//!
//! The interpreter evaluates a script's literal data and asks the bridge to
//! turn it into a host instance. Values are checked against the mirrored
//! member types before the host constructor or adapter builder runs.

use dungeon_foundation::{Error, ErrorKind, HostObject, Result, Value};
use log::trace;

use crate::adapter::AdapterRegistry;
use crate::args::InstanceArgs;
use crate::symbol::SymbolId;
use crate::table::SymbolTable;
use crate::types::{AdaptedType, AggregateType, IType, TypeRef};

/// Constructs host instances of mirrored types.
#[derive(Clone, Copy, Debug)]
pub struct Instantiator<'a> {
    table: &'a SymbolTable,
    adapters: &'a AdapterRegistry,
}

impl<'a> Instantiator<'a> {
    /// Creates an instantiator over a built table and its adapters.
    #[must_use]
    pub fn new(table: &'a SymbolTable, adapters: &'a AdapterRegistry) -> Self {
        Self { table, adapters }
    }

    /// Constructs an instance from named field values.
    ///
    /// `context` holds the values the execution context can supply; an
    /// aggregate takes the ones it declares and ignores the rest.
    ///
    /// # Errors
    ///
    /// Returns `MissingMember` for a field the type does not declare,
    /// `DuplicateMember` for a field given twice, `MissingContext` for an
    /// undeclared context value, `TypeMismatch` for a value its member type
    /// does not accept, `NotConstructible` or
    /// `MissingAdapter` when there is nothing to call, and any error the host
    /// constructor raises.
    pub fn instantiate(
        &self,
        ty: TypeRef,
        fields: &[(&str, Value)],
        context: &[(&str, Value)],
    ) -> Result<Value> {
        match self.table.ty(ty) {
            IType::Aggregate(agg) => {
                let args = self.collect_fields(ty, agg.name(), fields)?;
                self.construct(agg, args, context)
            }
            IType::Adapted(adapted) => {
                let args = self.collect_fields(ty, adapted.name(), fields)?;
                self.adapt(adapted, &args)
            }
            _ => Err(Error::new(ErrorKind::NotConstructible(self.table.type_name(ty)))),
        }
    }

    /// Constructs an instance from positional values.
    ///
    /// Values map onto an aggregate's fields or an adapted type's builder
    /// parameters in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an arity error if more values are given than the type
    /// declares, otherwise the same errors as [`Instantiator::instantiate`].
    pub fn instantiate_positional(
        &self,
        ty: TypeRef,
        values: &[Value],
        context: &[(&str, Value)],
    ) -> Result<Value> {
        let members = self.table.members(ty);
        let exact = matches!(self.table.ty(ty), IType::Adapted(_));
        if values.len() > members.len() || (exact && values.len() != members.len()) {
            return Err(Error::arity_mismatch(members.len(), values.len()));
        }

        let named: Vec<(&str, Value)> = members
            .iter()
            .zip(values)
            .map(|(id, value)| (self.table.symbol(*id).name(), value.clone()))
            .collect();
        self.instantiate(ty, &named, context)
    }

    fn collect_fields(
        &self,
        ty: TypeRef,
        owner: &str,
        fields: &[(&str, Value)],
    ) -> Result<InstanceArgs> {
        let mut args = InstanceArgs::new(owner);
        for (name, value) in fields {
            let symbol = self.table.member(ty, name);
            if symbol.is_null() {
                return Err(Error::missing_member(owner, *name));
            }
            if args.contains(name) {
                let host_name = self.table.symbol(symbol).host_name().unwrap_or(*name);
                return Err(Error::new(ErrorKind::DuplicateMember {
                    owner: owner.to_string(),
                    first: host_name.to_string(),
                    second: host_name.to_string(),
                    dsl_name: (*name).to_string(),
                }));
            }
            self.check(symbol, value)?;
            args.set(*name, value.clone());
        }
        Ok(args)
    }

    fn check(&self, symbol: SymbolId, value: &Value) -> Result<()> {
        let member = self.table.symbol(symbol);
        if self.table.accepts(member.data_type(), value) {
            trace!("`{}` accepts {}", member.name(), value.kind());
            return Ok(());
        }
        let expected = self.table.type_name(member.data_type());
        Err(Error::type_mismatch(expected, value.kind().to_string())
            .with_frame(format!("while setting `{}`", member.name())))
    }

    fn construct(
        &self,
        agg: &AggregateType,
        mut args: InstanceArgs,
        context: &[(&str, Value)],
    ) -> Result<Value> {
        for id in agg.context() {
            let param = self.table.symbol(*id);
            let Some((_, value)) = context.iter().find(|(name, _)| *name == param.name()) else {
                return Err(Error::new(ErrorKind::MissingContext {
                    owner: agg.name().to_string(),
                    name: param.name().to_string(),
                }));
            };
            self.check(*id, value)?;
            args.set_context(param.name(), value.clone());
        }

        let constructor = agg
            .host()
            .descriptor()
            .and_then(|descriptor| descriptor.constructor_fn())
            .ok_or_else(|| Error::new(ErrorKind::NotConstructible(agg.name().to_string())))?;

        let obj = constructor(&args)
            .map_err(|err| err.with_frame(format!("while instantiating `{}`", agg.name())))?;
        Self::verify(agg.host().id(), agg.name(), obj)
    }

    fn adapt(&self, adapted: &AdaptedType, args: &InstanceArgs) -> Result<Value> {
        let adapter = self
            .adapters
            .lookup(&adapted.host())
            .ok_or_else(|| Error::new(ErrorKind::MissingAdapter(adapted.name().to_string())))?;

        let obj = adapter
            .build(args)
            .map_err(|err| err.with_frame(format!("while calling `{}`", adapter.name())))?;
        Self::verify(adapted.host().id(), adapted.name(), obj)
    }

    fn verify(expected: std::any::TypeId, name: &str, obj: HostObject) -> Result<Value> {
        if obj.host_type_id() == expected {
            Ok(Value::Object(obj))
        } else {
            Err(Error::type_mismatch(name, obj.type_name()))
        }
    }
}
