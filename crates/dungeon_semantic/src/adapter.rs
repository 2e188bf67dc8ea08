//! Type adapters.
//!
//! Some host types cannot be mirrored member by member: they come from other
//! libraries, need validation, or are assembled in several steps. An adapter
//! stands in for such a type with a builder function. The builder's parameter
//! list becomes the DSL-visible shape of the type, and instantiation calls the
//! builder instead of assigning fields.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use dungeon_foundation::{Error, ErrorKind, HostObject, Result, Value};
use log::debug;

use crate::args::InstanceArgs;
use crate::config::AdapterPolicy;
use crate::descriptor::{HostType, Shape};
use crate::name::to_dsl_name;

type Builder = Rc<dyn Fn(&InstanceArgs) -> Result<HostObject>>;

/// One declared parameter of an adapter's builder.
#[derive(Clone, Debug, PartialEq)]
pub struct AdapterParam {
    name: String,
    shape: Shape,
}

impl AdapterParam {
    /// Returns the DSL name of the parameter.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// A builder function registered for a target host type.
#[derive(Clone)]
pub struct TypeAdapter {
    name: &'static str,
    target: HostType,
    dsl_name: Option<&'static str>,
    params: Vec<AdapterParam>,
    builder: Builder,
}

impl TypeAdapter {
    /// Creates an adapter whose builder produces a `T`.
    ///
    /// `name` is the builder function's name, used in diagnostics.
    pub fn new<T: Any>(
        name: &'static str,
        builder: impl Fn(&InstanceArgs) -> Result<T> + 'static,
    ) -> Self {
        Self {
            name,
            target: HostType::external::<T>(),
            dsl_name: None,
            params: Vec::new(),
            builder: Rc::new(move |args: &InstanceArgs| {
                builder(args).map(HostObject::new)
            }),
        }
    }

    /// Declares the next builder parameter.
    ///
    /// The name is converted to DSL form.
    #[must_use]
    pub fn param(mut self, name: &str, shape: Shape) -> Self {
        self.params.push(AdapterParam {
            name: to_dsl_name(name),
            shape,
        });
        self
    }

    /// Overrides the DSL name of the adapted type.
    #[must_use]
    pub fn named(mut self, dsl_name: &'static str) -> Self {
        self.dsl_name = Some(dsl_name);
        self
    }

    /// Returns the builder function's name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type the builder produces.
    #[must_use]
    pub fn target(&self) -> HostType {
        self.target
    }

    /// Returns the DSL name of the adapted type.
    #[must_use]
    pub fn dsl_name(&self) -> String {
        self.dsl_name
            .map_or_else(|| to_dsl_name(self.target.name()), str::to_string)
    }

    /// Returns the declared parameters in call order.
    #[must_use]
    pub fn params(&self) -> &[AdapterParam] {
        &self.params
    }

    /// Returns the number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Calls the builder with named arguments.
    ///
    /// # Errors
    ///
    /// Returns whatever error the builder raises.
    pub fn build(&self, args: &InstanceArgs) -> Result<HostObject> {
        (self.builder)(args)
    }

    /// Calls the builder with positional arguments in parameter order.
    ///
    /// # Errors
    ///
    /// Returns an arity error if the argument count differs from the
    /// parameter count, or whatever error the builder raises.
    pub fn invoke(&self, args: &[Value]) -> Result<HostObject> {
        if args.len() != self.params.len() {
            return Err(Error::arity_mismatch(self.params.len(), args.len()));
        }
        let mut named = InstanceArgs::new(self.dsl_name());
        for (param, value) in self.params.iter().zip(args) {
            named.set(param.name.clone(), value.clone());
        }
        self.build(&named)
    }
}

impl fmt::Debug for TypeAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeAdapter")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// A host-side group of builder functions registered together.
pub trait AdapterProvider {
    /// Returns every adapter this provider declares.
    fn adapters() -> Vec<TypeAdapter>;
}

/// Maps target host types to their adapters.
#[derive(Clone, Debug, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<TypeId, TypeAdapter>,
    policy: AdapterPolicy,
}

impl AdapterRegistry {
    /// Creates an empty registry that replaces duplicates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given duplicate policy.
    #[must_use]
    pub fn with_policy(policy: AdapterPolicy) -> Self {
        Self {
            adapters: HashMap::new(),
            policy,
        }
    }

    /// Returns the duplicate policy.
    #[must_use]
    pub fn policy(&self) -> AdapterPolicy {
        self.policy
    }

    /// Registers an adapter, returning the one it replaced.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAdapter` if the target already has an adapter and the
    /// policy is [`AdapterPolicy::Reject`].
    pub fn register(&mut self, adapter: TypeAdapter) -> Result<Option<TypeAdapter>> {
        let target = adapter.target();
        if self.policy == AdapterPolicy::Reject && self.adapters.contains_key(&target.id()) {
            return Err(Error::new(ErrorKind::DuplicateAdapter(target.name().to_string())));
        }

        let previous = self.adapters.insert(target.id(), adapter);
        match &previous {
            Some(old) => debug!(
                "replaced adapter `{}` for `{}`",
                old.name(),
                target.name()
            ),
            None => debug!("registered adapter for `{}`", target.name()),
        }
        Ok(previous)
    }

    /// Puts back the adapter a failed registration displaced, or drops the
    /// target's entry if there was none.
    pub(crate) fn restore(&mut self, target: &HostType, previous: Option<TypeAdapter>) {
        match previous {
            Some(old) => {
                self.adapters.insert(target.id(), old);
            }
            None => {
                self.adapters.remove(&target.id());
            }
        }
        debug!("restored adapters for `{}`", target.name());
    }

    /// Returns the adapter for a host type.
    #[must_use]
    pub fn lookup(&self, host: &HostType) -> Option<&TypeAdapter> {
        self.adapters.get(&host.id())
    }

    /// Returns true if the host type has an adapter.
    #[must_use]
    pub fn contains(&self, host: &HostType) -> bool {
        self.adapters.contains_key(&host.id())
    }

    /// Number of registered adapters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Returns the registered adapters in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeAdapter> {
        self.adapters.values()
    }
}
