//! Host type descriptors.
//!
//! Host code opts a type into the DSL by implementing [`DslType`], returning a
//! static declaration of the members it exposes. The bridge never inspects a
//! host type beyond what its descriptor declares.
//!
//! # Example
//!
//! ```
//! use dungeon_foundation::{HostObject, Result};
//! use dungeon_semantic::{DslType, InstanceArgs, Shape, TypeDescriptor};
//!
//! #[derive(Clone)]
//! struct Torch {
//!     brightness: i64,
//! }
//!
//! impl DslType for Torch {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::class::<Torch>()
//!             .member("brightness", Shape::Int)
//!             .constructor(|args| {
//!                 Ok(HostObject::new(Torch {
//!                     brightness: args.int_or("brightness", 1)?,
//!                 }))
//!             })
//!     }
//! }
//!
//! let descriptor = Torch::descriptor();
//! assert_eq!(descriptor.dsl_name(), "torch");
//! assert_eq!(descriptor.members().len(), 1);
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use dungeon_foundation::{HostObject, Result, short_type_name};

use crate::args::InstanceArgs;
use crate::name::to_dsl_name;

/// Reflective constructor used to instantiate an aggregate from checked arguments.
pub type Constructor = fn(&InstanceArgs) -> Result<HostObject>;

/// A host type that exposes itself to the DSL.
pub trait DslType: Any {
    /// Returns the declaration of the members this type exposes.
    fn descriptor() -> TypeDescriptor;
}

// =============================================================================
// HostType
// =============================================================================

/// Identity of a host type.
///
/// Two `HostType`s are equal when they name the same Rust type, regardless of
/// whether they were created with [`HostType::of`] or [`HostType::external`].
#[derive(Clone, Copy)]
pub struct HostType {
    id: TypeId,
    name: &'static str,
    descriptor: Option<fn() -> TypeDescriptor>,
}

impl HostType {
    /// Identity of an exposable type.
    #[must_use]
    pub fn of<T: DslType>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name::<T>(),
            descriptor: Some(T::descriptor),
        }
    }

    /// Identity of a type without a descriptor.
    ///
    /// Such a type can only be mirrored through a registered adapter.
    #[must_use]
    pub fn external<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_type_name::<T>(),
            descriptor: None,
        }
    }

    /// Returns the Rust `TypeId`.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the unqualified host name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns true if the type declares its members.
    #[must_use]
    pub fn is_exposable(&self) -> bool {
        self.descriptor.is_some()
    }

    /// Returns the type's descriptor, if it has one.
    #[must_use]
    pub fn descriptor(&self) -> Option<TypeDescriptor> {
        self.descriptor.map(|describe| describe())
    }
}

impl PartialEq for HostType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HostType {}

impl Hash for HostType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_exposable() {
            write!(f, "HostType({})", self.name)
        } else {
            write!(f, "HostType({}, external)", self.name)
        }
    }
}

// =============================================================================
// Shape
// =============================================================================

/// The declared type of a member, as the host sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// `bool`
    Bool,
    /// Any integer type.
    Int,
    /// Any floating point type.
    Float,
    /// Any string type.
    String,
    /// An entity reference.
    Entity,
    /// An ordered collection.
    List(Box<Shape>),
    /// A collection without duplicates.
    Set(Box<Shape>),
    /// A graph with labelled nodes.
    Graph(Box<Shape>),
    /// Another host type.
    Host(HostType),
    /// A function value.
    Function {
        /// Parameter shapes.
        params: Vec<Shape>,
        /// Return shape, if the function returns a value.
        ret: Option<Box<Shape>>,
    },
}

impl Shape {
    /// `list<elem>`
    #[must_use]
    pub fn list(elem: Shape) -> Self {
        Self::List(Box::new(elem))
    }

    /// `set<elem>`
    #[must_use]
    pub fn set(elem: Shape) -> Self {
        Self::Set(Box::new(elem))
    }

    /// `graph<elem>`
    #[must_use]
    pub fn graph(elem: Shape) -> Self {
        Self::Graph(Box::new(elem))
    }

    /// An exposable host type.
    #[must_use]
    pub fn host<T: DslType>() -> Self {
        Self::Host(HostType::of::<T>())
    }

    /// A host type without a descriptor.
    #[must_use]
    pub fn external<T: Any>() -> Self {
        Self::Host(HostType::external::<T>())
    }

    /// A function taking `params` and returning nothing.
    #[must_use]
    pub fn function(params: Vec<Shape>) -> Self {
        Self::Function { params, ret: None }
    }

    /// A function taking `params` and returning `ret`.
    #[must_use]
    pub fn function_returning(params: Vec<Shape>, ret: Shape) -> Self {
        Self::Function {
            params,
            ret: Some(Box::new(ret)),
        }
    }

    /// Returns true for function shapes.
    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function { .. })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Entity => write!(f, "entity"),
            Self::List(elem) => write!(f, "list<{elem}>"),
            Self::Set(elem) => write!(f, "set<{elem}>"),
            Self::Graph(elem) => write!(f, "graph<{elem}>"),
            Self::Host(host) => write!(f, "{}", host.name()),
            Self::Function { params, ret } => {
                write!(f, "fn(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ")")?;
                if let Some(ret) = ret {
                    write!(f, " -> {ret}")?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// Members
// =============================================================================

/// How a member receives its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberRole {
    /// Set from DSL literal data.
    Literal,
    /// Supplied by the execution context at instantiation.
    Context,
    /// Assigned a DSL function value.
    Callback,
}

/// One exposed member of a host type.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDescriptor {
    host_name: &'static str,
    dsl_name: Option<&'static str>,
    shape: Shape,
    role: MemberRole,
}

impl MemberDescriptor {
    /// Creates a member descriptor.
    #[must_use]
    pub fn new(host_name: &'static str, shape: Shape, role: MemberRole) -> Self {
        Self {
            host_name,
            dsl_name: None,
            shape,
            role,
        }
    }

    /// Overrides the DSL name instead of deriving it from the host name.
    #[must_use]
    pub fn named(mut self, dsl_name: &'static str) -> Self {
        self.dsl_name = Some(dsl_name);
        self
    }

    /// Returns the host-side name.
    #[must_use]
    pub fn host_name(&self) -> &'static str {
        self.host_name
    }

    /// Returns the DSL name: the override if present, else the converted host name.
    #[must_use]
    pub fn dsl_name(&self) -> String {
        self.dsl_name
            .map_or_else(|| to_dsl_name(self.host_name), str::to_string)
    }

    /// Returns the declared shape.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns how the member receives its value.
    #[must_use]
    pub fn role(&self) -> MemberRole {
        self.role
    }
}

// =============================================================================
// TypeDescriptor
// =============================================================================

/// Whether a host type is a class or a plain-data record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeForm {
    /// Members may take any [`MemberRole`].
    Class,
    /// Every component is a literal member. Rendered as `record`.
    Record,
}

/// The static declaration of an exposable host type.
#[derive(Clone)]
pub struct TypeDescriptor {
    host_name: &'static str,
    dsl_name: Option<&'static str>,
    form: TypeForm,
    members: Vec<MemberDescriptor>,
    constructor: Option<Constructor>,
}

impl TypeDescriptor {
    fn new<T: Any>(form: TypeForm) -> Self {
        Self {
            host_name: short_type_name::<T>(),
            dsl_name: None,
            form,
            members: Vec::new(),
            constructor: None,
        }
    }

    /// Declares a class-like type.
    #[must_use]
    pub fn class<T: Any>() -> Self {
        Self::new::<T>(TypeForm::Class)
    }

    /// Declares a record-like product type.
    ///
    /// Only [`member`](Self::member) components are allowed; the builder
    /// rejects context parameters and callbacks on a record.
    #[must_use]
    pub fn record<T: Any>() -> Self {
        Self::new::<T>(TypeForm::Record)
    }

    /// Overrides the DSL name instead of deriving it from the host name.
    #[must_use]
    pub fn named(mut self, dsl_name: &'static str) -> Self {
        self.dsl_name = Some(dsl_name);
        self
    }

    /// Adds a member set from DSL literal data.
    #[must_use]
    pub fn member(self, host_name: &'static str, shape: Shape) -> Self {
        self.with_member(MemberDescriptor::new(host_name, shape, MemberRole::Literal))
    }

    /// Adds a context-supplied constructor parameter.
    #[must_use]
    pub fn context(self, host_name: &'static str, shape: Shape) -> Self {
        self.with_member(MemberDescriptor::new(host_name, shape, MemberRole::Context))
    }

    /// Adds a callback slot taking `params` and returning nothing.
    #[must_use]
    pub fn callback(self, host_name: &'static str, params: Vec<Shape>) -> Self {
        self.with_member(MemberDescriptor::new(
            host_name,
            Shape::function(params),
            MemberRole::Callback,
        ))
    }

    /// Adds a fully specified member.
    #[must_use]
    pub fn with_member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }

    /// Sets the constructor used for instantiation.
    #[must_use]
    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    /// Returns the host-side name.
    #[must_use]
    pub fn host_name(&self) -> &'static str {
        self.host_name
    }

    /// Returns the DSL name: the override if present, else the converted host name.
    #[must_use]
    pub fn dsl_name(&self) -> String {
        self.dsl_name
            .map_or_else(|| to_dsl_name(self.host_name), str::to_string)
    }

    /// Returns the declaration form.
    #[must_use]
    pub fn form(&self) -> TypeForm {
        self.form
    }

    /// Returns the exposed members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Returns the constructor, if the type is constructible from the DSL.
    #[must_use]
    pub fn constructor_fn(&self) -> Option<Constructor> {
        self.constructor
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("host_name", &self.host_name)
            .field("dsl_name", &self.dsl_name)
            .field("form", &self.form)
            .field("members", &self.members)
            .field("constructible", &self.constructor.is_some())
            .finish()
    }
}
