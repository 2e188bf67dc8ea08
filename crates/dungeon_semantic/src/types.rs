//! The mirrored type model.
//!
//! Every type the bridge knows about lives in the [`SymbolTable`](crate::SymbolTable)
//! arena and is referred to by a [`TypeRef`] handle. Built-in types occupy
//! reserved handles so they are shared by every table and compare by identity.

use std::fmt;

use crate::descriptor::{HostType, TypeForm};
use crate::scope::ScopeId;
use crate::symbol::SymbolId;

// =============================================================================
// TypeRef
// =============================================================================

/// Handle to an [`IType`] owned by a [`SymbolTable`](crate::SymbolTable).
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TypeRef(pub(crate) u32);

impl TypeRef {
    /// The type of the null symbol. Never the type of a real member.
    pub const NONE: TypeRef = TypeRef(0);
    /// Built-in `bool`.
    pub const BOOL: TypeRef = TypeRef(1);
    /// Built-in `int`.
    pub const INT: TypeRef = TypeRef(2);
    /// Built-in `float`.
    pub const FLOAT: TypeRef = TypeRef(3);
    /// Built-in `string`.
    pub const STRING: TypeRef = TypeRef(4);
    /// Built-in `graph`, the type of an untyped graph literal.
    pub const GRAPH: TypeRef = TypeRef(5);
    /// Built-in `entity`.
    pub const ENTITY: TypeRef = TypeRef(6);

    /// Returns the raw index of this type.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns true if this handle refers to a built-in type.
    #[must_use]
    pub const fn is_builtin(self) -> bool {
        self.0 <= Self::ENTITY.0
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match BuiltIn::from_ref(*self) {
            Some(builtin) => write!(f, "TypeRef({})", builtin.name()),
            None => write!(f, "TypeRef({})", self.0),
        }
    }
}

// =============================================================================
// BuiltIn
// =============================================================================

/// The primitive DSL types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltIn {
    /// Placeholder type of the null symbol.
    None,
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `string`
    String,
    /// `graph`
    Graph,
    /// `entity`
    Entity,
}

impl BuiltIn {
    /// All built-ins in handle order.
    pub const ALL: [BuiltIn; 7] = [
        BuiltIn::None,
        BuiltIn::Bool,
        BuiltIn::Int,
        BuiltIn::Float,
        BuiltIn::String,
        BuiltIn::Graph,
        BuiltIn::Entity,
    ];

    /// Returns the DSL name of this built-in.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Graph => "graph",
            Self::Entity => "entity",
        }
    }

    /// Returns the reserved handle of this built-in.
    #[must_use]
    pub const fn type_ref(self) -> TypeRef {
        match self {
            Self::None => TypeRef::NONE,
            Self::Bool => TypeRef::BOOL,
            Self::Int => TypeRef::INT,
            Self::Float => TypeRef::FLOAT,
            Self::String => TypeRef::STRING,
            Self::Graph => TypeRef::GRAPH,
            Self::Entity => TypeRef::ENTITY,
        }
    }

    /// Returns the built-in occupying a reserved handle.
    #[must_use]
    pub fn from_ref(ty: TypeRef) -> Option<BuiltIn> {
        Self::ALL.get(ty.0 as usize).copied()
    }
}

impl fmt::Display for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// IType
// =============================================================================

/// The tag of an [`IType`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A primitive.
    BuiltIn,
    /// A product type mirrored field by field.
    Aggregate,
    /// A product type constructed through a registered adapter.
    AggregateAdapted,
    /// The type of a callback slot.
    Function,
    /// `list<T>`
    List,
    /// `set<T>`
    Set,
    /// `graph<T>`
    Graph,
}

/// A mirrored DSL type.
#[derive(Clone, Debug)]
pub enum IType {
    /// A primitive.
    BuiltIn(BuiltIn),
    /// A product type mirrored field by field.
    Aggregate(AggregateType),
    /// A product type constructed through a registered adapter.
    Adapted(AdaptedType),
    /// The type of a callback slot.
    Function(FunctionType),
    /// Ordered container.
    List(TypeRef),
    /// Unordered container without duplicates.
    Set(TypeRef),
    /// Graph whose nodes are labelled with the element type.
    Graph(TypeRef),
}

impl IType {
    /// Returns the variant tag.
    #[must_use]
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::BuiltIn(_) => TypeKind::BuiltIn,
            Self::Aggregate(_) => TypeKind::Aggregate,
            Self::Adapted(_) => TypeKind::AggregateAdapted,
            Self::Function(_) => TypeKind::Function,
            Self::List(_) => TypeKind::List,
            Self::Set(_) => TypeKind::Set,
            Self::Graph(_) => TypeKind::Graph,
        }
    }

    /// Returns the aggregate definition, if this is one.
    #[must_use]
    pub fn as_aggregate(&self) -> Option<&AggregateType> {
        match self {
            Self::Aggregate(agg) => Some(agg),
            _ => None,
        }
    }

    /// Returns the adapted definition, if this is one.
    #[must_use]
    pub fn as_adapted(&self) -> Option<&AdaptedType> {
        match self {
            Self::Adapted(adapted) => Some(adapted),
            _ => None,
        }
    }

    /// Returns the function signature, if this is one.
    #[must_use]
    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Self::Function(func) => Some(func),
            _ => None,
        }
    }

    /// Returns the element type of a container.
    #[must_use]
    pub fn element(&self) -> Option<TypeRef> {
        match self {
            Self::List(elem) | Self::Set(elem) | Self::Graph(elem) => Some(*elem),
            _ => None,
        }
    }

    /// Returns the scope holding this type's members.
    #[must_use]
    pub fn member_scope(&self) -> Option<ScopeId> {
        match self {
            Self::Aggregate(agg) => Some(agg.members),
            Self::Adapted(adapted) => Some(adapted.members),
            _ => None,
        }
    }

    /// Returns the host type this type mirrors.
    #[must_use]
    pub fn host(&self) -> Option<HostType> {
        match self {
            Self::Aggregate(agg) => Some(agg.host),
            Self::Adapted(adapted) => Some(adapted.host),
            _ => None,
        }
    }
}

/// A named product type mirrored field by field from a host type.
#[derive(Clone, Debug)]
pub struct AggregateType {
    pub(crate) name: String,
    pub(crate) host: HostType,
    pub(crate) form: TypeForm,
    pub(crate) members: ScopeId,
    pub(crate) fields: Vec<SymbolId>,
    pub(crate) context: Vec<SymbolId>,
    pub(crate) complete: bool,
}

impl AggregateType {
    pub(crate) fn shell(name: String, host: HostType, form: TypeForm, members: ScopeId) -> Self {
        Self {
            name,
            host,
            form,
            members,
            fields: Vec::new(),
            context: Vec::new(),
            complete: false,
        }
    }

    /// Returns the DSL name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the mirrored host type.
    #[must_use]
    pub fn host(&self) -> HostType {
        self.host
    }

    /// Returns whether the host type was declared as a class or a record.
    #[must_use]
    pub fn form(&self) -> TypeForm {
        self.form
    }

    /// Returns the scope holding settable members and callback slots.
    #[must_use]
    pub fn members(&self) -> ScopeId {
        self.members
    }

    /// Settable members and callback slots, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[SymbolId] {
        &self.fields
    }

    /// Context-supplied constructor parameters, in declaration order.
    #[must_use]
    pub fn context(&self) -> &[SymbolId] {
        &self.context
    }

    /// Returns false while members are still being resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

/// A product type whose instances come from a registered builder function.
#[derive(Clone, Debug)]
pub struct AdaptedType {
    pub(crate) name: String,
    pub(crate) host: HostType,
    pub(crate) members: ScopeId,
    pub(crate) params: Vec<SymbolId>,
    pub(crate) builder: &'static str,
    pub(crate) complete: bool,
}

impl AdaptedType {
    pub(crate) fn shell(name: String, host: HostType, members: ScopeId, builder: &'static str) -> Self {
        Self {
            name,
            host,
            members,
            params: Vec::new(),
            builder,
            complete: false,
        }
    }

    /// Returns the DSL name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the host type the builder produces.
    #[must_use]
    pub fn host(&self) -> HostType {
        self.host
    }

    /// Returns the scope holding the builder parameters.
    #[must_use]
    pub fn members(&self) -> ScopeId {
        self.members
    }

    /// Builder parameters, in call order.
    #[must_use]
    pub fn params(&self) -> &[SymbolId] {
        &self.params
    }

    /// Returns the name of the builder function.
    #[must_use]
    pub fn builder(&self) -> &'static str {
        self.builder
    }

    /// Returns false while parameters are still being resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

/// The signature of a callback slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub(crate) params: Vec<TypeRef>,
    pub(crate) ret: TypeRef,
}

impl FunctionType {
    /// Parameter types, in order.
    #[must_use]
    pub fn params(&self) -> &[TypeRef] {
        &self.params
    }

    /// Return type. [`TypeRef::NONE`] for callbacks that return nothing.
    #[must_use]
    pub fn ret(&self) -> TypeRef {
        self.ret
    }

    /// Number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Interning key for structural types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum StructuralKey {
    List(TypeRef),
    Set(TypeRef),
    Graph(TypeRef),
    Function(Vec<TypeRef>, TypeRef),
}
