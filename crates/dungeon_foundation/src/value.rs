//! Values exchanged between the DSL interpreter and the type bridge.

use std::any::{Any, TypeId};
use std::fmt;
use std::rc::Rc;

use crate::collections::LtVec;
use crate::entity::EntityId;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::{ValueKind, short_type_name};

/// A DSL value.
///
/// Values are cheaply cloneable. Literal data parsed from a script arrives as
/// the scalar, list, set and graph variants; constructed host instances come
/// back as [`Value::Object`]; DSL functions assigned to callback slots are
/// [`Value::Func`].
#[derive(Clone)]
pub enum Value {
    /// The nil value (represents absence).
    Nil,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(Rc<str>),
    /// Entity reference, usually supplied by the execution context.
    Entity(EntityId),
    /// Ordered list.
    List(LtVec<Value>),
    /// Set without duplicates, in first-seen order.
    Set(LtVec<Value>),
    /// Graph literal.
    Graph(Rc<Graph>),
    /// Constructed host instance.
    Object(HostObject),
    /// Callable DSL function.
    Func(Callback),
}

/// An instance of a host type produced by a constructor or adapter.
#[derive(Clone)]
pub struct HostObject {
    type_id: TypeId,
    type_name: &'static str,
    inner: Rc<dyn Any>,
}

impl HostObject {
    /// Wraps a host value.
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: short_type_name::<T>(),
            inner: Rc::new(value),
        }
    }

    /// Returns the `TypeId` of the wrapped host type.
    #[must_use]
    pub fn host_type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the short host name of the wrapped type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if the wrapped value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrows the wrapped value as a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Clones the wrapped value out as a `T`.
    #[must_use]
    pub fn extract<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }
}

/// A DSL function value assigned to a callback slot.
#[derive(Clone)]
pub struct Callback {
    name: Rc<str>,
    arity: usize,
    func: Rc<dyn Fn(&[Value]) -> Result<Value>>,
}

impl Callback {
    /// Creates a callback with a fixed arity.
    pub fn new(
        name: impl Into<Rc<str>>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Rc::new(func),
        }
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Calls the function.
    ///
    /// # Errors
    ///
    /// Returns an arity error if `args` does not match the declared arity,
    /// or whatever error the function itself raises.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        if args.len() != self.arity {
            return Err(Error::arity_mismatch(self.arity, args.len()));
        }
        (self.func)(args)
    }
}

impl Value {
    /// Creates a list value.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Creates a set value, dropping duplicates.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut set = LtVec::new();
        for item in items {
            if !set.contains(&item) {
                set.push(item);
            }
        }
        Self::Set(set)
    }

    /// Wraps a host value as an object.
    pub fn object<T: Any>(value: T) -> Self {
        Self::Object(HostObject::new(value))
    }

    /// Returns the runtime kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Nil => ValueKind::Nil,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Entity(_) => ValueKind::Entity,
            Self::List(_) => ValueKind::List,
            Self::Set(_) => ValueKind::Set,
            Self::Graph(_) => ValueKind::Graph,
            Self::Object(obj) => ValueKind::Object(obj.type_name()),
            Self::Func(func) => ValueKind::Func(func.arity()),
        }
    }

    /// Returns true if this value is nil.
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Attempts to extract a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to extract an integer value.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a number as f64 (converts int to float).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a string reference.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to extract an entity id.
    #[must_use]
    pub const fn as_entity(&self) -> Option<EntityId> {
        match self {
            Self::Entity(id) => Some(*id),
            _ => None,
        }
    }

    /// Attempts to extract list elements.
    #[must_use]
    pub const fn as_list(&self) -> Option<&LtVec<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to extract set elements.
    #[must_use]
    pub const fn as_set(&self) -> Option<&LtVec<Value>> {
        match self {
            Self::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to extract a graph.
    #[must_use]
    pub fn as_graph(&self) -> Option<&Graph> {
        match self {
            Self::Graph(graph) => Some(graph),
            _ => None,
        }
    }

    /// Attempts to extract a host object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&HostObject> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Attempts to extract a callback.
    #[must_use]
    pub const fn as_func(&self) -> Option<&Callback> {
        match self {
            Self::Func(func) => Some(func),
            _ => None,
        }
    }
}

// Objects and callbacks compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Entity(a), Self::Entity(b)) => a == b,
            (Self::List(a), Self::List(b)) | (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Graph(a), Self::Graph(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(&a.inner, &b.inner),
            (Self::Func(a), Self::Func(b)) => Rc::ptr_eq(&a.func, &b.func),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Entity(id) => write!(f, "{id:?}"),
            Self::List(items) => write!(f, "{items:?}"),
            Self::Set(items) => write!(f, "#{items:?}"),
            _ => fmt::Display::fmt(self, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Entity(id) => write!(f, "{id}"),
            Self::List(items) => write_items(f, "[", items, "]"),
            Self::Set(items) => write_items(f, "#{", items, "}"),
            Self::Graph(graph) => write!(f, "graph {{ {graph} }}"),
            Self::Object(obj) => write!(f, "<{}>", obj.type_name()),
            Self::Func(func) => write!(f, "<fn {}/{}>", func.name(), func.arity()),
        }
    }
}

fn write_items(
    f: &mut fmt::Formatter<'_>,
    open: &str,
    items: &LtVec<Value>,
    close: &str,
) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostObject({})", self.type_name)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({}/{})", self.name, self.arity)
    }
}

// Convenience From implementations

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s.into())
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Self::Entity(id)
    }
}

impl From<Graph> for Value {
    fn from(graph: Graph) -> Self {
        Self::Graph(Rc::new(graph))
    }
}

impl From<HostObject> for Value {
    fn from(obj: HostObject) -> Self {
        Self::Object(obj)
    }
}

impl From<Callback> for Value {
    fn from(func: Callback) -> Self {
        Self::Func(func)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::list(v.into_iter().map(Into::into))
    }
}
