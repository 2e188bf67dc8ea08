//! Runtime kinds of DSL values.

use std::fmt;

/// Returns the unqualified name of a Rust type, without generic arguments.
///
/// `dungeon_content::animation::Animation` becomes `Animation` and
/// `alloc::vec::Vec<i64>` becomes `Vec`.
#[must_use]
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// The runtime kind of a [`Value`](crate::Value).
///
/// Used in type mismatch messages and by the semantic layer when checking a
/// value against a mirrored type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// The nil value.
    Nil,
    /// Boolean.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String.
    String,
    /// Entity reference.
    Entity,
    /// List of values.
    List,
    /// Set of values.
    Set,
    /// Graph literal.
    Graph,
    /// Constructed host instance, with its host type name.
    Object(&'static str),
    /// Callable, with its arity.
    Func(usize),
}

impl ValueKind {
    /// Returns true for nil, bool, int, float and string.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Nil | Self::Bool | Self::Int | Self::Float | Self::String
        )
    }
}

impl fmt::Debug for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Entity => write!(f, "entity"),
            Self::List => write!(f, "list"),
            Self::Set => write!(f, "set"),
            Self::Graph => write!(f, "graph"),
            Self::Object(name) => write!(f, "object<{name}>"),
            Self::Func(arity) => write!(f, "fn/{arity}"),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
