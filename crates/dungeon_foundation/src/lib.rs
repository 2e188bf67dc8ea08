//! Values, errors, and persistent collections for the dungeon DSL type bridge.
//!
//! This crate provides:
//! - [`Value`] - Values exchanged between the interpreter and the bridge
//! - [`HostObject`] and [`Callback`] - Host instances and DSL function values
//! - [`Graph`] - Graphs built from textual descriptions
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod entity;
pub mod error;
pub mod graph;
pub mod types;
pub mod value;

pub use collections::{LtMap, LtVec};
pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use graph::Graph;
pub use types::{ValueKind, short_type_name};
pub use value::{Callback, HostObject, Value};
