//! Symbols, scopes, and the type builder for the dungeon DSL type bridge.
//!
//! This crate provides:
//! - [`to_dsl_name`] - Host identifier to DSL identifier conversion
//! - [`SymbolTable`] - Arenas of symbols, scopes and mirrored types
//! - [`DslType`] and [`TypeDescriptor`] - The host side of type exposure
//! - [`TypeBuilder`] - Mirrored type construction with memoization and rollback
//! - [`TypeAdapter`] and [`AdapterRegistry`] - Builders for unmirrorable types
//! - [`Instantiator`] - Checked construction of host instances
//! - [`DslEnvironment`] - One table and one builder, ready for an interpreter
//!
//! # Example
//!
//! ```
//! use dungeon_semantic::{DslEnvironment, DslType, Shape, TypeDescriptor, TypeRef};
//!
//! struct TestComponent;
//!
//! impl DslType for TestComponent {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::class::<TestComponent>()
//!             .member("intMember", Shape::Int)
//!             .member("stringMember", Shape::String)
//!     }
//! }
//!
//! struct ChainClass;
//!
//! impl DslType for ChainClass {
//!     fn descriptor() -> TypeDescriptor {
//!         TypeDescriptor::class::<ChainClass>()
//!             .member("testComponentMember", Shape::host::<TestComponent>())
//!     }
//! }
//!
//! let mut env = DslEnvironment::new();
//! env.register::<ChainClass>().unwrap();
//!
//! let member = env.resolve_path("chain_class.test_component_member.int_member");
//! assert_eq!(env.table().symbol(member).data_type(), TypeRef::INT);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod adapter;
pub mod args;
pub mod builder;
pub mod config;
pub mod descriptor;
pub mod environment;
pub mod instantiate;
pub mod name;
pub mod pretty;
pub mod scope;
pub mod symbol;
pub mod table;
pub mod types;

pub use adapter::{AdapterParam, AdapterProvider, AdapterRegistry, TypeAdapter};
pub use args::InstanceArgs;
pub use builder::TypeBuilder;
pub use config::{AdapterPolicy, BuilderConfig};
pub use descriptor::{
    Constructor, DslType, HostType, MemberDescriptor, MemberRole, Shape, TypeDescriptor, TypeForm,
};
pub use environment::DslEnvironment;
pub use instantiate::Instantiator;
pub use name::{is_dsl_name, to_dsl_name};
pub use pretty::{PrettyConfig, render, render_scope};
pub use scope::{Scope, ScopeId};
pub use symbol::{Symbol, SymbolId, SymbolKind};
pub use table::{Snapshot, SymbolTable};
pub use types::{AdaptedType, AggregateType, BuiltIn, FunctionType, IType, TypeKind, TypeRef};
