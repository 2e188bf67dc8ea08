//! Game types exposed to the dungeon DSL.
//!
//! This crate provides:
//! - [`components`] - Entity components with context-supplied owners and callbacks
//! - [`animation`] - Sprite animations, built through an adapter
//! - [`quest`] - Quests and single-choice quiz questions
//! - [`graphs`] - Dungeon layouts parsed from textual graph descriptions
//! - [`bootstrap`] - The environment scripts run against
//!
//! # Example
//!
//! ```
//! use dungeon_content::bootstrap::game_environment;
//! use dungeon_semantic::TypeRef;
//!
//! let env = game_environment().unwrap();
//! let x = env.resolve_path("velocity_component.x_velocity");
//! assert_eq!(env.table().symbol(x).data_type(), TypeRef::FLOAT);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod animation;
pub mod bootstrap;
pub mod components;
pub mod graphs;
pub mod quest;

pub use animation::{Animation, AnimationBuilder};
pub use bootstrap::{game_environment, game_environment_with_config};
pub use components::{HealthComponent, PositionComponent, VelocityComponent};
pub use graphs::{DungeonGraph, DungeonGraphBuilder};
pub use quest::{Quest, SingleChoiceQuestion};
