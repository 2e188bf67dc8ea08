//! Dungeon - DSL type bridge
//!
//! This crate re-exports all layers of the bridge for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: dungeon_content    - Game types exposed to the DSL, adapters, CLI
//! Layer 1: dungeon_semantic   - Symbols, scopes, type builder, instantiation
//! Layer 0: dungeon_foundation - Core types (Value, Graph, Error)
//! ```

pub use dungeon_content as content;
pub use dungeon_foundation as foundation;
pub use dungeon_semantic as semantic;
