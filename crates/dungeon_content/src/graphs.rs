//! Dungeon layouts described as graphs of rooms.

use dungeon_foundation::{Graph, Result};
use dungeon_semantic::{AdapterProvider, Shape, TypeAdapter};

/// The room layout of a dungeon level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DungeonGraph {
    rooms: Graph,
}

impl DungeonGraph {
    /// Parses a layout such as `entry -> hall -> boss; hall -> vault`.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed descriptions.
    pub fn from_description(text: &str) -> Result<Self> {
        Ok(Self {
            rooms: Graph::parse(text)?,
        })
    }

    /// The underlying graph.
    #[must_use]
    pub fn rooms(&self) -> &Graph {
        &self.rooms
    }

    /// The first room mentioned, where the hero enters.
    #[must_use]
    pub fn start(&self) -> Option<&str> {
        self.rooms.nodes().next()
    }

    /// Rooms reachable in one step from `room`.
    #[must_use]
    pub fn exits(&self, room: &str) -> Vec<&str> {
        self.rooms.successors(room)
    }

    /// Number of rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.node_count()
    }
}

/// Adapters for [`DungeonGraph`].
pub struct DungeonGraphBuilder;

impl AdapterProvider for DungeonGraphBuilder {
    fn adapters() -> Vec<TypeAdapter> {
        vec![
            TypeAdapter::new("from_dot", |args| DungeonGraph::from_description(args.string("text")?))
                .param("text", Shape::String),
        ]
    }
}
