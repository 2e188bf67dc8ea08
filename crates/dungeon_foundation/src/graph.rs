//! Directed graphs built from a textual description.
//!
//! The description is a list of statements separated by `;` or newlines.
//! Each statement is either a single node (`start`) or a chain of edges
//! (`start -> hall -> boss`).
//!
//! ```text
//! entry -> hall -> boss;
//! hall -> treasury
//! secret
//! ```

use std::fmt;

use crate::error::{Error, Result};

/// A directed graph with string-labelled nodes.
///
/// Nodes keep their first-seen order. Edges are deduplicated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<String>,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a graph description.
    ///
    /// # Errors
    ///
    /// Returns a parse error if a chain contains an empty node name.
    pub fn parse(text: &str) -> Result<Self> {
        let mut graph = Self::new();

        for (line_idx, line) in text.lines().enumerate() {
            let mut column = 1;
            for statement in line.split(';') {
                graph.parse_statement(statement, line_idx, column)?;
                column += statement.chars().count() + 1;
            }
        }

        Ok(graph)
    }

    fn parse_statement(&mut self, statement: &str, line_idx: usize, start_column: usize) -> Result<()> {
        if statement.trim().is_empty() {
            return Ok(());
        }

        let mut previous = None;
        let mut column = start_column;
        for part in statement.split("->") {
            let name = part.trim();
            if name.is_empty() {
                // Point past the blanks at where the name should start.
                let blanks = part.chars().take_while(|c| c.is_whitespace()).count();
                return Err(Error::parse(
                    "expected node name",
                    to_position(line_idx + 1),
                    to_position(column + blanks),
                ));
            }
            let node = self.add_node(name);
            if let Some(from) = previous {
                self.add_edge_by_index(from, node);
            }
            previous = Some(node);
            column += part.chars().count() + 2;
        }

        Ok(())
    }

    /// Adds a node, returning its index. Existing nodes are reused.
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(idx) = self.index_of(name) {
            return idx;
        }
        self.nodes.push(name.to_string());
        self.nodes.len() - 1
    }

    /// Adds an edge between two nodes, creating them if needed.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.add_edge_by_index(from, to);
    }

    fn add_edge_by_index(&mut self, from: usize, to: usize) {
        if !self.edges.contains(&(from, to)) {
            self.edges.push((from, to));
        }
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == name)
    }

    /// Returns true if the graph has a node with this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Returns node names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Returns all edges as `(from, to)` name pairs.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .map(|&(from, to)| (self.nodes[from].as_str(), self.nodes[to].as_str()))
    }

    /// Returns the direct successors of a node.
    #[must_use]
    pub fn successors(&self, name: &str) -> Vec<&str> {
        let Some(idx) = self.index_of(name) else {
            return Vec::new();
        };
        self.edges
            .iter()
            .filter(|(from, _)| *from == idx)
            .map(|&(_, to)| self.nodes[to].as_str())
            .collect()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

fn to_position(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (from, to) in self.edges() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{from} -> {to}")?;
            first = false;
        }
        for node in self.nodes() {
            let connected = self.edges().any(|(from, to)| from == node || to == node);
            if !connected {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{node}")?;
                first = false;
            }
        }
        Ok(())
    }
}
