//! Core data structures for the dependency graph

use serde::{Deserialize, Serialize};

/// Unique, stable handle to a node inside one [`NodeFactory`](crate::NodeFactory).
///
/// Handles are only meaningful against the factory that minted them; two
/// factories may hand out equal ids for unrelated nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub u64);

/// Discriminates the three granularity levels of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Top-level grouping; owns types.
    Package,
    /// Belongs to one package; owns members.
    Type,
    /// Belongs to one type; the finest granularity.
    Member,
}

/// What kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Ownership: package over type, type over member.
    Owns,
    /// A dependency from one node onto another.
    DependsOn,
}

/// A single node: one package, type, or member, keyed by fully qualified name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeData {
    pub name: String,
    pub kind: NodeKind,
    /// `true` when the artifact was actually analyzed; `false` when the node
    /// exists only because something depends on it.
    pub confirmed: bool,
}
