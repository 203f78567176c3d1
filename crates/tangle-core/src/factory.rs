//! Canonicalizing node factory backed by petgraph::StableDiGraph

use std::collections::BTreeMap;
use std::sync::LazyLock;

use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{EdgeKind, NodeData, NodeId, NodeKind};

/// Owner prefix of a member name with an argument list: `a.A.a(b.B)` → `a.A`.
static MEMBER_WITH_ARGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\.[^.]*\(.*\)$").expect("member name pattern"));

/// Owner prefix of a plain member name: `a.A.a` → `a.A`.
static MEMBER_PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*)\.[^.]*$").expect("member name pattern"));

/// Sole owner of one graph's node set.
///
/// Nodes are canonicalized by fully qualified name within their kind:
/// creating an existing name is a lookup that may promote the node to
/// confirmed but never demotes it. Creating a type or member implicitly
/// creates its missing ancestors with the same confirmed argument. Nodes
/// are never removed.
pub struct NodeFactory {
    inner: StableDiGraph<NodeData, EdgeKind>,
    packages: BTreeMap<String, NodeId>,
    types: BTreeMap<String, NodeId>,
    members: BTreeMap<String, NodeId>,
}

impl std::fmt::Debug for NodeFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeFactory")
            .field("packages", &self.packages.len())
            .field("types", &self.types.len())
            .field("members", &self.members.len())
            .field("dependencies", &self.dependency_count())
            .finish()
    }
}

impl NodeFactory {
    pub fn new() -> Self {
        NodeFactory {
            inner: StableDiGraph::new(),
            packages: BTreeMap::new(),
            types: BTreeMap::new(),
            members: BTreeMap::new(),
        }
    }

    /// Create or look up a package. An existing package is promoted when
    /// `confirmed` is `true`, never demoted.
    pub fn create_package(&mut self, name: &str, confirmed: bool) -> NodeId {
        if let Some(&id) = self.packages.get(name) {
            if confirmed {
                self.set_confirmed(id, true);
            }
            return id;
        }
        let id = self.insert(NodeData {
            name: name.to_string(),
            kind: NodeKind::Package,
            confirmed,
        });
        self.packages.insert(name.to_string(), id);
        debug!(name, confirmed, "created package");
        id
    }

    /// Create or look up a type, creating its enclosing package if absent.
    /// The package part is everything before the last `.`; a name without
    /// a `.` lands in the empty-named package.
    pub fn create_type(&mut self, name: &str, confirmed: bool) -> NodeId {
        if let Some(&id) = self.types.get(name) {
            if confirmed {
                self.set_confirmed(id, true);
            }
            return id;
        }
        let package_name = name.rsplit_once('.').map_or("", |(package, _)| package);
        let owner = self.create_package(package_name, confirmed);
        let id = self.insert(NodeData {
            name: name.to_string(),
            kind: NodeKind::Type,
            confirmed,
        });
        self.link_owner(owner, id);
        self.types.insert(name.to_string(), id);
        debug!(name, confirmed, "created type");
        id
    }

    /// Create or look up a member, creating its enclosing type and package
    /// if absent. Fails without mutating anything when the name has no
    /// type-qualifying prefix.
    pub fn create_member(&mut self, name: &str, confirmed: bool) -> Result<NodeId> {
        if let Some(&id) = self.members.get(name) {
            if confirmed {
                self.set_confirmed(id, true);
            }
            return Ok(id);
        }
        let type_name = member_owner(name)?.to_string();
        let owner = self.create_type(&type_name, confirmed);
        let id = self.insert(NodeData {
            name: name.to_string(),
            kind: NodeKind::Member,
            confirmed,
        });
        self.link_owner(owner, id);
        self.members.insert(name.to_string(), id);
        debug!(name, confirmed, "created member");
        Ok(id)
    }

    /// Record that `from` depends on `to`. Duplicate edges collapse into
    /// one; self-dependencies are allowed.
    pub fn add_dependency(&mut self, from: NodeId, to: NodeId) {
        let source = NodeIndex::new(from.0 as usize);
        let target = NodeIndex::new(to.0 as usize);
        if self.inner.node_weight(source).is_none() || self.inner.node_weight(target).is_none() {
            return;
        }
        if !self.has_dependency(from, to) {
            self.inner.add_edge(source, target, EdgeKind::DependsOn);
        }
    }

    /// Whether `from` already depends on `to`.
    pub fn has_dependency(&self, from: NodeId, to: NodeId) -> bool {
        let source = NodeIndex::new(from.0 as usize);
        let target = NodeIndex::new(to.0 as usize);
        self.inner
            .edges_directed(source, Direction::Outgoing)
            .any(|edge| *edge.weight() == EdgeKind::DependsOn && edge.target() == target)
    }

    /// Set a node's confirmed flag. Promotion propagates to the owner
    /// chain; demotion touches only this node.
    pub fn set_confirmed(&mut self, id: NodeId, confirmed: bool) {
        let idx = NodeIndex::new(id.0 as usize);
        let Some(node) = self.inner.node_weight_mut(idx) else {
            return;
        };
        if node.confirmed == confirmed {
            return;
        }
        node.confirmed = confirmed;
        if confirmed {
            if let Some(owner) = self.owner(id) {
                self.set_confirmed(owner, true);
            }
        }
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.inner.node_weight(NodeIndex::new(id.0 as usize))
    }

    /// A node's fully qualified name.
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.name.as_str())
    }

    /// A node's name relative to its owner: the full name for packages,
    /// the owner prefix stripped for types and members.
    pub fn simple_name(&self, id: NodeId) -> Option<&str> {
        let node = self.node(id)?;
        if node.kind == NodeKind::Package {
            return Some(&node.name);
        }
        let owner = self.node(self.owner(id)?)?;
        if owner.name.is_empty() {
            Some(&node.name)
        } else {
            Some(&node.name[owner.name.len() + 1..])
        }
    }

    /// The owning node: package for a type, type for a member.
    pub fn owner(&self, id: NodeId) -> Option<NodeId> {
        let idx = NodeIndex::new(id.0 as usize);
        self.inner
            .edges_directed(idx, Direction::Incoming)
            .find(|edge| *edge.weight() == EdgeKind::Owns)
            .map(|edge| NodeId(edge.source().index() as u64))
    }

    /// Nodes owned by `id`, in name order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.sorted_neighbors(id, Direction::Outgoing, EdgeKind::Owns)
    }

    /// Nodes `id` depends on, in name order.
    pub fn outbound(&self, id: NodeId) -> Vec<NodeId> {
        self.sorted_neighbors(id, Direction::Outgoing, EdgeKind::DependsOn)
    }

    /// Nodes depending on `id`, in name order.
    pub fn inbound(&self, id: NodeId) -> Vec<NodeId> {
        self.sorted_neighbors(id, Direction::Incoming, EdgeKind::DependsOn)
    }

    /// All packages in name order.
    pub fn packages(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.packages.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// All types in name order.
    pub fn types(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.types.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// All members in name order.
    pub fn members(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.members.iter().map(|(name, &id)| (name.as_str(), id))
    }

    pub fn package_named(&self, name: &str) -> Option<NodeId> {
        self.packages.get(name).copied()
    }

    pub fn type_named(&self, name: &str) -> Option<NodeId> {
        self.types.get(name).copied()
    }

    pub fn member_named(&self, name: &str) -> Option<NodeId> {
        self.members.get(name).copied()
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Total number of dependency edges.
    pub fn dependency_count(&self) -> usize {
        self.inner
            .edge_indices()
            .filter_map(|idx| self.inner.edge_weight(idx))
            .filter(|kind| **kind == EdgeKind::DependsOn)
            .count()
    }

    /// Copy a node of `src` into this factory, along with its owner chain,
    /// each keeping its own confirmed flag. Returns the local id of the
    /// copy, or `None` if `id` is not a node of `src`.
    pub fn copy_from(&mut self, src: &NodeFactory, id: NodeId) -> Option<NodeId> {
        let node = src.node(id)?;
        if let Some(owner) = src.owner(id) {
            self.copy_from(src, owner);
        }
        match node.kind {
            NodeKind::Package => Some(self.create_package(&node.name, node.confirmed)),
            NodeKind::Type => Some(self.create_type(&node.name, node.confirmed)),
            // src already validated the name when it created the member
            NodeKind::Member => self.create_member(&node.name, node.confirmed).ok(),
        }
    }

    fn insert(&mut self, data: NodeData) -> NodeId {
        NodeId(self.inner.add_node(data).index() as u64)
    }

    fn link_owner(&mut self, owner: NodeId, owned: NodeId) {
        self.inner.add_edge(
            NodeIndex::new(owner.0 as usize),
            NodeIndex::new(owned.0 as usize),
            EdgeKind::Owns,
        );
    }

    fn sorted_neighbors(&self, id: NodeId, direction: Direction, kind: EdgeKind) -> Vec<NodeId> {
        let idx = NodeIndex::new(id.0 as usize);
        let mut neighbors: Vec<NodeId> = self
            .inner
            .edges_directed(idx, direction)
            .filter(|edge| *edge.weight() == kind)
            .map(|edge| {
                let other = match direction {
                    Direction::Outgoing => edge.target(),
                    Direction::Incoming => edge.source(),
                };
                NodeId(other.index() as u64)
            })
            .collect();
        neighbors.sort_by(|a, b| self.name_of(*a).cmp(&self.name_of(*b)));
        neighbors
    }
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// The type prefix of a member name, honoring argument lists so a
/// parameter of the owning type does not shift the split point.
fn member_owner(name: &str) -> Result<&str> {
    let captures = MEMBER_WITH_ARGS
        .captures(name)
        .or_else(|| MEMBER_PLAIN.captures(name));
    match captures.and_then(|c| c.get(1)) {
        Some(owner) => Ok(owner.as_str()),
        None => Err(Error::MalformedMemberName {
            name: name.to_string(),
        }),
    }
}
