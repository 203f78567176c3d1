//! Shared ordered walk over the ownership hierarchy

use crate::factory::NodeFactory;
use crate::model::NodeId;

/// Emitted by [`walk_hierarchy`] as the walk enters and leaves each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent {
    Enter(NodeId),
    Exit(NodeId),
}

/// Walks `roots` and everything they own, emitting enter/exit events.
///
/// Roots are visited in name order, children in name order under their
/// owner, so consuming algorithms see a reproducible sequence. Stale ids
/// are skipped. This is the one traversal primitive shared by the cycle
/// detector, the closure engine, and the graph copier.
pub fn walk_hierarchy(factory: &NodeFactory, roots: &[NodeId], visit: &mut impl FnMut(WalkEvent)) {
    let mut ordered: Vec<NodeId> = roots
        .iter()
        .copied()
        .filter(|&id| factory.node(id).is_some())
        .collect();
    ordered.sort_by(|a, b| factory.name_of(*a).cmp(&factory.name_of(*b)));
    for id in ordered {
        walk_node(factory, id, visit);
    }
}

fn walk_node(factory: &NodeFactory, id: NodeId, visit: &mut impl FnMut(WalkEvent)) {
    visit(WalkEvent::Enter(id));
    for child in factory.children(id) {
        walk_node(factory, child, visit);
    }
    visit(WalkEvent::Exit(id));
}
