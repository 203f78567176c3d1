//! Scope/filter graph copying with granularity coarsening

use tracing::debug;

use crate::criteria::SelectionCriteria;
use crate::factory::NodeFactory;
use crate::model::NodeId;
use crate::traversal::{WalkEvent, walk_hierarchy};

/// Pairs the two criteria a copy operation consults: `scope` decides
/// which side of the graph is being summarized, `filter` decides which
/// far endpoints survive and at what granularity.
pub struct SelectiveTraversalStrategy<'c> {
    scope: &'c dyn SelectionCriteria,
    filter: &'c dyn SelectionCriteria,
}

impl<'c> SelectiveTraversalStrategy<'c> {
    #[must_use]
    pub fn new(scope: &'c dyn SelectionCriteria, filter: &'c dyn SelectionCriteria) -> Self {
        SelectiveTraversalStrategy { scope, filter }
    }
}

#[derive(Clone, Copy)]
enum EdgeEnd {
    Source,
    Target,
}

/// Copies a filtered projection of a graph into a fresh factory.
///
/// The ownership hierarchy is walked from the given roots. A node whose
/// name passes the scope test has its dependencies examined; if the
/// scope also enables the node's kind, the node itself is copied and
/// becomes the near endpoint its surviving edges attach to. Far
/// endpoints must pass the filter name test at their own kind, then are
/// coarsened upward to the nearest kind the filter enables; an edge is
/// kept only when the coarsened endpoint sits at the same granularity
/// as the near endpoint. Copied nodes keep their original confirmed
/// flags, and duplicate edges collapse.
pub struct GraphCopier<'c> {
    strategy: SelectiveTraversalStrategy<'c>,
    factory: NodeFactory,
}

impl<'c> GraphCopier<'c> {
    #[must_use]
    pub fn new(strategy: SelectiveTraversalStrategy<'c>) -> Self {
        GraphCopier {
            strategy,
            factory: NodeFactory::new(),
        }
    }

    /// Walks `roots` and everything they own, copying the projection
    /// into the result factory. Repeated calls accumulate.
    pub fn traverse_nodes(&mut self, src: &NodeFactory, roots: &[NodeId]) {
        let mut attribution: Vec<(NodeId, NodeId)> = Vec::new();
        walk_hierarchy(src, roots, &mut |event| match event {
            WalkEvent::Enter(id) => self.enter(src, id, &mut attribution),
            WalkEvent::Exit(id) => {
                if attribution.last().is_some_and(|&(entered, _)| entered == id) {
                    attribution.pop();
                }
            }
        });
    }

    /// The accumulated projection.
    #[must_use]
    pub fn scope_factory(&self) -> &NodeFactory {
        &self.factory
    }

    #[must_use]
    pub fn into_factory(self) -> NodeFactory {
        self.factory
    }

    fn enter(&mut self, src: &NodeFactory, id: NodeId, attribution: &mut Vec<(NodeId, NodeId)>) {
        let Some(node) = src.node(id) else {
            return;
        };
        if !self.strategy.scope.matches_name(node.kind, &node.name) {
            return;
        }
        if self.strategy.scope.kind_enabled(node.kind) {
            if let Some(copy) = self.factory.copy_from(src, id) {
                debug!(name = %node.name, "copied scope node");
                attribution.push((id, copy));
            }
        }
        for target in src.outbound(id) {
            self.copy_dependency(src, target, attribution.last().copied(), EdgeEnd::Target);
        }
        for source in src.inbound(id) {
            self.copy_dependency(src, source, attribution.last().copied(), EdgeEnd::Source);
        }
    }

    fn copy_dependency(
        &mut self,
        src: &NodeFactory,
        endpoint: NodeId,
        attribution: Option<(NodeId, NodeId)>,
        end: EdgeEnd,
    ) {
        let Some((attributed, attributed_copy)) = attribution else {
            return;
        };
        let Some(node) = src.node(endpoint) else {
            return;
        };
        if !self.strategy.filter.matches_name(node.kind, &node.name) {
            return;
        }
        // Coarsen to the nearest enclosing kind the filter enables.
        let mut landed = endpoint;
        let mut kind = node.kind;
        while !self.strategy.filter.kind_enabled(kind) {
            let Some(owner) = src.owner(landed) else {
                return;
            };
            let Some(owner_node) = src.node(owner) else {
                return;
            };
            landed = owner;
            kind = owner_node.kind;
        }
        let Some(attributed_kind) = src.node(attributed).map(|n| n.kind) else {
            return;
        };
        if kind != attributed_kind {
            return;
        }
        let Some(landed_copy) = self.factory.copy_from(src, landed) else {
            return;
        };
        match end {
            EdgeEnd::Target => self.factory.add_dependency(attributed_copy, landed_copy),
            EdgeEnd::Source => self.factory.add_dependency(landed_copy, attributed_copy),
        }
    }
}
