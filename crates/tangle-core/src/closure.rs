//! Bounded bidirectional reachability over dependency edges

use std::collections::HashSet;

use tracing::debug;

use crate::criteria::SelectionCriteria;
use crate::error::{Error, Result};
use crate::factory::NodeFactory;
use crate::model::NodeId;
use crate::selector::ClosureStopSelector;
use crate::traversal::{WalkEvent, walk_hierarchy};

/// Traversal budget for one direction of a closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthBound {
    /// Skip this direction entirely.
    DoNotFollow,
    /// Expand at most this many layers beyond the seeds; zero keeps the
    /// seeds only.
    Bounded(u64),
    /// Expand until saturation or a stop match.
    Unbounded,
}

impl DepthBound {
    /// Maps the numeric wire form: `-1` does not follow, `i64::MAX` is
    /// unbounded, any other negative is a configuration error.
    pub fn from_raw(raw: i64) -> Result<Self> {
        match raw {
            -1 => Ok(DepthBound::DoNotFollow),
            i64::MAX => Ok(DepthBound::Unbounded),
            n if n >= 0 => Ok(DepthBound::Bounded(n as u64)),
            _ => Err(Error::InvalidDepth(raw)),
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Inbound,
    Outbound,
}

/// Computes the reachable subgraph around nodes matching a start
/// criteria, one layer per depth unit, inbound and outbound budgeted
/// independently.
///
/// Every touched node is copied into a result factory with its owner
/// chain and original confirmed flags, together with each traversed
/// dependency edge. A layer containing a stop-criteria match is kept but
/// not expanded further in that direction; the seed layer itself is
/// subject to the same barrier.
pub struct TransitiveClosure<'c> {
    start_criteria: &'c dyn SelectionCriteria,
    stop_criteria: &'c dyn SelectionCriteria,
    inbound_depth: DepthBound,
    outbound_depth: DepthBound,
    factory: NodeFactory,
}

impl<'c> TransitiveClosure<'c> {
    /// Both depths start at [`DepthBound::DoNotFollow`].
    #[must_use]
    pub fn new(
        start_criteria: &'c dyn SelectionCriteria,
        stop_criteria: &'c dyn SelectionCriteria,
    ) -> Self {
        TransitiveClosure {
            start_criteria,
            stop_criteria,
            inbound_depth: DepthBound::DoNotFollow,
            outbound_depth: DepthBound::DoNotFollow,
            factory: NodeFactory::new(),
        }
    }

    pub fn set_inbound_depth(&mut self, depth: DepthBound) {
        self.inbound_depth = depth;
    }

    pub fn set_outbound_depth(&mut self, depth: DepthBound) {
        self.outbound_depth = depth;
    }

    /// Seeds from `roots` and everything they own, then expands inbound
    /// and outbound within their budgets. Repeated calls accumulate into
    /// the same result factory.
    pub fn traverse_nodes(&mut self, src: &NodeFactory, roots: &[NodeId]) {
        let start = self.start_criteria;
        let mut seeds = Vec::new();
        walk_hierarchy(src, roots, &mut |event| {
            if let WalkEvent::Enter(id) = event {
                if let Some(node) = src.node(id) {
                    if start.matches(node.kind, &node.name) {
                        seeds.push(id);
                    }
                }
            }
        });
        debug!(seeds = seeds.len(), "collected closure seeds");
        for &seed in &seeds {
            self.factory.copy_from(src, seed);
        }
        self.expand(src, &seeds, Direction::Inbound);
        self.expand(src, &seeds, Direction::Outbound);
    }

    /// The accumulated result.
    #[must_use]
    pub fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    #[must_use]
    pub fn into_factory(self) -> NodeFactory {
        self.factory
    }

    fn expand(&mut self, src: &NodeFactory, seeds: &[NodeId], direction: Direction) {
        let budget = match direction {
            Direction::Inbound => self.inbound_depth,
            Direction::Outbound => self.outbound_depth,
        };
        if budget == DepthBound::DoNotFollow {
            return;
        }
        let mut remaining = match budget {
            DepthBound::Bounded(n) => n,
            _ => u64::MAX,
        };
        let mut selector = ClosureStopSelector::new(self.stop_criteria);
        selector.traverse_nodes(src, seeds);
        let mut coverage: HashSet<NodeId> = seeds.iter().copied().collect();
        let mut layer: Vec<NodeId> = seeds.to_vec();

        while remaining > 0 && !selector.is_done() {
            let mut next = Vec::new();
            for &node in &layer {
                let neighbors = match direction {
                    Direction::Inbound => src.inbound(node),
                    Direction::Outbound => src.outbound(node),
                };
                for neighbor in neighbors {
                    if coverage.insert(neighbor) {
                        next.push(neighbor);
                        self.factory.copy_from(src, neighbor);
                        self.copy_edge(src, node, neighbor, direction);
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            debug!(layer = next.len(), "expanded closure layer");
            selector.traverse_nodes(src, &next);
            layer = next;
            remaining -= 1;
        }
    }

    fn copy_edge(&mut self, src: &NodeFactory, node: NodeId, neighbor: NodeId, direction: Direction) {
        let (Some(node_copy), Some(neighbor_copy)) = (
            self.factory.copy_from(src, node),
            self.factory.copy_from(src, neighbor),
        ) else {
            return;
        };
        match direction {
            Direction::Inbound => self.factory.add_dependency(neighbor_copy, node_copy),
            Direction::Outbound => self.factory.add_dependency(node_copy, neighbor_copy),
        }
    }
}
