//! Stop-criteria observer used as a traversal barrier

use crate::criteria::SelectionCriteria;
use crate::factory::NodeFactory;
use crate::model::NodeId;

/// Watches node collections go by and latches once any presented node
/// matches the criteria.
///
/// The latch accumulates across calls and never resets: a done selector
/// stays done. An empty collection never completes it.
pub struct ClosureStopSelector<'c> {
    criteria: &'c dyn SelectionCriteria,
    done: bool,
}

impl<'c> ClosureStopSelector<'c> {
    #[must_use]
    pub fn new(criteria: &'c dyn SelectionCriteria) -> Self {
        ClosureStopSelector {
            criteria,
            done: false,
        }
    }

    /// Present one collection of nodes from `factory`.
    pub fn traverse_nodes(&mut self, factory: &NodeFactory, nodes: &[NodeId]) {
        if self.done {
            return;
        }
        self.done = nodes.iter().any(|&id| {
            factory
                .node(id)
                .is_some_and(|node| self.criteria.matches(node.kind, &node.name))
        });
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }
}
