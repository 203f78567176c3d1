//! Elementary cycle enumeration over outbound dependency edges

use std::collections::HashSet;

use tracing::debug;

use crate::factory::NodeFactory;
use crate::model::NodeId;
use crate::traversal::{WalkEvent, walk_hierarchy};

/// One elementary cycle: each node depends on the next, and the last
/// depends on the first. The path starts at whichever of its members the
/// search reached first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    path: Vec<NodeId>,
}

impl Cycle {
    #[must_use]
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Depth-first search for elementary cycles, deduplicating rotations of
/// an already-found cycle.
///
/// Results accumulate across calls to [`traverse_nodes`] and come back
/// sorted by length, then by node-name sequence.
///
/// [`traverse_nodes`]: CycleDetector::traverse_nodes
pub struct CycleDetector<'f> {
    factory: &'f NodeFactory,
    max_cycle_length: Option<usize>,
    cycles: Vec<Cycle>,
    seen: HashSet<Vec<NodeId>>,
}

impl<'f> CycleDetector<'f> {
    #[must_use]
    pub fn new(factory: &'f NodeFactory) -> Self {
        CycleDetector {
            factory,
            max_cycle_length: None,
            cycles: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Bound the reported cycle length; `None` means unbounded. Paths are
    /// never extended past the bound, so longer cycles are not found at
    /// all rather than truncated.
    pub fn set_max_cycle_length(&mut self, max: Option<usize>) {
        self.max_cycle_length = max;
    }

    /// Search from every node owned by `roots`. An empty collection is a
    /// no-op.
    pub fn traverse_nodes(&mut self, roots: &[NodeId]) {
        let mut starts = Vec::new();
        walk_hierarchy(self.factory, roots, &mut |event| {
            if let WalkEvent::Enter(id) = event {
                starts.push(id);
            }
        });
        for start in starts {
            self.search_from(start);
        }
        self.sort_cycles();
    }

    /// Cycles found so far, sorted by length then name sequence.
    #[must_use]
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    #[must_use]
    pub fn into_cycles(self) -> Vec<Cycle> {
        self.cycles
    }

    fn search_from(&mut self, start: NodeId) {
        let mut path: Vec<NodeId> = vec![start];
        let mut on_path: HashSet<NodeId> = HashSet::from([start]);
        let mut frames: Vec<(Vec<NodeId>, usize)> = vec![(self.factory.outbound(start), 0)];

        while let Some((neighbors, cursor)) = frames.last_mut() {
            if *cursor >= neighbors.len() {
                frames.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(&done);
                }
                continue;
            }
            let next = neighbors[*cursor];
            *cursor += 1;

            if on_path.contains(&next) {
                if let Some(first) = path.iter().position(|&id| id == next) {
                    self.record(path[first..].to_vec());
                }
                continue;
            }
            if self.max_cycle_length.is_some_and(|max| path.len() >= max) {
                continue;
            }
            path.push(next);
            on_path.insert(next);
            frames.push((self.factory.outbound(next), 0));
        }
    }

    fn record(&mut self, path: Vec<NodeId>) {
        if path.len() < 2 {
            return;
        }
        if self.seen.insert(self.canonical(&path)) {
            debug!(length = path.len(), "found cycle");
            self.cycles.push(Cycle { path });
        }
    }

    /// Rotation-independent key: the same cycle rotated to start at its
    /// lexicographically smallest node name.
    fn canonical(&self, path: &[NodeId]) -> Vec<NodeId> {
        let pivot = (0..path.len())
            .min_by_key(|&i| self.factory.name_of(path[i]))
            .unwrap_or(0);
        let mut rotated = Vec::with_capacity(path.len());
        rotated.extend_from_slice(&path[pivot..]);
        rotated.extend_from_slice(&path[..pivot]);
        rotated
    }

    fn sort_cycles(&mut self) {
        let factory = self.factory;
        self.cycles.sort_by(|a, b| {
            a.path.len().cmp(&b.path.len()).then_with(|| {
                let a_names: Vec<_> = a.path.iter().map(|&id| factory.name_of(id)).collect();
                let b_names: Vec<_> = b.path.iter().map(|&id| factory.name_of(id)).collect();
                a_names.cmp(&b_names)
            })
        });
    }
}
