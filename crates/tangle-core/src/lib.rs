//! Tangle Core — dependency graph model, factory, and traversal algorithms

pub mod closure;
pub mod copier;
pub mod criteria;
pub mod cycles;
pub mod error;
pub mod factory;
pub mod model;
pub mod selector;
pub mod traversal;


#[cfg(test)]
pub mod test_utils;

pub use closure::{DepthBound, TransitiveClosure};
pub use copier::{GraphCopier, SelectiveTraversalStrategy};
pub use criteria::{CollectionCriteria, PatternCriteria, SelectionCriteria};
pub use cycles::{Cycle, CycleDetector};
pub use error::{Error, Result};
pub use factory::NodeFactory;
pub use model::{EdgeKind, NodeData, NodeId, NodeKind};
pub use selector::ClosureStopSelector;
pub use traversal::{WalkEvent, walk_hierarchy};
