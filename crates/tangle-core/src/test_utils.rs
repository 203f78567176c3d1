//! Test utilities for Tangle

use crate::factory::NodeFactory;
use crate::model::NodeId;

/// Three confirmed members chained by dependencies:
/// a.A.a -> b.B.b -> c.C.c.
pub fn chain_graph() -> (NodeFactory, [NodeId; 3]) {
    let mut factory = NodeFactory::new();
    let a = factory.create_member("a.A.a", true).unwrap();
    let b = factory.create_member("b.B.b", true).unwrap();
    let c = factory.create_member("c.C.c", true).unwrap();
    factory.add_dependency(a, b);
    factory.add_dependency(b, c);
    (factory, [a, b, c])
}

/// Two packages with nested types and members, no dependencies:
/// a holds a.A (with a.A.a) and a.B, b holds b.B (with b.B.b).
pub fn summary_graph() -> NodeFactory {
    let mut factory = NodeFactory::new();
    factory.create_member("a.A.a", true).unwrap();
    factory.create_type("a.B", true);
    factory.create_member("b.B.b", true).unwrap();
    factory
}

/// All package ids in name order, for use as traversal roots.
pub fn package_ids(factory: &NodeFactory) -> Vec<NodeId> {
    factory.packages().map(|(_, id)| id).collect()
}
