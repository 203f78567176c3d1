//! JSON rendering of a dependency graph

use serde_json::{Value, json};
use tangle_core::{NodeFactory, NodeId, NodeKind};

use crate::document::kind_label;
use crate::error::Result;

/// Render the graph as a JSON tree mirroring the XML document layout:
/// packages hold `classes`, classes hold `features`, and every node
/// carries its `inbound` and `outbound` reference lists.
#[must_use]
pub fn to_json(factory: &NodeFactory) -> Value {
    let packages: Vec<Value> = factory
        .packages()
        .map(|(_, id)| node_json(factory, id))
        .collect();
    json!({ "packages": packages })
}

/// [`to_json`] pretty-printed.
pub fn to_json_string(factory: &NodeFactory) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_json(factory))?)
}

fn node_json(factory: &NodeFactory, id: NodeId) -> Value {
    let Some(node) = factory.node(id) else {
        return Value::Null;
    };
    let inbound: Vec<Value> = factory
        .inbound(id)
        .into_iter()
        .filter_map(|other| reference_json(factory, other))
        .collect();
    let outbound: Vec<Value> = factory
        .outbound(id)
        .into_iter()
        .filter_map(|other| reference_json(factory, other))
        .collect();
    let mut value = json!({
        "name": node.name,
        "confirmed": node.confirmed,
        "inbound": inbound,
        "outbound": outbound,
    });

    let children_key = match node.kind {
        NodeKind::Package => Some("classes"),
        NodeKind::Type => Some("features"),
        NodeKind::Member => None,
    };
    if let Some(key) = children_key {
        let children: Vec<Value> = factory
            .children(id)
            .into_iter()
            .map(|child| node_json(factory, child))
            .collect();
        value[key] = Value::Array(children);
    }
    value
}

fn reference_json(factory: &NodeFactory, id: NodeId) -> Option<Value> {
    let node = factory.node(id)?;
    Some(json!({
        "name": node.name,
        "type": kind_label(node.kind),
        "confirmed": node.confirmed,
    }))
}
