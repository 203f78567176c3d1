//! Indented plain-text rendering of a dependency graph

use std::collections::BTreeMap;

use tangle_core::{NodeFactory, NodeId, NodeKind};

const INDENT: &str = "    ";

/// Renders a graph as an indented outline: packages at the left margin,
/// types and members one level deeper each, and a node's dependencies
/// directly under its name.
///
/// Inbound and outbound references to the same node merge into one line:
/// `-->` marks outbound, `<--` inbound, and `<->` a mutual dependency.
/// Inferred nodes are marked with a trailing `*` unless disabled.
pub struct TextPrinter {
    show_inbounds: bool,
    show_outbounds: bool,
    show_empty_nodes: bool,
    show_inferred: bool,
}

impl TextPrinter {
    #[must_use]
    pub fn new() -> Self {
        TextPrinter {
            show_inbounds: true,
            show_outbounds: true,
            show_empty_nodes: true,
            show_inferred: true,
        }
    }

    pub fn set_show_inbounds(&mut self, on: bool) {
        self.show_inbounds = on;
    }

    pub fn set_show_outbounds(&mut self, on: bool) {
        self.show_outbounds = on;
    }

    /// When off, nodes without dependencies disappear unless a node they
    /// own is still visible.
    pub fn set_show_empty_nodes(&mut self, on: bool) {
        self.show_empty_nodes = on;
    }

    pub fn set_show_inferred(&mut self, on: bool) {
        self.show_inferred = on;
    }

    #[must_use]
    pub fn print(&self, factory: &NodeFactory) -> String {
        let mut out = String::new();
        for (_, package) in factory.packages() {
            self.print_node(factory, package, 0, &mut out);
        }
        out
    }

    fn print_node(&self, factory: &NodeFactory, id: NodeId, level: usize, out: &mut String) {
        if !self.should_show(factory, id) {
            return;
        }
        let Some(node) = factory.node(id) else {
            return;
        };
        let name = if node.kind == NodeKind::Package {
            &node.name
        } else {
            factory.simple_name(id).unwrap_or(&node.name)
        };
        self.push_line(out, level, "", name, node.confirmed);

        for (other, weight) in self.merged_dependencies(factory, id) {
            let marker = match weight {
                w if w < 0 => "<-- ",
                w if w > 0 => "--> ",
                _ => "<-> ",
            };
            if let Some(dependency) = factory.node(other) {
                self.push_line(out, level + 1, marker, &dependency.name, dependency.confirmed);
            }
        }

        for child in factory.children(id) {
            self.print_node(factory, child, level + 1, out);
        }
    }

    fn push_line(&self, out: &mut String, level: usize, marker: &str, name: &str, confirmed: bool) {
        out.push_str(&INDENT.repeat(level));
        out.push_str(marker);
        out.push_str(name);
        if self.show_inferred && !confirmed {
            out.push_str(" *");
        }
        out.push('\n');
    }

    /// Inbound references weigh -1 and outbound +1, keyed and ordered by
    /// the referenced node's name; a zero sum is a mutual dependency.
    fn merged_dependencies<'f>(
        &self,
        factory: &'f NodeFactory,
        id: NodeId,
    ) -> Vec<(NodeId, i64)> {
        let mut merged: BTreeMap<&'f str, (NodeId, i64)> = BTreeMap::new();
        if self.show_inbounds {
            for source in factory.inbound(id) {
                if let Some(name) = factory.name_of(source) {
                    merged.entry(name).or_insert((source, 0)).1 -= 1;
                }
            }
        }
        if self.show_outbounds {
            for target in factory.outbound(id) {
                if let Some(name) = factory.name_of(target) {
                    merged.entry(name).or_insert((target, 0)).1 += 1;
                }
            }
        }
        merged.into_values().collect()
    }

    fn should_show(&self, factory: &NodeFactory, id: NodeId) -> bool {
        self.visible_by_itself(factory, id)
            || factory
                .children(id)
                .into_iter()
                .any(|child| self.should_show(factory, child))
    }

    fn visible_by_itself(&self, factory: &NodeFactory, id: NodeId) -> bool {
        self.show_empty_nodes
            || (self.show_outbounds && !factory.outbound(id).is_empty())
            || (self.show_inbounds && !factory.inbound(id).is_empty())
    }
}

impl Default for TextPrinter {
    fn default() -> Self {
        Self::new()
    }
}
