//! Plain-text rendering of dependency cycles

use tangle_core::{Cycle, NodeFactory};

/// Renders each cycle as a stanza: the first node at the left margin,
/// every following node as an indented `-->` line, and a final line
/// closing the loop back to the first node. Stanzas are separated by a
/// blank line.
#[must_use]
pub fn print_cycles(factory: &NodeFactory, cycles: &[Cycle]) -> String {
    let mut out = String::new();
    for cycle in cycles {
        let names: Vec<&str> = cycle
            .path()
            .iter()
            .filter_map(|&id| factory.name_of(id))
            .collect();
        let Some((first, rest)) = names.split_first() else {
            continue;
        };
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(first);
        out.push('\n');
        for name in rest {
            out.push_str("    --> ");
            out.push_str(name);
            out.push('\n');
        }
        out.push_str("    --> ");
        out.push_str(first);
        out.push('\n');
    }
    out
}
