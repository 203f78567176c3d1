//! XML dependency document codec
//!
//! A document is a `<dependencies>` root holding nested `package`,
//! `class`, and `feature` elements. Each carries a `confirmed` attribute
//! and a `<name>` child, followed by `<inbound>`/`<outbound>` references
//! whose `type` attribute names the referenced node's granularity and
//! whose text is its fully qualified name. Referenced nodes that never
//! appear as elements exist in the decoded graph as inferred nodes.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tangle_core::{NodeFactory, NodeId, NodeKind};
use tracing::debug;

use crate::error::{Error, Result};

struct PendingNode {
    kind: NodeKind,
    confirmed: bool,
    id: Option<NodeId>,
}

enum RefDirection {
    Inbound,
    Outbound,
}

/// Decode a dependency document into a fresh factory.
pub fn read_document(text: &str) -> Result<NodeFactory> {
    let mut reader = Reader::from_str(text);
    let config = reader.config_mut();
    config.trim_text(true);
    config.expand_empty_elements = true;

    let mut factory = NodeFactory::new();
    let mut stack: Vec<PendingNode> = Vec::new();
    let mut pending_ref: Option<(RefDirection, NodeKind, bool)> = None;
    let mut buf = String::new();
    let mut saw_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(elem) => match elem.name().as_ref() {
                b"dependencies" => saw_root = true,
                b"package" => stack.push(pending(NodeKind::Package, &elem)?),
                b"class" => stack.push(pending(NodeKind::Type, &elem)?),
                b"feature" => stack.push(pending(NodeKind::Member, &elem)?),
                b"name" => buf.clear(),
                b"inbound" => {
                    pending_ref =
                        Some((RefDirection::Inbound, kind_attr(&elem)?, confirmed_attr(&elem)?));
                    buf.clear();
                }
                b"outbound" => {
                    pending_ref =
                        Some((RefDirection::Outbound, kind_attr(&elem)?, confirmed_attr(&elem)?));
                    buf.clear();
                }
                other => {
                    return Err(Error::Document(format!(
                        "unexpected element <{}>",
                        String::from_utf8_lossy(other)
                    )));
                }
            },
            Event::Text(text) => buf.push_str(&text.unescape()?),
            Event::End(elem) => match elem.name().as_ref() {
                b"name" => {
                    let Some(node) = stack.last_mut() else {
                        return Err(Error::Document(
                            "name element outside a node element".to_string(),
                        ));
                    };
                    node.id = Some(create(&mut factory, node.kind, &buf, node.confirmed)?);
                }
                b"package" | b"class" | b"feature" => {
                    stack.pop();
                }
                b"inbound" | b"outbound" => {
                    let Some((direction, kind, confirmed)) = pending_ref.take() else {
                        continue;
                    };
                    let Some(current) = stack.last().and_then(|node| node.id) else {
                        return Err(Error::Document(
                            "dependency element before the node name".to_string(),
                        ));
                    };
                    let other = create(&mut factory, kind, &buf, confirmed)?;
                    match direction {
                        RefDirection::Inbound => factory.add_dependency(other, current),
                        RefDirection::Outbound => factory.add_dependency(current, other),
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(Error::Document(
            "missing dependencies root element".to_string(),
        ));
    }
    debug!(
        packages = factory.package_count(),
        types = factory.type_count(),
        members = factory.member_count(),
        dependencies = factory.dependency_count(),
        "decoded dependency document"
    );
    Ok(factory)
}

/// Encode a factory as an indented dependency document.
pub fn write_document(factory: &NodeFactory) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new("dependencies")))?;
    for (_, package) in factory.packages() {
        write_node(&mut writer, factory, package)?;
    }
    writer.write_event(Event::End(BytesEnd::new("dependencies")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

/// The wire vocabulary for a node kind, used both as element names and as
/// `type` attribute values.
pub(crate) fn kind_label(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Package => "package",
        NodeKind::Type => "class",
        NodeKind::Member => "feature",
    }
}

fn pending(kind: NodeKind, elem: &BytesStart) -> Result<PendingNode> {
    Ok(PendingNode {
        kind,
        confirmed: confirmed_attr(elem)?,
        id: None,
    })
}

fn confirmed_attr(elem: &BytesStart) -> Result<bool> {
    match elem.try_get_attribute("confirmed")? {
        Some(attr) => Ok(attr.unescape_value()? == "yes"),
        None => Ok(true),
    }
}

fn kind_attr(elem: &BytesStart) -> Result<NodeKind> {
    let Some(attr) = elem.try_get_attribute("type")? else {
        return Err(Error::Document(
            "dependency element without a type attribute".to_string(),
        ));
    };
    match attr.unescape_value()?.as_ref() {
        "package" => Ok(NodeKind::Package),
        "class" => Ok(NodeKind::Type),
        "feature" => Ok(NodeKind::Member),
        other => Err(Error::Document(format!("unknown dependency type {other:?}"))),
    }
}

fn create(factory: &mut NodeFactory, kind: NodeKind, name: &str, confirmed: bool) -> Result<NodeId> {
    match kind {
        NodeKind::Package => Ok(factory.create_package(name, confirmed)),
        NodeKind::Type => Ok(factory.create_type(name, confirmed)),
        NodeKind::Member => Ok(factory.create_member(name, confirmed)?),
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, factory: &NodeFactory, id: NodeId) -> Result<()> {
    let Some(node) = factory.node(id) else {
        return Ok(());
    };
    let label = kind_label(node.kind);
    let mut elem = BytesStart::new(label);
    elem.push_attribute(("confirmed", yes_no(node.confirmed)));
    writer.write_event(Event::Start(elem))?;

    writer.write_event(Event::Start(BytesStart::new("name")))?;
    writer.write_event(Event::Text(BytesText::new(&node.name)))?;
    writer.write_event(Event::End(BytesEnd::new("name")))?;

    for source in factory.inbound(id) {
        write_reference(writer, factory, source, "inbound")?;
    }
    for target in factory.outbound(id) {
        write_reference(writer, factory, target, "outbound")?;
    }
    for child in factory.children(id) {
        write_node(writer, factory, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(label)))?;
    Ok(())
}

fn write_reference(
    writer: &mut Writer<Vec<u8>>,
    factory: &NodeFactory,
    other: NodeId,
    label: &str,
) -> Result<()> {
    let Some(node) = factory.node(other) else {
        return Ok(());
    };
    let mut elem = BytesStart::new(label);
    elem.push_attribute(("type", kind_label(node.kind)));
    elem.push_attribute(("confirmed", yes_no(node.confirmed)));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(&node.name)))?;
    writer.write_event(Event::End(BytesEnd::new(label)))?;
    Ok(())
}

fn yes_no(confirmed: bool) -> &'static str {
    if confirmed { "yes" } else { "no" }
}
