//! Unit tests for tangle-report module

use tangle_core::NodeFactory;

use crate::*;

fn linked_graph() -> NodeFactory {
    let mut factory = NodeFactory::new();
    let a = factory.create_member("a.A.a", true).unwrap();
    let b = factory.create_member("b.B.b", false).unwrap();
    factory.add_dependency(a, b);
    factory
}

#[test]
fn test_read_document_builds_referenced_nodes() {
    let factory = read_document(
        r#"<dependencies>
            <package confirmed="yes">
                <name>a</name>
                <class confirmed="yes">
                    <name>a.A</name>
                    <feature confirmed="yes">
                        <name>a.A.a</name>
                        <outbound type="feature" confirmed="no">b.B.b</outbound>
                    </feature>
                </class>
            </package>
        </dependencies>"#,
    )
    .unwrap();

    assert_eq!(factory.package_count(), 2);
    assert_eq!(factory.type_count(), 2);
    assert_eq!(factory.member_count(), 2);
    assert_eq!(factory.dependency_count(), 1);

    let a = factory.member_named("a.A.a").unwrap();
    let b = factory.member_named("b.B.b").unwrap();
    assert!(factory.has_dependency(a, b));
    assert!(factory.node(a).unwrap().confirmed);

    // The referenced side exists only as inferred nodes.
    assert!(!factory.node(b).unwrap().confirmed);
    let b_pkg = factory.package_named("b").unwrap();
    assert!(!factory.node(b_pkg).unwrap().confirmed);
}

#[test]
fn test_read_document_confirmed_defaults_to_true() {
    let factory = read_document(
        r#"<dependencies>
            <package><name>a</name></package>
            <package confirmed="no"><name>b</name></package>
        </dependencies>"#,
    )
    .unwrap();

    let a = factory.package_named("a").unwrap();
    let b = factory.package_named("b").unwrap();
    assert!(factory.node(a).unwrap().confirmed);
    assert!(!factory.node(b).unwrap().confirmed);
}

#[test]
fn test_read_document_inbound_direction() {
    let factory = read_document(
        r#"<dependencies>
            <package confirmed="yes">
                <name>a</name>
                <class confirmed="yes">
                    <name>a.A</name>
                    <feature confirmed="yes">
                        <name>a.A.a</name>
                        <inbound type="feature" confirmed="yes">c.C.c</inbound>
                    </feature>
                </class>
            </package>
        </dependencies>"#,
    )
    .unwrap();

    let a = factory.member_named("a.A.a").unwrap();
    let c = factory.member_named("c.C.c").unwrap();
    assert!(factory.has_dependency(c, a));
    assert!(!factory.has_dependency(a, c));
}

#[test]
fn test_read_document_rejects_unknown_elements() {
    let result = read_document("<dependencies><bogus/></dependencies>");
    assert!(matches!(result, Err(Error::Document(_))));
}

#[test]
fn test_read_document_requires_root() {
    let result = read_document(r#"<package confirmed="yes"><name>a</name></package>"#);
    assert!(matches!(result, Err(Error::Document(_))));
}

#[test]
fn test_read_document_rejects_malformed_member_names() {
    let result = read_document(
        r#"<dependencies>
            <feature confirmed="yes"><name>nodots</name></feature>
        </dependencies>"#,
    );
    assert!(matches!(result, Err(Error::Model(_))));
}

#[test]
fn test_document_round_trip() {
    let factory = linked_graph();
    let xml = write_document(&factory).unwrap();
    let decoded = read_document(&xml).unwrap();

    assert_eq!(decoded.package_count(), 2);
    assert_eq!(decoded.type_count(), 2);
    assert_eq!(decoded.member_count(), 2);
    assert_eq!(decoded.dependency_count(), 1);

    let a = decoded.member_named("a.A.a").unwrap();
    let b = decoded.member_named("b.B.b").unwrap();
    assert!(decoded.has_dependency(a, b));
    assert!(decoded.node(a).unwrap().confirmed);
    assert!(!decoded.node(b).unwrap().confirmed);
    let b_pkg = decoded.package_named("b").unwrap();
    assert!(!decoded.node(b_pkg).unwrap().confirmed);
}

#[test]
fn test_write_document_shape() {
    let xml = write_document(&linked_graph()).unwrap();

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    assert!(xml.contains("<dependencies>"));
    assert!(xml.contains(r#"<package confirmed="yes">"#));
    assert!(xml.contains(r#"<package confirmed="no">"#));
    assert!(xml.contains("<name>a.A.a</name>"));
    assert!(xml.contains(r#"<outbound type="feature" confirmed="no">b.B.b</outbound>"#));
    assert!(xml.contains(r#"<inbound type="feature" confirmed="yes">a.A.a</inbound>"#));
    assert!(xml.trim_end().ends_with("</dependencies>"));
}

#[test]
fn test_text_printer_output() {
    let output = TextPrinter::new().print(&linked_graph());

    let expected = "\
a
    A
        a
            --> b.B.b *
b *
    B *
        b *
            <-- a.A.a
";
    assert_eq!(output, expected);
}

#[test]
fn test_text_printer_merges_mutual_dependencies() {
    let mut factory = NodeFactory::new();
    let a = factory.create_member("a.A.a", true).unwrap();
    let b = factory.create_member("b.B.b", true).unwrap();
    factory.add_dependency(a, b);
    factory.add_dependency(b, a);

    let output = TextPrinter::new().print(&factory);
    assert!(output.contains("<-> b.B.b"));
    assert!(output.contains("<-> a.A.a"));
    assert!(!output.contains("--> "));
}

#[test]
fn test_text_printer_hides_empty_nodes() {
    let mut factory = linked_graph();
    factory.create_package("zzz", true);

    let mut printer = TextPrinter::new();
    printer.set_show_empty_nodes(false);
    let output = printer.print(&factory);

    assert!(!output.contains("zzz"));
    assert!(output.starts_with("a\n"));
    assert!(output.contains("--> b.B.b"));
}

#[test]
fn test_text_printer_direction_filters() {
    let mut printer = TextPrinter::new();
    printer.set_show_outbounds(false);
    let output = printer.print(&linked_graph());

    assert!(!output.contains("--> "));
    assert!(output.contains("<-- a.A.a"));
}

#[test]
fn test_text_printer_can_hide_inferred_markers() {
    let mut printer = TextPrinter::new();
    printer.set_show_inferred(false);
    let output = printer.print(&linked_graph());
    assert!(!output.contains(" *"));
}

#[test]
fn test_print_cycles_stanzas() {
    let mut factory = NodeFactory::new();
    let a = factory.create_package("a", true);
    let b = factory.create_package("b", true);
    let c = factory.create_package("c", true);
    let d = factory.create_package("d", true);
    factory.add_dependency(a, b);
    factory.add_dependency(b, a);
    factory.add_dependency(c, d);
    factory.add_dependency(d, c);

    let roots: Vec<_> = factory.packages().map(|(_, id)| id).collect();
    let mut detector = tangle_core::CycleDetector::new(&factory);
    detector.traverse_nodes(&roots);

    let output = print_cycles(&factory, detector.cycles());
    let expected = "\
a
    --> b
    --> a

c
    --> d
    --> c
";
    assert_eq!(output, expected);
}

#[test]
fn test_to_json_structure() {
    let value = to_json(&linked_graph());

    let packages = value["packages"].as_array().unwrap();
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0]["name"], "a");
    assert_eq!(packages[0]["confirmed"], true);
    assert_eq!(packages[1]["name"], "b");
    assert_eq!(packages[1]["confirmed"], false);

    let feature = &packages[0]["classes"][0]["features"][0];
    assert_eq!(feature["name"], "a.A.a");
    assert_eq!(feature["outbound"][0]["name"], "b.B.b");
    assert_eq!(feature["outbound"][0]["type"], "feature");
    assert_eq!(feature["outbound"][0]["confirmed"], false);
    assert!(feature["inbound"].as_array().unwrap().is_empty());
}

#[test]
fn test_to_json_string_round_trips() {
    let factory = linked_graph();
    let text = to_json_string(&factory).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, to_json(&factory));
}

#[test]
fn test_metrics_gather() {
    let mut factory = linked_graph();
    let a_pkg = factory.package_named("a").unwrap();
    let b_pkg = factory.package_named("b").unwrap();
    factory.add_dependency(a_pkg, b_pkg);

    let report = MetricsReport::gather(&factory);
    assert_eq!(report.packages, 2);
    assert_eq!(report.confirmed_packages, 1);
    assert_eq!(report.types, 2);
    assert_eq!(report.confirmed_types, 1);
    assert_eq!(report.members, 2);
    assert_eq!(report.confirmed_members, 1);
    assert_eq!(report.outbound_from_packages, 1);
    assert_eq!(report.outbound_from_types, 0);
    assert_eq!(report.outbound_from_members, 1);
    assert_eq!(report.inbound_to_packages, 1);
    assert_eq!(report.inbound_to_members, 1);
    assert_eq!(report.total_outbound(), factory.dependency_count());
    assert_eq!(report.total_inbound(), factory.dependency_count());
}

#[test]
fn test_metrics_display() {
    let mut factory = linked_graph();
    let a_pkg = factory.package_named("a").unwrap();
    let b_pkg = factory.package_named("b").unwrap();
    factory.add_dependency(a_pkg, b_pkg);

    let report = MetricsReport::gather(&factory);
    let expected = "\
2 package(s) (1 confirmed)
2 class(es) (1 confirmed)
2 feature(s) (1 confirmed)

2 outbound link(s)
    1 from package(s)
    0 from class(es)
    1 from feature(s)
2 inbound link(s)
    1 to package(s)
    0 to class(es)
    1 to feature(s)";
    assert_eq!(report.to_string(), expected);
}
