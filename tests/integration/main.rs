//! Integration tests for Tangle
//!
//! These tests verify that multiple systems work together correctly.

use std::fs;
use std::process::Command;

use tangle_core::{
    CollectionCriteria, CycleDetector, DepthBound, GraphCopier, NodeFactory, PatternCriteria,
    SelectiveTraversalStrategy, TransitiveClosure,
};
use tangle_report::{print_cycles, read_document, write_document, MetricsReport, TextPrinter};
use tempfile::TempDir;

const CHAIN_DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<dependencies>
    <package confirmed="yes">
        <name>a</name>
        <class confirmed="yes">
            <name>a.A</name>
            <feature confirmed="yes">
                <name>a.A.a</name>
                <outbound type="feature" confirmed="yes">b.B.b</outbound>
            </feature>
        </class>
    </package>
    <package confirmed="yes">
        <name>b</name>
        <class confirmed="yes">
            <name>b.B</name>
            <feature confirmed="yes">
                <name>b.B.b</name>
                <outbound type="feature" confirmed="no">c.C.c</outbound>
            </feature>
        </class>
    </package>
</dependencies>
"#;

/// Test that the CLI can be invoked
#[test]
fn test_cli_invocation() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .current_dir(".")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Query and reshape extracted dependency graphs"));
}

/// Test that a document survives a trip through the filesystem
#[test]
fn test_document_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deps.xml");

    let mut factory = NodeFactory::new();
    let from = factory.create_member("a.A.a", true).unwrap();
    let to = factory.create_member("b.B.b", false).unwrap();
    factory.add_dependency(from, to);

    fs::write(&path, write_document(&factory).unwrap()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let decoded = read_document(&text).unwrap();

    assert_eq!(decoded.package_count(), 2);
    assert_eq!(decoded.type_count(), 2);
    assert_eq!(decoded.member_count(), 2);
    assert_eq!(decoded.dependency_count(), 1);

    let from = decoded.member_named("a.A.a").unwrap();
    let to = decoded.member_named("b.B.b").unwrap();
    assert!(decoded.has_dependency(from, to));
    assert!(decoded.node(from).unwrap().confirmed);
    assert!(!decoded.node(to).unwrap().confirmed);
}

/// Test cycle detection over a loaded document
#[test]
fn test_cycles_from_document() {
    let document = r#"<?xml version="1.0" encoding="utf-8"?>
<dependencies>
    <package confirmed="yes">
        <name>a</name>
        <class confirmed="yes">
            <name>a.A</name>
            <feature confirmed="yes">
                <name>a.A.a</name>
                <outbound type="feature" confirmed="yes">b.B.b</outbound>
            </feature>
        </class>
    </package>
    <package confirmed="yes">
        <name>b</name>
        <class confirmed="yes">
            <name>b.B</name>
            <feature confirmed="yes">
                <name>b.B.b</name>
                <outbound type="feature" confirmed="yes">a.A.a</outbound>
            </feature>
        </class>
    </package>
</dependencies>
"#;

    let factory = read_document(document).unwrap();
    let roots: Vec<_> = factory.packages().map(|(_, id)| id).collect();

    let mut detector = CycleDetector::new(&factory);
    detector.traverse_nodes(&roots);
    let cycles = detector.into_cycles();

    assert_eq!(cycles.len(), 1);
    let expected = "a.A.a\n    --> b.B.b\n    --> a.A.a\n";
    assert_eq!(print_cycles(&factory, &cycles), expected);
}

/// Test the closure pipeline from document to printed report
#[test]
fn test_closure_from_document() {
    let factory = read_document(CHAIN_DOCUMENT).unwrap();
    let roots: Vec<_> = factory.packages().map(|(_, id)| id).collect();

    let start = CollectionCriteria::new(&["a.A.a"]);
    let stop = CollectionCriteria::new(&[]);
    let mut closure = TransitiveClosure::new(&start, &stop);
    closure.set_outbound_depth(DepthBound::Unbounded);
    closure.traverse_nodes(&factory, &roots);
    let result = closure.into_factory();

    assert_eq!(result.member_count(), 3);
    assert_eq!(result.dependency_count(), 2);

    // Flags recorded in the document survive the closure copy.
    let printed = TextPrinter::new().print(&result);
    assert!(printed.contains("--> b.B.b\n"));
    assert!(printed.contains("c *\n"));
}

/// Test the summary pipeline from document back to a document
#[test]
fn test_summary_from_document() {
    let factory = read_document(CHAIN_DOCUMENT).unwrap();
    let roots: Vec<_> = factory.packages().map(|(_, id)| id).collect();

    let mut scope = PatternCriteria::new();
    scope.set_matches_types(false);
    scope.set_matches_members(false);
    let mut filter = PatternCriteria::new();
    filter.set_matches_types(false);
    filter.set_matches_members(false);

    let strategy = SelectiveTraversalStrategy::new(&scope, &filter);
    let mut copier = GraphCopier::new(strategy);
    copier.traverse_nodes(&factory, &roots);
    let summary = copier.into_factory();

    assert_eq!(summary.package_count(), 3);
    assert_eq!(summary.type_count(), 0);
    assert_eq!(summary.dependency_count(), 2);

    let document = write_document(&summary).unwrap();
    assert!(document.contains(r#"<outbound type="package" confirmed="yes">b</outbound>"#));
    assert!(document.contains(r#"<outbound type="package" confirmed="no">c</outbound>"#));
    assert!(document.contains(r#"<package confirmed="no">"#));
}

/// Test that metrics agree with the loaded document
#[test]
fn test_metrics_from_document() {
    let factory = read_document(CHAIN_DOCUMENT).unwrap();
    let report = MetricsReport::gather(&factory);

    assert_eq!(report.packages, 3);
    assert_eq!(report.confirmed_packages, 2);
    assert_eq!(report.members, 3);
    assert_eq!(report.confirmed_members, 2);
    assert_eq!(report.total_outbound(), 2);
    assert_eq!(report.total_inbound(), 2);
    assert_eq!(report.outbound_from_members, 2);
    assert_eq!(report.inbound_to_members, 2);
}
