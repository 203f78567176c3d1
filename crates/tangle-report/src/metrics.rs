//! Aggregate counts over a dependency graph

use std::fmt;

use tangle_core::NodeFactory;

/// Element and link counts gathered in one pass over a factory.
///
/// Link counts are attributed to the granularity of the endpoint: an
/// outbound link counts for its source's kind, an inbound link for its
/// target's kind, so mixed-granularity graphs split accordingly.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MetricsReport {
    pub packages: usize,
    pub confirmed_packages: usize,
    pub types: usize,
    pub confirmed_types: usize,
    pub members: usize,
    pub confirmed_members: usize,
    pub outbound_from_packages: usize,
    pub outbound_from_types: usize,
    pub outbound_from_members: usize,
    pub inbound_to_packages: usize,
    pub inbound_to_types: usize,
    pub inbound_to_members: usize,
}

impl MetricsReport {
    #[must_use]
    pub fn gather(factory: &NodeFactory) -> Self {
        let mut report = MetricsReport::default();
        for (_, id) in factory.packages() {
            report.packages += 1;
            if factory.node(id).is_some_and(|node| node.confirmed) {
                report.confirmed_packages += 1;
            }
            report.outbound_from_packages += factory.outbound(id).len();
            report.inbound_to_packages += factory.inbound(id).len();
        }
        for (_, id) in factory.types() {
            report.types += 1;
            if factory.node(id).is_some_and(|node| node.confirmed) {
                report.confirmed_types += 1;
            }
            report.outbound_from_types += factory.outbound(id).len();
            report.inbound_to_types += factory.inbound(id).len();
        }
        for (_, id) in factory.members() {
            report.members += 1;
            if factory.node(id).is_some_and(|node| node.confirmed) {
                report.confirmed_members += 1;
            }
            report.outbound_from_members += factory.outbound(id).len();
            report.inbound_to_members += factory.inbound(id).len();
        }
        report
    }

    #[must_use]
    pub fn total_outbound(&self) -> usize {
        self.outbound_from_packages + self.outbound_from_types + self.outbound_from_members
    }

    #[must_use]
    pub fn total_inbound(&self) -> usize {
        self.inbound_to_packages + self.inbound_to_types + self.inbound_to_members
    }
}

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} package(s) ({} confirmed)",
            self.packages, self.confirmed_packages
        )?;
        writeln!(
            f,
            "{} class(es) ({} confirmed)",
            self.types, self.confirmed_types
        )?;
        writeln!(
            f,
            "{} feature(s) ({} confirmed)",
            self.members, self.confirmed_members
        )?;
        writeln!(f)?;
        writeln!(f, "{} outbound link(s)", self.total_outbound())?;
        writeln!(f, "    {} from package(s)", self.outbound_from_packages)?;
        writeln!(f, "    {} from class(es)", self.outbound_from_types)?;
        writeln!(f, "    {} from feature(s)", self.outbound_from_members)?;
        writeln!(f, "{} inbound link(s)", self.total_inbound())?;
        writeln!(f, "    {} to package(s)", self.inbound_to_packages)?;
        writeln!(f, "    {} to class(es)", self.inbound_to_types)?;
        write!(f, "    {} to feature(s)", self.inbound_to_members)
    }
}
