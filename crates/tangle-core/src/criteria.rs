//! Match policies applied to nodes during traversals

use std::collections::BTreeSet;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::NodeKind;

/// Decides which nodes a traversal should consider.
///
/// The whole-node test combines a per-kind enable flag with name pattern
/// lists. The two halves are also exposed separately: the graph copier
/// walks edges using the name test alone and coarsens endpoints using the
/// kind flags alone.
pub trait SelectionCriteria {
    fn matches_packages(&self) -> bool;
    fn matches_types(&self) -> bool;
    fn matches_members(&self) -> bool;

    fn matches_package_name(&self, name: &str) -> bool;
    fn matches_type_name(&self, name: &str) -> bool;
    fn matches_member_name(&self, name: &str) -> bool;

    /// Whether nodes of `kind` are enabled at all.
    fn kind_enabled(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Package => self.matches_packages(),
            NodeKind::Type => self.matches_types(),
            NodeKind::Member => self.matches_members(),
        }
    }

    /// The name-only half of the match, ignoring the kind flags.
    fn matches_name(&self, kind: NodeKind, name: &str) -> bool {
        match kind {
            NodeKind::Package => self.matches_package_name(name),
            NodeKind::Type => self.matches_type_name(name),
            NodeKind::Member => self.matches_member_name(name),
        }
    }

    /// The full match: the kind is enabled and the name passes.
    fn matches(&self, kind: NodeKind, name: &str) -> bool {
        self.kind_enabled(kind) && self.matches_name(kind, name)
    }
}

/// One include or exclude pattern.
///
/// `/body/` compiles to a regular expression, with a trailing `i` flag for
/// case-insensitive matching; any other text matches as a literal
/// substring.
#[derive(Debug, Clone)]
enum Pattern {
    Regex(Regex),
    Substring(String),
}

impl Pattern {
    fn parse(text: &str) -> Result<Self> {
        if let Some(rest) = text.strip_prefix('/') {
            let body = rest
                .strip_suffix("/i")
                .map(|body| format!("(?i){body}"))
                .or_else(|| rest.strip_suffix('/').map(str::to_string));
            if let Some(body) = body {
                let regex = Regex::new(&body).map_err(|source| Error::InvalidPattern {
                    pattern: text.to_string(),
                    source,
                })?;
                return Ok(Pattern::Regex(regex));
            }
        }
        Ok(Pattern::Substring(text.to_string()))
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Pattern::Regex(regex) => regex.is_match(name),
            Pattern::Substring(text) => name.contains(text.as_str()),
        }
    }
}

/// Pattern-list criteria: global include/exclude lists plus per-kind flags.
///
/// An empty include list matches every name; an exclude always wins over
/// an include. All three kind flags start enabled. Pattern syntax errors
/// surface when the pattern is added, not during matching.
#[derive(Debug, Clone)]
pub struct PatternCriteria {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
    packages: bool,
    types: bool,
    members: bool,
}

impl PatternCriteria {
    pub fn new() -> Self {
        PatternCriteria {
            includes: Vec::new(),
            excludes: Vec::new(),
            packages: true,
            types: true,
            members: true,
        }
    }

    pub fn add_include(&mut self, pattern: &str) -> Result<()> {
        self.includes.push(Pattern::parse(pattern)?);
        Ok(())
    }

    pub fn add_exclude(&mut self, pattern: &str) -> Result<()> {
        self.excludes.push(Pattern::parse(pattern)?);
        Ok(())
    }

    pub fn set_matches_packages(&mut self, on: bool) {
        self.packages = on;
    }

    pub fn set_matches_types(&mut self, on: bool) {
        self.types = on;
    }

    pub fn set_matches_members(&mut self, on: bool) {
        self.members = on;
    }

    fn name_matches(&self, name: &str) -> bool {
        (self.includes.is_empty() || self.includes.iter().any(|pattern| pattern.matches(name)))
            && !self.excludes.iter().any(|pattern| pattern.matches(name))
    }
}

impl Default for PatternCriteria {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionCriteria for PatternCriteria {
    fn matches_packages(&self) -> bool {
        self.packages
    }

    fn matches_types(&self) -> bool {
        self.types
    }

    fn matches_members(&self) -> bool {
        self.members
    }

    fn matches_package_name(&self, name: &str) -> bool {
        self.name_matches(name)
    }

    fn matches_type_name(&self, name: &str) -> bool {
        self.name_matches(name)
    }

    fn matches_member_name(&self, name: &str) -> bool {
        self.name_matches(name)
    }
}

/// Exact-name criteria over an explicit set, kind-insensitive.
///
/// Unlike [`PatternCriteria`], an empty include set matches nothing, which
/// makes the no-argument form a natural "never stop" barrier.
#[derive(Debug, Clone, Default)]
pub struct CollectionCriteria {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
}

impl CollectionCriteria {
    pub fn new(include: &[&str]) -> Self {
        CollectionCriteria {
            include: include.iter().map(|name| name.to_string()).collect(),
            exclude: BTreeSet::new(),
        }
    }

    pub fn set_exclusions(&mut self, exclude: &[&str]) {
        self.exclude = exclude.iter().map(|name| name.to_string()).collect();
    }

    fn name_matches(&self, name: &str) -> bool {
        self.include.contains(name) && !self.exclude.contains(name)
    }
}

impl SelectionCriteria for CollectionCriteria {
    fn matches_packages(&self) -> bool {
        true
    }

    fn matches_types(&self) -> bool {
        true
    }

    fn matches_members(&self) -> bool {
        true
    }

    fn matches_package_name(&self, name: &str) -> bool {
        self.name_matches(name)
    }

    fn matches_type_name(&self, name: &str) -> bool {
        self.name_matches(name)
    }

    fn matches_member_name(&self, name: &str) -> bool {
        self.name_matches(name)
    }
}
