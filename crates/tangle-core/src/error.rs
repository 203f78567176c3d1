//! Error types for graph construction and traversal configuration.

use thiserror::Error;

/// Result type for tangle-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while building a graph or configuring a traversal.
///
/// An empty traversal result is never an error; these cover structurally
/// invalid input only.
#[derive(Debug, Error)]
pub enum Error {
    /// A member name carries no enclosing type prefix.
    #[error("malformed member name {name:?}: expected a type-qualified name")]
    MalformedMemberName { name: String },

    /// A `/…/` selection pattern failed to compile.
    #[error("invalid selection pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// A numeric traversal depth other than `-1` was negative.
    #[error("invalid traversal depth {0}")]
    InvalidDepth(i64),
}
