//! Error types for document decoding and report rendering.

use thiserror::Error;

/// Result type for tangle-report operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while decoding a dependency document or rendering a
/// report from one.
#[derive(Debug, Error)]
pub enum Error {
    /// The XML itself failed to parse.
    #[error("malformed xml: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An element attribute failed to parse.
    #[error("malformed xml attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Well-formed XML that is not a dependency document.
    #[error("invalid dependency document: {0}")]
    Document(String),

    /// A node in the document violates graph naming rules.
    #[error(transparent)]
    Model(#[from] tangle_core::Error),

    /// A rendered document came out as something other than UTF-8.
    #[error("rendered document is not utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// JSON rendering failed.
    #[error("json rendering failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing a rendered document failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
