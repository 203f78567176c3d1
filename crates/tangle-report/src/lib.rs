//! Tangle Report — dependency document codec and report renderers

pub mod cycles;
pub mod document;
pub mod error;
pub mod json;
pub mod metrics;
pub mod text;

#[cfg(test)]
pub mod tests;

pub use cycles::print_cycles;
pub use document::{read_document, write_document};
pub use error::{Error, Result};
pub use json::{to_json, to_json_string};
pub use metrics::MetricsReport;
pub use text::TextPrinter;
