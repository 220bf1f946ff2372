//! Directive validation for JSight.
//!
//! Consumes the scanner's event stream and produces a flat, validated
//! [`Document`]: each directive knows its kind, parent, classified
//! parameters, annotation and body span. Also hosts the file-loading seam,
//! include-trace propagation and parallel scanning of independent sources.

mod document;
mod include;
mod loader;
mod parallel;
mod validate;

use std::sync::Arc;

use jst_diagnostic::JstError;
use jst_lexer_core::SourceText;

pub use document::{Body, BodyKind, Directive, Document};
pub use include::{parse_file, parse_included, IncludeSite};
pub use jst_lexer::ScanOptions;
pub use loader::{load_source, FileLoader, LoadError, MemoryLoader};
pub use parallel::{parse_sources, scan_sources};
pub use validate::validate;

/// Scan and validate one source.
pub fn parse_source(source: &Arc<SourceText>, options: ScanOptions) -> Result<Document, JstError> {
    let events = jst_lexer::scan_with(source, options)?;
    let directives = validate(source, &events)?;
    Ok(Document::new(Arc::clone(source), directives))
}
