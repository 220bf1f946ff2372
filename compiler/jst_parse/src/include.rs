//! Parsing files reached through inclusion.
//!
//! The host decides what includes what; this module only carries the chain
//! of inclusion points so that a failure deep in the chain reports every
//! boundary it crossed.

use std::sync::Arc;

use jst_diagnostic::JstError;
use jst_lexer::ScanOptions;
use jst_lexer_core::SourceText;
use tracing::debug;

use crate::{load_source, parse_source, Document, FileLoader};

/// The point in an including file where another file is pulled in.
#[derive(Clone, Debug)]
pub struct IncludeSite {
    pub source: Arc<SourceText>,
    pub offset: u32,
}

impl IncludeSite {
    pub fn new(source: Arc<SourceText>, offset: u32) -> Self {
        IncludeSite { source, offset }
    }
}

/// Load and parse a top-level file.
pub fn parse_file(
    loader: &dyn FileLoader,
    name: &str,
    options: ScanOptions,
) -> Result<Document, JstError> {
    parse_included(loader, name, &[], options)
}

/// Load and parse `name`, included through `sites`.
///
/// `sites` runs from the direct includer outward to the root file. Any
/// error gains one trace entry per site, in that order.
pub fn parse_included(
    loader: &dyn FileLoader,
    name: &str,
    sites: &[IncludeSite],
    options: ScanOptions,
) -> Result<Document, JstError> {
    load_source(loader, name)
        .and_then(|source| parse_source(&source, options))
        .map_err(|err| {
            sites.iter().fold(err, |err, site| {
                debug!(
                    included = name,
                    from = site.source.name(),
                    offset = site.offset,
                    "error crosses include boundary"
                );
                err.attach_include_trace(&site.source, site.offset)
            })
        })
}
