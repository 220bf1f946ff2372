//! Scanning independent sources in parallel.
//!
//! Each source gets its own scanner; sources are immutable and scanners
//! share nothing, so the work splits across rayon's pool without locking.
//! Results come back in input order.

use std::sync::Arc;

use jst_diagnostic::JstError;
use jst_lexer::{scan_with, LexemeEvent, ScanOptions};
use jst_lexer_core::SourceText;
use rayon::prelude::*;

use crate::{parse_source, Document};

pub fn scan_sources(
    sources: &[Arc<SourceText>],
    options: ScanOptions,
) -> Vec<Result<Vec<LexemeEvent>, JstError>> {
    sources
        .par_iter()
        .map(|source| scan_with(source, options))
        .collect()
}

pub fn parse_sources(
    sources: &[Arc<SourceText>],
    options: ScanOptions,
) -> Vec<Result<Document, JstError>> {
    sources
        .par_iter()
        .map(|source| parse_source(source, options))
        .collect()
}
