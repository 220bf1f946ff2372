//! Directive scanner for JSight API descriptions.
//!
//! Turns a [`SourceText`](jst_lexer_core::SourceText) into a flat stream of
//! [`LexemeEvent`]s. Keywords are matched against the sorted keyword table
//! one byte at a time; schema bodies are measured by the embedded-schema
//! probe and skipped whole. The grammar of which directive may nest under
//! which is not checked here; see `jst_parse`.

mod keyword;
mod lexeme;
mod scanner;
mod state;

pub use lexeme::{LexemeEvent, LexemeKind};
pub use scanner::{scan, scan_with, ScanOptions, Scanner};
