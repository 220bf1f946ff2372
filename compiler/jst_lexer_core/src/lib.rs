//! Low-level building blocks for scanning JSight sources.
//!
//! - [`SourceText`]: immutable, named, sentinel-terminated source bytes.
//! - [`Cursor`]: byte cursor over a `SourceText`.
//! - [`probe_length`]: the embedded-schema sub-scanner. It measures a schema
//!   body with its own grammar so the directive scanner can skip over it.
//!
//! This crate has no `jst_*` dependencies.

mod cursor;
mod schema_probe;
mod source_text;

pub use cursor::Cursor;
pub use schema_probe::{describe_byte, probe_length, ProbeError, SchemaGrammar};
pub use source_text::{paired_newline, SourceText, SourceTooLarge, MAX_SOURCE_LEN};
