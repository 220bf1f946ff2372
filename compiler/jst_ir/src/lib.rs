//! Core vocabulary of the JSight directive language.
//!
//! Pure data and pure functions: spans, the closed set of directive kinds
//! with their context grammar, schema notations, and the per-kind parameter
//! decision tables. Nothing here scans or allocates source buffers.

mod directive;
mod notation;
pub mod parameter;
mod span;

pub use directive::{
    has_response_code_prefix, is_response_code, lookup_keyword, starts_with_directive,
    DirectiveFlags, DirectiveKind, UnknownDirective, ALL_KINDS, KEYWORDS,
};
pub use notation::Notation;
pub use parameter::{classify_parameter, IncorrectParameter, ParamRole, Parameter};
pub use span::Span;
