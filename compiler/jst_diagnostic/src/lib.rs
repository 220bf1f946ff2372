//! Locations and structured errors for JSight sources.
//!
//! - [`location`]: line numbers, line bounds and capped quotes for any byte
//!   offset, computed against the file's dominant newline byte.
//! - [`JstError`]: message, primary [`Coordinates`] and the ordered include
//!   trace. Every error renders its file, line and quote on its own.
//! - [`ErrorCode`]: stable identifiers grouped by phase.

mod error;
mod error_code;
pub mod location;

pub use error::{Coordinates, IncludeTraceEntry, JstError};
pub use error_code::{ErrorCode, ErrorKind};
pub use location::{line_bounds, line_number, quote, LineBounds, QUOTE_LIMIT};
