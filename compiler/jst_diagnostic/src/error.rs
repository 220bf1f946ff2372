//! The engine's error value.
//!
//! A [`JstError`] is self-contained: it holds the source it points into, so
//! file name, line and quote can always be produced without a side table.
//! Errors that cross file-inclusion boundaries gain one [`IncludeTraceEntry`]
//! per boundary, innermost first.

use std::fmt;
use std::sync::Arc;

use jst_ir::{IncorrectParameter, Span, UnknownDirective};
use jst_lexer_core::{describe_byte, ProbeError, SourceText, SourceTooLarge};
use smallvec::SmallVec;

use crate::location::{line_number, quote};
use crate::ErrorCode;

/// A span inside a particular source.
#[derive(Clone, Debug)]
pub struct Coordinates {
    source: Arc<SourceText>,
    span: Span,
}

impl Coordinates {
    pub fn new(source: Arc<SourceText>, span: Span) -> Self {
        Coordinates { source, span }
    }

    /// Coordinates of the single byte at `offset`.
    pub fn at(source: Arc<SourceText>, offset: u32) -> Self {
        Coordinates::new(source, Span::at(offset))
    }

    pub fn source(&self) -> &Arc<SourceText> {
        &self.source
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn file_name(&self) -> &str {
        self.source.name()
    }

    /// 1-based line of the span start; `None` while the span is unset.
    pub fn line(&self) -> Option<u32> {
        self.span
            .get()
            .map(|(begin, _)| line_number(&self.source, begin))
    }

    /// Quote of the line holding the span start; `None` while unset.
    pub fn quote(&self) -> Option<String> {
        self.span.get().map(|(begin, _)| quote(&self.source, begin))
    }
}

/// One file-inclusion point an error passed through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncludeTraceEntry {
    pub file: String,
    pub line: u32,
}

impl fmt::Display for IncludeTraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[derive(Clone, Debug)]
enum Location {
    Source(Coordinates),
    /// Load failures have a file name but no source to point into.
    File(String),
}

/// A scanning, validation or load failure.
#[derive(Clone, Debug)]
pub struct JstError {
    code: ErrorCode,
    message: String,
    location: Location,
    trace: SmallVec<[IncludeTraceEntry; 2]>,
}

impl JstError {
    fn new(code: ErrorCode, message: String, location: Location) -> Self {
        JstError {
            code,
            message,
            location,
            trace: SmallVec::new(),
        }
    }

    fn at(code: ErrorCode, message: String, coordinates: Coordinates) -> Self {
        JstError::new(code, message, Location::Source(coordinates))
    }

    /// `invalid character "<c>" <place>, expecting <expected>`.
    pub fn invalid_character(coordinates: Coordinates, byte: u8, place: &str, expected: &str) -> Self {
        JstError::at(
            ErrorCode::E0001,
            format!(
                "invalid character \"{}\" {place}, expecting {expected}",
                describe_byte(byte)
            ),
            coordinates,
        )
    }

    /// Any other lexical failure with a ready-made message.
    pub fn lexical(coordinates: Coordinates, message: impl Into<String>) -> Self {
        JstError::at(ErrorCode::E0001, message.into(), coordinates)
    }

    pub fn unexpected_eof(coordinates: Coordinates, expected: &str) -> Self {
        JstError::at(
            ErrorCode::E0002,
            format!("unexpected end of file, expecting {expected}"),
            coordinates,
        )
    }

    pub fn unknown_directive(coordinates: Coordinates, err: &UnknownDirective) -> Self {
        JstError::at(ErrorCode::E1001, err.to_string(), coordinates)
    }

    pub fn context(coordinates: Coordinates, message: impl Into<String>) -> Self {
        JstError::at(ErrorCode::E1002, message.into(), coordinates)
    }

    pub fn parameter(coordinates: Coordinates, err: &IncorrectParameter) -> Self {
        JstError::at(ErrorCode::E1003, err.to_string(), coordinates)
    }

    /// Translate a schema probe failure into file coordinates.
    ///
    /// `body_start` is the file offset the probed slice began at.
    pub fn sub_scanner(source: Arc<SourceText>, body_start: u32, err: &ProbeError) -> Self {
        let offset = body_start.saturating_add(err.offset);
        JstError::at(
            ErrorCode::E0003,
            err.message.clone(),
            Coordinates::at(source, offset),
        )
    }

    pub fn load(file: impl Into<String>, message: impl Into<String>) -> Self {
        JstError::new(ErrorCode::E9001, message.into(), Location::File(file.into()))
    }

    /// Record that this error surfaced through an inclusion at `offset`
    /// of `including`.
    #[must_use]
    pub fn attach_include_trace(mut self, including: &SourceText, offset: u32) -> Self {
        self.trace.push(IncludeTraceEntry {
            file: including.name().to_string(),
            line: line_number(including, offset),
        });
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn coordinates(&self) -> Option<&Coordinates> {
        match &self.location {
            Location::Source(coordinates) => Some(coordinates),
            Location::File(_) => None,
        }
    }

    pub fn file_name(&self) -> &str {
        match &self.location {
            Location::Source(coordinates) => coordinates.file_name(),
            Location::File(name) => name,
        }
    }

    /// 1-based line of the primary location. Load errors have none.
    pub fn line(&self) -> Option<u32> {
        self.coordinates().and_then(Coordinates::line)
    }

    pub fn quote(&self) -> Option<String> {
        self.coordinates().and_then(Coordinates::quote)
    }

    /// Inclusion points, innermost first.
    pub fn trace(&self) -> &[IncludeTraceEntry] {
        &self.trace
    }
}

impl fmt::Display for JstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error[{}]: {}", self.code, self.message)?;
        match self.line() {
            Some(line) => write!(f, " --> {}:{line}", self.file_name())?,
            None => write!(f, " --> {}", self.file_name())?,
        }
        if let Some(quote) = self.quote() {
            write!(f, "\n  | {quote}")?;
        }
        for entry in &self.trace {
            write!(f, "\n{entry}")?;
        }
        Ok(())
    }
}

impl std::error::Error for JstError {}

impl From<SourceTooLarge> for JstError {
    fn from(err: SourceTooLarge) -> Self {
        JstError::load(err.name.clone(), err.to_string())
    }
}

#[cfg(test)]
mod tests;
