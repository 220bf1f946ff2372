//! Error codes for all scanner and validation diagnostics.
//!
//! Format: E#### where the first digit indicates the phase:
//! - E0xxx: scanner errors (bytes the automaton cannot accept)
//! - E1xxx: grammar errors (directives, contexts, parameters)
//! - E9xxx: host errors (loading sources)

use std::fmt;

/// Error category, one per failure mode of the engine.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// Unexpected byte or end of file.
    Lexical,
    /// Keyword text that names no directive.
    UnknownDirective,
    /// Child directive not permitted under its parent.
    Context,
    /// Parameter text that matches no accepted pattern.
    Parameter,
    /// Failure inside an embedded schema body.
    SubScanner,
    /// The host could not supply a source.
    Load,
}

/// Stable identifier for a diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Scanner Errors (E0xxx)
    /// Invalid character
    E0001,
    /// Unexpected end of file
    E0002,
    /// Invalid embedded schema
    E0003,

    // Grammar Errors (E1xxx)
    /// Unknown directive
    E1001,
    /// Directive not allowed in this context
    E1002,
    /// Incorrect parameter
    E1003,

    // Host Errors (E9xxx)
    /// Source could not be loaded
    E9001,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E9001 => "E9001",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E0001 | ErrorCode::E0002 => ErrorKind::Lexical,
            ErrorCode::E0003 => ErrorKind::SubScanner,
            ErrorCode::E1001 => ErrorKind::UnknownDirective,
            ErrorCode::E1002 => ErrorKind::Context,
            ErrorCode::E1003 => ErrorKind::Parameter,
            ErrorCode::E9001 => ErrorKind::Load,
        }
    }

    /// Check if this is a scanner error (E0xxx range).
    pub fn is_scanner_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E0001.to_string(), "E0001");
        assert_eq!(ErrorCode::E1002.to_string(), "E1002");
        assert_eq!(format!("{}", ErrorCode::E9001), "E9001");
    }

    #[test]
    fn test_scanner_range() {
        assert!(ErrorCode::E0002.is_scanner_error());
        assert!(ErrorCode::E0003.is_scanner_error());
        assert!(!ErrorCode::E1001.is_scanner_error());
        assert!(!ErrorCode::E9001.is_scanner_error());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ErrorCode::E0002.kind(), ErrorKind::Lexical);
        assert_eq!(ErrorCode::E0003.kind(), ErrorKind::SubScanner);
        assert_eq!(ErrorCode::E1002.kind(), ErrorKind::Context);
        assert_eq!(ErrorCode::E9001.kind(), ErrorKind::Load);
    }
}
