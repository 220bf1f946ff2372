//! Length probe for embedded schema bodies.
//!
//! The directive scanner never tokenizes a schema body itself. It hands the
//! remaining bytes to [`probe_length`], which scans forward with the schema
//! sub-language's own grammar and reports how many bytes the body occupies.
//! Offsets in a [`ProbeError`] are relative to the start of the probed
//! slice; the caller translates them into file coordinates.
//!
//! # Grammars
//!
//! - [`SchemaGrammar::Jsight`]: one example value. Objects and arrays nest
//!   through an explicit closer stack, strings honour `\` escapes, and
//!   `// annotation` comments may carry a `{ rules }` object spanning lines.
//! - [`SchemaGrammar::Regex`]: a single `/pattern/` on one line.
//!
//! Both grammars accept a trailing annotation on the line where the body
//! ends. Anything else after the body on that line is an error.

use std::fmt;

/// Sub-language used to scan a schema body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SchemaGrammar {
    /// JSON-like example values with annotations and rules.
    Jsight,
    /// A slash-delimited regular expression.
    Regex,
}

/// Error reported by the schema probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeError {
    /// Offset of the offending byte, relative to the probed slice.
    pub offset: u32,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at schema byte {})", self.message, self.offset)
    }
}

impl std::error::Error for ProbeError {}

/// Measure the schema body at the start of `bytes`.
///
/// Returns the number of bytes up to and including the last byte of the
/// body (or of its trailing annotation). Trailing horizontal whitespace and
/// the line break are not counted.
pub fn probe_length(bytes: &[u8], grammar: SchemaGrammar) -> Result<u32, ProbeError> {
    let mut probe = Probe { bytes, pos: 0 };
    match grammar {
        SchemaGrammar::Jsight => probe.jsight_value()?,
        SchemaGrammar::Regex => probe.regex()?,
    }
    let end = probe.trailing()?;
    Ok(offset(end))
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "probed slices come from SourceText, whose length fits in u32"
)]
fn offset(pos: usize) -> u32 {
    pos as u32
}

/// Printable rendering of a byte for error messages.
pub fn describe_byte(byte: u8) -> String {
    match byte {
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\t' => "\\t".to_string(),
        0x20..=0x7E => char::from(byte).to_string(),
        _ => format!("\\x{byte:02X}"),
    }
}

struct Probe<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Probe<'_> {
    fn current(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    fn error(&self, message: String) -> ProbeError {
        ProbeError {
            offset: offset(self.pos.min(self.bytes.len().saturating_sub(1))),
            message,
        }
    }

    fn unexpected(&self, byte: u8, place: &str, expected: &str) -> ProbeError {
        self.error(format!(
            "invalid character \"{}\" {place}, expecting {expected}",
            describe_byte(byte)
        ))
    }

    fn eof(&self, expected: &str) -> ProbeError {
        self.error(format!("unexpected end of file, expecting {expected}"))
    }

    fn eat_hws(&mut self) {
        while matches!(self.current(), Some(b' ' | b'\t')) {
            self.pos += 1;
        }
    }

    fn eat_to_line_end(&mut self) {
        let rest = self.bytes.get(self.pos..).unwrap_or_default();
        self.pos += memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
    }

    // ─── JSight example values ───────────────────────────────────────

    fn jsight_value(&mut self) -> Result<(), ProbeError> {
        // Closing delimiters still owed, innermost last.
        let mut closers: Vec<u8> = Vec::new();
        loop {
            if !closers.is_empty() {
                self.inner_trivia()?;
            }
            let Some(byte) = self.current() else {
                return Err(match closers.last() {
                    Some(&closer) => self.eof(&format!("\"{}\"", char::from(closer))),
                    None => self.eof("schema value"),
                });
            };
            match byte {
                b'{' => {
                    closers.push(b'}');
                    self.pos += 1;
                    continue;
                }
                b'[' => {
                    closers.push(b']');
                    self.pos += 1;
                    continue;
                }
                b'}' | b']' if closers.last() == Some(&byte) => {
                    closers.pop();
                    self.pos += 1;
                }
                b',' | b':' if !closers.is_empty() => {
                    self.pos += 1;
                    continue;
                }
                b'"' => self.string()?,
                _ if is_scalar_byte(byte) => self.scalar(),
                _ => {
                    return Err(match closers.last() {
                        Some(&closer) => self.unexpected(
                            byte,
                            "in schema",
                            &format!("value or \"{}\"", char::from(closer)),
                        ),
                        None => self.unexpected(byte, "at schema start", "schema value"),
                    });
                }
            }
            if closers.is_empty() {
                return Ok(());
            }
        }
    }

    /// Skip whitespace, line breaks, comments and annotations between
    /// elements of an object or array.
    fn inner_trivia(&mut self) -> Result<(), ProbeError> {
        loop {
            match self.current() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => self.pos += 1,
                Some(b'#') => self.eat_to_line_end(),
                Some(b'/') if self.peek() == Some(b'#') => self.block_comment()?,
                Some(b'/') if self.peek() == Some(b'/') => self.annotation()?,
                _ => return Ok(()),
            }
        }
    }

    fn string(&mut self) -> Result<(), ProbeError> {
        self.pos += 1; // opening quote
        loop {
            match self.current() {
                None => return Err(self.eof("\"\\\"\" to close the string")),
                Some(b'\n' | b'\r') => {
                    return Err(self.error("unterminated string in schema".to_string()));
                }
                Some(b'\\') => self.pos += 2,
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn scalar(&mut self) {
        while self.current().is_some_and(is_scalar_byte) {
            self.pos += 1;
        }
    }

    fn block_comment(&mut self) -> Result<(), ProbeError> {
        self.pos += 2; // `/#`
        let rest = self.bytes.get(self.pos..).unwrap_or_default();
        match memchr::memmem::find(rest, b"#/") {
            Some(len) => {
                self.pos += len + 2;
                Ok(())
            }
            None => {
                self.pos = self.bytes.len();
                Err(self.eof("\"#/\" to close the comment"))
            }
        }
    }

    /// `// text` or `// { rules } text`, up to the end of the line holding
    /// the last rules brace.
    fn annotation(&mut self) -> Result<(), ProbeError> {
        self.pos += 2; // `//`
        self.eat_hws();
        if self.current() == Some(b'{') {
            let mut depth = 0u32;
            loop {
                match self.current() {
                    None => return Err(self.eof("\"}\" to close the rules")),
                    Some(b'{') => {
                        depth += 1;
                        self.pos += 1;
                    }
                    Some(b'}') => {
                        depth -= 1;
                        self.pos += 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    Some(b'"') => self.string()?,
                    Some(_) => self.pos += 1,
                }
            }
        }
        self.eat_to_line_end();
        Ok(())
    }

    // ─── Regex bodies ────────────────────────────────────────────────

    fn regex(&mut self) -> Result<(), ProbeError> {
        match self.current() {
            Some(b'/') => self.pos += 1,
            Some(byte) => return Err(self.unexpected(byte, "at regex start", "\"/\"")),
            None => return Err(self.eof("\"/\"")),
        }
        loop {
            match self.current() {
                None => return Err(self.eof("\"/\" to close the regex")),
                Some(b'\n' | b'\r') => {
                    return Err(self.error("unterminated regex".to_string()));
                }
                Some(b'\\') => self.pos += 2,
                Some(b'/') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    // ─── After the body ──────────────────────────────────────────────

    /// Accept an optional annotation or comment on the closing line.
    ///
    /// Returns the end of the body (exclusive), excluding trailing blanks.
    fn trailing(&mut self) -> Result<usize, ProbeError> {
        let mut end = self.pos;
        self.eat_hws();
        match self.current() {
            None | Some(b'\n' | b'\r') => return Ok(end),
            Some(b'/') if self.peek() == Some(b'/') => self.annotation()?,
            Some(b'/') if self.peek() == Some(b'#') => self.block_comment()?,
            Some(b'#') => self.eat_to_line_end(),
            Some(byte) => {
                return Err(self.unexpected(byte, "after schema", "end of line or annotation"));
            }
        }
        end = self.pos;
        // A block comment may be followed by more text on the same line.
        self.eat_hws();
        match self.current() {
            None | Some(b'\n' | b'\r') => Ok(end),
            Some(_) => self.trailing(),
        }
    }
}

/// Bytes that may appear in a bare scalar: numbers, `true`/`false`/`null`,
/// `@type` references and `|` unions.
fn is_scalar_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'@' | b'_' | b'-' | b'+' | b'.' | b'|')
}

#[cfg(test)]
mod tests;
