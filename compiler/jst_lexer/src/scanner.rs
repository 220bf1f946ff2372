//! The directive scanner.
//!
//! A byte-at-a-time automaton over one [`SourceText`]. It recognizes
//! keywords, parameters, annotations, comments and explicit contexts
//! itself, and delegates embedded schema bodies to
//! [`probe_length`], skipping the measured length in one step.
//!
//! Scanning is fail-fast: the first malformed byte produces one
//! [`JstError`] and the scanner stops. [`Scanner`] is a fused iterator, so
//! it yields every event produced before the error, then the error, then
//! nothing.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::sync::Arc;

use jst_diagnostic::{Coordinates, JstError};
use jst_ir::parameter::unquote;
use jst_ir::{starts_with_directive, DirectiveKind, Notation, Span};
use jst_lexer_core::{probe_length, Cursor, SchemaGrammar, SourceText};
use tracing::{debug, trace};

use crate::keyword::{KeywordState, Step};
use crate::state::{State, StateStack};
use crate::{LexemeEvent, LexemeKind};

/// Scanner configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum nesting of explicit `( ... )` contexts.
    pub max_context_depth: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            max_context_depth: 64,
        }
    }
}

/// Scan a whole source with default options.
pub fn scan(source: &Arc<SourceText>) -> Result<Vec<LexemeEvent>, JstError> {
    scan_with(source, ScanOptions::default())
}

#[tracing::instrument(level = "debug", skip_all, fields(file = source.name(), len = source.len()))]
pub fn scan_with(
    source: &Arc<SourceText>,
    options: ScanOptions,
) -> Result<Vec<LexemeEvent>, JstError> {
    let events = Scanner::with_options(source, options).collect::<Result<Vec<_>, _>>()?;
    debug!(events = events.len(), "scanned");
    Ok(events)
}

/// The directive whose line is being scanned.
#[derive(Copy, Clone, Debug)]
struct LineDirective {
    kind: DirectiveKind,
    notation: Notation,
    /// Schema already given on the directive line.
    has_inline_body: bool,
    /// `(` seen on the directive line.
    paren: bool,
}

/// Streaming scanner over one source.
pub struct Scanner<'a> {
    source: &'a Arc<SourceText>,
    cursor: Cursor<'a>,
    stack: StateStack,
    pending: VecDeque<LexemeEvent>,
    error: Option<JstError>,
    directive: Option<LineDirective>,
    /// Offsets of the open `(` of each explicit context.
    contexts: Vec<u32>,
    options: ScanOptions,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a Arc<SourceText>) -> Self {
        Scanner::with_options(source, ScanOptions::default())
    }

    pub fn with_options(source: &'a Arc<SourceText>, options: ScanOptions) -> Self {
        Scanner {
            source,
            cursor: source.cursor(),
            stack: StateStack::new(State::LineStart),
            pending: VecDeque::new(),
            error: None,
            directive: None,
            contexts: Vec::new(),
            options,
        }
    }

    /// Current byte offset.
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    fn next_event(&mut self) -> Option<Result<LexemeEvent, JstError>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if let Some(err) = self.error.take() {
                return Some(Err(err));
            }
            let state = self.stack.pop()?;
            if let Err(err) = self.run(state) {
                debug!(pos = self.cursor.pos(), %err, "scan failed");
                self.stack.clear();
                self.error = Some(err);
            }
        }
    }

    fn run(&mut self, state: State) -> Result<(), JstError> {
        trace!(?state, pos = self.cursor.pos(), "step");
        match state {
            State::LineStart => self.line_start(),
            State::Keyword => self.keyword(),
            State::DirectiveTail => self.directive_tail(),
            State::QuotedParameter => self.quoted_parameter(),
            State::BareParameter => {
                self.bare_parameter();
                Ok(())
            }
            State::Annotation => {
                self.annotation();
                Ok(())
            }
            State::Body => {
                self.body();
                Ok(())
            }
            State::Schema => self.schema(),
            State::Text => {
                self.text();
                Ok(())
            }
            State::ParenText => self.paren_text(),
            State::LineComment => {
                self.line_comment();
                Ok(())
            }
            State::BlockComment => self.block_comment(),
            State::LineEnd(place) => self.line_end(place),
        }
    }

    // ─── Helpers ─────────────────────────────────────────────────────

    fn at(&self, offset: u32) -> Coordinates {
        Coordinates::at(Arc::clone(self.source), offset)
    }

    fn emit_pair(&mut self, begin: LexemeKind, start: u32, end_exclusive: u32) {
        let Some(end) = begin.closer() else {
            return;
        };
        self.pending
            .push_back(LexemeEvent::new(begin, Span::at(start)));
        self.pending
            .push_back(LexemeEvent::new(end, Span::from_exclusive(start, end_exclusive)));
    }

    fn unexpected(&self, place: &str, expected: &str) -> JstError {
        let pos = self.cursor.pos();
        if self.cursor.is_eof() {
            JstError::unexpected_eof(self.at(pos), expected)
        } else {
            JstError::invalid_character(self.at(pos), self.cursor.current(), place, expected)
        }
    }

    fn at_line_end(cursor: &Cursor<'_>) -> bool {
        cursor.is_eof() || matches!(cursor.current(), b'\n' | b'\r')
    }

    /// Exclusive end of `start..pos` with trailing blanks dropped.
    fn trimmed_end(&self, start: u32) -> u32 {
        let content = self.cursor.slice_from(start);
        let kept = content
            .iter()
            .rposition(|b| !matches!(b, b' ' | b'\t'))
            .map_or(0, |index| index + 1);
        start + u32::try_from(kept).unwrap_or(0)
    }

    /// Skip blank lines ahead of the cursor without moving it.
    fn next_content(&self) -> Cursor<'a> {
        let mut look = self.cursor;
        loop {
            look.eat_whitespace();
            if !look.eat_newline() {
                return look;
            }
        }
    }

    /// Returns `true` if the line at `look` opens a new item rather than
    /// starting a schema body.
    fn starts_item(&self, look: &Cursor<'_>) -> bool {
        let rest = look.rest();
        look.is_eof()
            || starts_with_directive(rest)
            || matches!(rest.first(), Some(b'#' | b')' | b'('))
            || rest.starts_with(b"/#")
    }

    /// Returns `true` if free text stops before the line at `look`.
    ///
    /// Comment markers and parentheses inside text are plain text.
    fn ends_text(&self, look: &Cursor<'_>) -> bool {
        look.is_eof()
            || starts_with_directive(look.rest())
            || (!self.contexts.is_empty() && look.current() == b')')
    }

    // ─── Items ───────────────────────────────────────────────────────

    fn line_start(&mut self) -> Result<(), JstError> {
        self.cursor.eat_whitespace();
        if self.cursor.is_eof() {
            if !self.contexts.is_empty() {
                return Err(self.unexpected("", "\")\""));
            }
            return Ok(());
        }
        match self.cursor.current() {
            b'\n' | b'\r' => {
                self.cursor.eat_newline();
                self.stack.push(State::LineStart);
            }
            b'#' => self.stack.call(State::LineComment, State::LineStart),
            b'/' if self.cursor.peek() == b'#' => {
                self.stack.push(State::LineStart);
                self.stack.call(State::BlockComment, State::LineEnd("after comment"));
            }
            b')' => {
                let Some(open) = self.contexts.pop() else {
                    return Err(self.unexpected("at directive start", "directive"));
                };
                let close = self.cursor.pos();
                self.cursor.advance();
                // The begin event went out with the `(`.
                self.pending
                    .push_back(LexemeEvent::new(LexemeKind::ContextEnd, Span::new(open, close)));
                self.stack.call(State::LineEnd("after \")\""), State::LineStart);
            }
            _ => self.stack.call(State::Keyword, State::LineStart),
        }
        Ok(())
    }

    fn keyword(&mut self) -> Result<(), JstError> {
        let start = self.cursor.pos();
        let mut state = KeywordState::START;
        let kind = loop {
            match state.step(self.cursor.current()) {
                Step::Continue(next) => {
                    state = next;
                    self.cursor.advance();
                }
                Step::Done(kind) => break kind,
                Step::Mismatch => {
                    let place = if state.depth() == 0 {
                        "at directive start".to_string()
                    } else {
                        format!(
                            "in keyword \"{}\"",
                            String::from_utf8_lossy(self.cursor.slice_from(start))
                        )
                    };
                    return Err(self.unexpected(&place, &state.expected()));
                }
            }
        };
        trace!(%kind, start, "keyword");
        self.emit_pair(LexemeKind::KeywordBegin, start, self.cursor.pos());
        self.directive = Some(LineDirective {
            kind,
            notation: Notation::default(),
            has_inline_body: false,
            paren: false,
        });
        self.stack.push(State::DirectiveTail);
        Ok(())
    }

    fn directive_tail(&mut self) -> Result<(), JstError> {
        self.cursor.eat_whitespace();
        if Self::at_line_end(&self.cursor) {
            self.cursor.eat_newline();
            self.stack.push(State::Body);
            return Ok(());
        }
        let Some(directive) = self.directive else {
            return Ok(());
        };
        let byte = self.cursor.current();
        let peek = self.cursor.peek();

        if byte == b'/' && peek == b'/' {
            self.stack.call(State::Annotation, State::DirectiveTail);
            return Ok(());
        }
        if byte == b'#' {
            self.stack.call(State::LineComment, State::DirectiveTail);
            return Ok(());
        }
        if directive.paren {
            return Err(self.unexpected("after \"(\"", "end of line or annotation"));
        }
        if byte == b'(' {
            if self.paren_ends_line() {
                return self.open_paren(directive);
            }
            self.cursor.advance();
            self.cursor.eat_whitespace();
            return Err(self.unexpected("after \"(\"", "end of line or annotation"));
        }

        let inline_schema = directive.kind.has_schema_body()
            && match byte {
                b'{' => true,
                b'[' => peek != b'@',
                b'/' => directive.notation == Notation::Regex,
                _ => false,
            };
        if inline_schema {
            if let Some(d) = self.directive.as_mut() {
                d.has_inline_body = true;
            }
            self.stack
                .call(State::Schema, State::LineEnd("after schema"));
        } else if byte == b'"' {
            self.stack
                .call(State::QuotedParameter, State::DirectiveTail);
        } else {
            self.stack.call(State::BareParameter, State::DirectiveTail);
        }
        Ok(())
    }

    /// `(` followed only by blanks, an annotation or the line break.
    fn paren_ends_line(&self) -> bool {
        let mut look = self.cursor;
        look.advance();
        look.eat_whitespace();
        Self::at_line_end(&look) || look.starts_with(b"//") || look.current() == b'#'
    }

    fn open_paren(&mut self, directive: LineDirective) -> Result<(), JstError> {
        let open = self.cursor.pos();
        if !directive.kind.has_text_body() {
            if self.contexts.len() >= self.options.max_context_depth {
                return Err(JstError::lexical(
                    self.at(open),
                    format!(
                        "explicit contexts nested deeper than {}",
                        self.options.max_context_depth
                    ),
                ));
            }
            self.contexts.push(open);
            self.pending
                .push_back(LexemeEvent::new(LexemeKind::ContextBegin, Span::at(open)));
        }
        self.cursor.advance();
        if let Some(d) = self.directive.as_mut() {
            d.paren = true;
        }
        self.stack.push(State::DirectiveTail);
        Ok(())
    }

    // ─── Parameters and annotations ──────────────────────────────────

    fn quoted_parameter(&mut self) -> Result<(), JstError> {
        let start = self.cursor.pos();
        self.cursor.advance();
        loop {
            match self.cursor.current() {
                _ if self.cursor.is_eof() => return Err(self.unexpected("", "\"\\\"\"")),
                b'\n' | b'\r' => {
                    return Err(self.unexpected("in quoted parameter", "\"\\\"\""));
                }
                b'\\' => {
                    self.cursor.advance();
                    if !Self::at_line_end(&self.cursor) {
                        self.cursor.advance();
                    }
                }
                b'"' => {
                    self.cursor.advance();
                    break;
                }
                _ => self.cursor.advance(),
            }
        }
        if !Self::at_line_end(&self.cursor) && !matches!(self.cursor.current(), b' ' | b'\t') {
            return Err(self.unexpected("after parameter", "space or end of line"));
        }
        self.finish_parameter(start);
        Ok(())
    }

    fn bare_parameter(&mut self) {
        let start = self.cursor.pos();
        self.cursor
            .eat_while(|b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
        self.finish_parameter(start);
    }

    fn finish_parameter(&mut self, start: u32) {
        let end = self.cursor.pos();
        self.emit_pair(LexemeKind::ParameterBegin, start, end);
        let raw = self.cursor.slice(start, end);
        if let Some(d) = self.directive.as_mut() {
            if d.kind.has_schema_body() {
                let notation = std::str::from_utf8(raw)
                    .ok()
                    .and_then(|text| Notation::resolve(&unquote(text)));
                if let Some(notation) = notation {
                    d.notation = notation;
                }
            }
        }
    }

    fn annotation(&mut self) {
        let start = self.cursor.pos();
        self.cursor.eat_until_newline_or_eof();
        let end = self.trimmed_end(start);
        self.emit_pair(LexemeKind::AnnotationBegin, start, end);
    }

    // ─── Bodies ──────────────────────────────────────────────────────

    fn body(&mut self) {
        let Some(directive) = self.directive else {
            return;
        };
        if directive.paren {
            if directive.kind.has_text_body() {
                self.stack.push(State::ParenText);
            }
            return;
        }
        if directive.has_inline_body {
            return;
        }
        let wants_schema = directive.kind.has_schema_body();
        if !wants_schema && !directive.kind.has_text_body() {
            return;
        }
        let look = self.next_content();
        let ends = if wants_schema {
            self.starts_item(&look)
        } else {
            self.ends_text(&look)
        };
        if ends {
            return;
        }
        self.cursor = look;
        if wants_schema {
            self.stack
                .call(State::Schema, State::LineEnd("after schema"));
        } else {
            self.stack.push(State::Text);
        }
    }

    fn schema(&mut self) -> Result<(), JstError> {
        let start = self.cursor.pos();
        let (kind, notation) = match self.directive {
            Some(d) => (d.kind, d.notation),
            None => return Ok(()),
        };
        if !notation.accepts_body() {
            return Err(JstError::lexical(
                self.at(start),
                format!("unexpected schema body for notation \"{notation}\""),
            ));
        }
        let grammar = match notation {
            Notation::Regex => SchemaGrammar::Regex,
            _ => SchemaGrammar::Jsight,
        };
        debug!(%kind, %notation, start, "delegating schema body");
        let len = probe_length(self.cursor.rest(), grammar)
            .map_err(|err| JstError::sub_scanner(Arc::clone(self.source), start, &err))?;
        self.cursor.advance_n(len);
        self.emit_pair(LexemeKind::SchemaBegin, start, start + len);
        Ok(())
    }

    /// Text running until a line that opens a new item.
    fn text(&mut self) {
        let start = self.cursor.pos();
        let mut end = start;
        loop {
            let line = self.cursor.pos();
            self.cursor.eat_until_newline_or_eof();
            end = self.trimmed_end(line).max(end);
            if !self.cursor.eat_newline() {
                break;
            }
            if self.ends_text(&self.next_content()) {
                break;
            }
            self.cursor.eat_whitespace();
        }
        self.emit_pair(LexemeKind::TextBegin, start, end);
    }

    /// Text closed by a line whose first non-blank byte is `)`.
    fn paren_text(&mut self) -> Result<(), JstError> {
        let mut first = None;
        let mut end = 0;
        loop {
            self.cursor.eat_whitespace();
            if self.cursor.is_eof() {
                return Err(self.unexpected("", "\")\""));
            }
            if self.cursor.current() == b')' {
                break;
            }
            let line = self.cursor.pos();
            self.cursor.eat_until_newline_or_eof();
            let line_end = self.trimmed_end(line);
            if line_end > line {
                first.get_or_insert(line);
                end = line_end;
            }
            self.cursor.eat_newline();
        }
        if let Some(start) = first {
            self.emit_pair(LexemeKind::TextBegin, start, end);
        }
        self.cursor.advance();
        self.stack.push(State::LineEnd("after \")\""));
        Ok(())
    }

    // ─── Comments and line ends ──────────────────────────────────────

    fn line_comment(&mut self) {
        let start = self.cursor.pos();
        self.cursor.eat_until_newline_or_eof();
        let end = self.trimmed_end(start);
        self.emit_pair(LexemeKind::CommentBegin, start, end);
    }

    fn block_comment(&mut self) -> Result<(), JstError> {
        let start = self.cursor.pos();
        self.cursor.advance_n(2);
        match memchr::memmem::find(self.cursor.rest(), b"#/") {
            Some(index) => {
                let len = u32::try_from(index).unwrap_or(u32::MAX);
                self.cursor.advance_n(len.saturating_add(2));
                self.emit_pair(LexemeKind::CommentBegin, start, self.cursor.pos());
                Ok(())
            }
            None => {
                self.cursor.advance_n(u32::MAX);
                Err(self.unexpected("", "\"#/\""))
            }
        }
    }

    fn line_end(&mut self, place: &'static str) -> Result<(), JstError> {
        self.cursor.eat_whitespace();
        if self.cursor.current() == b'#' && !self.cursor.is_eof() {
            self.line_comment();
        }
        if self.cursor.is_eof() || self.cursor.eat_newline() {
            return Ok(());
        }
        Err(self.unexpected(place, "end of line"))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<LexemeEvent, JstError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

impl FusedIterator for Scanner<'_> {}
