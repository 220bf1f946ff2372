//! Directive validation over a lexeme stream.
//!
//! Walks the scanner's events once. Every keyword is classified and
//! attached to the nearest open directive that permits it as a child; a
//! directive no open directive accepts must be legal at the top level.
//! Inside an explicit context the search stops at the directive that opened
//! it. Parameters are classified against their directive's kind.

use std::sync::Arc;

use jst_diagnostic::{Coordinates, JstError};
use jst_ir::{classify_parameter, DirectiveKind, Span};
use jst_lexer::{LexemeEvent, LexemeKind};
use jst_lexer_core::SourceText;
use tracing::trace;

use crate::{Body, BodyKind, Directive};

/// Validate `events` scanned from `source`.
#[tracing::instrument(level = "debug", skip_all, fields(file = source.name(), events = events.len()))]
pub fn validate(
    source: &Arc<SourceText>,
    events: &[LexemeEvent],
) -> Result<Vec<Directive>, JstError> {
    let mut validator = Validator {
        source,
        directives: Vec::new(),
        open: Vec::new(),
        contexts: Vec::new(),
    };
    for event in events {
        validator.event(*event)?;
    }
    Ok(validator.directives)
}

struct Validator<'s> {
    source: &'s Arc<SourceText>,
    directives: Vec<Directive>,
    /// Indices of directives that may still receive children, innermost last.
    open: Vec<usize>,
    /// Position in `open` of each directive holding an explicit context.
    contexts: Vec<usize>,
}

impl Validator<'_> {
    fn at(&self, span: Span) -> Coordinates {
        Coordinates::new(Arc::clone(self.source), span)
    }

    fn event(&mut self, event: LexemeEvent) -> Result<(), JstError> {
        match event.kind {
            LexemeKind::KeywordEnd => self.keyword(event.span)?,
            LexemeKind::ParameterEnd => self.parameter(event.span)?,
            LexemeKind::AnnotationEnd => {
                if let Some(current) = self.directives.last_mut() {
                    current.annotation = Some(event.span);
                }
            }
            LexemeKind::SchemaEnd => self.body(BodyKind::Schema, event.span),
            LexemeKind::TextEnd => self.body(BodyKind::Text, event.span),
            LexemeKind::ContextBegin => {
                if let Some(current) = self.directives.last_mut() {
                    current.context = Some(event.span);
                    self.contexts.push(self.open.len().saturating_sub(1));
                }
            }
            LexemeKind::ContextEnd => {
                if let Some(position) = self.contexts.pop() {
                    if let Some(&owner) = self.open.get(position) {
                        self.directives[owner].context = Some(event.span);
                    }
                    self.open.truncate(position);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn keyword(&mut self, span: Span) -> Result<(), JstError> {
        let text = LexemeEvent::new(LexemeKind::KeywordEnd, span).text(self.source);
        let kind = DirectiveKind::classify(&text)
            .map_err(|err| JstError::unknown_directive(self.at(span), &err))?;

        let floor = self.contexts.last().copied().unwrap_or(0);
        let nearest = self.open[floor..]
            .iter()
            .rposition(|&index| self.directives[index].kind.is_allowed_as_child(kind))
            .map(|offset| floor + offset);

        let parent = match nearest {
            Some(position) => {
                self.open.truncate(position + 1);
                Some(self.open[position])
            }
            None if self.contexts.is_empty() && kind.is_allowed_at_root() => {
                self.open.clear();
                None
            }
            None => return Err(self.not_allowed(kind, span)),
        };

        trace!(%kind, ?parent, "directive");
        self.open.push(self.directives.len());
        self.directives.push(Directive::new(kind, span, parent));
        Ok(())
    }

    fn not_allowed(&self, kind: DirectiveKind, span: Span) -> JstError {
        let message = match self.open.last() {
            Some(&index) => format!(
                "the directive \"{kind}\" is not allowed in \"{}\"",
                self.directives[index].kind
            ),
            None => format!("the directive \"{kind}\" is not allowed at the top level"),
        };
        JstError::context(self.at(span), message)
    }

    fn parameter(&mut self, span: Span) -> Result<(), JstError> {
        let Some(kind) = self.directives.last().map(|current| current.kind) else {
            return Ok(());
        };
        let raw = LexemeEvent::new(LexemeKind::ParameterEnd, span).text(self.source);
        let param = classify_parameter(kind, &raw)
            .map_err(|err| JstError::parameter(self.at(span), &err))?;
        if let Some(current) = self.directives.last_mut() {
            current.parameters.push((param, span));
        }
        Ok(())
    }

    fn body(&mut self, kind: BodyKind, span: Span) {
        if let Some(current) = self.directives.last_mut() {
            current.body = Some(Body { kind, span });
        }
    }
}
