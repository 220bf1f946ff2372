//! Lexeme events emitted by the scanner.
//!
//! The stream is a push-down trace: every `*Begin` event is matched by
//! exactly one `*End` event of the same construct, with nested pairs in
//! between (explicit contexts hold whole directives). A begin event spans
//! only the first byte of its construct; the matching end event spans the
//! whole construct, so [`LexemeEvent::payload`] on an end event yields the
//! lexeme text.

use jst_ir::Span;
use jst_lexer_core::SourceText;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LexemeKind {
    KeywordBegin,
    KeywordEnd,
    ParameterBegin,
    ParameterEnd,
    AnnotationBegin,
    AnnotationEnd,
    SchemaBegin,
    SchemaEnd,
    TextBegin,
    TextEnd,
    /// `(` at the end of a directive line.
    ContextBegin,
    /// The matching `)`.
    ContextEnd,
    CommentBegin,
    CommentEnd,
}

impl LexemeKind {
    pub fn is_begin(self) -> bool {
        matches!(
            self,
            LexemeKind::KeywordBegin
                | LexemeKind::ParameterBegin
                | LexemeKind::AnnotationBegin
                | LexemeKind::SchemaBegin
                | LexemeKind::TextBegin
                | LexemeKind::ContextBegin
                | LexemeKind::CommentBegin
        )
    }

    /// The end kind closing this begin kind; `None` for end kinds.
    pub fn closer(self) -> Option<LexemeKind> {
        Some(match self {
            LexemeKind::KeywordBegin => LexemeKind::KeywordEnd,
            LexemeKind::ParameterBegin => LexemeKind::ParameterEnd,
            LexemeKind::AnnotationBegin => LexemeKind::AnnotationEnd,
            LexemeKind::SchemaBegin => LexemeKind::SchemaEnd,
            LexemeKind::TextBegin => LexemeKind::TextEnd,
            LexemeKind::ContextBegin => LexemeKind::ContextEnd,
            LexemeKind::CommentBegin => LexemeKind::CommentEnd,
            _ => return None,
        })
    }
}

/// One scanner event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LexemeEvent {
    pub kind: LexemeKind,
    pub span: Span,
}

impl LexemeEvent {
    pub fn new(kind: LexemeKind, span: Span) -> Self {
        LexemeEvent { kind, span }
    }

    /// Bytes covered by this event's span.
    pub fn payload<'a>(&self, source: &'a SourceText) -> &'a [u8] {
        match self.span.get() {
            Some((begin, end)) => source
                .as_bytes()
                .get(begin as usize..=end as usize)
                .unwrap_or_default(),
            None => &[],
        }
    }

    /// Payload as text. Non-UTF-8 bytes are replaced.
    pub fn text(&self, source: &SourceText) -> String {
        String::from_utf8_lossy(self.payload(source)).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_kinds_have_closers() {
        for kind in [
            LexemeKind::KeywordBegin,
            LexemeKind::ParameterBegin,
            LexemeKind::AnnotationBegin,
            LexemeKind::SchemaBegin,
            LexemeKind::TextBegin,
            LexemeKind::ContextBegin,
            LexemeKind::CommentBegin,
        ] {
            assert!(kind.is_begin());
            let closer = kind.closer();
            assert!(closer.is_some_and(|end| !end.is_begin()));
        }
        assert_eq!(LexemeKind::SchemaEnd.closer(), None);
    }

    #[test]
    fn payload_is_inclusive() {
        let source = match SourceText::new("t.jst", b"GET /cats") {
            Ok(source) => source,
            Err(err) => panic!("{err}"),
        };
        let event = LexemeEvent::new(LexemeKind::KeywordEnd, Span::new(0, 2));
        assert_eq!(event.payload(&source), b"GET");
        assert_eq!(event.text(&source), "GET");
        let unset = LexemeEvent::new(LexemeKind::TextEnd, Span::UNSET);
        assert_eq!(unset.payload(&source), b"");
    }
}
