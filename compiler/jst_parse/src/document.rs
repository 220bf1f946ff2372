//! The validated directive list.

use std::sync::Arc;

use jst_ir::{DirectiveKind, ParamRole, Parameter, Span};
use jst_lexer_core::SourceText;
use smallvec::SmallVec;

/// What a directive body holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Schema,
    Text,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Body {
    pub kind: BodyKind,
    pub span: Span,
}

/// One directive with its classified parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// Span of the keyword text.
    pub keyword: Span,
    /// Index of the enclosing directive; `None` at the top level.
    pub parent: Option<usize>,
    pub parameters: SmallVec<[(Parameter, Span); 2]>,
    pub annotation: Option<Span>,
    pub body: Option<Body>,
    /// `(` to `)` of an explicit context opened by this directive.
    pub context: Option<Span>,
}

impl Directive {
    pub(crate) fn new(kind: DirectiveKind, keyword: Span, parent: Option<usize>) -> Self {
        Directive {
            kind,
            keyword,
            parent,
            parameters: SmallVec::new(),
            annotation: None,
            body: None,
            context: None,
        }
    }

    /// Value of the first parameter with `role`.
    pub fn parameter(&self, role: ParamRole) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(param, _)| param.role == role)
            .map(|(param, _)| param.value.as_str())
    }

    /// Values of every parameter with `role`, in source order.
    pub fn parameters_with(&self, role: ParamRole) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(move |(param, _)| param.role == role)
            .map(|(param, _)| param.value.as_str())
    }
}

/// All directives of one source, in source order.
#[derive(Clone, Debug)]
pub struct Document {
    source: Arc<SourceText>,
    directives: Vec<Directive>,
}

impl Document {
    pub(crate) fn new(source: Arc<SourceText>, directives: Vec<Directive>) -> Self {
        Document { source, directives }
    }

    pub fn source(&self) -> &Arc<SourceText> {
        &self.source
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Indices of top-level directives.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.children_of(None)
    }

    /// Indices of the directives directly beneath `parent`.
    pub fn children(&self, parent: usize) -> impl Iterator<Item = usize> + '_ {
        self.children_of(Some(parent))
    }

    fn children_of(&self, parent: Option<usize>) -> impl Iterator<Item = usize> + '_ {
        self.directives
            .iter()
            .enumerate()
            .filter(move |(_, directive)| directive.parent == parent)
            .map(|(index, _)| index)
    }

    /// Source text covered by `span`.
    pub fn text(&self, span: Span) -> String {
        match span.get() {
            Some((begin, end)) => String::from_utf8_lossy(
                self.source
                    .as_bytes()
                    .get(begin as usize..=end as usize)
                    .unwrap_or_default(),
            )
            .into_owned(),
            None => String::new(),
        }
    }
}
