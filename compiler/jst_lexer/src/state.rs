//! Scanner states and the resumption stack.
//!
//! The scanner never recurses. A state that starts a sub-construct pushes
//! the state to resume afterwards, then the sub-construct's own state on
//! top. When the sub-construct finishes without pushing anything, the
//! popped-to state resumes exactly where it left off.

use tracing::trace;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum State {
    /// Between items: blank lines, comments, `)` or the next keyword.
    LineStart,
    Keyword,
    /// Rest of a directive line: parameters, annotation, `(`, inline schema.
    DirectiveTail,
    QuotedParameter,
    BareParameter,
    Annotation,
    /// Directive line consumed; decide whether a body follows.
    Body,
    Schema,
    Text,
    /// Text body between `(` and a line starting with `)`.
    ParenText,
    LineComment,
    BlockComment,
    /// Only blanks, a line comment or the line break may follow.
    LineEnd(&'static str),
}

#[derive(Debug)]
pub(crate) struct StateStack {
    states: Vec<State>,
}

impl StateStack {
    pub(crate) fn new(initial: State) -> Self {
        StateStack {
            states: vec![initial],
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, state: State) {
        self.states.push(state);
    }

    /// Resume `then` after `first` finishes.
    #[inline]
    pub(crate) fn call(&mut self, first: State, then: State) {
        self.states.push(then);
        self.states.push(first);
    }

    pub(crate) fn pop(&mut self) -> Option<State> {
        let state = self.states.pop();
        trace!(?state, depth = self.states.len(), "resume");
        state
    }

    pub(crate) fn clear(&mut self) {
        self.states.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_resumes_caller() {
        let mut stack = StateStack::new(State::LineStart);
        stack.call(State::QuotedParameter, State::DirectiveTail);
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(State::QuotedParameter));
        assert_eq!(stack.pop(), Some(State::DirectiveTail));
        assert_eq!(stack.pop(), Some(State::LineStart));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn clear_empties() {
        let mut stack = StateStack::new(State::LineStart);
        stack.push(State::Keyword);
        stack.clear();
        assert_eq!(stack.pop(), None);
    }
}
