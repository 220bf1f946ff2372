//! Keyword recognition as a trie over the sorted keyword table.
//!
//! [`KEYWORDS`] is sorted by bytes, so all spellings sharing a matched
//! prefix form one contiguous run. Each accepted byte narrows that run;
//! an empty run is a mismatch, and the bytes the run could still accept
//! become the "expecting" part of the error. Response codes (`[1-5]xx`)
//! are matched by pattern instead.

use jst_ir::{DirectiveKind, KEYWORDS};
use smallvec::SmallVec;

/// A keyword ends at EOF, whitespace or `(`.
pub(crate) fn is_keyword_boundary(byte: u8) -> bool {
    matches!(byte, 0 | b' ' | b'\t' | b'\n' | b'\r' | b'(')
}

/// Progress through the keyword table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum KeywordState {
    /// Candidates `KEYWORDS[lo..hi]` all share the first `depth` bytes.
    Literal { lo: usize, hi: usize, depth: usize },
    /// `depth` digits of a response code matched.
    ResponseCode { depth: usize },
}

/// Outcome of feeding one byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// Byte accepted; keep going.
    Continue(KeywordState),
    /// Byte is a boundary and the matched prefix is a complete keyword.
    Done(DirectiveKind),
    /// Byte cannot continue the prefix.
    Mismatch,
}

impl KeywordState {
    pub(crate) const START: KeywordState = KeywordState::Literal {
        lo: 0,
        hi: KEYWORDS.len(),
        depth: 0,
    };

    pub(crate) fn depth(self) -> usize {
        match self {
            KeywordState::Literal { depth, .. } | KeywordState::ResponseCode { depth } => depth,
        }
    }

    /// The keyword spelled exactly by the matched prefix, if any.
    pub(crate) fn complete(self) -> Option<DirectiveKind> {
        match self {
            KeywordState::Literal { lo, hi, depth } if depth > 0 && lo < hi => {
                let (spelling, kind) = KEYWORDS[lo];
                // The exact match sorts first in its run.
                (spelling.len() == depth).then_some(kind)
            }
            KeywordState::ResponseCode { depth: 3 } => Some(DirectiveKind::HttpResponseCode),
            _ => None,
        }
    }

    pub(crate) fn step(self, byte: u8) -> Step {
        if is_keyword_boundary(byte) {
            return match self.complete() {
                Some(kind) => Step::Done(kind),
                None => Step::Mismatch,
            };
        }
        match self {
            KeywordState::Literal { depth: 0, .. } if matches!(byte, b'1'..=b'5') => {
                Step::Continue(KeywordState::ResponseCode { depth: 1 })
            }
            KeywordState::ResponseCode { depth } if depth < 3 && byte.is_ascii_digit() => {
                Step::Continue(KeywordState::ResponseCode { depth: depth + 1 })
            }
            KeywordState::ResponseCode { .. } => Step::Mismatch,
            KeywordState::Literal { lo, hi, depth } => {
                let run = &KEYWORDS[lo..hi];
                let next_byte = |spelling: &str| spelling.as_bytes().get(depth).copied();
                let start = run.partition_point(|(s, _)| next_byte(s).map_or(true, |b| b < byte));
                let end = run.partition_point(|(s, _)| next_byte(s).map_or(true, |b| b <= byte));
                if start == end {
                    Step::Mismatch
                } else {
                    Step::Continue(KeywordState::Literal {
                        lo: lo + start,
                        hi: lo + end,
                        depth: depth + 1,
                    })
                }
            }
        }
    }

    /// Human-readable list of what may follow the matched prefix.
    pub(crate) fn expected(self) -> String {
        if self.depth() == 0 {
            return "directive".to_string();
        }
        let mut options: SmallVec<[String; 6]> = SmallVec::new();
        match self {
            KeywordState::ResponseCode { depth } if depth < 3 => options.push("digit".to_string()),
            KeywordState::ResponseCode { .. } => {}
            KeywordState::Literal { lo, hi, depth } => {
                let mut last = None;
                for (spelling, _) in &KEYWORDS[lo..hi] {
                    let Some(&byte) = spelling.as_bytes().get(depth) else {
                        continue;
                    };
                    if last != Some(byte) {
                        options.push(format!("\"{}\"", char::from(byte)));
                        last = Some(byte);
                    }
                }
            }
        }
        if self.complete().is_some() {
            options.push("end of keyword".to_string());
        }
        options.join(" or ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed(text: &str) -> Result<DirectiveKind, (usize, KeywordState)> {
        let mut state = KeywordState::START;
        for (index, byte) in text.bytes().chain(std::iter::once(b' ')).enumerate() {
            match state.step(byte) {
                Step::Continue(next) => state = next,
                Step::Done(kind) => return Ok(kind),
                Step::Mismatch => return Err((index, state)),
            }
        }
        Err((text.len(), state))
    }

    #[test]
    fn every_spelling_is_recognized() {
        for (spelling, kind) in KEYWORDS {
            assert_eq!(feed(spelling), Ok(kind), "{spelling}");
        }
    }

    #[test]
    fn response_codes() {
        assert_eq!(feed("200"), Ok(DirectiveKind::HttpResponseCode));
        assert_eq!(feed("599"), Ok(DirectiveKind::HttpResponseCode));
        assert!(feed("600").is_err());
        assert!(feed("20").is_err());
        assert!(feed("2000").is_err());
    }

    #[test]
    fn lowercase_fails_at_first_byte() {
        assert_eq!(feed("get").map_err(|(index, _)| index), Err(0));
    }

    #[test]
    fn mismatch_reports_next_bytes() {
        let Err((index, state)) = feed("Pxth") else {
            panic!("Pxth should not match");
        };
        assert_eq!(index, 1);
        assert_eq!(state.expected(), "\"A\" or \"O\" or \"U\" or \"a\" or \"r\"");
    }

    #[test]
    fn prefix_keyword_lists_end_of_keyword() {
        let Err((index, state)) = feed("Tagz") else {
            panic!("Tagz should not match");
        };
        assert_eq!(index, 3);
        assert_eq!(state.expected(), "\"s\"");

        let Err((index, state)) = feed("TAGS") else {
            panic!("TAGS should not match");
        };
        assert_eq!(index, 3);
        assert_eq!(state.expected(), "end of keyword");
    }

    #[test]
    fn truncated_keyword_is_incomplete() {
        let Err((_, state)) = feed("Descr") else {
            panic!("Descr should not match");
        };
        assert_eq!(state.complete(), None);
        assert_eq!(state.expected(), "\"i\"");
    }
}
