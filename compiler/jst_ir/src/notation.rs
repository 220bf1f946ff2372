//! Schema notations.
//!
//! A schema-bearing directive may name the sub-language of its body as a
//! parameter (`TYPE @id regex`). The name resolves to a [`Notation`], which
//! the parameter classifier and the scanner's delegation step both consult.

use std::fmt;

/// Sub-language of a schema body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notation {
    /// JSON-like example values. Used when no notation is named.
    #[default]
    Jsight,
    /// A `/regular expression/`.
    Regex,
    /// Any value; the directive carries no body.
    Any,
    /// No value at all; the directive carries no body.
    Empty,
}

impl Notation {
    /// Resolve a declared notation name.
    pub fn resolve(name: &str) -> Option<Notation> {
        match name {
            "jsight" => Some(Notation::Jsight),
            "regex" => Some(Notation::Regex),
            "any" => Some(Notation::Any),
            "empty" => Some(Notation::Empty),
            _ => None,
        }
    }

    /// The name as written in a document.
    pub const fn name(self) -> &'static str {
        match self {
            Notation::Jsight => "jsight",
            Notation::Regex => "regex",
            Notation::Any => "any",
            Notation::Empty => "empty",
        }
    }

    /// Returns `true` if a directive using this notation may have a body.
    pub const fn accepts_body(self) -> bool {
        matches!(self, Notation::Jsight | Notation::Regex)
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
