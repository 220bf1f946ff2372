//! Source location spans.
//!
//! JSight spans are inclusive on both ends: `[begin, end]` covers
//! `end - begin + 1` bytes. A span may also be *unset* (no location assigned
//! yet); an unset span must never be read or quoted.

use std::fmt;

/// Inclusive byte span within one source file.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    begin: u32,
    end: u32,
}

impl Span {
    /// No location assigned yet.
    pub const UNSET: Span = Span {
        begin: u32::MAX,
        end: 0,
    };

    /// Create a span covering `begin..=end`.
    #[inline]
    pub fn new(begin: u32, end: u32) -> Self {
        debug_assert!(end >= begin, "span end {end} precedes begin {begin}");
        Span { begin, end }
    }

    /// Span covering the single byte at `offset`.
    #[inline]
    pub const fn at(offset: u32) -> Self {
        Span {
            begin: offset,
            end: offset,
        }
    }

    /// Span for the half-open range `start..end_exclusive`.
    ///
    /// Returns [`Span::UNSET`] for an empty range.
    #[inline]
    pub fn from_exclusive(start: u32, end_exclusive: u32) -> Self {
        if end_exclusive > start {
            Span::new(start, end_exclusive - 1)
        } else {
            Span::UNSET
        }
    }

    /// Returns `true` if a location has been assigned.
    #[inline]
    pub const fn is_set(self) -> bool {
        self.begin <= self.end
    }

    /// First byte of the span.
    #[inline]
    pub fn begin(self) -> u32 {
        debug_assert!(self.is_set(), "begin() read on an unset span");
        self.begin
    }

    /// Last byte of the span (inclusive).
    #[inline]
    pub fn end(self) -> u32 {
        debug_assert!(self.is_set(), "end() read on an unset span");
        self.end
    }

    /// `(begin, end)` if the span is set.
    #[inline]
    pub fn get(self) -> Option<(u32, u32)> {
        self.is_set().then_some((self.begin, self.end))
    }

    /// Number of bytes covered; zero for an unset span.
    #[inline]
    pub fn len(self) -> u32 {
        if self.is_set() {
            self.end - self.begin + 1
        } else {
            0
        }
    }

    /// Returns `true` for an unset span.
    #[inline]
    pub fn is_empty(self) -> bool {
        !self.is_set()
    }

    /// Smallest span covering both. An unset side is ignored.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        match (self.is_set(), other.is_set()) {
            (true, true) => Span {
                begin: self.begin.min(other.begin),
                end: self.end.max(other.end),
            },
            (true, false) => self,
            (false, _) => other,
        }
    }

    /// Shift the span by `delta` bytes.
    ///
    /// Used to move sub-scanner coordinates into file coordinates.
    #[inline]
    #[must_use]
    pub fn offset_by(self, delta: u32) -> Span {
        if self.is_set() {
            Span {
                begin: self.begin + delta,
                end: self.end + delta,
            }
        } else {
            self
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::UNSET
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some((begin, end)) => write!(f, "{begin}..={end}"),
            None => write!(f, "unset"),
        }
    }
}
