//! Byte cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. EOF is detected
//! when the current byte equals the sentinel (`0x00`) and the position has
//! reached the source length. Interior null bytes are distinguished from EOF
//! by comparing `pos` against `source_len`.

/// Cursor over a [`SourceText`](crate::SourceText) buffer.
///
/// The cursor is [`Copy`], so lookahead is a matter of copying it,
/// advancing the copy and discarding it.
///
/// # Invariant
///
/// `buf[source_len]` and `buf[source_len + 1]` are `0x00`. Guaranteed by
/// [`SourceText::new`](crate::SourceText::new).
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) + 1 < buf.len(),
            "sentinel padding must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Byte at the current position; `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Byte one position ahead of current.
    ///
    /// Safe on the sentinel itself: one byte of padding follows it.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Advance by one byte. Never moves past the sentinel.
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.source_len {
            self.pos += 1;
        }
    }

    /// Advance by `n` bytes, clamped to the sentinel.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = self.pos.saturating_add(n).min(self.source_len);
    }

    /// Returns `true` once the cursor sits on the sentinel.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Source bytes in `start..end`.
    pub fn slice(&self, start: u32, end: u32) -> &'a [u8] {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        &self.buf[start as usize..end as usize]
    }

    /// Source bytes from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a [u8] {
        self.slice(start, self.pos)
    }

    /// Source bytes from the current position to EOF.
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos as usize..self.source_len as usize]
    }

    /// Advance while `pred` holds for the current byte and EOF is not reached.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.pos < self.source_len && pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Advance past horizontal whitespace (spaces and tabs).
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| b == b' ' || b == b'\t');
    }

    /// Advance to the next `\n` or `\r`, or to EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "rest().len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        match memchr::memchr2(b'\n', b'\r', self.rest()) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Consume one line break (`\n`, `\r`, `\r\n` or `\n\r`) if present.
    ///
    /// Returns `true` if anything was consumed.
    pub fn eat_newline(&mut self) -> bool {
        match self.current() {
            b'\n' | b'\r' if !self.is_eof() => {
                let first = self.current();
                self.advance();
                let second = self.current();
                if (second == b'\n' || second == b'\r') && second != first && !self.is_eof() {
                    self.advance();
                }
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if the remaining input starts with `prefix`.
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }
}

#[cfg(test)]
mod tests;
