//! Sentinel-terminated, named source text.
//!
//! Every scanned file (the root document and each included file) is held in
//! its own [`SourceText`]. The bytes are copied once into a buffer with a
//! `0x00` sentinel after the content, so the [`Cursor`] can detect EOF
//! without explicit bounds checks and can peek past the end safely.
//!
//! A `SourceText` is never mutated after construction. The only lazily
//! computed property is the newline byte, stored in a [`OnceLock`] so that
//! concurrent readers observe the same value without locking.

use std::fmt;
use std::sync::OnceLock;

use crate::Cursor;

/// Number of zero bytes appended after the content.
///
/// Two bytes: the sentinel itself plus one byte so that `peek()` issued
/// while positioned on the sentinel still reads inside the buffer.
const SENTINEL_PADDING: usize = 2;

/// Error returned when a source exceeds the addressable size.
///
/// Offsets are `u32`; a source longer than `u32::MAX - 2` bytes cannot be
/// represented together with its sentinel padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceTooLarge {
    /// Name of the rejected file.
    pub name: String,
    /// Actual byte length.
    pub len: usize,
}

impl fmt::Display for SourceTooLarge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "file {} is {} bytes, which exceeds the maximum of {} bytes",
            self.name,
            self.len,
            MAX_SOURCE_LEN
        )
    }
}

impl std::error::Error for SourceTooLarge {}

/// Largest accepted source length.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize - SENTINEL_PADDING;

/// Immutable source bytes plus the file name they were loaded from.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, 0x00]
///  ^                ^
///  0                len (sentinel)
/// ```
pub struct SourceText {
    name: String,
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding]`.
    buf: Vec<u8>,
    len: u32,
    newline: OnceLock<u8>,
}

impl SourceText {
    /// Copy `bytes` into a new sentinel-terminated source named `name`.
    pub fn new(name: impl Into<String>, bytes: &[u8]) -> Result<Self, SourceTooLarge> {
        let name = name.into();
        let len = match u32::try_from(bytes.len()) {
            Ok(len) if bytes.len() <= MAX_SOURCE_LEN => len,
            _ => {
                return Err(SourceTooLarge {
                    name,
                    len: bytes.len(),
                })
            }
        };

        let mut buf = Vec::with_capacity(bytes.len() + SENTINEL_PADDING);
        buf.extend_from_slice(bytes);
        buf.resize(bytes.len() + SENTINEL_PADDING, 0);

        Ok(Self {
            name,
            buf,
            len,
            newline: OnceLock::new(),
        })
    }

    /// Name of the file this text was loaded from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source bytes (without the sentinel).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    /// The full buffer including the trailing zero bytes.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Length of the content in bytes.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Returns `true` if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte at `offset`, or `None` past the end of the content.
    pub fn byte_at(&self, offset: u32) -> Option<u8> {
        self.as_bytes().get(offset as usize).copied()
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.len)
    }

    /// The dominant newline byte of this file.
    ///
    /// Detected once, on first use: the first `\n` or `\r` in the file
    /// decides. Mixed endings are tolerated by only classifying that first
    /// occurrence. Files without any newline report `\n`.
    pub fn newline_byte(&self) -> u8 {
        *self.newline.get_or_init(|| detect_newline(self.as_bytes()))
    }
}

impl fmt::Debug for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceText")
            .field("name", &self.name)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// Returns the first newline byte in `bytes`, defaulting to `\n`.
fn detect_newline(bytes: &[u8]) -> u8 {
    memchr::memchr2(b'\n', b'\r', bytes).map_or(b'\n', |pos| bytes[pos])
}

/// The newline byte that pairs with `newline` in a two-byte line ending.
///
/// `\r` pairs with `\n` and vice versa, so `\r\n` and `\n\r` both collapse
/// into a single line break whichever byte was detected as dominant.
pub fn paired_newline(newline: u8) -> u8 {
    if newline == b'\r' {
        b'\n'
    } else {
        b'\r'
    }
}
