//! Line numbers, line bounds and quotes for byte offsets.
//!
//! All functions work on the file's dominant newline byte
//! ([`SourceText::newline_byte`]): only that byte counts as a line break,
//! and a paired `\r`/`\n` next to it is trimmed from line contents. Offsets
//! past the end of the file are clamped to the end.

use jst_lexer_core::{paired_newline, SourceText};

/// Maximum length of a quote in bytes, ellipsis included.
pub const QUOTE_LIMIT: usize = 200;

const ELLIPSIS: &str = "...";

/// Half-open byte range `[begin, end)` of one line, without its line break.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineBounds {
    pub begin: u32,
    pub end: u32,
}

fn clamp(source: &SourceText, offset: u32) -> usize {
    offset.min(source.len()) as usize
}

/// 1-based line number of `offset`.
///
/// Counts newline bytes strictly before the offset.
pub fn line_number(source: &SourceText, offset: u32) -> u32 {
    if offset == 0 {
        return 1;
    }
    let before = &source.as_bytes()[..clamp(source, offset)];
    let breaks = memchr::memchr_iter(source.newline_byte(), before).count();
    u32::try_from(breaks).map_or(u32::MAX, |n| n.saturating_add(1))
}

/// Bounds of the line holding `offset`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "positions are bounded by SourceText::len, which is a u32"
)]
pub fn line_bounds(source: &SourceText, offset: u32) -> LineBounds {
    let bytes = source.as_bytes();
    let newline = source.newline_byte();
    let paired = paired_newline(newline);
    let offset = clamp(source, offset);

    let mut begin = memchr::memrchr(newline, &bytes[..offset]).map_or(0, |pos| pos + 1);
    // `\r` dominant with `\r\n` endings leaves the `\n` at the line start.
    if begin < bytes.len() && bytes[begin] == paired {
        begin += 1;
    }

    let mut end = memchr::memchr(newline, &bytes[offset..]).map_or(bytes.len(), |pos| offset + pos);
    // `\n` dominant with `\r\n` endings leaves the `\r` at the line end.
    if end > begin && bytes[end - 1] == paired {
        end -= 1;
    }

    LineBounds {
        begin: begin as u32,
        end: end.max(begin) as u32,
    }
}

/// Left-trimmed content of the line holding `offset`, capped at
/// [`QUOTE_LIMIT`] bytes with a trailing `...` when longer.
pub fn quote(source: &SourceText, offset: u32) -> String {
    let bounds = line_bounds(source, offset);
    let line = &source.as_bytes()[bounds.begin as usize..bounds.end as usize];
    let start = line
        .iter()
        .position(|b| !matches!(b, b' ' | b'\t'))
        .unwrap_or(line.len());
    let line = &line[start..];

    if line.len() <= QUOTE_LIMIT {
        return String::from_utf8_lossy(line).into_owned();
    }

    let mut cut = QUOTE_LIMIT - ELLIPSIS.len();
    // Never split a UTF-8 sequence.
    while cut > 0 && (line[cut] & 0b1100_0000) == 0b1000_0000 {
        cut -= 1;
    }
    let mut quoted = String::from_utf8_lossy(&line[..cut]).into_owned();
    quoted.push_str(ELLIPSIS);
    quoted
}
