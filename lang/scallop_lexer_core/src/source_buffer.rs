//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the script content,
//! allowing the scanner to detect EOF without explicit bounds checking.
//! The total buffer size is rounded up to the next 64-byte boundary, which
//! also provides safe padding for reads near the end of the buffer.
//!
//! The buffer accepts arbitrary bytes: scripts are byte-oriented and may
//! contain malformed UTF-8, which the decoder reports at the offending
//! offset during scanning rather than at construction time.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer for zero-bounds-check scanning.
///
/// # Layout
///
/// ```text
/// [script_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
///
/// The sentinel byte at `source_len` is always `0x00`. All subsequent
/// bytes (padding) are also `0x00`, ensuring safe reads past the end of
/// the script content.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[script_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual script content (excludes sentinel and padding).
    source_len: u32,
}

/// A 1-based line/column pair for diagnostics.
///
/// Columns count characters, not bytes: continuation bytes of a multibyte
/// sequence do not advance the column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number, in characters.
    pub col: u32,
}

impl LineCol {
    /// The start of a script: line 1, column 1.
    pub const START: LineCol = LineCol { line: 1, col: 1 };
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from script bytes.
    ///
    /// Copies the bytes into a padded buffer with a `0x00` sentinel
    /// appended.
    ///
    /// # Script Size
    ///
    /// Scripts larger than `u32::MAX` bytes (~4 GiB) are not supported;
    /// `source_len` saturates at `u32::MAX` and the scanner reports an
    /// error at that offset.
    pub fn new(source: &[u8]) -> Self {
        let source_len = source.len();

        // Round up to the next 64-byte boundary (minimum: source + sentinel).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // Allocate zero-filled buffer, then copy the script bytes.
        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source);

        let source_len = u32::try_from(source_len).unwrap_or(u32::MAX);

        Self { buf, source_len }
    }

    /// Returns the script bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Length of the script content in bytes (excludes sentinel and padding).
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the script content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Compute the 1-based line/column of a byte offset.
    ///
    /// Lines are separated by `\n`. Columns count characters from the
    /// last line start, treating each non-continuation byte as one
    /// character. Offsets past the end of the script are clamped.
    ///
    /// This walks the script up to `offset` (newline search is
    /// `memchr`-accelerated), so it is meant for on-demand diagnostics,
    /// not per-token bookkeeping.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let offset = offset.min(self.source_len) as usize;
        let prefix = &self.buf[..offset];

        let mut line = 1u32;
        let mut line_start = 0usize;
        for nl in memchr::memchr_iter(b'\n', prefix) {
            line += 1;
            line_start = nl + 1;
        }

        // Count characters on the final line: every byte that is not a
        // UTF-8 continuation byte starts a character.
        let chars = prefix[line_start..]
            .iter()
            .filter(|&&b| (b & 0xC0) != 0x80)
            .count();
        let col = u32::try_from(chars).unwrap_or(u32::MAX).saturating_add(1);

        LineCol { line, col }
    }
}

/// Size assertion: `SourceBuffer` should stay a Vec plus a length.
const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 32);

#[cfg(test)]
mod tests;
