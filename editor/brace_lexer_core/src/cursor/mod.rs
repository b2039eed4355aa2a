//! Byte cursor over an editor buffer slice.
//!
//! The cursor advances through the text byte-by-byte. Reads past the end
//! return `0x00`, so `current()` and `peek()` never need bounds checks at
//! the call site. EOF is reached when `pos >= source_len`; an interior
//! null byte (`pos < source_len`) is ordinary text.
//!
//! A cursor can start at any byte offset. The incremental re-scan in the
//! reduced model restarts mid-buffer, so unlike a whole-file lexer there is
//! no sentinel-padded copy of the source.

/// Bytes that end a run of ordinary free-code text.
///
/// `/` may start a comment, quotes start literals, the six brace
/// characters are delimiters, and `\n` ends a line.
#[inline]
pub fn is_free_code_special(b: u8) -> bool {
    matches!(
        b,
        b'/' | b'"' | b'\'' | b'{' | b'}' | b'(' | b')' | b'[' | b']' | b'\n'
    )
}

/// Cursor over a byte buffer.
///
/// The cursor is [`Copy`], enabling cheap state snapshots for lookahead.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of the scanned content.
    source_len: u32,
}

/// Size assertion: Cursor should be <= 24 bytes on 64-bit platforms.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a cursor at position 0.
    pub fn new(buf: &'a [u8]) -> Self {
        Self::at(buf, 0)
    }

    /// Create a cursor positioned at byte `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is past the end of `buf` or `buf` is longer than
    /// `u32::MAX` bytes.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "length checked against u32::MAX above"
    )]
    pub fn at(buf: &'a [u8], pos: u32) -> Self {
        assert!(
            u32::try_from(buf.len()).is_ok(),
            "buffers larger than 4 GiB are not supported"
        );
        let source_len = buf.len() as u32;
        assert!(
            pos <= source_len,
            "cursor position {pos} out of range for buffer of length {source_len}"
        );
        Self {
            buf,
            pos,
            source_len,
        }
    }

    /// Returns the byte at the current position, or `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte(self.pos)
    }

    /// Returns the byte one position ahead of current, or `0x00` past EOF.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte(self.pos + 1)
    }

    #[inline]
    fn byte(&self, at: u32) -> u8 {
        self.buf.get(at as usize).copied().unwrap_or(0)
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` once every byte has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the buffer.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the scanned content.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// Stops at EOF regardless of what `pred(0)` returns.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance over ordinary free-code text up to the next special byte.
    #[inline]
    pub fn eat_free_text(&mut self) {
        self.eat_while(|b| !is_free_code_special(b));
    }

    /// Advance to the next `\n` byte or EOF using SIMD-accelerated search.
    ///
    /// Used for line comment bodies.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = self.remaining();
        if let Some(offset) = memchr::memchr(b'\n', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }

    /// Advance past block comment content to the next `*` or `\n`.
    /// Returns the byte found, or 0 for EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_block_comment_delim(&mut self) -> u8 {
        match memchr::memchr2(b'*', b'\n', self.remaining()) {
            Some(off) => {
                self.pos += off as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Advance past string content to the next `quote`, `\` or `\n`.
    /// Returns the byte found, or 0 for EOF.
    ///
    /// An empty run is possible when the cursor already sits on one of the
    /// delimiters.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        match memchr::memchr3(quote, b'\\', b'\n', self.remaining()) {
            Some(off) => {
                self.pos += off as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    fn remaining(&self) -> &'a [u8] {
        let start = (self.pos as usize).min(self.buf.len());
        &self.buf[start..]
    }
}

#[cfg(test)]
mod tests;
