//! State-aware scanner producing `(SpanKind, len, state)` triples.
//!
//! The scanner operates on a [`Cursor`] and carries one piece of state
//! between spans: the [`LexicalState`] entering the next span. It can start
//! at any span boundary given the state in effect there, which is what the
//! reduced model relies on to re-scan only the edited region.
//!
//! # Design
//!
//! Dispatch is on the entering state first, then on the current byte. Each
//! arm advances the cursor and returns the span kind; `next_span` computes
//! the length and the next state. Every span is at least one byte long and
//! looks at most one byte past its own end, so the span that contains the
//! byte before an edit is always a safe restart point.

use crate::cursor::Cursor;
use crate::state::{Brace, LexicalState, Quote, SpanKind};

/// One classified span as produced by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawSpan {
    pub kind: SpanKind,
    /// Byte length, always > 0.
    pub len: u32,
    /// State entering the span.
    pub state: LexicalState,
}

impl RawSpan {
    /// State after the span.
    #[inline]
    pub fn exit_state(&self) -> LexicalState {
        self.kind.next_state(self.state)
    }
}

/// Allocation-free scanner over a byte buffer.
///
/// Produces one span at a time; `None` once the buffer is exhausted.
pub struct StateScanner<'a> {
    cursor: Cursor<'a>,
    state: LexicalState,
}

impl<'a> StateScanner<'a> {
    /// Create a scanner at the cursor position, entering in `state`.
    pub fn new(cursor: Cursor<'a>, state: LexicalState) -> Self {
        Self { cursor, state }
    }

    /// Scanner over a whole buffer, starting in free code.
    pub fn for_text(text: &'a str) -> Self {
        Self::new(Cursor::new(text.as_bytes()), LexicalState::FreeCode)
    }

    /// State entering the next span.
    #[inline]
    pub fn state(&self) -> LexicalState {
        self.state
    }

    /// Byte offset of the next span.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Produce the next span.
    pub fn next_span(&mut self) -> Option<RawSpan> {
        if self.cursor.is_eof() {
            return None;
        }
        let start = self.cursor.pos();
        let entering = self.state;
        let kind = match entering {
            LexicalState::FreeCode => self.free_code(),
            LexicalState::LineComment => self.line_comment(),
            LexicalState::BlockComment => self.block_comment(),
            LexicalState::SingleQuoteString => self.string(Quote::Single),
            LexicalState::DoubleQuoteString => self.string(Quote::Double),
        };
        let len = self.cursor.pos() - start;
        debug_assert!(
            len > 0,
            "scanner produced an empty {kind:?} span at {start}"
        );
        self.state = kind.next_state(entering);
        Some(RawSpan {
            kind,
            len,
            state: entering,
        })
    }

    // ─── Free Code ────────────────────────────────────────────────

    fn free_code(&mut self) -> SpanKind {
        let b = self.cursor.current();
        if let Some(brace) = Brace::from_byte(b) {
            self.cursor.advance();
            return SpanKind::Brace(brace);
        }
        match b {
            b'/' => self.slash(),
            b'"' => self.single(SpanKind::Quote(Quote::Double)),
            b'\'' => self.single(SpanKind::Quote(Quote::Single)),
            b'\n' => self.single(SpanKind::Newline),
            _ => {
                self.cursor.eat_free_text();
                SpanKind::Text
            }
        }
    }

    fn slash(&mut self) -> SpanKind {
        match self.cursor.peek() {
            b'/' => {
                self.cursor.advance_n(2);
                SpanKind::LineCommentStart
            }
            b'*' => {
                self.cursor.advance_n(2);
                SpanKind::BlockCommentStart
            }
            _ => {
                // Division operator: ordinary text.
                self.cursor.advance();
                self.cursor.eat_free_text();
                SpanKind::Text
            }
        }
    }

    // ─── Comments ─────────────────────────────────────────────────

    fn line_comment(&mut self) -> SpanKind {
        if self.cursor.current() == b'\n' {
            return self.single(SpanKind::Newline);
        }
        self.cursor.eat_until_newline_or_eof();
        SpanKind::Text
    }

    fn block_comment(&mut self) -> SpanKind {
        match self.cursor.current() {
            b'*' if self.cursor.peek() == b'/' => {
                self.cursor.advance_n(2);
                SpanKind::BlockCommentEnd
            }
            b'\n' => self.single(SpanKind::Newline),
            _ => {
                // Consume the first byte unconditionally so a lone `*`
                // becomes part of the text run.
                self.cursor.advance();
                self.cursor.skip_to_block_comment_delim();
                SpanKind::Text
            }
        }
    }

    // ─── Literals ─────────────────────────────────────────────────

    fn string(&mut self, quote: Quote) -> SpanKind {
        let q = quote.byte();
        match self.cursor.current() {
            b if b == q => self.single(SpanKind::Quote(quote)),
            b'\n' => self.single(SpanKind::Newline),
            b'\\' => match self.cursor.peek() {
                b'\\' | b'"' | b'\'' => {
                    self.cursor.advance_n(2);
                    SpanKind::Escape
                }
                _ => {
                    self.cursor.advance();
                    self.cursor.skip_to_string_delim(q);
                    SpanKind::Text
                }
            },
            _ => {
                self.cursor.skip_to_string_delim(q);
                SpanKind::Text
            }
        }
    }

    /// Single-byte span: advance one byte and return `kind`.
    fn single(&mut self, kind: SpanKind) -> SpanKind {
        self.cursor.advance();
        kind
    }
}

impl Iterator for StateScanner<'_> {
    type Item = RawSpan;

    fn next(&mut self) -> Option<RawSpan> {
        self.next_span()
    }
}
