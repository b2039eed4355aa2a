//! The reduced model: a span sequence congruent with the buffer.
//!
//! Spans tile `[0, len)` with no gaps or overlaps. Each span records the
//! [`LexicalState`] entering it, so the state at any offset is one binary
//! search away.
//!
//! # Incremental Re-scan
//!
//! After an edit the model re-scans from the start of the span holding the
//! byte *before* the edit, in the state recorded for that span. Spans never
//! look more than one byte past their own end, so nothing earlier can
//! change. Scanning continues until a freshly produced span ends exactly on
//! an old span boundary past the edit *and* the scanner's state matches the
//! state recorded there. From that point on the text and the state are the
//! same as before, so the remaining old spans are kept as they are. If that
//! never happens (an unterminated `/*` was typed, say) the rest of the
//! buffer is re-scanned.
//!
//! Spans live in a gap buffer whose gap follows the last edit. Spans
//! past the gap are stored relative to the end of the buffer, so an edit
//! costs the spans it re-scans plus the distance the gap moves, never a walk
//! over the rest of the buffer.

mod gap;

use std::fmt;
use std::ops::Range;

use brace_lexer_core::{Brace, Cursor, LexicalState, SpanKind, StateScanner};

use gap::SpanGap;

/// A classified run of the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first byte.
    pub start: u32,
    /// Byte length, always > 0.
    pub len: u32,
    pub kind: SpanKind,
    /// State entering the span.
    pub state: LexicalState,
}

impl Span {
    /// Offset one past the last byte.
    #[inline]
    pub fn end(&self) -> u32 {
        self.start + self.len
    }

    /// State after the span.
    #[inline]
    pub fn exit_state(&self) -> LexicalState {
        self.kind.next_state(self.state)
    }

    /// Returns `true` if `offset` falls inside this span.
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end()
    }

    /// Returns `true` if the span is real code: free-code text, braces and
    /// newlines. Comment and literal delimiters are not code.
    #[inline]
    pub fn is_code(&self) -> bool {
        self.state == LexicalState::FreeCode
            && matches!(
                self.kind,
                SpanKind::Text | SpanKind::Newline | SpanKind::Brace(_)
            )
    }
}

/// A brace character in free code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BraceMark {
    pub offset: u32,
    pub brace: Brace,
}

/// What an incremental edit cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditStats {
    /// Offset the re-scan started from.
    pub restart: u32,
    /// Number of old spans replaced.
    pub replaced_spans: usize,
    /// Number of spans produced by the re-scan.
    pub scanned_spans: usize,
    /// `false` when the re-scan ran to end of buffer.
    pub resynced: bool,
}

/// Lexical state index over a text buffer.
#[derive(Clone, Default)]
pub struct ReducedModel {
    spans: SpanGap,
    len: u32,
}

impl PartialEq for ReducedModel {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.spans().eq(other.spans())
    }
}

impl Eq for ReducedModel {}

impl fmt::Debug for ReducedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReducedModel")
            .field("len", &self.len)
            .field("spans", &self.spans().collect::<Vec<_>>())
            .finish()
    }
}

impl ReducedModel {
    /// Model of the empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a whole buffer with a left-to-right scan.
    ///
    /// # Panics
    ///
    /// Panics if `text` is larger than `u32::MAX` bytes.
    pub fn classify(text: &str) -> Self {
        let len = to_offset(text.len());
        let mut spans = Vec::with_capacity(text.len() / 4);
        let mut scanner = StateScanner::for_text(text);
        let mut start = 0;
        while let Some(raw) = scanner.next_span() {
            spans.push(Span {
                start,
                len: raw.len,
                kind: raw.kind,
                state: raw.state,
            });
            start += raw.len;
        }
        tracing::debug!(len, spans = spans.len(), "classified buffer");
        Self {
            spans: SpanGap::from_spans(spans),
            len,
        }
    }

    /// Buffer length the model describes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of spans.
    #[inline]
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    /// Span `index` in buffer order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= span_count()`.
    #[inline]
    pub fn span(&self, index: usize) -> Span {
        self.spans.get(index, self.len)
    }

    /// All spans, in buffer order.
    pub fn spans(&self) -> impl DoubleEndedIterator<Item = Span> + ExactSizeIterator + '_ {
        self.spans_in(0..self.span_count())
    }

    /// Spans with index in `range`, in buffer order.
    pub fn spans_in(
        &self,
        range: Range<usize>,
    ) -> impl DoubleEndedIterator<Item = Span> + ExactSizeIterator + '_ {
        range.map(move |index| self.span(index))
    }

    /// Number of leading spans for which `pred` holds. `pred` must hold for
    /// a prefix of the spans and fail for the rest, as with
    /// [`slice::partition_point`].
    pub fn partition_point(&self, pred: impl Fn(&Span) -> bool) -> usize {
        self.spans.partition_point(self.len, pred)
    }

    /// State after the last byte of the buffer.
    pub fn end_state(&self) -> LexicalState {
        self.spans
            .last(self.len)
            .map_or(LexicalState::FreeCode, |span| span.exit_state())
    }

    /// Apply an edit that has already happened to the buffer.
    ///
    /// `text` is the buffer *after* the edit: `removed_len` bytes at
    /// `offset` were replaced by `inserted`.
    ///
    /// # Panics
    ///
    /// Panics if the removed range lies outside the old buffer or `text`
    /// does not have the post-edit length.
    pub fn apply_edit(
        &mut self,
        text: &str,
        offset: u32,
        removed_len: u32,
        inserted: &str,
    ) -> EditStats {
        let inserted_len = to_offset(inserted.len());
        assert!(
            offset <= self.len && removed_len <= self.len - offset,
            "edit at {offset} removing {removed_len} out of range for buffer of length {}",
            self.len
        );
        let new_len = self.len - removed_len + inserted_len;
        assert_eq!(
            text.len(),
            new_len as usize,
            "post-edit text length does not match the edit"
        );
        debug_assert_eq!(
            text.get(offset as usize..(offset + inserted_len) as usize),
            Some(inserted),
            "post-edit text does not contain the inserted text at {offset}"
        );

        let first = if offset == 0 || self.spans.is_empty() {
            0
        } else {
            self.span_index(offset - 1)
        };
        let old_len = self.len;
        self.spans.move_gap(first, old_len);
        let SpanGap { head, tail } = &mut self.spans;
        let (restart, entering) = match tail.last() {
            Some(t) => (old_len - t.from_end, t.state),
            None => (0, LexicalState::FreeCode),
        };

        // Old spans past the gap keep their distance from the end of the
        // buffer. One whose start lies at or after the removed range is a
        // resync candidate once the scan reaches it; anything the scan has
        // passed is replaced.
        let edit_end = offset + inserted_len;
        let mut scanner = StateScanner::new(Cursor::at(text.as_bytes(), restart), entering);
        let mut scanned_spans = 0;
        let mut replaced_spans = 0;
        let mut resynced = false;
        while let Some(raw) = scanner.next_span() {
            let pos = scanner.pos();
            head.push(Span {
                start: pos - raw.len,
                len: raw.len,
                kind: raw.kind,
                state: raw.state,
            });
            scanned_spans += 1;
            if pos < edit_end {
                continue;
            }
            let from_end = new_len - pos;
            while tail.last().is_some_and(|t| t.from_end > from_end) {
                tail.pop();
                replaced_spans += 1;
            }
            if let Some(old) = tail.last() {
                if old.from_end == from_end && old.state == scanner.state() {
                    resynced = true;
                    break;
                }
            }
        }
        if !resynced {
            replaced_spans += tail.len();
            tail.clear();
        }
        self.len = new_len;

        let stats = EditStats {
            restart,
            replaced_spans,
            scanned_spans,
            resynced,
        };
        tracing::trace!(
            offset,
            removed_len,
            inserted_len,
            restart = stats.restart,
            replaced = stats.replaced_spans,
            scanned = stats.scanned_spans,
            resynced = stats.resynced,
            "re-scanned edit"
        );
        stats
    }

    // ─── Point Queries ────────────────────────────────────────────

    /// Index of the span containing `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= len()`.
    pub fn span_index(&self, offset: u32) -> usize {
        assert!(
            offset < self.len,
            "offset {offset} out of range for buffer of length {}",
            self.len
        );
        self.partition_point(|s| s.end() <= offset)
    }

    /// The span containing `offset`, or `None` at end of buffer.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len()`.
    pub fn span_at(&self, offset: u32) -> Option<Span> {
        self.check_offset(offset);
        if offset == self.len {
            return None;
        }
        Some(self.span(self.span_index(offset)))
    }

    /// State after consuming bytes `[0, offset)`.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len()`.
    pub fn state_at(&self, offset: u32) -> LexicalState {
        self.span_at(offset)
            .map_or_else(|| self.end_state(), |span| span.state)
    }

    /// Inside a line or block comment.
    pub fn is_inside_comment(&self, offset: u32) -> bool {
        self.state_at(offset).is_comment()
    }

    /// Inside a block comment. The `/` and `*` of the opener are not.
    pub fn is_inside_block_comment(&self, offset: u32) -> bool {
        self.state_at(offset) == LexicalState::BlockComment
    }

    /// Inside a line comment.
    pub fn is_inside_line_comment(&self, offset: u32) -> bool {
        self.state_at(offset) == LexicalState::LineComment
    }

    /// Inside a single- or double-quoted literal.
    pub fn is_inside_string(&self, offset: u32) -> bool {
        self.state_at(offset).is_string()
    }

    /// Strictly inside a comment or literal: the opening delimiter itself
    /// is not shadowed.
    pub fn is_shadowed(&self, offset: u32) -> bool {
        self.state_at(offset).is_shadowed()
    }

    /// Shadowed, or part of the delimiter that opens a comment or literal.
    pub fn is_weakly_shadowed(&self, offset: u32) -> bool {
        match self.span_at(offset) {
            Some(span) => span.state.is_shadowed() || span.kind.opens_shadow(span.state),
            None => self.end_state().is_shadowed(),
        }
    }

    /// The brace at `offset`, if it is a brace in free code.
    pub fn brace_at(&self, offset: u32) -> Option<Brace> {
        match self.span_at(offset)?.kind {
            SpanKind::Brace(brace) => Some(brace),
            _ => None,
        }
    }

    /// All braces in free code, in buffer order.
    pub fn brace_marks(&self) -> impl Iterator<Item = BraceMark> + '_ {
        self.spans().filter_map(|span| match span.kind {
            SpanKind::Brace(brace) => Some(BraceMark {
                offset: span.start,
                brace,
            }),
            _ => None,
        })
    }

    /// Offset of the `/*` that opened the block comment containing `offset`.
    pub fn enclosing_comment_start(&self, offset: u32) -> Option<u32> {
        if !self.is_inside_block_comment(offset) {
            return None;
        }
        let upto = if offset == self.len {
            self.spans.len()
        } else {
            self.span_index(offset)
        };
        let opener = self
            .spans_in(0..upto)
            .rev()
            .find(|s| s.state != LexicalState::BlockComment)?;
        (opener.kind == SpanKind::BlockCommentStart).then_some(opener.start)
    }

    fn check_offset(&self, offset: u32) {
        assert!(
            offset <= self.len,
            "offset {offset} out of range for buffer of length {}",
            self.len
        );
    }
}

/// Convert a buffer length to a `u32` offset.
///
/// # Panics
///
/// Panics for buffers larger than `u32::MAX` bytes.
fn to_offset(len: usize) -> u32 {
    match u32::try_from(len) {
        Ok(len) => len,
        Err(_) => panic!("buffers larger than 4 GiB are not supported"),
    }
}
