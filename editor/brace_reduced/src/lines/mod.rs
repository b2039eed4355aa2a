//! Line-oriented facts: line boundaries and per-line classification.
//!
//! [`LineBounds`] is pure byte arithmetic over the text. [`LineClassifier`]
//! adds the reduced model so a line can be recognised as blank, a line
//! comment, or a continuation of a block comment. The indent engine skips
//! such lines when it looks for an anchor to copy indentation from.

use bitflags::bitflags;
use memchr::{memchr, memrchr};

use brace_lexer_core::classify::is_indent_byte;
use brace_lexer_core::{LexicalState, SpanKind};

use crate::model::ReducedModel;

/// Line boundary lookup over a text buffer.
///
/// Lines end at `\n`; the newline belongs to the line it ends. All
/// functions accept any offset in `[0, len]`.
#[derive(Clone, Copy, Debug)]
pub struct LineBounds<'a> {
    text: &'a [u8],
}

impl<'a> LineBounds<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
        }
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "buffer length checked against u32::MAX by the reduced model"
    )]
    pub fn len(&self) -> u32 {
        self.text.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Start of the line containing `pos`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "newline index < len, which fits in u32"
    )]
    pub fn line_start(&self, pos: u32) -> u32 {
        let pos = self.check_offset(pos);
        memrchr(b'\n', &self.text[..pos as usize])
            .map_or(0, |nl| nl as u32 + 1)
    }

    /// Offset of the `\n` ending the line containing `pos`, or the buffer
    /// length on the last line.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "newline index < len, which fits in u32"
    )]
    pub fn line_end(&self, pos: u32) -> u32 {
        let pos = self.check_offset(pos);
        memchr(b'\n', &self.text[pos as usize..])
            .map_or(self.len(), |nl| pos + nl as u32)
    }

    /// First byte on the line containing `pos` that is not a space or tab.
    /// Equals [`line_end`](Self::line_end) for a blank line.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "run length < len, which fits in u32"
    )]
    pub fn first_non_ws(&self, pos: u32) -> u32 {
        let start = self.line_start(pos);
        let end = self.line_end(pos);
        let ws = self.text[start as usize..end as usize]
            .iter()
            .take_while(|&&b| is_indent_byte(b))
            .count();
        start + ws as u32
    }

    /// Length of the leading whitespace of the line containing `pos`.
    pub fn leading_ws(&self, pos: u32) -> u32 {
        self.first_non_ws(pos) - self.line_start(pos)
    }

    /// The leading whitespace text of the line containing `pos`.
    pub fn leading_ws_text(&self, pos: u32) -> &'a str {
        let start = self.line_start(pos) as usize;
        let end = self.first_non_ws(pos) as usize;
        // Spaces and tabs only, so always valid UTF-8.
        std::str::from_utf8(&self.text[start..end]).unwrap_or_default()
    }

    /// Start of the line before the one containing `pos`.
    pub fn prev_line_start(&self, pos: u32) -> Option<u32> {
        let start = self.line_start(pos);
        (start > 0).then(|| self.line_start(start - 1))
    }

    /// Start of the line after the one containing `pos`.
    pub fn next_line_start(&self, pos: u32) -> Option<u32> {
        let end = self.line_end(pos);
        (end < self.len()).then_some(end + 1)
    }

    /// Column of `pos` in bytes from its line start.
    pub fn column(&self, pos: u32) -> u32 {
        pos - self.line_start(pos)
    }

    fn check_offset(&self, pos: u32) -> u32 {
        assert!(
            pos <= self.len(),
            "offset {pos} out of range for buffer of length {}",
            self.len()
        );
        pos
    }
}

bitflags! {
    /// What kind of non-code content a line holds.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LineFlags: u8 {
        /// Only spaces and tabs.
        const BLANK = 1 << 0;
        /// The first non-whitespace text opens a `//` comment.
        const LINE_COMMENT = 1 << 1;
        /// The line starts inside a block comment.
        const IN_BLOCK_COMMENT = 1 << 2;
        /// Any of the above: the line carries no code to indent against.
        const IGNORABLE = Self::BLANK.bits()
            | Self::LINE_COMMENT.bits()
            | Self::IN_BLOCK_COMMENT.bits();
    }
}

impl LineFlags {
    #[inline]
    pub fn is_ignorable(self) -> bool {
        self.intersects(LineFlags::IGNORABLE)
    }
}

/// Per-line classification backed by the reduced model.
#[derive(Clone, Copy, Debug)]
pub struct LineClassifier<'a> {
    bounds: LineBounds<'a>,
    model: &'a ReducedModel,
}

impl<'a> LineClassifier<'a> {
    /// # Panics
    ///
    /// Panics if `model` does not describe a buffer of `text.len()` bytes.
    pub fn new(text: &'a str, model: &'a ReducedModel) -> Self {
        assert_eq!(
            text.len(),
            model.len() as usize,
            "reduced model is out of date with the text"
        );
        Self {
            bounds: LineBounds::new(text),
            model,
        }
    }

    #[inline]
    pub fn bounds(&self) -> LineBounds<'a> {
        self.bounds
    }

    /// Classify the line containing `pos`.
    pub fn line_flags(&self, pos: u32) -> LineFlags {
        let start = self.bounds.line_start(pos);
        let first = self.bounds.first_non_ws(pos);
        let mut flags = LineFlags::empty();
        if self.model.state_at(start) == LexicalState::BlockComment {
            flags |= LineFlags::IN_BLOCK_COMMENT;
        }
        if first == self.bounds.line_end(pos) {
            flags |= LineFlags::BLANK;
        } else if let Some(span) = self.model.span_at(first) {
            if span.kind == SpanKind::LineCommentStart && span.state == LexicalState::FreeCode {
                flags |= LineFlags::LINE_COMMENT;
            }
        }
        flags
    }

    /// The previous line is a `//` comment with no code before it.
    pub fn is_prev_line_new_comment(&self, pos: u32) -> bool {
        self.prev_line_flags(pos)
            .is_some_and(|f| f.contains(LineFlags::LINE_COMMENT))
    }

    /// The first character of the previous line is inside a block comment.
    pub fn is_prev_line_in_block_comment(&self, pos: u32) -> bool {
        self.prev_line_flags(pos)
            .is_some_and(|f| f.contains(LineFlags::IN_BLOCK_COMMENT))
    }

    /// The previous line is blank, a line comment or inside a block comment.
    pub fn is_prev_line_ignorable(&self, pos: u32) -> bool {
        self.prev_line_flags(pos)
            .is_some_and(LineFlags::is_ignorable)
    }

    /// Start of the nearest line before the one containing `pos` that is
    /// not ignorable.
    pub fn prev_code_line(&self, pos: u32) -> Option<u32> {
        let mut line = self.bounds.prev_line_start(pos)?;
        loop {
            if !self.line_flags(line).is_ignorable() {
                return Some(line);
            }
            line = self.bounds.prev_line_start(line)?;
        }
    }

    fn prev_line_flags(&self, pos: u32) -> Option<LineFlags> {
        self.bounds
            .prev_line_start(pos)
            .map(|line| self.line_flags(line))
    }
}
