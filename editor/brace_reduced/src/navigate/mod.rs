//! Delimiter navigation over the reduced model.
//!
//! Every scan here walks *code* bytes only: free-code text, newlines and
//! braces. Bytes inside comments and literals, and the delimiters that open
//! or close them, are never seen, so a `}` in `// }` or `"}"` cannot affect
//! a match. Reaching either end of the buffer is an ordinary `None`.

use smallvec::SmallVec;

use brace_lexer_core::{BraceKind, SpanKind};

use crate::model::{BraceMark, ReducedModel, Span};

/// A matched pair of braces, both offsets pointing at the brace bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BraceMatch {
    pub open: u32,
    pub close: u32,
}

/// Brace matching and delimiter search for one buffer state.
///
/// Borrows the text and the model describing it; both must be from the same
/// edit generation.
#[derive(Clone, Copy, Debug)]
pub struct DelimiterNavigator<'a> {
    text: &'a [u8],
    model: &'a ReducedModel,
}

impl<'a> DelimiterNavigator<'a> {
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
            text: text.as_bytes(),
            model,
        }
    }

    /// Find the closer matching the opener at `pos`.
    ///
    /// The scan starts after `pos` with depth 1; each `open` increments and
    /// each `close` decrements. Returns the offset *after* the closer that
    /// brings the depth to 0.
    pub fn match_forward(&self, pos: u32, open: u8, close: u8) -> Option<u32> {
        self.check_offset(pos);
        let mut depth = 1usize;
        for (offset, b) in self.code_forward(pos.saturating_add(1)) {
            if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    return Some(offset + 1);
                }
            }
        }
        None
    }

    /// Find the opener matching the closer just before `pos`.
    ///
    /// Returns the offset of the opener.
    pub fn match_backward(&self, pos: u32, open: u8, close: u8) -> Option<u32> {
        self.check_offset(pos);
        if pos == 0 {
            return None;
        }
        let mut depth = 1usize;
        for (offset, b) in self.code_backward(pos - 1) {
            if b == close {
                depth += 1;
            } else if b == open {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
        }
        None
    }

    /// The nearest `open` before `pos` that is not closed before `pos`.
    pub fn find_enclosing_brace(&self, pos: u32, open: u8, close: u8) -> Option<u32> {
        self.check_offset(pos);
        let mut depth = 0usize;
        for (offset, b) in self.code_backward(pos) {
            if b == close {
                depth += 1;
            } else if b == open {
                if depth == 0 {
                    return Some(offset);
                }
                depth -= 1;
            }
        }
        None
    }

    /// The nearest unmatched opener of any kind before `pos`.
    ///
    /// Closers seen on the way back are kept on a stack. An opener of the
    /// same kind as the top pops it, and an opener whose kind is deeper in
    /// the stack discards the stray closers above it. An opener whose kind
    /// is not on the stack at all is unmatched, so the closers pending above
    /// it were stray and it encloses `pos`.
    pub fn find_enclosing(&self, pos: u32) -> Option<BraceMark> {
        self.check_offset(pos);
        let upto = self.model.partition_point(|s| s.start < pos);
        let mut pending: SmallVec<[BraceKind; 16]> = SmallVec::new();
        for span in self.model.spans_in(0..upto).rev() {
            let SpanKind::Brace(brace) = span.kind else {
                continue;
            };
            if !brace.is_open {
                pending.push(brace.kind);
                continue;
            }
            let Some(depth) = pending.iter().rposition(|&k| k == brace.kind) else {
                return Some(BraceMark {
                    offset: span.start,
                    brace,
                });
            };
            pending.truncate(depth);
        }
        None
    }

    /// The nearest byte from `delims` before `pos`.
    ///
    /// With `skip_paren_phrases`, a parenthesised group that closes before
    /// `pos` is stepped over as a unit, so the `;` in a `for (..;..;..)`
    /// header is not reported.
    pub fn find_prev_delimiter(
        &self,
        pos: u32,
        delims: &[u8],
        skip_paren_phrases: bool,
    ) -> Option<u32> {
        self.check_offset(pos);
        let mut parens = 0usize;
        for (offset, b) in self.code_backward(pos) {
            if skip_paren_phrases {
                match b {
                    b')' => {
                        parens += 1;
                        continue;
                    }
                    b'(' if parens > 0 => {
                        parens -= 1;
                        continue;
                    }
                    _ if parens > 0 => continue,
                    _ => {}
                }
            }
            if delims.contains(&b) {
                return Some(offset);
            }
        }
        None
    }

    /// Bracket-highlight query for a caret at `pos`.
    ///
    /// A closer just before the caret takes precedence over an opener at
    /// the caret.
    pub fn brace_match_at(&self, pos: u32) -> Option<BraceMatch> {
        self.check_offset(pos);
        let before = (pos > 0)
            .then(|| self.model.brace_at(pos - 1))
            .flatten()
            .filter(|b| !b.is_open)
            .and_then(|b| self.match_backward(pos, b.kind.open(), b.kind.close()))
            .map(|open| BraceMatch {
                open,
                close: pos - 1,
            });
        before.or_else(|| {
            let brace = self.model.brace_at(pos).filter(|b| b.is_open)?;
            let after = self.match_forward(pos, brace.kind.open(), brace.kind.close())?;
            Some(BraceMatch {
                open: pos,
                close: after - 1,
            })
        })
    }

    // ─── Code Byte Iteration ──────────────────────────────────────

    /// Code bytes at or after `from`, in buffer order.
    fn code_forward(&self, from: u32) -> impl Iterator<Item = (u32, u8)> + '_ {
        let first = self.model.partition_point(|s| s.end() <= from);
        self.model
            .spans_in(first..self.model.span_count())
            .filter(Span::is_code)
            .flat_map(move |s: Span| {
                (s.start.max(from)..s.end())
                    .map(move |o| (o, self.byte(o)))
            })
    }

    /// Code bytes strictly before `before`, nearest first.
    fn code_backward(&self, before: u32) -> impl Iterator<Item = (u32, u8)> + '_ {
        let upto = self.model.partition_point(|s| s.start < before);
        self.model
            .spans_in(0..upto)
            .rev()
            .filter(Span::is_code)
            .flat_map(move |s: Span| {
                (s.start..s.end().min(before))
                    .rev()
                    .map(move |o| (o, self.byte(o)))
            })
    }

    #[inline]
    fn byte(&self, offset: u32) -> u8 {
        self.text[offset as usize]
    }

    fn check_offset(&self, pos: u32) {
        assert!(
            pos <= self.model.len(),
            "offset {pos} out of range for buffer of length {}",
            self.model.len()
        );
    }
}
