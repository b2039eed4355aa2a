//! Span storage split at a movable gap.
//!
//! Spans before the gap store their absolute start. Spans after it store
//! their distance from the end of the buffer, which an edit in front of
//! them leaves unchanged. An edit therefore only touches spans next to the
//! gap, and moving the gap costs one step per span it passes, so typing near
//! the previous edit never walks the rest of the buffer.

use brace_lexer_core::{LexicalState, SpanKind};

use super::Span;

/// A span after the gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct TailSpan {
    /// Buffer length minus the span start.
    pub from_end: u32,
    pub len: u32,
    pub kind: SpanKind,
    pub state: LexicalState,
}

impl TailSpan {
    #[inline]
    fn resolve(self, buf_len: u32) -> Span {
        Span {
            start: buf_len - self.from_end,
            len: self.len,
            kind: self.kind,
            state: self.state,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub(super) struct SpanGap {
    /// Spans before the gap, in buffer order.
    pub head: Vec<Span>,
    /// Spans after the gap, nearest the gap last.
    pub tail: Vec<TailSpan>,
}

impl SpanGap {
    pub fn from_spans(head: Vec<Span>) -> Self {
        Self {
            head,
            tail: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_empty() && self.tail.is_empty()
    }

    /// Span `index` in buffer order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize, buf_len: u32) -> Span {
        match index.checked_sub(self.head.len()) {
            None => self.head[index],
            Some(j) => self.tail_at(j).resolve(buf_len),
        }
    }

    /// Tail span `j` counting from the gap.
    #[inline]
    fn tail_at(&self, j: usize) -> TailSpan {
        self.tail[self.tail.len() - 1 - j]
    }

    pub fn last(&self, buf_len: u32) -> Option<Span> {
        match self.tail.first() {
            Some(t) => Some(t.resolve(buf_len)),
            None => self.head.last().copied(),
        }
    }

    /// Number of leading spans for which `pred` holds. `pred` must be true
    /// for a prefix of the spans and false for the rest.
    pub fn partition_point(&self, buf_len: u32, pred: impl Fn(&Span) -> bool) -> usize {
        let in_head = self.head.partition_point(&pred);
        if in_head < self.head.len() {
            return in_head;
        }
        let (mut lo, mut hi) = (0, self.tail.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if pred(&self.tail_at(mid).resolve(buf_len)) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        self.head.len() + lo
    }

    /// Move the gap so that exactly `index` spans precede it.
    pub fn move_gap(&mut self, index: usize, buf_len: u32) {
        debug_assert!(
            index <= self.len(),
            "gap index {index} past {} spans",
            self.len()
        );
        while self.head.len() > index {
            let Some(s) = self.head.pop() else { break };
            self.tail.push(TailSpan {
                from_end: buf_len - s.start,
                len: s.len,
                kind: s.kind,
                state: s.state,
            });
        }
        while self.head.len() < index {
            let Some(t) = self.tail.pop() else { break };
            self.head.push(t.resolve(buf_len));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_span(start: u32, len: u32) -> Span {
        Span {
            start,
            len,
            kind: SpanKind::Text,
            state: LexicalState::FreeCode,
        }
    }

    fn three() -> SpanGap {
        SpanGap::from_spans(vec![text_span(0, 2), text_span(2, 3), text_span(5, 1)])
    }

    #[test]
    fn moving_the_gap_keeps_order() {
        let mut gap = three();
        gap.move_gap(1, 6);
        assert_eq!(gap.head.len(), 1);
        assert_eq!(gap.tail.len(), 2);
        let spans: Vec<Span> = (0..gap.len()).map(|i| gap.get(i, 6)).collect();
        assert_eq!(spans, three().head);
        assert_eq!(gap.last(6), Some(text_span(5, 1)));
        gap.move_gap(3, 6);
        assert_eq!(gap.head, three().head);
    }

    #[test]
    fn tail_follows_length_change() {
        let mut gap = three();
        gap.move_gap(1, 6);
        // Four bytes inserted in front of the tail.
        assert_eq!(gap.get(1, 10), text_span(6, 3));
        assert_eq!(gap.get(2, 10), text_span(9, 1));
    }

    #[test]
    fn partition_point_spans_the_gap() {
        let mut gap = three();
        for index in 0..=3 {
            gap.move_gap(index, 6);
            assert_eq!(gap.partition_point(6, |s| s.end() <= 1), 0);
            assert_eq!(gap.partition_point(6, |s| s.end() <= 4), 1);
            assert_eq!(gap.partition_point(6, |s| s.end() <= 5), 2);
            assert_eq!(gap.partition_point(6, |s| s.end() <= 6), 3);
        }
    }
}
