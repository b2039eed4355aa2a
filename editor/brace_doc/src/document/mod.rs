//! The document service.
//!
//! A [`Document`] owns the text buffer, the reduced model describing it,
//! the anchor arena and the regions, all behind one readers/writer lock.
//! Any number of readers may query a [`DocumentView`] at once; an edit takes
//! the lock exclusively, so no reader ever sees text and model out of step.
//!
//! Listeners are called synchronously after each change, once the state
//! lock has been released, so a callback may read the document. Callbacks
//! must not subscribe or unsubscribe while being dispatched.

use parking_lot::RwLock;

use brace_indent::{compute_indent, CancelFlag, IndentConfig, IndentEngine, ReplacementEdits};
use brace_reduced::{
    DelimiterNavigator, LexicalState, LineBounds, LineClassifier, LineFlags, ReducedModel,
};

use crate::anchor::{Anchor, AnchorArena, Bias};
use crate::buffer::{StringBuffer, TextBuffer};
use crate::error::DocumentError;
use crate::event::{DocumentEvent, ListenerId, Listeners};
use crate::region::{Region, RegionManager};

/// State guarded by the document lock.
#[derive(Debug)]
struct DocState<B> {
    buffer: B,
    model: ReducedModel,
    anchors: AnchorArena,
    regions: RegionManager,
    config: IndentConfig,
}

impl<B: TextBuffer> DocState<B> {
    fn len(&self) -> u32 {
        self.model.len()
    }

    fn check_offset(&self, offset: u32) -> Result<(), DocumentError> {
        if offset > self.len() {
            return Err(DocumentError::OutOfRange {
                offset,
                doc_len: self.len(),
            });
        }
        if !self.buffer.as_str().is_char_boundary(offset as usize) {
            return Err(DocumentError::NotCharBoundary { offset });
        }
        Ok(())
    }

    fn check_edit(&self, offset: u32, len: u32, inserted: &str) -> Result<(), DocumentError> {
        let doc_len = self.len();
        if offset > doc_len || len > doc_len - offset {
            return Err(DocumentError::InvalidEdit {
                offset,
                len,
                doc_len,
            });
        }
        self.check_offset(offset)?;
        self.check_offset(offset + len)?;
        let new_len = u64::from(doc_len - len) + inserted.len() as u64;
        if new_len > u64::from(u32::MAX) {
            return Err(DocumentError::TooLarge { max: u32::MAX });
        }
        Ok(())
    }

    /// Apply a validated edit to every part of the state.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "new length checked against u32::MAX in check_edit"
    )]
    fn apply(&mut self, offset: u32, removed_len: u32, inserted: &str) -> DocumentEvent {
        let inserted_len = inserted.len() as u32;
        self.buffer.replace(offset, removed_len, inserted);
        self.model
            .apply_edit(self.buffer.as_str(), offset, removed_len, inserted);
        self.anchors.apply_edit(offset, removed_len, inserted_len);
        self.regions.apply_edit(offset, removed_len, inserted_len);
        DocumentEvent::Edited {
            offset,
            removed_len,
            inserted: inserted.to_owned(),
        }
    }

    fn view(&self) -> DocumentView<'_> {
        DocumentView {
            text: self.buffer.as_str(),
            model: &self.model,
            regions: &self.regions,
            config: self.config,
        }
    }
}

/// An editable document.
#[derive(Debug)]
pub struct Document<B: TextBuffer = StringBuffer> {
    state: RwLock<DocState<B>>,
    listeners: RwLock<Listeners>,
}

impl Document<StringBuffer> {
    /// A document holding `text`, with the default indent configuration.
    ///
    /// # Panics
    ///
    /// Panics if `text` is larger than `u32::MAX` bytes.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_buffer(StringBuffer::new(text), IndentConfig::default())
    }
}

impl<B: TextBuffer> Document<B> {
    /// # Panics
    ///
    /// Panics if the buffer is larger than `u32::MAX` bytes.
    pub fn with_buffer(buffer: B, config: IndentConfig) -> Self {
        let model = ReducedModel::classify(buffer.as_str());
        Self {
            state: RwLock::new(DocState {
                buffer,
                model,
                anchors: AnchorArena::new(),
                regions: RegionManager::new(),
                config,
            }),
            listeners: RwLock::new(Listeners::new()),
        }
    }

    pub fn config(&self) -> IndentConfig {
        self.state.read().config
    }

    pub fn set_config(&self, config: IndentConfig) {
        self.state.write().config = config;
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.state.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy of the whole text.
    pub fn text(&self) -> String {
        self.state.read().buffer.as_str().to_owned()
    }

    /// Run read-only queries against a consistent snapshot.
    ///
    /// The read lock is held for the duration of `f`; edits wait.
    pub fn read<R>(&self, f: impl FnOnce(&DocumentView<'_>) -> R) -> R {
        let state = self.state.read();
        f(&state.view())
    }

    // ─── Editing ──────────────────────────────────────────────────

    pub fn insert(&self, offset: u32, text: &str) -> Result<(), DocumentError> {
        self.replace(offset, 0, text)
    }

    pub fn remove(&self, offset: u32, len: u32) -> Result<(), DocumentError> {
        self.replace(offset, len, "")
    }

    /// Replace `len` bytes at `offset` with `text`.
    pub fn replace(&self, offset: u32, len: u32, text: &str) -> Result<(), DocumentError> {
        let event = {
            let mut state = self.state.write();
            state.check_edit(offset, len, text)?;
            if len == 0 && text.is_empty() {
                return Ok(());
            }
            state.apply(offset, len, text)
        };
        self.dispatch(&event);
        Ok(())
    }

    // ─── Indentation ──────────────────────────────────────────────

    /// Indentation edits for the lines from `start` to `end`, in current
    /// coordinates. Nothing is applied.
    pub fn compute_indent(&self, start: u32, end: u32) -> Result<ReplacementEdits, DocumentError> {
        let state = self.state.read();
        state.check_offset(start)?;
        state.check_offset(end)?;
        Ok(compute_indent(
            state.buffer.as_str(),
            &state.model,
            start,
            end,
            state.config,
        ))
    }

    /// Re-indent every line from the one containing `start` to the one
    /// containing `end`, one line per write lock.
    ///
    /// `cancel` is polled before each line. On cancellation the lines
    /// already re-indented stay re-indented and [`DocumentError::Cancelled`]
    /// reports how far it got. Returns the number of lines visited.
    pub fn indent_lines(
        &self,
        start: u32,
        end: u32,
        cancel: Option<&CancelFlag>,
    ) -> Result<usize, DocumentError> {
        let (cursor, last, total) = {
            let mut state = self.state.write();
            state.check_offset(start)?;
            state.check_offset(end)?;
            let bounds = LineBounds::new(state.buffer.as_str());
            let first = bounds.line_start(start.min(end));
            let last = bounds.line_start(end.max(start));
            let total = state
                .buffer
                .slice(first, last)
                .bytes()
                .filter(|&b| b == b'\n')
                .count()
                + 1;
            (
                state.anchors.create(first, Bias::Left),
                state.anchors.create(last, Bias::Left),
                total,
            )
        };

        let mut completed = 0;
        let result = loop {
            if cancel.is_some_and(CancelFlag::is_cancelled) {
                tracing::debug!(completed, total, "indentation cancelled");
                break Err(DocumentError::Cancelled { completed, total });
            }
            let step = self.indent_next_line(cursor, last);
            completed += 1;
            match step {
                Ok((event, more)) => {
                    if let Some(event) = event {
                        self.dispatch(&event);
                    }
                    if !more {
                        break Ok(completed);
                    }
                }
                Err(err) => break Err(err),
            }
        };

        let mut state = self.state.write();
        state.anchors.release(cursor);
        state.anchors.release(last);
        result
    }

    /// Re-indent the line at `cursor` and advance it. Returns the edit
    /// event, if any, and whether lines remain.
    fn indent_next_line(
        &self,
        cursor: Anchor,
        last: Anchor,
    ) -> Result<(Option<DocumentEvent>, bool), DocumentError> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let line = state.anchors.get(cursor).ok_or(DocumentError::StaleAnchor)?;
        let last_line = state.anchors.get(last).ok_or(DocumentError::StaleAnchor)?;

        let edit = {
            let text = state.buffer.as_str();
            let lines = LineClassifier::new(text, &state.model);
            if lines.line_flags(line).contains(LineFlags::BLANK) {
                None
            } else {
                IndentEngine::new(text, &state.model, state.config).indent_line(line)
            }
        };
        let event = edit.map(|e| state.apply(e.start, e.removed_len(), &e.new_text));

        let next = (line < last_line)
            .then(|| LineBounds::new(state.buffer.as_str()).next_line_start(line))
            .flatten();
        if let Some(next) = next {
            state.anchors.set(cursor, next);
        }
        Ok((event, next.is_some()))
    }

    /// Re-indent the line containing `cursor`. Returns the new cursor.
    ///
    /// A cursor in the leading whitespace moves to the first
    /// non-whitespace character; one further right keeps its place
    /// relative to the line content.
    pub fn indent_line_at_cursor(&self, cursor: u32) -> Result<u32, DocumentError> {
        let (event, cursor) = {
            let mut guard = self.state.write();
            let state = &mut *guard;
            state.check_offset(cursor)?;
            let placed = IndentEngine::new(state.buffer.as_str(), &state.model, state.config)
                .indent_line_with_cursor(cursor);
            let event = placed
                .edit
                .map(|e| state.apply(e.start, e.removed_len(), &e.new_text));
            (event, placed.cursor)
        };
        if let Some(event) = event {
            self.dispatch(&event);
        }
        Ok(cursor)
    }

    // ─── Anchors ──────────────────────────────────────────────────

    /// An elastic position at `offset` that follows later edits.
    pub fn create_anchor(&self, offset: u32, bias: Bias) -> Result<Anchor, DocumentError> {
        let mut state = self.state.write();
        state.check_offset(offset)?;
        Ok(state.anchors.create(offset, bias))
    }

    pub fn anchor_offset(&self, anchor: Anchor) -> Result<u32, DocumentError> {
        self.state
            .read()
            .anchors
            .get(anchor)
            .ok_or(DocumentError::StaleAnchor)
    }

    pub fn release_anchor(&self, anchor: Anchor) -> Result<(), DocumentError> {
        if self.state.write().anchors.release(anchor) {
            Ok(())
        } else {
            Err(DocumentError::StaleAnchor)
        }
    }

    // ─── Regions ──────────────────────────────────────────────────

    /// Add the inclusive region `[start, end]`, or return the equal region
    /// already present.
    pub fn add_region(&self, start: u32, end: u32) -> Result<Region, DocumentError> {
        let (region, added) = {
            let mut state = self.state.write();
            state.check_offset(start)?;
            state.check_offset(end)?;
            if start > end {
                return Err(DocumentError::InvalidEdit {
                    offset: start,
                    len: 0,
                    doc_len: state.len(),
                });
            }
            state.regions.add(Region::new(start, end))
        };
        if added {
            self.dispatch(&DocumentEvent::RegionAdded(region));
        }
        Ok(region)
    }

    /// Remove every region equal to `region`. Returns how many were removed.
    pub fn remove_region(&self, region: Region) -> usize {
        let removed = self.state.write().regions.remove(region);
        if removed > 0 {
            self.dispatch(&DocumentEvent::RegionRemoved(region));
        }
        removed
    }

    pub fn region_at(&self, offset: u32) -> Option<Region> {
        self.state.read().regions.region_at(offset)
    }

    pub fn regions(&self) -> Vec<Region> {
        self.state.read().regions.regions().to_vec()
    }

    // ─── Listeners ────────────────────────────────────────────────

    pub fn subscribe(
        &self,
        callback: impl Fn(&DocumentEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.write().subscribe(callback)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.listeners.write().unsubscribe(id)
    }

    fn dispatch(&self, event: &DocumentEvent) {
        self.listeners.read().dispatch(event);
    }
}

/// Read-only snapshot of a document, valid inside [`Document::read`].
#[derive(Clone, Copy, Debug)]
pub struct DocumentView<'a> {
    text: &'a str,
    model: &'a ReducedModel,
    regions: &'a RegionManager,
    config: IndentConfig,
}

impl<'a> DocumentView<'a> {
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.model.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    #[inline]
    pub fn model(&self) -> &'a ReducedModel {
        self.model
    }

    pub fn state_at(&self, offset: u32) -> LexicalState {
        self.model.state_at(offset)
    }

    pub fn is_inside_comment(&self, offset: u32) -> bool {
        self.model.is_inside_comment(offset)
    }

    pub fn is_inside_block_comment(&self, offset: u32) -> bool {
        self.model.is_inside_block_comment(offset)
    }

    pub fn is_inside_line_comment(&self, offset: u32) -> bool {
        self.model.is_inside_line_comment(offset)
    }

    pub fn is_inside_string(&self, offset: u32) -> bool {
        self.model.is_inside_string(offset)
    }

    pub fn is_shadowed(&self, offset: u32) -> bool {
        self.model.is_shadowed(offset)
    }

    pub fn is_weakly_shadowed(&self, offset: u32) -> bool {
        self.model.is_weakly_shadowed(offset)
    }

    pub fn region_at(&self, offset: u32) -> Option<Region> {
        self.regions.region_at(offset)
    }

    pub fn navigator(&self) -> DelimiterNavigator<'a> {
        DelimiterNavigator::new(self.text, self.model)
    }

    pub fn lines(&self) -> LineClassifier<'a> {
        LineClassifier::new(self.text, self.model)
    }

    pub fn indent_engine(&self) -> IndentEngine<'a> {
        IndentEngine::new(self.text, self.model, self.config)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
