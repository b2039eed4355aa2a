//! Replacement edits produced by the indent engine.
//!
//! Edits are accumulated and then applied in reverse order (from end to
//! start) so that applying one never invalidates the offsets of the others.

use std::fmt;

/// Replace bytes `[start, end)` with `new_text`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TextEdit {
    pub start: u32,
    pub end: u32,
    pub new_text: String,
}

impl TextEdit {
    /// Create a replacement edit.
    pub fn replace(start: u32, end: u32, new_text: impl Into<String>) -> Self {
        debug_assert!(start <= end, "edit range {start}..{end} is reversed");
        TextEdit {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    /// Number of bytes removed.
    #[inline]
    pub fn removed_len(&self) -> u32 {
        self.end - self.start
    }

    /// Get the length change this edit would cause.
    ///
    /// Positive = text grows, negative = text shrinks.
    pub fn length_delta(&self) -> i64 {
        let removed = i64::from(self.removed_len());
        let added = i64::try_from(self.new_text.len()).unwrap_or(i64::MAX);
        added - removed
    }
}

/// A batch of non-overlapping edits in the coordinates of one text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplacementEdits {
    edits: Vec<TextEdit>,
}

impl ReplacementEdits {
    pub fn new() -> Self {
        ReplacementEdits { edits: Vec::new() }
    }

    /// Add an edit.
    pub fn push(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// The edits in the order they were added.
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Net change in text length once every edit is applied.
    pub fn length_delta(&self) -> i64 {
        self.edits.iter().map(TextEdit::length_delta).sum()
    }

    /// Apply all edits to `source` and return the modified text.
    ///
    /// # Panics
    ///
    /// Panics if an edit range is out of bounds or splits a character.
    pub fn apply(&self, source: &str) -> String {
        if self.edits.is_empty() {
            return source.to_string();
        }

        let mut sorted: Vec<&TextEdit> = self.edits.iter().collect();
        sorted.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

        let mut result = source.to_string();
        for edit in sorted {
            result.replace_range(edit.start as usize..edit.end as usize, &edit.new_text);
        }
        result
    }
}

impl IntoIterator for ReplacementEdits {
    type Item = TextEdit;
    type IntoIter = std::vec::IntoIter<TextEdit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReplacementEdits {
    type Item = &'a TextEdit;
    type IntoIter = std::slice::Iter<'a, TextEdit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}

impl fmt::Display for TextEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} -> {:?}", self.start, self.end, self.new_text)
    }
}
