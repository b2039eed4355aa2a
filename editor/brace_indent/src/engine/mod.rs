//! Indentation engine.
//!
//! Computes replacement leading whitespace for a line by running the rules
//! in [`rules`] top to bottom; the first that applies wins. The engine only
//! reads: it returns [`TextEdit`]s and leaves applying them to the caller.

pub mod rules;

use brace_reduced::{
    BraceKind, DelimiterNavigator, LineBounds, LineClassifier, LineFlags, ReducedModel,
};

use crate::config::IndentConfig;
use crate::edit::{ReplacementEdits, TextEdit};
use rules::{CommentContinuationRule, DelimiterRule, PreviousLineRule};

/// What a line's indentation was derived from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Continuation of the block comment opened at `offset`.
    CommentOpener { offset: u32 },
    /// Inside the unmatched opener at `offset`.
    OpenDelimiter { offset: u32, kind: BraceKind },
    /// The line starts with the closer of the opener at `offset`.
    CloseDelimiter { offset: u32, kind: BraceKind },
    /// Copied from the code line starting at `line`.
    PreviousLine { line: u32 },
    /// Nothing to copy from: no indentation.
    DocumentStart,
}

/// The indentation decided for one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndentInfo {
    pub anchor: Anchor,
    /// Leading whitespace the line should have.
    pub indent: String,
}

/// Line start and first non-whitespace offset of the line being indented.
#[derive(Clone, Copy, Debug)]
pub struct Line {
    pub start: u32,
    pub first: u32,
}

/// Result of re-indenting the line under a cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorIndent {
    /// `None` when the line already has the right indentation.
    pub edit: Option<TextEdit>,
    /// Cursor offset after the edit is applied.
    pub cursor: u32,
}

/// Indentation queries over one buffer state.
pub struct IndentEngine<'a> {
    text: &'a str,
    model: &'a ReducedModel,
    lines: LineClassifier<'a>,
    nav: DelimiterNavigator<'a>,
    config: IndentConfig,
}

impl<'a> IndentEngine<'a> {
    /// # Panics
    ///
    /// Panics if `model` does not describe `text`.
    pub fn new(text: &'a str, model: &'a ReducedModel, config: IndentConfig) -> Self {
        Self {
            text,
            model,
            lines: LineClassifier::new(text, model),
            nav: DelimiterNavigator::new(text, model),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> IndentConfig {
        self.config
    }

    /// Decide the indentation of the line containing `pos`.
    pub fn indent_info(&self, pos: u32) -> IndentInfo {
        let line = self.line(pos);
        let info = CommentContinuationRule::apply(self, line)
            .or_else(|| DelimiterRule::apply(self, line))
            .unwrap_or_else(|| PreviousLineRule::apply(self, line));
        tracing::trace!(
            line = line.start,
            anchor = ?info.anchor,
            width = info.indent.len(),
            "indent decision"
        );
        info
    }

    /// The edit that re-indents the line containing `pos`, or `None` if the
    /// line is already indented correctly.
    pub fn indent_line(&self, pos: u32) -> Option<TextEdit> {
        let line = self.line(pos);
        let info = self.indent_info(pos);
        let current = &self.text[line.start as usize..line.first as usize];
        (current != info.indent).then(|| TextEdit::replace(line.start, line.first, info.indent))
    }

    /// Re-indent the line containing `cursor` and place the cursor.
    ///
    /// A cursor in the leading whitespace moves to the new first
    /// non-whitespace character. A cursor further right keeps its distance
    /// from the line content, shifting by the change in whitespace length.
    pub fn indent_line_with_cursor(&self, cursor: u32) -> CursorIndent {
        let line = self.line(cursor);
        let edit = self.indent_line(cursor);
        let old_ws = line.first - line.start;
        let new_ws = match &edit {
            Some(e) => u32::try_from(e.new_text.len()).unwrap_or(u32::MAX),
            None => old_ws,
        };
        CursorIndent {
            edit,
            cursor: place_cursor(cursor, line.start, old_ws, new_ws),
        }
    }

    fn line(&self, pos: u32) -> Line {
        let bounds = self.lines.bounds();
        Line {
            start: bounds.line_start(pos),
            first: bounds.first_non_ws(pos),
        }
    }

    fn byte_at(&self, offset: u32) -> Option<u8> {
        self.text.as_bytes().get(offset as usize).copied()
    }
}

/// Cursor offset after the leading whitespace of the line at `line_start`
/// changes from `old_ws` to `new_ws` bytes.
pub fn place_cursor(cursor: u32, line_start: u32, old_ws: u32, new_ws: u32) -> u32 {
    if cursor <= line_start + old_ws {
        line_start + new_ws
    } else {
        cursor - old_ws + new_ws
    }
}

/// Re-indent every line from the one containing `start` to the one
/// containing `end`.
///
/// Lines are indented top to bottom on a working copy, so each line sees
/// the already re-indented lines above it. The returned edits are in the
/// coordinates of `text` and never overlap. Blank lines are left alone.
pub fn compute_indent(
    text: &str,
    model: &ReducedModel,
    start: u32,
    end: u32,
    config: IndentConfig,
) -> ReplacementEdits {
    let bounds = LineBounds::new(text);
    let last = bounds.line_start(end);
    let mut work = text.to_owned();
    let mut work_model = model.clone();
    let mut edits = ReplacementEdits::new();
    let mut delta = 0i64;
    let mut line = bounds.line_start(start);

    loop {
        let work_line = shift(line, delta);
        let edit = {
            let engine = IndentEngine::new(&work, &work_model, config);
            let flags = engine.lines.line_flags(work_line);
            if flags.contains(LineFlags::BLANK) {
                None
            } else {
                engine.indent_line(work_line)
            }
        };
        if let Some(edit) = edit {
            delta += edit.length_delta();
            apply_to_working_copy(&mut work, &mut work_model, &edit);
            edits.push(TextEdit::replace(
                line,
                line + edit.removed_len(),
                edit.new_text,
            ));
        }
        if line >= last {
            break;
        }
        match bounds.next_line_start(line) {
            Some(next) => line = next,
            None => break,
        }
    }
    tracing::debug!(start, end, edits = edits.len(), "computed indentation");
    edits
}

fn shift(offset: u32, delta: i64) -> u32 {
    u32::try_from(i64::from(offset) + delta).unwrap_or(u32::MAX)
}

fn apply_to_working_copy(text: &mut String, model: &mut ReducedModel, edit: &TextEdit) {
    text.replace_range(edit.start as usize..edit.end as usize, &edit.new_text);
    model.apply_edit(text, edit.start, edit.removed_len(), &edit.new_text);
}

#[cfg(test)]
mod tests;
