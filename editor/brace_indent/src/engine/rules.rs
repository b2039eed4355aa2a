//! The indentation rules, in the order the engine tries them.
//!
//! Each rule looks at one line and either decides its indentation or
//! passes. The first rule that decides wins.
//!
//! 1. **`CommentContinuationRule`**: line starts inside a block comment
//! 2. **`DelimiterRule`**: line is enclosed by an unmatched `(`, `[` or `{`
//! 3. **`PreviousLineRule`**: copy the nearest earlier code line

use brace_reduced::LexicalState;

use super::{Anchor, IndentEngine, IndentInfo, Line};

/// A line that starts inside a block comment.
///
/// The first non-whitespace character goes one column right of the `/` of
/// the `/*` that opened the comment, so a leading `*` lines up under the
/// opener's `*`:
///
/// ```text
/// /**
///  * text
///  */
/// ```
pub struct CommentContinuationRule;

impl CommentContinuationRule {
    pub fn apply(engine: &IndentEngine<'_>, line: Line) -> Option<IndentInfo> {
        if engine.model.state_at(line.start) != LexicalState::BlockComment {
            return None;
        }
        let open = engine.model.enclosing_comment_start(line.start)?;
        let bounds = engine.lines.bounds();
        let opener_first = bounds.first_non_ws(open);
        let width = engine.text[opener_first as usize..open as usize]
            .chars()
            .count();
        let mut indent = bounds.leading_ws_text(open).to_owned();
        indent.extend(std::iter::repeat(' ').take(width + 1));
        Some(IndentInfo {
            anchor: Anchor::CommentOpener { offset: open },
            indent,
        })
    }
}

/// A line inside an unmatched opener.
///
/// Indents one level deeper than the opener's line. A line that begins with
/// the matching closer lines up with the opener's line instead.
pub struct DelimiterRule;

impl DelimiterRule {
    pub fn apply(engine: &IndentEngine<'_>, line: Line) -> Option<IndentInfo> {
        let mark = engine.nav.find_enclosing(line.start)?;
        let opener_ws = engine.lines.bounds().leading_ws_text(mark.offset);
        let kind = mark.brace.kind;
        if engine.byte_at(line.first) == Some(kind.close()) {
            return Some(IndentInfo {
                anchor: Anchor::CloseDelimiter {
                    offset: mark.offset,
                    kind,
                },
                indent: opener_ws.to_owned(),
            });
        }
        Some(IndentInfo {
            anchor: Anchor::OpenDelimiter {
                offset: mark.offset,
                kind,
            },
            indent: format!("{opener_ws}{}", engine.config.level()),
        })
    }
}

/// Top level: copy the indentation of the nearest earlier line that is not
/// blank, a line comment or inside a block comment.
pub struct PreviousLineRule;

impl PreviousLineRule {
    pub fn apply(engine: &IndentEngine<'_>, line: Line) -> IndentInfo {
        match engine.lines.prev_code_line(line.start) {
            Some(prev) => IndentInfo {
                anchor: Anchor::PreviousLine { line: prev },
                indent: engine.lines.bounds().leading_ws_text(prev).to_owned(),
            },
            None => IndentInfo {
                anchor: Anchor::DocumentStart,
                indent: String::new(),
            },
        }
    }
}
