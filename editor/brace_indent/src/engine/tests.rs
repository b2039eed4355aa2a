use super::*;
use pretty_assertions::assert_eq;

fn info(text: &str, pos: u32) -> IndentInfo {
    let model = ReducedModel::classify(text);
    IndentEngine::new(text, &model, IndentConfig::default()).indent_info(pos)
}

fn indent_all(text: &str, config: IndentConfig) -> String {
    let model = ReducedModel::classify(text);
    let end = u32::try_from(text.len()).unwrap_or(u32::MAX);
    compute_indent(text, &model, 0, end, config).apply(text)
}

fn with_cursor(text: &str, cursor: u32) -> CursorIndent {
    let model = ReducedModel::classify(text);
    IndentEngine::new(text, &model, IndentConfig::default()).indent_line_with_cursor(cursor)
}

// === Comment Continuation ===

#[test]
fn comment_continuation_aligns_under_opener_star() {
    let text = "/**\n* doc\n*/\nx";
    let got = info(text, 5);
    assert_eq!(got.anchor, Anchor::CommentOpener { offset: 0 });
    assert_eq!(got.indent, " ");
}

#[test]
fn comment_continuation_follows_opener_column() {
    let text = "  int a; /* note\nmore */";
    let got = info(text, 18);
    assert_eq!(got.anchor, Anchor::CommentOpener { offset: 9 });
    // Two spaces of indentation, seven columns of code, then one.
    assert_eq!(got.indent, "          ");
}

#[test]
fn comment_rule_wins_over_enclosing_brace() {
    let text = "{\n  /*\nx\n*/\n}";
    assert_eq!(info(text, 7).indent, "   ");
}

// === Delimiters ===

#[test]
fn hanging_indent_inside_parens() {
    let text = "  foo(a,\nb);";
    let got = info(text, 9);
    assert_eq!(
        got.anchor,
        Anchor::OpenDelimiter {
            offset: 5,
            kind: BraceKind::Paren
        }
    );
    assert_eq!(got.indent, "    ");
}

#[test]
fn closing_paren_aligns_with_opener_line() {
    let text = "  foo(\na\n)";
    let got = info(text, 9);
    assert_eq!(
        got.anchor,
        Anchor::CloseDelimiter {
            offset: 5,
            kind: BraceKind::Paren
        }
    );
    assert_eq!(got.indent, "  ");
}

#[test]
fn brace_body_and_closer() {
    let text = "{\nx;\n}";
    assert_eq!(info(text, 2).indent, "  ");
    let closer = info(text, 5);
    assert_eq!(
        closer.anchor,
        Anchor::CloseDelimiter {
            offset: 0,
            kind: BraceKind::Curly
        }
    );
    assert_eq!(closer.indent, "");
}

#[test]
fn mismatched_closer_is_indented_as_body() {
    let text = "{\n)";
    assert_eq!(info(text, 2).indent, "  ");
}

#[test]
fn stray_closer_does_not_hide_enclosing_brace() {
    let text = "{\na);\nb;\n}\n";
    assert_eq!(
        info(text, 6).anchor,
        Anchor::OpenDelimiter {
            offset: 0,
            kind: BraceKind::Curly
        }
    );
    assert_eq!(
        indent_all(text, IndentConfig::default()),
        "{\n  a);\n  b;\n}\n"
    );
}

#[test]
fn shadowed_braces_do_not_count() {
    let text = "  x = \"{\"; // (\ny;";
    let got = info(text, 17);
    assert_eq!(got.anchor, Anchor::PreviousLine { line: 0 });
    assert_eq!(got.indent, "  ");
}

#[test]
fn configured_indent_size() {
    let text = "{\nx;\n}";
    assert_eq!(
        indent_all(text, IndentConfig::with_indent_size(4)),
        "{\n    x;\n}"
    );
}

// === Previous Line ===

#[test]
fn copies_nearest_code_line() {
    let text = "  a;\n\n// c\nb;";
    let got = info(text, 11);
    assert_eq!(got.anchor, Anchor::PreviousLine { line: 0 });
    assert_eq!(got.indent, "  ");
}

#[test]
fn document_start_has_no_indent() {
    let got = info("   x", 3);
    assert_eq!(got.anchor, Anchor::DocumentStart);
    assert_eq!(got.indent, "");
}

// === Whole Buffer ===

const UNINDENTED: &str =
    "class A {\nint f(int a,\nint b);\nvoid g() {\nreturn; // }\n}\n/* note\nstill\n*/\n}\n";

const INDENTED: &str = "class A {\n  int f(int a,\n    int b);\n  void g() {\n    return; // }\n  }\n  /* note\n   still\n   */\n}\n";

#[test]
fn compute_indent_whole_buffer() {
    assert_eq!(indent_all(UNINDENTED, IndentConfig::default()), INDENTED);
}

#[test]
fn compute_indent_edits_are_in_original_coordinates() {
    let model = ReducedModel::classify(UNINDENTED);
    let end = u32::try_from(UNINDENTED.len()).unwrap_or(u32::MAX);
    let edits = compute_indent(UNINDENTED, &model, 0, end, IndentConfig::default());
    let edits = edits.edits();
    assert!(edits.windows(2).all(|w| w[0].end <= w[1].start));
    assert_eq!(edits[0], TextEdit::replace(10, 10, "  "));
    assert_eq!(edits[1], TextEdit::replace(23, 23, "    "));
}

#[test]
fn indented_buffer_is_a_fixed_point() {
    let model = ReducedModel::classify(INDENTED);
    let end = u32::try_from(INDENTED.len()).unwrap_or(u32::MAX);
    let edits = compute_indent(INDENTED, &model, 0, end, IndentConfig::default());
    assert!(edits.is_empty());
}

#[test]
fn compute_indent_line_range() {
    // Only the `return` line; `void g() {` keeps its original indentation.
    let model = ReducedModel::classify(UNINDENTED);
    let edits = compute_indent(UNINDENTED, &model, 42, 42, IndentConfig::default());
    assert_eq!(edits.edits(), &[TextEdit::replace(42, 42, "  ")]);
}

#[test]
fn blank_lines_are_left_alone() {
    assert_eq!(
        indent_all("{\n\n   \nx\n}", IndentConfig::default()),
        "{\n\n   \n  x\n}"
    );
}

#[test]
fn tabs_are_replaced() {
    assert_eq!(
        indent_all("{\n\tx;\n}", IndentConfig::default()),
        "{\n  x;\n}"
    );
}

// === Cursor Placement ===

const GROW: &str = "public class Foo {\n int foo;\n";
const SHRINK: &str = "public class Foo {\n   int foo;\n";
const NO_OP: &str = "public class Foo {\n  int foo;\n";

#[test]
fn grow_cursor_at_line_start() {
    let got = with_cursor(GROW, 19);
    assert_eq!(got.edit, Some(TextEdit::replace(19, 20, "  ")));
    assert_eq!(got.cursor, 21);
}

#[test]
fn grow_cursor_mid_line() {
    assert_eq!(with_cursor(GROW, 23).cursor, 24);
}

#[test]
fn grow_cursor_end_of_line() {
    assert_eq!(with_cursor(GROW, 28).cursor, 29);
}

#[test]
fn shrink_cursor_positions() {
    assert_eq!(
        with_cursor(SHRINK, 19).edit,
        Some(TextEdit::replace(19, 22, "  "))
    );
    assert_eq!(with_cursor(SHRINK, 19).cursor, 21);
    assert_eq!(with_cursor(SHRINK, 21).cursor, 21);
    assert_eq!(with_cursor(SHRINK, 25).cursor, 24);
    assert_eq!(with_cursor(SHRINK, 30).cursor, 29);
}

#[test]
fn no_op_cursor_positions() {
    assert_eq!(
        with_cursor(NO_OP, 19),
        CursorIndent {
            edit: None,
            cursor: 21
        }
    );
    assert_eq!(with_cursor(NO_OP, 21).cursor, 21);
    assert_eq!(with_cursor(NO_OP, 24).cursor, 24);
    assert_eq!(with_cursor(NO_OP, 29).cursor, 29);
}

#[test]
fn place_cursor_policy() {
    assert_eq!(place_cursor(10, 10, 0, 4), 14);
    assert_eq!(place_cursor(12, 10, 2, 4), 14);
    assert_eq!(place_cursor(15, 10, 2, 4), 17);
    assert_eq!(place_cursor(15, 10, 4, 2), 13);
}
