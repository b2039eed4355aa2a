use std::io::Write as _;

use pretty_assertions::assert_eq;

use super::*;

fn run(f: impl FnOnce(&mut Vec<u8>) -> Result<(), CommandError>) -> String {
    let mut out = Vec::new();
    f(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn classify_dumps_spans() {
    let report = run(|out| classify("a{}\n", out));
    assert_eq!(
        report,
        "4 bytes, 4 spans\n\
         \x20    0     1  free          text\n\
         \x20    1     1  free          brace {\n\
         \x20    2     1  free          brace }\n\
         \x20    3     1  free          newline\n\
         end state: free\n"
    );
}

#[test]
fn classify_reports_open_comment() {
    let report = run(|out| classify("x /* open", out));
    assert!(report.ends_with("end state: block-comment\n"), "{report}");
}

#[test]
fn indent_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("f.c");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"f() {\nx;\n}\n").unwrap();
    drop(file);

    let text = read_source(&path).unwrap();
    let config = parse_indent_options(&["--indent=4".to_owned()]).unwrap();
    let report = run(|out| indent(&text, config, out));
    assert_eq!(report, "f() {\n    x;\n}\n");
}

#[test]
fn missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.c");
    let err = read_source(&path).unwrap_err();
    assert!(matches!(err, CommandError::Io { .. }));
    assert!(err.to_string().contains("missing.c"));
}

#[test]
fn indent_options() {
    assert_eq!(parse_indent_options(&[]).unwrap(), IndentConfig::default());
    assert!(matches!(
        parse_indent_options(&["--indent=x".to_owned()]),
        Err(CommandError::Usage(_))
    ));
    assert!(matches!(
        parse_indent_options(&["--tabs".to_owned()]),
        Err(CommandError::Usage(_))
    ));
}

#[test]
fn match_reports_pairs() {
    let text = "f(a[1]) { }";
    assert_eq!(run(|out| match_brace(text, "7", out)), "1 6\n");
    assert_eq!(run(|out| match_brace(text, "8", out)), "8 10\n");
    assert_eq!(run(|out| match_brace(text, "2", out)), "no match\n");
}

#[test]
fn bad_offsets() {
    let mut out = Vec::new();
    assert!(matches!(
        match_brace("abc", "4", &mut out),
        Err(CommandError::BadOffset { .. })
    ));
    assert!(matches!(
        state("abc", "-1", &mut out),
        Err(CommandError::BadOffset { .. })
    ));
    assert!(out.is_empty());
}

#[test]
fn state_reports_shadowing() {
    let text = "x /* y */";
    assert_eq!(
        run(|out| state(text, "5", out)),
        "state: block-comment\nshadowed: true\nweakly shadowed: true\n"
    );
    assert_eq!(
        run(|out| state(text, "2", out)),
        "state: free\nshadowed: false\nweakly shadowed: true\n"
    );
}
