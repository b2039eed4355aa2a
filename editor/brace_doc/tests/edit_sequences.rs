//! Random edit sequences against a document.
//!
//! After every edit the model must equal a fresh classification of the text,
//! and anchors must keep their relative order.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use brace_doc::{Bias, Document};
use brace_reduced::ReducedModel;
use proptest::prelude::*;

const ALPHABET: &[&str] = &["a", " ", "\n", "/", "*", "\"", "'", "\\", "{", "}", "(", ")"];

fn fragment() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(ALPHABET), 0..6)
        .prop_map(|parts| parts.concat())
}

#[derive(Debug, Clone)]
struct Edit {
    at: usize,
    remove: usize,
    insert: String,
}

fn edit() -> impl Strategy<Value = Edit> {
    (0usize..256, 0usize..6, fragment()).prop_map(|(at, remove, insert)| Edit {
        at,
        remove,
        insert,
    })
}

proptest! {
    #[test]
    fn document_model_matches_fresh_scan(
        start in fragment(),
        edits in prop::collection::vec(edit(), 1..24),
    ) {
        let doc = Document::new(start);
        for e in &edits {
            let len = doc.len() as usize;
            let offset = e.at % (len + 1);
            let remove = e.remove.min(len - offset);
            doc.replace(offset as u32, remove as u32, &e.insert).unwrap();
            doc.read(|view| {
                prop_assert_eq!(view.model(), &ReducedModel::classify(view.text()));
                Ok(())
            })?;
        }
    }

    #[test]
    fn anchors_keep_order(
        start in fragment(),
        edits in prop::collection::vec(edit(), 1..16),
    ) {
        let doc = Document::new(format!("{start}0123456789"));
        let anchors: Vec<_> = (0..=doc.len())
            .map(|o| doc.create_anchor(o, Bias::Right).unwrap())
            .collect();
        for e in &edits {
            let len = doc.len() as usize;
            let offset = e.at % (len + 1);
            let remove = e.remove.min(len - offset);
            doc.replace(offset as u32, remove as u32, &e.insert).unwrap();
        }
        let offsets: Vec<u32> = anchors.iter().map(|&a| doc.anchor_offset(a).unwrap()).collect();
        prop_assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(offsets.iter().all(|&o| o <= doc.len()));
    }
}

#[test]
fn indent_then_edit_stays_consistent() {
    let doc = Document::new("int f() {\nif (x) {\n/* a\n* b */\ny(\"}\");\n}\n}\n");
    doc.indent_lines(0, doc.len(), None).unwrap();
    assert_eq!(
        doc.text(),
        "int f() {\n  if (x) {\n    /* a\n     * b */\n    y(\"}\");\n  }\n}\n"
    );
    doc.insert(0, "//").unwrap();
    doc.read(|view| {
        assert_eq!(view.model(), &ReducedModel::classify(view.text()));
        assert!(view.is_inside_line_comment(5));
    });
}
