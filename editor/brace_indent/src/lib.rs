//! Indentation for C-family editor buffers.
//!
//! The engine reads a buffer and its [`ReducedModel`](brace_reduced::ReducedModel)
//! and proposes new leading whitespace per line. Nothing here mutates a
//! document: results are [`TextEdit`]s that the caller applies as ordinary
//! replace operations on the buffer.
//!
//! # Example
//!
//! ```
//! use brace_indent::{compute_indent, IndentConfig};
//! use brace_reduced::ReducedModel;
//!
//! let text = "f() {\nx;\n}\n";
//! let model = ReducedModel::classify(text);
//! let edits = compute_indent(text, &model, 0, 10, IndentConfig::default());
//! assert_eq!(edits.apply(text), "f() {\n  x;\n}\n");
//! ```

pub mod cancel;
pub mod config;
pub mod edit;
pub mod engine;

pub use cancel::CancelFlag;
pub use config::IndentConfig;
pub use edit::{ReplacementEdits, TextEdit};
pub use engine::{compute_indent, place_cursor, Anchor, CursorIndent, IndentEngine, IndentInfo};
